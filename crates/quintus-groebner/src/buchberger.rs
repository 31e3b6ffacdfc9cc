//! S-polynomials, normal forms and the Buchberger driver.
//!
//! The driver is deliberately naive: S-pairs are processed in index
//! order with no chain or product criteria, every nonzero reduced
//! S-polynomial joins the basis monic, and caller-supplied limits on
//! basis length and polynomial size bound the run on pathological
//! inputs. Over a field (prime modulus) this terminates with a
//! Groebner basis of the generated ideal; over a composite modulus a
//! needed leading-coefficient inverse may not exist, which surfaces as
//! [`Error::NonInvertible`].

use rustc_hash::FxHashSet;

use quintus_mpoly::{Ctx, MPoly};
use quintus_rings::Error;

use crate::ideal::PolyVec;

/// The S-polynomial of `f` and `g`: both are scaled onto the lcm of
/// their leading monomials so the leading terms cancel. Cross-leading
/// coefficients are used instead of inverses, so this never fails on
/// the coefficients.
///
/// # Errors
///
/// Fails with [`Error::Unsupported`] when the lcm exponent overflows
/// the largest packing width.
///
/// # Panics
///
/// Panics when either input is zero.
pub fn spoly(ctx: &Ctx, f: &MPoly, g: &MPoly) -> Result<MPoly, Error> {
    assert!(
        !f.is_zero() && !g.is_zero(),
        "s-polynomial of a zero polynomial"
    );
    let lf = f.term_degrees(ctx, 0);
    let lg = g.term_degrees(ctx, 0);
    let lcm: Vec<u64> = lf.iter().zip(&lg).map(|(&a, &b)| a.max(b)).collect();

    let cof_f: Vec<u64> = lcm.iter().zip(&lf).map(|(&m, &e)| m - e).collect();
    let cof_g: Vec<u64> = lcm.iter().zip(&lg).map(|(&m, &e)| m - e).collect();
    let lc_f = f.term_coeff(0).clone();
    let lc_g = g.term_coeff(0).clone();

    let mf = MPoly::from_terms(ctx, &[(lc_g, cof_f)])?;
    let mg = MPoly::from_terms(ctx, &[(lc_f, cof_g)])?;
    Ok(mf.mul(ctx, f)?.sub(ctx, &mg.mul(ctx, g)?))
}

/// Reduces `p` modulo a basis: the remainder of one multi-divisor
/// division, in which no remaining term is divisible by any basis
/// leading monomial.
///
/// # Errors
///
/// Fails with [`Error::NonInvertible`] when a basis leading
/// coefficient has no inverse.
pub fn normal_form(ctx: &Ctx, p: &MPoly, basis: &PolyVec) -> Result<MPoly, Error> {
    let mut divisors: Vec<MPoly> = basis.iter().filter(|d| !d.is_zero()).cloned().collect();
    if divisors.is_empty() {
        return Ok(p.clone());
    }
    divisors.shrink_to_fit();
    let (_, r) = p.divrem_ideal(ctx, &divisors)?;
    Ok(r)
}

/// Normal form followed by monic scaling (zero stays zero).
///
/// # Errors
///
/// Same failure modes as [`normal_form`], plus [`Error::NonInvertible`]
/// when the remainder's own leading coefficient has no inverse.
pub fn reduce_monic(ctx: &Ctx, p: &MPoly, basis: &PolyVec) -> Result<MPoly, Error> {
    let r = normal_form(ctx, p, basis)?;
    r.make_monic(ctx)
}

/// Buchberger's algorithm with no limits beyond memory.
///
/// # Errors
///
/// Same failure modes as [`buchberger_with_limits`], minus the
/// capacity failures.
pub fn buchberger(ctx: &Ctx, generators: &[MPoly]) -> Result<PolyVec, Error> {
    buchberger_with_limits(ctx, generators, usize::MAX, usize::MAX)
}

/// Buchberger's algorithm, bounded.
///
/// Grows a monic working basis from the generators by reducing
/// S-polynomials in pair-index order until every pair reduces to zero.
///
/// # Errors
///
/// Fails with [`Error::CapacityExceeded`] as soon as the basis would
/// exceed `ideal_len_limit` entries or a reduced S-polynomial would
/// exceed `poly_len_limit` terms, and with [`Error::NonInvertible`]
/// when a leading coefficient cannot be inverted.
pub fn buchberger_with_limits(
    ctx: &Ctx,
    generators: &[MPoly],
    ideal_len_limit: usize,
    poly_len_limit: usize,
) -> Result<PolyVec, Error> {
    let mut basis = PolyVec::new();
    for f in generators {
        if f.is_zero() {
            continue;
        }
        let f = f.make_monic(ctx)?;
        if basis.push_unique(ctx, f) && basis.len() > ideal_len_limit {
            return Err(Error::CapacityExceeded {
                limit: ideal_len_limit,
            });
        }
    }

    let mut queue: Vec<(usize, usize)> = Vec::new();
    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    for j in 1..basis.len() {
        for i in 0..j {
            seen.insert((i, j));
            queue.push((i, j));
        }
    }

    let mut next = 0;
    while next < queue.len() {
        let (i, j) = queue[next];
        next += 1;

        let s = spoly(ctx, &basis[i], &basis[j])?;
        let r = reduce_monic(ctx, &s, &basis)?;
        if r.len() > poly_len_limit {
            return Err(Error::CapacityExceeded {
                limit: poly_len_limit,
            });
        }
        if !basis.push_unique(ctx, r) {
            continue;
        }
        if basis.len() > ideal_len_limit {
            return Err(Error::CapacityExceeded {
                limit: ideal_len_limit,
            });
        }
        let k = basis.len() - 1;
        for i in 0..k {
            if seen.insert((i, k)) {
                queue.push((i, k));
            }
        }
    }
    Ok(basis)
}

/// Whether `basis` is a Groebner basis: every S-polynomial of a pair
/// reduces to zero, and, when `generators` is supplied, every
/// generator lies in the ideal of `basis`.
///
/// # Errors
///
/// Fails with [`Error::NonInvertible`] when a reduction needs an
/// inverse that does not exist.
pub fn is_groebner(
    ctx: &Ctx,
    basis: &PolyVec,
    generators: Option<&[MPoly]>,
) -> Result<bool, Error> {
    for j in 1..basis.len() {
        for i in 0..j {
            if basis[i].is_zero() || basis[j].is_zero() {
                continue;
            }
            let s = spoly(ctx, &basis[i], &basis[j])?;
            if !normal_form(ctx, &s, basis)?.is_zero() {
                return Ok(false);
            }
        }
    }
    if let Some(gens) = generators {
        for f in gens {
            if !normal_form(ctx, f, basis)?.is_zero() {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Whether every basis element reduces to itself (monic) modulo the
/// rest of the basis.
///
/// # Errors
///
/// Fails with [`Error::NonInvertible`] when a reduction needs an
/// inverse that does not exist.
pub fn is_autoreduced(ctx: &Ctx, basis: &PolyVec) -> Result<bool, Error> {
    for i in 0..basis.len() {
        let rest: Vec<MPoly> = basis
            .iter()
            .enumerate()
            .filter(|&(j, p)| j != i && !p.is_zero())
            .map(|(_, p)| p.clone())
            .collect();
        let r = reduce_monic(ctx, &basis[i], &PolyVec::from_vec(rest))?;
        if !r.equal(ctx, &basis[i]) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quintus_mpoly::MonomialOrder;
    use quintus_rings::Integer;

    fn z7() -> Ctx {
        Ctx::new(2, MonomialOrder::Lex, Integer::new(7))
    }

    fn mk(ctx: &Ctx, terms: &[(i64, [u64; 2])]) -> MPoly {
        let terms: Vec<(Integer, Vec<u64>)> = terms
            .iter()
            .map(|&(c, e)| (Integer::new(c), e.to_vec()))
            .collect();
        MPoly::from_terms(ctx, &terms).unwrap()
    }

    #[test]
    fn test_spoly_cancels_leading_terms() {
        let c = z7();
        // spoly(x^2 + y, xy - 1) = y(x^2 + y) - x(xy - 1) = y^2 + x
        let f = mk(&c, &[(1, [2, 0]), (1, [0, 1])]);
        let g = mk(&c, &[(1, [1, 1]), (-1, [0, 0])]);
        let s = spoly(&c, &f, &g).unwrap();
        assert!(s.equal(&c, &mk(&c, &[(1, [1, 0]), (1, [0, 2])])));
    }

    #[test]
    fn test_spoly_nonmonic_inputs() {
        let c = z7();
        // cross-leading-coefficient form needs no inverses
        let f = mk(&c, &[(3, [2, 0]), (1, [0, 0])]);
        let g = mk(&c, &[(2, [1, 1]), (5, [1, 0])]);
        let s = spoly(&c, &f, &g).unwrap();
        // 2y(3x^2 + 1) - 3x(2xy + 5x) = 2y - 15x^2 = 2y + 6x^2 mod 7
        assert!(s.equal(&c, &mk(&c, &[(6, [2, 0]), (2, [0, 1])])));
    }

    #[test]
    fn test_normal_form_empty_basis() {
        let c = z7();
        let p = mk(&c, &[(2, [1, 1])]);
        let r = normal_form(&c, &p, &PolyVec::new()).unwrap();
        assert!(r.equal(&c, &p));
    }

    #[test]
    fn test_buchberger_textbook() {
        let c = z7();
        // F = {x^2 + y, xy - 1}
        let f = vec![
            mk(&c, &[(1, [2, 0]), (1, [0, 1])]),
            mk(&c, &[(1, [1, 1]), (-1, [0, 0])]),
        ];
        let basis = buchberger(&c, &f).unwrap();
        assert!(basis.len() >= f.len());
        assert!(is_groebner(&c, &basis, Some(&f)).unwrap());

        // ideal membership: any combination of the generators reduces
        // to zero against the basis
        let prod = f[0].mul(&c, &f[1]).unwrap();
        assert!(normal_form(&c, &prod, &basis).unwrap().is_zero());
        let combo = f[0]
            .mul(&c, &MPoly::gen(&c, 1))
            .unwrap()
            .add(&c, &f[1]);
        assert!(normal_form(&c, &combo, &basis).unwrap().is_zero());
    }

    #[test]
    fn test_buchberger_already_groebner() {
        let c = z7();
        // {x, y} is its own Groebner basis
        let f = vec![MPoly::gen(&c, 0), MPoly::gen(&c, 1)];
        let basis = buchberger(&c, &f).unwrap();
        assert_eq!(basis.len(), 2);
        assert!(is_groebner(&c, &basis, Some(&f)).unwrap());
        assert!(is_autoreduced(&c, &basis).unwrap());
    }

    #[test]
    fn test_is_autoreduced_negative() {
        let c = z7();
        // x + y reduces modulo x, so the pair is not autoreduced
        let v = PolyVec::from_vec(vec![
            MPoly::gen(&c, 0),
            mk(&c, &[(1, [1, 0]), (1, [0, 1])]),
        ]);
        assert!(!is_autoreduced(&c, &v).unwrap());
    }

    #[test]
    fn test_ideal_len_limit() {
        let c = z7();
        let f = vec![
            mk(&c, &[(1, [2, 0]), (1, [0, 1])]),
            mk(&c, &[(1, [1, 1]), (-1, [0, 0])]),
        ];
        // the working basis needs a third element here
        assert!(matches!(
            buchberger_with_limits(&c, &f, 2, usize::MAX),
            Err(Error::CapacityExceeded { limit: 2 })
        ));
    }

    #[test]
    fn test_poly_len_limit() {
        let c = z7();
        let f = vec![
            mk(&c, &[(1, [2, 0]), (1, [0, 1])]),
            mk(&c, &[(1, [1, 1]), (-1, [0, 0])]),
        ];
        // the first surviving remainder has two terms
        assert!(matches!(
            buchberger_with_limits(&c, &f, usize::MAX, 1),
            Err(Error::CapacityExceeded { limit: 1 })
        ));
    }

    #[test]
    fn test_groebner_composite_modulus_fails() {
        let c = Ctx::new(2, MonomialOrder::Lex, Integer::new(6));
        let f = vec![
            mk(&c, &[(2, [1, 0]), (1, [0, 1])]),
            mk(&c, &[(3, [0, 1]), (1, [0, 0])]),
        ];
        assert!(matches!(
            buchberger(&c, &f),
            Err(Error::NonInvertible { .. })
        ));
    }
}
