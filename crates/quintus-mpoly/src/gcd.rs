//! Greatest common divisors by evaluation and interpolation.
//!
//! The bivariate case runs Brown's algorithm: strip the content in the
//! second variable, evaluate it away at a run of points, take dense
//! univariate GCDs of the images, and rebuild the result by Newton
//! interpolation. Points where the scaled leading coefficient vanishes
//! or an image degree drops are skipped; images of the wrong degree
//! either discard the point or restart the interpolation; a full
//! interpolation that fails the degree check starts over. Running out
//! of evaluation points (small modulus) reports
//! [`Error::EvaluationPointsExhausted`].
//!
//! Univariate inputs go through the dense representation directly.
//! More than two variables is out of scope and reports
//! [`Error::Unsupported`].
//!
//! The returned gcd is monic; cofactors are scaled to keep
//! `g * abar == a` and `g * bbar == b` exact.

use num_traits::{One, Zero};
use quintus_rings::{Error, Integer, ModPoly};

use crate::ctx::Ctx;
use crate::poly::MPoly;
use crate::univar::MPolyN;

impl MPoly {
    /// The monic greatest common divisor.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unsupported`] for more than two variables,
    /// [`Error::EvaluationPointsExhausted`] when the modulus offers too
    /// few evaluation points, and [`Error::NonInvertible`] when a
    /// needed inverse does not exist (composite modulus).
    pub fn gcd(&self, ctx: &Ctx, other: &Self) -> Result<Self, Error> {
        Ok(self.gcd_cofactors(ctx, other)?.0)
    }

    /// The monic gcd together with both cofactors:
    /// `(g, self / g, other / g)`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`MPoly::gcd`].
    pub fn gcd_cofactors(&self, ctx: &Ctx, other: &Self) -> Result<(Self, Self, Self), Error> {
        if self.is_zero() && other.is_zero() {
            let z = Self::zero(ctx);
            return Ok((z.clone(), z.clone(), z));
        }
        if self.is_zero() {
            let (g, bbar) = monic_split(ctx, other)?;
            return Ok((g, Self::zero(ctx), bbar));
        }
        if other.is_zero() {
            let (g, abar) = monic_split(ctx, self)?;
            return Ok((g, abar, Self::zero(ctx)));
        }
        if self.is_constant() || other.is_constant() {
            // a nonzero constant is a unit here, so the gcd is 1
            return Ok((Self::one(ctx), self.clone(), other.clone()));
        }
        match ctx.nvars() {
            1 => self.gcd_univar(ctx, other),
            2 => self.gcd_brown(ctx, other),
            _ => Err(Error::Unsupported("gcd beyond two variables")),
        }
    }

    fn gcd_univar(&self, ctx: &Ctx, other: &Self) -> Result<(Self, Self, Self), Error> {
        let ring = ctx.ring();
        let a = self.to_dense_univar(ctx);
        let b = other.to_dense_univar(ctx);
        let (g, abar, bbar) = a.gcd_cofactors(&b, ring)?;
        Ok((
            Self::from_dense_univar(ctx, &g)?,
            Self::from_dense_univar(ctx, &abar)?,
            Self::from_dense_univar(ctx, &bbar)?,
        ))
    }

    fn gcd_brown(&self, ctx: &Ctx, other: &Self) -> Result<(Self, Self, Self), Error> {
        let ring = ctx.ring();
        let an = MPolyN::from_mpoly(ctx, self);
        let bn = MPolyN::from_mpoly(ctx, other);

        // content in the dense variable comes out first and the gcd of
        // the contents goes back in at the end
        let c_a = an.content(ring)?;
        let c_b = bn.content(ring)?;
        let c_g = c_a.gcd(&c_b, ring)?;
        let c_abar = c_a.divexact(&c_g, ring)?;
        let c_bbar = c_b.divexact(&c_g, ring)?;
        let a = an.divexact_poly(ring, &c_a)?;
        let b = bn.divexact_poly(ring, &c_b)?;

        let gamma = a.leading_coeff().gcd(&b.leading_coeff(), ring)?;
        let bound = 1 + gamma.degree() + a.lastdeg().max(b.lastdeg());
        let (ldeg_a, ldeg_b) = (a.lastdeg(), b.lastdeg());

        let mut alpha = ring.modulus().clone();
        let one_poly = ModPoly::one(ring);
        let mut modulus = one_poly.clone();
        let mut gn = MPolyN::zero();
        let mut abar_n = MPolyN::zero();
        let mut bbar_n = MPolyN::zero();

        loop {
            // alpha walks n-1, n-2, ..., 0; zero is a usable point and
            // the supply runs out only below it
            alpha = alpha - Integer::one();
            if alpha.is_negative() {
                return Err(Error::EvaluationPointsExhausted);
            }

            let gamma_eval = gamma.evaluate(&alpha, ring);
            if gamma_eval.is_zero() {
                continue;
            }
            let a_eval = a.evaluate_dense(ring, &alpha);
            let b_eval = b.evaluate_dense(ring, &alpha);
            if a_eval.degree() < a.main_degree() || b_eval.degree() < b.main_degree() {
                continue;
            }

            let (g_eval, abar_eval, bbar_eval) = a_eval.gcd_cofactors(&b_eval, ring)?;
            let g_eval = g_eval.mul_scalar(&gamma_eval, ring);

            if g_eval.degree() == 0 {
                // primitive parts are coprime
                gn = MPolyN::interp_lift(ring, &one_poly);
                abar_n = a.clone();
                bbar_n = b.clone();
                break;
            }

            if modulus.degree() > 0 {
                match g_eval.degree().cmp(&gn.main_degree()) {
                    // this point sees a spuriously large gcd
                    std::cmp::Ordering::Greater => continue,
                    // every previous point was unlucky
                    std::cmp::Ordering::Less => modulus = one_poly.clone(),
                    std::cmp::Ordering::Equal => {}
                }
            }

            if modulus.degree() == 0 {
                gn = MPolyN::interp_lift(ring, &g_eval);
                abar_n = MPolyN::interp_lift(ring, &abar_eval);
                bbar_n = MPolyN::interp_lift(ring, &bbar_eval);
            } else {
                gn.interp_crt(ring, &modulus, &alpha, &g_eval)?;
                abar_n.interp_crt(ring, &modulus, &alpha, &abar_eval)?;
                bbar_n.interp_crt(ring, &modulus, &alpha, &bbar_eval)?;
            }
            let linear = ModPoly::new(vec![ring.neg(&alpha), ring.one()], ring);
            modulus = modulus.mul(&linear, ring);

            if modulus.degree() < bound {
                continue;
            }
            if gamma.degree() + ldeg_a == gn.lastdeg() + abar_n.lastdeg()
                && gamma.degree() + ldeg_b == gn.lastdeg() + bbar_n.lastdeg()
            {
                break;
            }
            // interpolated the wrong thing end to end: start over
            modulus = one_poly.clone();
        }

        // make the gcd primitive, fix the cofactor scaling, then put
        // the contents back
        let c_gn = gn.content(ring)?;
        let gn = gn.divexact_poly(ring, &c_gn)?;
        let lc_g = gn.leading_coeff();
        let abar_n = abar_n.divexact_poly(ring, &lc_g)?;
        let bbar_n = bbar_n.divexact_poly(ring, &lc_g)?;

        let g = gn.mul_poly(ring, &c_g).to_mpoly(ctx)?;
        let abar = abar_n.mul_poly(ring, &c_abar).to_mpoly(ctx)?;
        let bbar = bbar_n.mul_poly(ring, &c_bbar).to_mpoly(ctx)?;
        monic_triple(ctx, g, abar, bbar)
    }

    fn to_dense_univar(&self, ctx: &Ctx) -> ModPoly {
        debug_assert_eq!(ctx.nvars(), 1);
        let deg = self.degree(ctx, 0);
        if deg < 0 {
            return ModPoly::zero();
        }
        let mut coeffs = vec![Integer::zero(); deg as usize + 1];
        for t in 0..self.len() {
            let d = self.term_degrees(ctx, t)[0];
            coeffs[d as usize] = self.term_coeff(t).clone();
        }
        ModPoly::new(coeffs, ctx.ring())
    }

    fn from_dense_univar(ctx: &Ctx, p: &ModPoly) -> Result<Self, Error> {
        let terms: Vec<(Integer, Vec<u64>)> = p
            .coeffs()
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(d, c)| (c.clone(), vec![d as u64]))
            .collect();
        Self::from_terms(ctx, &terms)
    }
}

/// Splits a nonzero polynomial into its monic part and leading
/// coefficient: `p = monic(p) * lc(p)`.
fn monic_split(ctx: &Ctx, p: &MPoly) -> Result<(MPoly, MPoly), Error> {
    let lc = match p.leading_coeff() {
        Some(lc) => lc.clone(),
        None => unreachable!(),
    };
    Ok((p.make_monic(ctx)?, MPoly::constant(ctx, &lc)))
}

/// Rescales `(g, abar, bbar)` so `g` is monic while `g * abar` and
/// `g * bbar` stay fixed.
fn monic_triple(
    ctx: &Ctx,
    g: MPoly,
    abar: MPoly,
    bbar: MPoly,
) -> Result<(MPoly, MPoly, MPoly), Error> {
    let lc = match g.leading_coeff() {
        Some(lc) => lc.clone(),
        None => return Ok((g, abar, bbar)),
    };
    let inv = ctx.ring().inv(&lc)?;
    Ok((
        g.scalar_mul(ctx, &inv),
        abar.scalar_mul(ctx, &lc),
        bbar.scalar_mul(ctx, &lc),
    ))
}
