//! The working form for bivariate GCD: sparse in the main variable,
//! dense in the second.
//!
//! A bivariate polynomial is regrouped as a list of
//! `(main exponent, dense coefficient)` terms in decreasing main
//! exponent, the coefficients being univariate polynomials in the
//! second variable. Evaluation maps this to a dense univariate image
//! and Newton interpolation lifts images back, one evaluation point at
//! a time.

use std::collections::BTreeMap;

use num_traits::Zero;
use quintus_rings::{Error, Integer, ModPoly, ModRing};

use crate::ctx::Ctx;
use crate::poly::MPoly;

/// Bivariate polynomial, sparse in variable 0, dense in variable 1.
#[derive(Clone, Debug)]
pub(crate) struct MPolyN {
    /// Decreasing main exponent, every coefficient nonzero.
    terms: Vec<(u64, ModPoly)>,
}

impl MPolyN {
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Regroups a bivariate [`MPoly`] by its variable-0 exponent.
    pub fn from_mpoly(ctx: &Ctx, p: &MPoly) -> Self {
        debug_assert_eq!(ctx.nvars(), 2);
        let ring = ctx.ring();
        let mut groups: BTreeMap<u64, Vec<(u64, Integer)>> = BTreeMap::new();
        for t in 0..p.len() {
            let degs = p.term_degrees(ctx, t);
            groups
                .entry(degs[0])
                .or_default()
                .push((degs[1], p.term_coeff(t).clone()));
        }
        let mut terms = Vec::with_capacity(groups.len());
        for (e, parts) in groups.into_iter().rev() {
            let deg = parts.iter().map(|&(d, _)| d).max().unwrap_or(0);
            let mut coeffs = vec![Integer::zero(); deg as usize + 1];
            for (d, c) in parts {
                coeffs[d as usize] = c;
            }
            terms.push((e, ModPoly::new(coeffs, ring)));
        }
        Self { terms }
    }

    /// Flattens back into the ring's canonical sparse form.
    pub fn to_mpoly(&self, ctx: &Ctx) -> Result<MPoly, Error> {
        let mut flat = Vec::new();
        for (e, c) in &self.terms {
            for (d, v) in c.coeffs().iter().enumerate() {
                if !v.is_zero() {
                    flat.push((v.clone(), vec![*e, d as u64]));
                }
            }
        }
        MPoly::from_terms(ctx, &flat)
    }

    /// Degree in the main variable. The zero polynomial reports -1.
    pub fn main_degree(&self) -> i64 {
        self.terms.first().map_or(-1, |&(e, _)| e as i64)
    }

    /// Largest degree in the dense variable over all coefficients.
    pub fn lastdeg(&self) -> i64 {
        self.terms.iter().map(|(_, c)| c.degree()).max().unwrap_or(-1)
    }

    /// The coefficient of the highest main-variable power.
    pub fn leading_coeff(&self) -> ModPoly {
        self.terms
            .first()
            .map_or_else(ModPoly::zero, |(_, c)| c.clone())
    }

    /// Evaluates the dense variable at `alpha`, leaving a dense
    /// univariate polynomial in the main variable.
    pub fn evaluate_dense(&self, ring: &ModRing, alpha: &Integer) -> ModPoly {
        let mut image = ModPoly::zero();
        for (e, c) in &self.terms {
            let v = c.evaluate(alpha, ring);
            if !v.is_zero() {
                image = image.add(&ModPoly::monomial(v, *e as usize, ring), ring);
            }
        }
        image
    }

    /// The content: monic gcd of all dense coefficients.
    pub fn content(&self, ring: &ModRing) -> Result<ModPoly, Error> {
        let mut g = ModPoly::zero();
        for (_, c) in &self.terms {
            g = g.gcd(c, ring)?;
            if g.degree() == 0 {
                break;
            }
        }
        Ok(g)
    }

    /// Divides every dense coefficient exactly by `d`.
    pub fn divexact_poly(&self, ring: &ModRing, d: &ModPoly) -> Result<Self, Error> {
        let mut terms = Vec::with_capacity(self.terms.len());
        for (e, c) in &self.terms {
            terms.push((*e, c.divexact(d, ring)?));
        }
        Ok(Self { terms })
    }

    /// Multiplies every dense coefficient by `m`.
    pub fn mul_poly(&self, ring: &ModRing, m: &ModPoly) -> Self {
        if m.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(e, c)| (*e, c.mul(m, ring)))
                .collect(),
        }
    }

    /// Starts an interpolation from a first univariate image: every
    /// coefficient becomes the constant matching the image.
    pub fn interp_lift(ring: &ModRing, u: &ModPoly) -> Self {
        let mut terms = Vec::new();
        for e in (0..u.coeffs().len()).rev() {
            let c = u.coeff(e);
            if !c.is_zero() {
                terms.push((e as u64, ModPoly::constant(c, ring)));
            }
        }
        Self { terms }
    }

    /// One Newton step: adjusts the coefficients so they also agree
    /// with the image `u` at the fresh point `alpha`, where `modulus`
    /// vanishes at every earlier point but not at `alpha`.
    ///
    /// Returns whether anything changed.
    pub fn interp_crt(
        &mut self,
        ring: &ModRing,
        modulus: &ModPoly,
        alpha: &Integer,
        u: &ModPoly,
    ) -> Result<bool, Error> {
        let minv = ring.inv(&modulus.evaluate(alpha, ring))?;
        let mut map: BTreeMap<u64, ModPoly> = self.terms.drain(..).collect();
        for (d, c) in u.coeffs().iter().enumerate() {
            if !c.is_zero() {
                map.entry(d as u64).or_insert_with(ModPoly::zero);
            }
        }

        let mut changed = false;
        let mut terms = Vec::with_capacity(map.len());
        for (e, cur) in map.into_iter().rev() {
            let have = cur.evaluate(alpha, ring);
            let want = u.coeff(e as usize);
            let delta = ring.sub(&want, &have);
            let next = if delta.is_zero() {
                cur
            } else {
                changed = true;
                cur.add(&modulus.mul_scalar(&ring.mul(&delta, &minv), ring), ring)
            };
            if !next.is_zero() {
                terms.push((e, next));
            }
        }
        self.terms = terms;
        Ok(changed)
    }
}
