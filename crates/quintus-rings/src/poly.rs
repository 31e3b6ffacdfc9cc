//! Dense univariate polynomials over a coefficient ring.
//!
//! This is the "coefficient ring of polynomials" the multivariate GCD
//! engine works in: the rest variable of a bivariate problem lives here
//! while the main variable is evaluated and interpolated.
//!
//! Coefficients are stored in ascending degree order with no trailing
//! zeros; the zero polynomial is the empty vector. Every operation is
//! written against the [`CoefficientRing`] seam and threads the ring
//! explicitly since the modulus (or whatever parametrizes the ring) is
//! dynamic; [`ModRing`](crate::ModRing) is the concrete ring in this
//! workspace.

use num_traits::Zero;

use crate::error::Error;
use crate::integer::Integer;
use crate::traits::CoefficientRing;

/// A dense univariate polynomial with [`Integer`] coefficients.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ModPoly {
    /// Coefficients in ascending degree order, reduced, no trailing zeros.
    coeffs: Vec<Integer>,
}

impl ModPoly {
    /// Creates a polynomial from coefficients in ascending degree order.
    ///
    /// Coefficients are reduced into the ring and trailing zeros removed.
    #[must_use]
    pub fn new<R: CoefficientRing<Elem = Integer>>(coeffs: Vec<Integer>, ring: &R) -> Self {
        let mut coeffs: Vec<Integer> = coeffs.iter().map(|c| ring.reduce(c)).collect();
        while coeffs.last().is_some_and(Integer::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one<R: CoefficientRing<Elem = Integer>>(ring: &R) -> Self {
        Self::constant(ring.one(), ring)
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant<R: CoefficientRing<Elem = Integer>>(c: Integer, ring: &R) -> Self {
        Self::new(vec![c], ring)
    }

    /// Creates the monomial `c * x^k`.
    #[must_use]
    pub fn monomial<R: CoefficientRing<Elem = Integer>>(c: Integer, k: usize, ring: &R) -> Self {
        let mut coeffs = vec![Integer::zero(); k + 1];
        coeffs[k] = c;
        Self::new(coeffs, ring)
    }

    /// Returns the degree; the zero polynomial has degree -1.
    #[must_use]
    pub fn degree(&self) -> i64 {
        self.coeffs.len() as i64 - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true if this is the constant polynomial 1.
    #[must_use]
    pub fn is_one<R: CoefficientRing<Elem = Integer>>(&self, ring: &R) -> bool {
        self.coeffs.len() == 1 && ring.is_one(&self.coeffs[0])
    }

    /// Returns the leading coefficient, or zero for the zero polynomial.
    #[must_use]
    pub fn leading_coeff(&self) -> Integer {
        self.coeffs.last().cloned().unwrap_or_else(Integer::zero)
    }

    /// Returns the coefficient of `x^i`.
    #[must_use]
    pub fn coeff(&self, i: usize) -> Integer {
        self.coeffs.get(i).cloned().unwrap_or_else(Integer::zero)
    }

    /// Returns all coefficients in ascending degree order.
    #[must_use]
    pub fn coeffs(&self) -> &[Integer] {
        &self.coeffs
    }

    /// Evaluates at a point by Horner's method.
    #[must_use]
    pub fn evaluate<R: CoefficientRing<Elem = Integer>>(&self, x: &Integer, ring: &R) -> Integer {
        let mut result = Integer::zero();
        for c in self.coeffs.iter().rev() {
            result = ring.add(&ring.mul(&result, x), c);
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add<R: CoefficientRing<Elem = Integer>>(&self, other: &Self, ring: &R) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);
        for i in 0..len {
            result.push(ring.add(&self.coeff(i), &other.coeff(i)));
        }
        Self::new(result, ring)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg<R: CoefficientRing<Elem = Integer>>(&self, ring: &R) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| ring.neg(c)).collect(),
        }
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub<R: CoefficientRing<Elem = Integer>>(&self, other: &Self, ring: &R) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);
        for i in 0..len {
            result.push(ring.sub(&self.coeff(i), &other.coeff(i)));
        }
        Self::new(result, ring)
    }

    /// Multiplies two polynomials (schoolbook).
    #[must_use]
    pub fn mul<R: CoefficientRing<Elem = Integer>>(&self, other: &Self, ring: &R) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![Integer::zero(); n + m - 1];
        for i in 0..n {
            for j in 0..m {
                let t = &self.coeffs[i] * &other.coeffs[j];
                result[i + j] = result[i + j].clone() + t;
            }
        }
        Self::new(result, ring)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn mul_scalar<R: CoefficientRing<Elem = Integer>>(&self, c: &Integer, ring: &R) -> Self {
        Self::new(
            self.coeffs.iter().map(|x| ring.mul(x, c)).collect(),
            ring,
        )
    }

    /// Multiplies by `x^k`.
    #[must_use]
    pub fn shift_left(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![Integer::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Divides with remainder: `self = q*other + r`, `deg r < deg other`.
    ///
    /// # Errors
    ///
    /// [`Error::DivideByZero`] when `other` is zero, and
    /// [`Error::NonInvertible`] when the leading coefficient of `other`
    /// is a zero divisor mod n.
    pub fn divrem<R: CoefficientRing<Elem = Integer>>(
        &self,
        other: &Self,
        ring: &R,
    ) -> Result<(Self, Self), Error> {
        if other.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self.degree() < other.degree() {
            return Ok((Self::zero(), self.clone()));
        }

        let lead_inv = ring.inv(&other.leading_coeff())?;
        let db = other.coeffs.len() - 1;
        let mut q = vec![Integer::zero(); self.coeffs.len() - db];
        let mut r = self.coeffs.clone();

        for i in (db..r.len()).rev() {
            if r[i].is_zero() {
                continue;
            }
            let c = ring.mul(&r[i], &lead_inv);
            for (j, bc) in other.coeffs.iter().enumerate() {
                r[i - db + j] = ring.sub(&r[i - db + j], &ring.mul(&c, bc));
            }
            q[i - db] = c;
        }

        Ok((Self::new(q, ring), Self::new(r, ring)))
    }

    /// Exact division; debug-asserts that the remainder is zero.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`ModPoly::divrem`].
    pub fn divexact<R: CoefficientRing<Elem = Integer>>(
        &self,
        other: &Self,
        ring: &R,
    ) -> Result<Self, Error> {
        let (q, r) = self.divrem(other, ring)?;
        debug_assert!(r.is_zero(), "inexact division in divexact");
        Ok(q)
    }

    /// Computes the monic gcd by the Euclidean algorithm.
    ///
    /// # Errors
    ///
    /// [`Error::NonInvertible`] when a leading coefficient met along the
    /// way has no inverse (composite modulus).
    pub fn gcd<R: CoefficientRing<Elem = Integer>>(
        &self,
        other: &Self,
        ring: &R,
    ) -> Result<Self, Error> {
        let mut a = self.clone();
        let mut b = other.clone();

        while !b.is_zero() {
            let (_, r) = a.divrem(&b, ring)?;
            a = std::mem::replace(&mut b, r);
        }

        a.make_monic(ring)
    }

    /// Computes the monic gcd `g` and cofactors `(g, self/g, other/g)`.
    ///
    /// # Errors
    ///
    /// Same as [`ModPoly::gcd`].
    pub fn gcd_cofactors<R: CoefficientRing<Elem = Integer>>(
        &self,
        other: &Self,
        ring: &R,
    ) -> Result<(Self, Self, Self), Error> {
        if self.is_zero() && other.is_zero() {
            return Ok((Self::zero(), Self::zero(), Self::zero()));
        }
        let g = self.gcd(other, ring)?;
        let abar = if self.is_zero() {
            Self::zero()
        } else {
            self.divexact(&g, ring)?
        };
        let bbar = if other.is_zero() {
            Self::zero()
        } else {
            other.divexact(&g, ring)?
        };
        Ok((g, abar, bbar))
    }

    /// Scales so the leading coefficient is 1; zero stays zero.
    ///
    /// # Errors
    ///
    /// [`Error::NonInvertible`] when the leading coefficient is a zero
    /// divisor mod n.
    pub fn make_monic<R: CoefficientRing<Elem = Integer>>(&self, ring: &R) -> Result<Self, Error> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let inv = ring.inv(&self.leading_coeff())?;
        Ok(self.mul_scalar(&inv, ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modular::ModRing;

    fn z7() -> ModRing {
        ModRing::new(Integer::new(7))
    }

    fn p(ring: &ModRing, coeffs: &[i64]) -> ModPoly {
        ModPoly::new(coeffs.iter().map(|&c| Integer::new(c)).collect(), ring)
    }

    #[test]
    fn test_normalization() {
        let r = z7();
        let a = p(&r, &[1, 2, 0, 0]);
        assert_eq!(a.degree(), 1);
        assert!(p(&r, &[0, 0]).is_zero());
        assert!(p(&r, &[7, 14]).is_zero());
    }

    #[test]
    fn test_mul_and_eval() {
        let r = z7();
        // (1 + 2x)(3 + x) = 3 + 7x + 2x^2 = 3 + 2x^2 (mod 7)
        let a = p(&r, &[1, 2]);
        let b = p(&r, &[3, 1]);
        let c = a.mul(&b, &r);
        assert_eq!(c, p(&r, &[3, 0, 2]));

        // Evaluation is a ring homomorphism
        let x = r.element(5);
        assert_eq!(c.evaluate(&x, &r), r.mul(&a.evaluate(&x, &r), &b.evaluate(&x, &r)));
    }

    #[test]
    fn test_divrem() {
        let r = z7();
        // (x^2 + 2x + 1) / (x + 1) = x + 1 rem 0
        let a = p(&r, &[1, 2, 1]);
        let b = p(&r, &[1, 1]);
        let (q, rem) = a.divrem(&b, &r).unwrap();
        assert_eq!(q, p(&r, &[1, 1]));
        assert!(rem.is_zero());

        // x^2 + 1 = (x + 1)(x - 1) + 2
        let a = p(&r, &[1, 0, 1]);
        let (q, rem) = a.divrem(&b, &r).unwrap();
        assert_eq!(q.mul(&b, &r).add(&rem, &r), a);
        assert!(rem.degree() < b.degree());
    }

    #[test]
    fn test_divrem_noninvertible_lead() {
        let r = ModRing::new(Integer::new(12));
        let a = p(&r, &[1, 0, 1]);
        let b = p(&r, &[1, 4]); // lc 4 is a zero divisor mod 12
        assert!(matches!(a.divrem(&b, &r), Err(Error::NonInvertible { .. })));
    }

    #[test]
    fn test_gcd_cofactors() {
        let r = z7();
        // gcd(x^2 - 1, x^2 + 2x + 1) = x + 1
        let a = p(&r, &[-1, 0, 1]);
        let b = p(&r, &[1, 2, 1]);
        let (g, abar, bbar) = a.gcd_cofactors(&b, &r).unwrap();

        assert_eq!(g, p(&r, &[1, 1]));
        assert_eq!(abar, p(&r, &[-1, 1]));
        assert_eq!(bbar, p(&r, &[1, 1]));
        assert_eq!(g.mul(&abar, &r), a);
        assert_eq!(g.mul(&bbar, &r), b);
    }

    #[test]
    fn test_shift_left() {
        let r = z7();
        let a = p(&r, &[1, 2]);
        assert_eq!(a.shift_left(2), p(&r, &[0, 0, 1, 2]));
        assert!(ModPoly::zero().shift_left(3).is_zero());
    }

    // the whole impl is written against the ring trait; a helper with
    // only that bound can drive it end to end
    fn eval_product<R: CoefficientRing<Elem = Integer>>(
        ring: &R,
        a: &ModPoly,
        b: &ModPoly,
        x: &Integer,
    ) -> Integer {
        a.mul(b, ring).evaluate(x, ring)
    }

    #[test]
    fn test_ring_seam_is_generic() {
        let r = z7();
        let a = p(&r, &[1, 1]);
        let b = p(&r, &[2, 3]);
        // (1 + x)(2 + 3x) at x = 2: 3 * 8 = 24 = 3 (mod 7)
        let x = r.element(2);
        assert_eq!(eval_product(&r, &a, &b, &x), r.element(3));
    }
}
