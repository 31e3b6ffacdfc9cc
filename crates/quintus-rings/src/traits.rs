//! The coefficient-ring seam.
//!
//! The dense univariate polynomial layer ([`ModPoly`](crate::ModPoly))
//! is written generically over this narrow interface, so the same
//! algorithms can run over any ring that provides it.
//! [`ModRing`](crate::ModRing) is the one concrete implementation in
//! this workspace.

use std::fmt::Debug;

use crate::error::Error;
use crate::integer::Integer;
use crate::modular::ModRing;

/// A commutative ring with unity, consumed as an opaque context object.
///
/// Elements carry no reference to the ring; every operation threads the
/// ring explicitly. Implementations keep elements in a canonical form
/// (for Z/nZ, reduced to `[0, n)`), and `is_zero` on a canonical element
/// is the "absent term" test everywhere above.
pub trait CoefficientRing {
    /// The element type.
    type Elem: Clone + Eq + Debug;

    /// The additive identity.
    fn zero(&self) -> Self::Elem;

    /// The multiplicative identity (canonical).
    fn one(&self) -> Self::Elem;

    /// Tests for the additive identity.
    fn is_zero(&self, a: &Self::Elem) -> bool;

    /// Tests for the multiplicative identity.
    fn is_one(&self, a: &Self::Elem) -> bool;

    /// Brings an element into canonical form.
    fn reduce(&self, a: &Self::Elem) -> Self::Elem;

    /// Addition.
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Subtraction.
    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Additive inverse.
    fn neg(&self, a: &Self::Elem) -> Self::Elem;

    /// Multiplication.
    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Multiplicative inverse; fails when none exists.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::NonInvertible`] (or
    /// [`Error::DivideByZero`]) when `a` has no inverse.
    fn inv(&self, a: &Self::Elem) -> Result<Self::Elem, Error>;

    /// Exponentiation by a machine-word exponent.
    fn pow(&self, a: &Self::Elem, exp: u64) -> Self::Elem;
}

impl CoefficientRing for ModRing {
    type Elem = Integer;

    fn zero(&self) -> Integer {
        ModRing::zero(self)
    }

    fn one(&self) -> Integer {
        ModRing::one(self)
    }

    fn is_zero(&self, a: &Integer) -> bool {
        ModRing::is_zero(self, a)
    }

    fn is_one(&self, a: &Integer) -> bool {
        ModRing::is_one(self, a)
    }

    fn reduce(&self, a: &Integer) -> Integer {
        ModRing::reduce(self, a)
    }

    fn add(&self, a: &Integer, b: &Integer) -> Integer {
        ModRing::add(self, a, b)
    }

    fn sub(&self, a: &Integer, b: &Integer) -> Integer {
        ModRing::sub(self, a, b)
    }

    fn neg(&self, a: &Integer) -> Integer {
        ModRing::neg(self, a)
    }

    fn mul(&self, a: &Integer, b: &Integer) -> Integer {
        ModRing::mul(self, a, b)
    }

    fn inv(&self, a: &Integer) -> Result<Integer, Error> {
        ModRing::inv(self, a)
    }

    fn pow(&self, a: &Integer, exp: u64) -> Integer {
        ModRing::pow(self, a, exp)
    }
}
