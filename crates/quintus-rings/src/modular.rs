//! The residue ring Z/nZ with a runtime modulus.
//!
//! The modulus is an arbitrary-precision positive integer and is *not*
//! assumed to be prime: multiplicative inverses may fail, and callers
//! that need them must be prepared for [`Error::NonInvertible`].
//!
//! `ModRing` is a context object: elements are plain [`Integer`]s kept
//! reduced to `[0, n)`, and every operation goes through the ring. One
//! ring is created per polynomial ring and shared read-only by all
//! polynomials in it.

use num_traits::{One, Zero};

use crate::error::Error;
use crate::integer::Integer;

/// The ring Z/nZ for a fixed positive modulus n.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModRing {
    modulus: Integer,
}

impl ModRing {
    /// Creates the ring Z/nZ.
    ///
    /// # Panics
    ///
    /// Panics if `modulus <= 0`; there is no meaningful recovery from a
    /// nonsensical ring.
    #[must_use]
    pub fn new(modulus: Integer) -> Self {
        assert!(modulus.signum() == 1, "modulus must be positive");
        Self { modulus }
    }

    /// Returns the modulus n.
    #[must_use]
    pub fn modulus(&self) -> &Integer {
        &self.modulus
    }

    /// The additive identity.
    #[must_use]
    pub fn zero(&self) -> Integer {
        Integer::zero()
    }

    /// The multiplicative identity, reduced (0 in Z/1Z).
    #[must_use]
    pub fn one(&self) -> Integer {
        self.reduce(&Integer::one())
    }

    /// Returns true if `a` is the zero element.
    #[must_use]
    pub fn is_zero(&self, a: &Integer) -> bool {
        a.is_zero()
    }

    /// Returns true if `a` is the canonical one.
    #[must_use]
    pub fn is_one(&self, a: &Integer) -> bool {
        *a == self.one()
    }

    /// Returns true if `a` is already reduced to `[0, n)`.
    #[must_use]
    pub fn is_canonical(&self, a: &Integer) -> bool {
        !a.is_negative() && *a < self.modulus
    }

    /// Reduces an arbitrary integer into `[0, n)`.
    #[must_use]
    pub fn reduce(&self, a: &Integer) -> Integer {
        a.rem_euclid(&self.modulus)
    }

    /// Maps a machine integer into the ring.
    #[must_use]
    pub fn element(&self, a: i64) -> Integer {
        self.reduce(&Integer::new(a))
    }

    /// Adds two reduced elements.
    #[must_use]
    pub fn add(&self, a: &Integer, b: &Integer) -> Integer {
        let s = a + b;
        if s < self.modulus {
            s
        } else {
            s - &self.modulus
        }
    }

    /// Subtracts two reduced elements.
    #[must_use]
    pub fn sub(&self, a: &Integer, b: &Integer) -> Integer {
        if a < b {
            a + &self.modulus - b
        } else {
            a - b
        }
    }

    /// Negates a reduced element.
    #[must_use]
    pub fn neg(&self, a: &Integer) -> Integer {
        if a.is_zero() {
            Integer::zero()
        } else {
            &self.modulus - a
        }
    }

    /// Multiplies two reduced elements.
    #[must_use]
    pub fn mul(&self, a: &Integer, b: &Integer) -> Integer {
        self.reduce(&(a * b))
    }

    /// Computes the multiplicative inverse of `a`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NonInvertible`] when `gcd(a, n) != 1`, which
    /// can only happen for a composite modulus (or `a == 0`).
    pub fn inv(&self, a: &Integer) -> Result<Integer, Error> {
        let (g, s, _) = a.extended_gcd(&self.modulus);
        if g.is_one() {
            Ok(self.reduce(&s))
        } else {
            Err(Error::NonInvertible {
                value: a.clone(),
                modulus: self.modulus.clone(),
            })
        }
    }

    /// Computes `a^exp` by binary exponentiation.
    #[must_use]
    pub fn pow(&self, a: &Integer, mut exp: u64) -> Integer {
        let mut base = a.clone();
        let mut result = self.one();

        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(&result, &base);
            }
            base = self.mul(&base, &base);
            exp >>= 1;
        }

        result
    }
}
