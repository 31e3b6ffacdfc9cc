//! Ring context and packed-exponent layout parameters.
//!
//! A [`Ctx`] fixes the number of variables, the monomial ordering and the
//! coefficient modulus for a polynomial ring. It is created once and
//! shared read-only by every polynomial in the ring; it is never mutated
//! after a polynomial references it.
//!
//! The packed layout: every monomial is a vector of `nfields` bit-fields
//! (the exponents, preceded by a total-degree field for graded orders)
//! packed most-significant-first into machine words. A field holds
//! `bits + 1` physical bits: `bits` for the exponent value and a reserved
//! top bit that flags overflow after an add and underflow after a
//! subtract. The comparison mask flips the fields whose order the
//! monomial ordering reverses, so one unsigned word compare implements
//! every supported order.

use quintus_rings::{Integer, ModRing};

/// Smallest supported exponent width: 7 value bits per field.
pub const MIN_BITS: u16 = 7;

/// Largest supported exponent width: a field never spans more than one
/// machine word, so 63 value bits plus the reserved top bit.
pub const MAX_BITS: u16 = 63;

/// A monomial ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MonomialOrder {
    /// Lexicographic: the first variable dominates.
    #[default]
    Lex,
    /// Graded lexicographic: total degree first, lex as tiebreaker.
    Deglex,
    /// Graded reverse lexicographic: total degree first, then reverse
    /// lex with the comparison reversed.
    Degrevlex,
}

impl MonomialOrder {
    /// Returns true for orders that compare total degree first.
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        !matches!(self, MonomialOrder::Lex)
    }

    /// Returns a short name for the ordering.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::Deglex => "deglex",
            MonomialOrder::Degrevlex => "degrevlex",
        }
    }
}

impl std::fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The context for one polynomial ring: variables, ordering, modulus.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Ctx {
    nvars: usize,
    order: MonomialOrder,
    ring: ModRing,
}

impl Ctx {
    /// Creates a ring context for `nvars` variables over Z/nZ.
    ///
    /// # Panics
    ///
    /// Panics if `nvars == 0` or `modulus <= 0`.
    #[must_use]
    pub fn new(nvars: usize, order: MonomialOrder, modulus: Integer) -> Self {
        assert!(nvars >= 1, "ring must have at least one variable");
        Self {
            nvars,
            order,
            ring: ModRing::new(modulus),
        }
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Returns the monomial ordering.
    #[must_use]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    /// Returns the coefficient ring Z/nZ.
    #[must_use]
    pub fn ring(&self) -> &ModRing {
        &self.ring
    }

    /// Number of bit-fields per packed vector (exponents plus the
    /// degree field for graded orders).
    #[must_use]
    pub fn nfields(&self) -> usize {
        self.nvars + usize::from(self.order.is_graded())
    }

    /// Number of machine words per packed vector at the given width.
    #[must_use]
    pub fn words_per_exp(&self, bits: u16) -> usize {
        self.nfields().div_ceil(fields_per_word(bits))
    }

    /// The comparison mask: fields to flip so that raw masked word
    /// comparison implements this ordering.
    #[must_use]
    pub fn cmpmask(&self, bits: u16) -> Vec<u64> {
        let n = self.words_per_exp(bits);
        let mut mask = vec![0u64; n];
        if self.order != MonomialOrder::Degrevlex {
            return mask;
        }

        let fw = u32::from(bits) + 1;
        let fpw = fields_per_word(bits);
        let field_ones = if fw == 64 { u64::MAX } else { (1u64 << fw) - 1 };

        // Every field except the leading degree field reverses.
        for f in 1..self.nfields() {
            let w = f / fpw;
            let shift = 64 - fw * ((f % fpw) as u32 + 1);
            mask[w] |= field_ones << shift;
        }
        mask
    }
}

/// Physical width of one field: the exponent bits plus the reserved
/// overflow bit.
#[must_use]
pub const fn field_width(bits: u16) -> u32 {
    bits as u32 + 1
}

/// How many fields fit in one 64-bit word at the given width.
#[must_use]
pub const fn fields_per_word(bits: u16) -> usize {
    (64 / field_width(bits)) as usize
}

/// Word pattern with the reserved top bit of every field slot set; a
/// packed vector is valid iff `word & mask == 0` for every word.
#[must_use]
pub fn overflow_mask(bits: u16) -> u64 {
    let fw = field_width(bits);
    let mut mask = 0u64;
    for s in 0..fields_per_word(bits) {
        mask |= 1u64 << (63 - fw * s as u32);
    }
    mask
}

/// The supported width ladder: each step doubles the physical field.
#[must_use]
pub const fn next_bits(bits: u16) -> Option<u16> {
    match bits {
        _ if bits >= MAX_BITS => None,
        _ => {
            let doubled = 2 * (bits + 1) - 1;
            Some(if doubled > MAX_BITS { MAX_BITS } else { doubled })
        }
    }
}

/// Rounds a required exponent width up to the supported ladder.
/// Returns `None` when no supported width fits.
#[must_use]
pub fn round_bits(required: u16) -> Option<u16> {
    if required > MAX_BITS {
        return None;
    }
    let mut b = MIN_BITS;
    while b < required {
        b = next_bits(b)?;
    }
    Some(b)
}

/// Smallest number of value bits needed to hold `v`.
#[must_use]
pub fn bits_for_value(v: u64) -> u16 {
    (64 - v.leading_zeros()) as u16
}
