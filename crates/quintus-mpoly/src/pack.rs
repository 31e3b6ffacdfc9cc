//! Packing, unpacking and word-level arithmetic on exponent vectors.
//!
//! A monomial is stored as `ctx.words_per_exp(bits)` machine words with
//! word 0 most significant. Fields are laid out so that comparing the
//! packed words as unsigned integers (after XOR with the ordering's
//! comparison mask) agrees with the monomial ordering:
//!
//! - lex: `[e_0, e_1, ..., e_{n-1}]`
//! - deglex: `[deg, e_0, ..., e_{n-1}]`
//! - degrevlex: `[deg, e_{n-1}, ..., e_0]` with the exponent fields
//!   flipped by the comparison mask
//!
//! Addition and subtraction work on whole words. Both operands always
//! have every reserved bit clear, so a per-field overflow or underflow
//! surfaces as a set reserved bit in the result and is detected by one
//! AND against the overflow mask per word.

use std::cmp::Ordering;

use crate::ctx::{self, Ctx, MonomialOrder};

/// The field index holding variable `v`.
#[must_use]
pub fn var_field(ctx: &Ctx, v: usize) -> usize {
    debug_assert!(v < ctx.nvars());
    match ctx.order() {
        MonomialOrder::Lex => v,
        MonomialOrder::Deglex => 1 + v,
        MonomialOrder::Degrevlex => ctx.nvars() - v,
    }
}

/// Reads field `f` from a packed vector.
#[must_use]
pub fn get_field(bits: u16, packed: &[u64], f: usize) -> u64 {
    let fw = ctx::field_width(bits);
    let fpw = ctx::fields_per_word(bits);
    let shift = 64 - fw * ((f % fpw) as u32 + 1);
    let value_mask = (1u64 << bits) - 1;
    (packed[f / fpw] >> shift) & value_mask
}

fn set_field(bits: u16, packed: &mut [u64], f: usize, value: u64) {
    debug_assert!(value < (1u64 << bits));
    let fw = ctx::field_width(bits);
    let fpw = ctx::fields_per_word(bits);
    let shift = 64 - fw * ((f % fpw) as u32 + 1);
    packed[f / fpw] |= value << shift;
}

/// The width needed to pack a user exponent vector, before rounding to
/// the supported ladder. Returns `None` when the total degree of a
/// graded order overflows a `u64`.
#[must_use]
pub fn min_bits(ctx: &Ctx, exps: &[u64]) -> Option<u16> {
    debug_assert_eq!(exps.len(), ctx.nvars());
    let mut largest = exps.iter().copied().max().unwrap_or(0);
    if ctx.order().is_graded() {
        let mut deg: u64 = 0;
        for &e in exps {
            deg = deg.checked_add(e)?;
        }
        largest = largest.max(deg);
    }
    Some(ctx::bits_for_value(largest).max(1))
}

/// Packs one exponent vector at the given width.
///
/// The caller has already checked the width via [`min_bits`].
#[must_use]
pub fn pack(ctx: &Ctx, bits: u16, exps: &[u64]) -> Vec<u64> {
    debug_assert_eq!(exps.len(), ctx.nvars());
    let mut packed = vec![0u64; ctx.words_per_exp(bits)];
    for (v, &e) in exps.iter().enumerate() {
        set_field(bits, &mut packed, var_field(ctx, v), e);
    }
    if ctx.order().is_graded() {
        set_field(bits, &mut packed, 0, exps.iter().sum());
    }
    packed
}

/// Unpacks a monomial back into one exponent per variable.
#[must_use]
pub fn unpack(ctx: &Ctx, bits: u16, packed: &[u64]) -> Vec<u64> {
    (0..ctx.nvars())
        .map(|v| get_field(bits, packed, var_field(ctx, v)))
        .collect()
}

/// Total degree of a packed monomial.
#[must_use]
pub fn total_degree(ctx: &Ctx, bits: u16, packed: &[u64]) -> u64 {
    if ctx.order().is_graded() {
        get_field(bits, packed, 0)
    } else {
        (0..ctx.nvars()).map(|v| get_field(bits, packed, v)).sum()
    }
}

/// Compares two packed monomials under the ordering baked into the
/// comparison mask. Both must be packed at the mask's width.
#[must_use]
pub fn compare(a: &[u64], b: &[u64], cmpmask: &[u64]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());
    for w in 0..a.len() {
        let (x, y) = (a[w] ^ cmpmask[w], b[w] ^ cmpmask[w]);
        if x != y {
            return x.cmp(&y);
        }
    }
    Ordering::Equal
}

/// Word-wise sum of two packed monomials. Returns `None` when any
/// field overflows its width.
#[must_use]
pub fn monomial_add(a: &[u64], b: &[u64], oflow: u64) -> Option<Vec<u64>> {
    debug_assert_eq!(a.len(), b.len());
    let mut out = Vec::with_capacity(a.len());
    for w in 0..a.len() {
        let s = a[w] + b[w];
        if s & oflow != 0 {
            return None;
        }
        out.push(s);
    }
    Some(out)
}

/// Word-wise difference `a - b`. Returns `None` when `b` does not
/// divide `a`, i.e. some field underflows.
#[must_use]
pub fn monomial_sub(a: &[u64], b: &[u64], oflow: u64) -> Option<Vec<u64>> {
    debug_assert_eq!(a.len(), b.len());
    let mut out = Vec::with_capacity(a.len());
    for w in 0..a.len() {
        let d = a[w].wrapping_sub(b[w]);
        if d & oflow != 0 {
            return None;
        }
        out.push(d);
    }
    Some(out)
}

/// Whether `b` divides `a` field-wise.
#[must_use]
pub fn monomial_divides(a: &[u64], b: &[u64], oflow: u64) -> bool {
    debug_assert_eq!(a.len(), b.len());
    (0..a.len()).all(|w| a[w].wrapping_sub(b[w]) & oflow == 0)
}

/// Least common multiple of two packed monomials. Goes through the
/// unpacked form so graded degree fields come out consistent.
#[must_use]
pub fn monomial_lcm(ctx: &Ctx, bits: u16, a: &[u64], b: &[u64]) -> Option<Vec<u64>> {
    let ea = unpack(ctx, bits, a);
    let eb = unpack(ctx, bits, b);
    let m: Vec<u64> = ea.iter().zip(&eb).map(|(&x, &y)| x.max(y)).collect();
    if min_bits(ctx, &m)? > bits {
        return None;
    }
    Some(pack(ctx, bits, &m))
}

/// Repacks one monomial from one width to another (wider or equal).
#[must_use]
pub fn repack(ctx: &Ctx, from_bits: u16, to_bits: u16, packed: &[u64]) -> Vec<u64> {
    debug_assert!(to_bits >= from_bits);
    pack(ctx, to_bits, &unpack(ctx, from_bits, packed))
}
