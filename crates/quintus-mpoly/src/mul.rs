//! Heap-merge multiplication.
//!
//! The product of an `m`-term and an `n`-term polynomial is assembled
//! in decreasing monomial order without materializing all `m * n`
//! cross terms: a heap holds one live candidate per row of the
//! (i, j) grid, rows are introduced lazily when `(i, 0)` reaches the
//! top, and all cross terms landing on the same monomial are
//! accumulated before a single reduction.
//!
//! A candidate whose exponent sum overflows the working width aborts
//! the whole attempt; the operation restarts from scratch at the next
//! width on the ladder.

use num_traits::Zero;
use quintus_rings::{Error, Integer};

use crate::ctx::{self, Ctx};
use crate::heap::{Exp, ExpHeap, Pair};
use crate::pack;
use crate::poly::MPoly;

impl MPoly {
    /// Multiplies two polynomials.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unsupported`] when a product exponent
    /// exceeds the largest supported packing width.
    pub fn mul(&self, ctx: &Ctx, other: &Self) -> Result<Self, Error> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero(ctx));
        }
        let mut bits = self.bits().max(other.bits());
        loop {
            let mut a = self.clone();
            a.fit_bits(ctx, bits)?;
            let mut b = other.clone();
            b.fit_bits(ctx, bits)?;
            if let Some(p) = try_mul(ctx, &a, &b, bits) {
                return Ok(p);
            }
            bits = ctx::next_bits(bits)
                .ok_or(Error::Unsupported("product exponent too large for packed layout"))?;
        }
    }

    /// Raises a polynomial to a small power by repeated squaring.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`MPoly::mul`].
    pub fn pow(&self, ctx: &Ctx, mut exp: u64) -> Result<Self, Error> {
        let mut result = Self::one(ctx);
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(ctx, &base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(ctx, &base)?;
            }
        }
        Ok(result)
    }
}

/// One multiplication attempt at a fixed width. `None` means a
/// candidate overflowed and the caller must retry wider.
fn try_mul(ctx: &Ctx, a: &MPoly, b: &MPoly, bits: u16) -> Option<MPoly> {
    let nw = ctx.words_per_exp(bits);
    let oflow = ctx::overflow_mask(bits);
    let ring = ctx.ring();
    let (m, n) = (a.len(), b.len());

    let aexp = |i: usize| &a.exps()[i * nw..(i + 1) * nw];
    let bexp = |j: usize| &b.exps()[j * nw..(j + 1) * nw];

    let mut heap = ExpHeap::new(ctx.cmpmask(bits));
    let first = pack::monomial_add(aexp(0), bexp(0), oflow)?;
    heap.insert(Exp::from_slice(&first), Pair { p: 0, i: 0, j: 0 });

    let mut coeffs = Vec::new();
    let mut exps = Vec::new();
    while let Some((exp, pairs)) = heap.pop_group() {
        let mut acc = Integer::zero();
        for pr in &pairs {
            acc = &acc + &(&a.coeffs()[pr.i] * &b.coeffs()[pr.j]);
        }
        let c = ring.reduce(&acc);
        if !c.is_zero() {
            coeffs.push(c);
            exps.extend_from_slice(&exp);
        }

        for pr in pairs {
            if pr.j + 1 < n {
                let e = pack::monomial_add(aexp(pr.i), bexp(pr.j + 1), oflow)?;
                heap.insert(
                    Exp::from_slice(&e),
                    Pair {
                        p: 0,
                        i: pr.i,
                        j: pr.j + 1,
                    },
                );
            }
            if pr.j == 0 && pr.i + 1 < m {
                let e = pack::monomial_add(aexp(pr.i + 1), bexp(0), oflow)?;
                heap.insert(
                    Exp::from_slice(&e),
                    Pair {
                        p: 0,
                        i: pr.i + 1,
                        j: 0,
                    },
                );
            }
        }
    }
    Some(MPoly::from_parts(coeffs, exps, bits))
}
