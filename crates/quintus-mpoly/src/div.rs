//! Exact division and division with remainder.
//!
//! The same merge as multiplication, run in reverse: the heap holds the
//! unconsumed dividend terms together with one live candidate per
//! divisor row `i >= 1` (the products `divisor[i] * quotient[j]`). A
//! row enters the merge lazily, the first time `(i, 0)` surfaces, and
//! parks whenever it catches up with the quotient, resuming as new
//! quotient terms appear. Every popped monomial accumulates dividend
//! contributions minus product contributions; a nonzero remainder
//! either yields the next quotient term or, depending on the entry
//! point, fails the division or lands in the remainder.
//!
//! Division requires an invertible divisor leading coefficient; over a
//! composite modulus this can fail even for a nonzero divisor.

use num_traits::Zero;
use quintus_rings::{Error, Integer};

use crate::ctx::{self, Ctx};
use crate::heap::{Exp, ExpHeap, Pair};
use crate::pack;
use crate::poly::MPoly;

/// Tag for heap pairs that carry a dividend term rather than a
/// divisor-row product.
const DIVIDEND: usize = usize::MAX;

/// Where a divisor row stands relative to the growing quotient.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Row {
    /// Not yet part of the merge.
    Inactive,
    /// Product `(i, j)` is in the heap.
    InHeap(usize),
    /// Caught up: waiting for quotient term `j` to exist.
    Waiting(usize),
}

enum Attempt {
    /// A candidate exponent overflowed the working width.
    Overflow,
    /// Exact division failed (exact mode only).
    NotDivisible,
    Done(MPoly, MPoly),
}

impl MPoly {
    /// Divides exactly, returning `Ok(None)` when `divisor` does not
    /// divide `self`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DivideByZero`] for a zero divisor, with
    /// [`Error::NonInvertible`] when the divisor's leading coefficient
    /// has no inverse, and with [`Error::Unsupported`] on width
    /// exhaustion.
    pub fn divides(&self, ctx: &Ctx, divisor: &Self) -> Result<Option<Self>, Error> {
        match self.div_engine(ctx, divisor, true)? {
            Some((q, _)) => Ok(Some(q)),
            None => Ok(None),
        }
    }

    /// Divides with remainder: `self = q * divisor + r` where no term
    /// of `r` is divisible by the leading monomial of `divisor`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`MPoly::divides`].
    pub fn divrem(&self, ctx: &Ctx, divisor: &Self) -> Result<(Self, Self), Error> {
        match self.div_engine(ctx, divisor, false)? {
            Some(qr) => Ok(qr),
            // inexact mode always completes
            None => unreachable!(),
        }
    }

    fn div_engine(
        &self,
        ctx: &Ctx,
        divisor: &Self,
        exact: bool,
    ) -> Result<Option<(Self, Self)>, Error> {
        if divisor.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self.is_zero() {
            return Ok(Some((Self::zero(ctx), Self::zero(ctx))));
        }
        let lc_inv = match divisor.leading_coeff() {
            Some(lc) => ctx.ring().inv(lc)?,
            None => unreachable!(),
        };

        let mut bits = self.bits().max(divisor.bits());
        loop {
            let mut a = self.clone();
            a.fit_bits(ctx, bits)?;
            let mut b = divisor.clone();
            b.fit_bits(ctx, bits)?;

            let attempt = if b.len() == 1 {
                div_monomial(ctx, &a, &b, &lc_inv, bits, exact)
            } else {
                try_divrem(ctx, &a, &b, &lc_inv, bits, exact)
            };
            match attempt {
                Attempt::Done(q, r) => return Ok(Some((q, r))),
                Attempt::NotDivisible => return Ok(None),
                Attempt::Overflow => {
                    bits = ctx::next_bits(bits)
                        .ok_or(Error::Unsupported("exponent too large for packed layout"))?;
                }
            }
        }
    }
}

/// Single-term divisor: one pass over the dividend, no heap.
fn div_monomial(
    ctx: &Ctx,
    a: &MPoly,
    b: &MPoly,
    lc_inv: &Integer,
    bits: u16,
    exact: bool,
) -> Attempt {
    let nw = ctx.words_per_exp(bits);
    let oflow = ctx::overflow_mask(bits);
    let ring = ctx.ring();
    let bexp = &b.exps()[..nw];

    let mut q_coeffs = Vec::with_capacity(a.len());
    let mut q_exps = Vec::with_capacity(a.exps().len());
    let mut r_coeffs = Vec::new();
    let mut r_exps = Vec::new();

    for t in 0..a.len() {
        let exp = &a.exps()[t * nw..(t + 1) * nw];
        match pack::monomial_sub(exp, bexp, oflow) {
            Some(qe) => {
                q_coeffs.push(ring.mul(&a.coeffs()[t], lc_inv));
                q_exps.extend(qe);
            }
            None if exact => return Attempt::NotDivisible,
            None => {
                r_coeffs.push(a.coeffs()[t].clone());
                r_exps.extend_from_slice(exp);
            }
        }
    }
    Attempt::Done(
        MPoly::from_parts(q_coeffs, q_exps, bits),
        MPoly::from_parts(r_coeffs, r_exps, bits),
    )
}

/// One division attempt at a fixed width.
fn try_divrem(
    ctx: &Ctx,
    a: &MPoly,
    b: &MPoly,
    lc_inv: &Integer,
    bits: u16,
    exact: bool,
) -> Attempt {
    let nw = ctx.words_per_exp(bits);
    let oflow = ctx::overflow_mask(bits);
    let ring = ctx.ring();
    let n = b.len();

    let bexp = |i: usize| &b.exps()[i * nw..(i + 1) * nw];

    let mut heap = ExpHeap::new(ctx.cmpmask(bits));
    heap.insert(
        Exp::from_slice(&a.exps()[..nw]),
        Pair {
            p: 0,
            i: DIVIDEND,
            j: 0,
        },
    );

    // row state for divisor terms 1..n-1; rows[i - 1] tracks term i
    let mut rows = vec![Row::Inactive; n - 1];
    let mut q_coeffs: Vec<Integer> = Vec::new();
    let mut q_exps: Vec<u64> = Vec::new();
    let mut r_coeffs: Vec<Integer> = Vec::new();
    let mut r_exps: Vec<u64> = Vec::new();

    while let Some((exp, pairs)) = heap.pop_group() {
        let mut acc = Integer::zero();
        let mut activate: Option<usize> = None;

        for pr in &pairs {
            if pr.i == DIVIDEND {
                acc = &acc + &a.coeffs()[pr.j];
                if pr.j + 1 < a.len() {
                    heap.insert(
                        Exp::from_slice(&a.exps()[(pr.j + 1) * nw..(pr.j + 2) * nw]),
                        Pair {
                            p: 0,
                            i: DIVIDEND,
                            j: pr.j + 1,
                        },
                    );
                }
            } else {
                acc = &acc - &(&b.coeffs()[pr.i] * &q_coeffs[pr.j]);
                debug_assert_eq!(rows[pr.i - 1], Row::InHeap(pr.j));
                if pr.j + 1 < q_coeffs.len() {
                    let qe = &q_exps[(pr.j + 1) * nw..(pr.j + 2) * nw];
                    match pack::monomial_add(bexp(pr.i), qe, oflow) {
                        Some(e) => {
                            heap.insert(
                                Exp::from_slice(&e),
                                Pair {
                                    p: 0,
                                    i: pr.i,
                                    j: pr.j + 1,
                                },
                            );
                            rows[pr.i - 1] = Row::InHeap(pr.j + 1);
                        }
                        None => return Attempt::Overflow,
                    }
                } else {
                    rows[pr.i - 1] = Row::Waiting(pr.j + 1);
                }
                // seeing (i, 0) at the top brings row i + 1 in
                if pr.j == 0 && pr.i + 1 < n {
                    activate = Some(pr.i + 1);
                }
            }
        }

        if let Some(i) = activate {
            if rows[i - 1] == Row::Inactive {
                match pack::monomial_add(bexp(i), &q_exps[..nw], oflow) {
                    Some(e) => {
                        heap.insert(Exp::from_slice(&e), Pair { p: 0, i, j: 0 });
                        rows[i - 1] = Row::InHeap(0);
                    }
                    None => return Attempt::Overflow,
                }
            }
        }

        let c = ring.reduce(&acc);
        if c.is_zero() {
            continue;
        }

        match pack::monomial_sub(&exp, bexp(0), oflow) {
            Some(qe) => {
                let k = q_coeffs.len();
                q_coeffs.push(ring.mul(&c, lc_inv));
                q_exps.extend(qe);
                if k == 0 {
                    // first quotient term starts the product merge
                    match pack::monomial_add(bexp(1), &q_exps[..nw], oflow) {
                        Some(e) => {
                            heap.insert(Exp::from_slice(&e), Pair { p: 0, i: 1, j: 0 });
                            rows[0] = Row::InHeap(0);
                        }
                        None => return Attempt::Overflow,
                    }
                } else {
                    // resume rows parked on this quotient index
                    for i in 1..n {
                        if rows[i - 1] == Row::Waiting(k) {
                            let qe = &q_exps[k * nw..(k + 1) * nw];
                            match pack::monomial_add(bexp(i), qe, oflow) {
                                Some(e) => {
                                    heap.insert(Exp::from_slice(&e), Pair { p: 0, i, j: k });
                                    rows[i - 1] = Row::InHeap(k);
                                }
                                None => return Attempt::Overflow,
                            }
                        }
                    }
                }
            }
            None if exact => return Attempt::NotDivisible,
            None => {
                r_coeffs.push(c);
                r_exps.extend_from_slice(&exp);
            }
        }
    }

    Attempt::Done(
        MPoly::from_parts(q_coeffs, q_exps, bits),
        MPoly::from_parts(r_coeffs, r_exps, bits),
    )
}
