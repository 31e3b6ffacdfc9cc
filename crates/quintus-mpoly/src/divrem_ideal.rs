//! Division with remainder by a list of divisors.
//!
//! The single-divisor merge generalized: the heap carries the dividend
//! terms plus one live candidate per `(divisor, trailing term)` row,
//! and each surfaced monomial goes to the quotient of the
//! lowest-indexed divisor whose leading monomial divides it, or to the
//! remainder when none does. The result satisfies
//! `a = sum(q[p] * divisors[p]) + r` with no remainder term divisible
//! by any divisor's leading monomial.

use num_traits::Zero;
use quintus_rings::{Error, Integer};

use crate::ctx::{self, Ctx};
use crate::heap::{Exp, ExpHeap, Pair};
use crate::pack;
use crate::poly::MPoly;

const DIVIDEND: usize = usize::MAX;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Row {
    Inactive,
    InHeap(usize),
    Waiting(usize),
}

impl MPoly {
    /// Divides by several divisors at once, preferring earlier
    /// divisors on ties.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DivideByZero`] when any divisor is zero,
    /// with [`Error::NonInvertible`] when any divisor's leading
    /// coefficient has no inverse, and with [`Error::Unsupported`] on
    /// width exhaustion.
    ///
    /// # Panics
    ///
    /// Panics when `divisors` is empty.
    pub fn divrem_ideal(
        &self,
        ctx: &Ctx,
        divisors: &[Self],
    ) -> Result<(Vec<Self>, Self), Error> {
        assert!(!divisors.is_empty(), "need at least one divisor");
        if divisors.iter().any(MPoly::is_zero) {
            return Err(Error::DivideByZero);
        }
        // every leading inverse is needed up front so a failure cannot
        // surface halfway through
        let ring = ctx.ring();
        let mut lc_invs = Vec::with_capacity(divisors.len());
        for d in divisors {
            match d.leading_coeff() {
                Some(lc) => lc_invs.push(ring.inv(lc)?),
                None => unreachable!(),
            }
        }
        if self.is_zero() {
            return Ok((
                divisors.iter().map(|_| Self::zero(ctx)).collect(),
                Self::zero(ctx),
            ));
        }

        let mut bits = divisors
            .iter()
            .map(MPoly::bits)
            .fold(self.bits(), u16::max);
        loop {
            let mut a = self.clone();
            a.fit_bits(ctx, bits)?;
            let mut bs = Vec::with_capacity(divisors.len());
            for d in divisors {
                let mut b = d.clone();
                b.fit_bits(ctx, bits)?;
                bs.push(b);
            }
            if let Some(out) = try_divrem_ideal(ctx, &a, &bs, &lc_invs, bits) {
                return Ok(out);
            }
            bits = ctx::next_bits(bits)
                .ok_or(Error::Unsupported("exponent too large for packed layout"))?;
        }
    }
}

/// One attempt at a fixed width; `None` asks for a wider retry.
#[allow(clippy::too_many_lines)]
fn try_divrem_ideal(
    ctx: &Ctx,
    a: &MPoly,
    bs: &[MPoly],
    lc_invs: &[Integer],
    bits: u16,
) -> Option<(Vec<MPoly>, MPoly)> {
    let nw = ctx.words_per_exp(bits);
    let oflow = ctx::overflow_mask(bits);
    let ring = ctx.ring();
    let s = bs.len();

    let bexp = |p: usize, i: usize| &bs[p].exps()[i * nw..(i + 1) * nw];

    let mut heap = ExpHeap::new(ctx.cmpmask(bits));
    heap.insert(
        Exp::from_slice(&a.exps()[..nw]),
        Pair {
            p: 0,
            i: DIVIDEND,
            j: 0,
        },
    );

    let mut rows: Vec<Vec<Row>> = bs.iter().map(|b| vec![Row::Inactive; b.len() - 1]).collect();
    let mut q_coeffs: Vec<Vec<Integer>> = vec![Vec::new(); s];
    let mut q_exps: Vec<Vec<u64>> = vec![Vec::new(); s];
    let mut r_coeffs: Vec<Integer> = Vec::new();
    let mut r_exps: Vec<u64> = Vec::new();

    while let Some((exp, pairs)) = heap.pop_group() {
        let mut acc = Integer::zero();
        let mut activations: Vec<(usize, usize)> = Vec::new();

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
                continue;
            }

            acc = &acc - &(&bs[pr.p].coeffs()[pr.i] * &q_coeffs[pr.p][pr.j]);
            debug_assert_eq!(rows[pr.p][pr.i - 1], Row::InHeap(pr.j));
            if pr.j + 1 < q_coeffs[pr.p].len() {
                let qe = &q_exps[pr.p][(pr.j + 1) * nw..(pr.j + 2) * nw];
                let e = pack::monomial_add(bexp(pr.p, pr.i), qe, oflow)?;
                heap.insert(
                    Exp::from_slice(&e),
                    Pair {
                        p: pr.p,
                        i: pr.i,
                        j: pr.j + 1,
                    },
                );
                rows[pr.p][pr.i - 1] = Row::InHeap(pr.j + 1);
            } else {
                rows[pr.p][pr.i - 1] = Row::Waiting(pr.j + 1);
            }
            if pr.j == 0 && pr.i + 1 < bs[pr.p].len() {
                activations.push((pr.p, pr.i + 1));
            }
        }

        for (p, i) in activations {
            if rows[p][i - 1] == Row::Inactive {
                let e = pack::monomial_add(bexp(p, i), &q_exps[p][..nw], oflow)?;
                heap.insert(Exp::from_slice(&e), Pair { p, i, j: 0 });
                rows[p][i - 1] = Row::InHeap(0);
            }
        }

        let c = ring.reduce(&acc);
        if c.is_zero() {
            continue;
        }

        // lowest-indexed divisor whose leading monomial divides wins
        let hit = (0..s).find_map(|p| {
            pack::monomial_sub(&exp, bexp(p, 0), oflow).map(|qe| (p, qe))
        });
        match hit {
            Some((p, qe)) => {
                let k = q_coeffs[p].len();
                q_coeffs[p].push(ring.mul(&c, &lc_invs[p]));
                q_exps[p].extend(qe);
                if bs[p].len() > 1 {
                    if k == 0 {
                        let e = pack::monomial_add(bexp(p, 1), &q_exps[p][..nw], oflow)?;
                        heap.insert(Exp::from_slice(&e), Pair { p, i: 1, j: 0 });
                        rows[p][0] = Row::InHeap(0);
                    } else {
                        for i in 1..bs[p].len() {
                            if rows[p][i - 1] == Row::Waiting(k) {
                                let qe = &q_exps[p][k * nw..(k + 1) * nw];
                                let e = pack::monomial_add(bexp(p, i), qe, oflow)?;
                                heap.insert(Exp::from_slice(&e), Pair { p, i, j: k });
                                rows[p][i - 1] = Row::InHeap(k);
                            }
                        }
                    }
                }
            }
            None => {
                r_coeffs.push(c);
                r_exps.extend_from_slice(&exp);
            }
        }
    }

    let quotients = q_coeffs
        .into_iter()
        .zip(q_exps)
        .map(|(c, e)| MPoly::from_parts(c, e, bits))
        .collect();
    Some((quotients, MPoly::from_parts(r_coeffs, r_exps, bits)))
}
