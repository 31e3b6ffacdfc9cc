//! The sparse multivariate polynomial container.
//!
//! An [`MPoly`] is a pair of parallel arrays: `coeffs[t]` is the
//! coefficient of term `t` and `exps[t*N .. (t+1)*N]` its packed
//! exponent vector, where `N` is the words-per-exponent at the
//! polynomial's current width. Canonical form means:
//!
//! (a) terms strictly decreasing under the ring's monomial ordering,
//! (b) every coefficient reduced to `[0, n)` and nonzero,
//! (c) every packed vector valid at the stored width.
//!
//! Mutators that can break canonical form (`push_term`) are paired with
//! [`MPoly::normalize`]; every other public operation both requires and
//! preserves canonical form. Polynomials do not carry their context: the
//! ring [`Ctx`] is passed to each operation, and mixing contexts is a
//! logic error.

use std::cmp::Ordering;

use num_traits::{One, Zero};
use quintus_rings::{Error, Integer};

use crate::ctx::{self, Ctx};
use crate::pack;

/// Insertion sort takes over below this many terms.
const SORT_CUTOFF: usize = 16;

/// A sparse multivariate polynomial over Z/nZ.
#[derive(Clone, Debug)]
pub struct MPoly {
    coeffs: Vec<Integer>,
    exps: Vec<u64>,
    bits: u16,
}

impl MPoly {
    /// The zero polynomial.
    #[must_use]
    pub fn zero(_ctx: &Ctx) -> Self {
        Self {
            coeffs: Vec::new(),
            exps: Vec::new(),
            bits: ctx::MIN_BITS,
        }
    }

    /// A constant polynomial (zero if `c` reduces to zero).
    #[must_use]
    pub fn constant(ctx: &Ctx, c: &Integer) -> Self {
        let c = ctx.ring().reduce(c);
        let mut p = Self::zero(ctx);
        if !c.is_zero() {
            p.coeffs.push(c);
            p.exps.extend(std::iter::repeat(0).take(ctx.words_per_exp(p.bits)));
        }
        p
    }

    /// The constant one.
    #[must_use]
    pub fn one(ctx: &Ctx) -> Self {
        Self::constant(ctx, &Integer::one())
    }

    /// The generator `x_var`.
    ///
    /// # Panics
    ///
    /// Panics if `var >= ctx.nvars()`.
    #[must_use]
    pub fn gen(ctx: &Ctx, var: usize) -> Self {
        assert!(var < ctx.nvars(), "variable index out of range");
        let mut exps = vec![0u64; ctx.nvars()];
        exps[var] = 1;
        let mut p = Self::zero(ctx);
        p.coeffs.push(ctx.ring().one());
        p.exps = pack::pack(ctx, p.bits, &exps);
        if p.coeffs[0].is_zero() {
            // Z/1Z: the ring collapses
            p.coeffs.clear();
            p.exps.clear();
        }
        p
    }

    /// Builds a polynomial from unsorted `(coefficient, exponents)`
    /// pairs, normalizing the result.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unsupported`] when an exponent (or a graded
    /// total degree) needs more than the largest supported width.
    pub fn from_terms(ctx: &Ctx, terms: &[(Integer, Vec<u64>)]) -> Result<Self, Error> {
        let mut p = Self::zero(ctx);
        for (c, e) in terms {
            p.push_term(ctx, c.clone(), e)?;
        }
        p.normalize(ctx);
        Ok(p)
    }

    pub(crate) fn from_parts(coeffs: Vec<Integer>, exps: Vec<u64>, bits: u16) -> Self {
        Self { coeffs, exps, bits }
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Whether this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Whether this is the constant one.
    #[must_use]
    pub fn is_one(&self, ctx: &Ctx) -> bool {
        self.is_constant() && self.len() == 1 && ctx.ring().is_one(&self.coeffs[0])
    }

    /// Whether this polynomial has no term of positive degree.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.is_zero() || (self.len() == 1 && self.exps.iter().all(|&w| w == 0))
    }

    /// The current exponent width.
    #[must_use]
    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub(crate) fn coeffs(&self) -> &[Integer] {
        &self.coeffs
    }

    pub(crate) fn exps(&self) -> &[u64] {
        &self.exps
    }

    /// The coefficient of term `t` (terms are indexed leading first).
    #[must_use]
    pub fn term_coeff(&self, t: usize) -> &Integer {
        &self.coeffs[t]
    }

    /// The packed exponent vector of term `t`.
    #[must_use]
    pub fn term_exp(&self, ctx: &Ctx, t: usize) -> &[u64] {
        let nw = ctx.words_per_exp(self.bits);
        &self.exps[t * nw..(t + 1) * nw]
    }

    /// The exponent tuple of term `t`, one entry per variable.
    #[must_use]
    pub fn term_degrees(&self, ctx: &Ctx, t: usize) -> Vec<u64> {
        pack::unpack(ctx, self.bits, self.term_exp(ctx, t))
    }

    /// The leading coefficient, or `None` for the zero polynomial.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&Integer> {
        self.coeffs.first()
    }

    /// The leading packed exponent, or `None` for the zero polynomial.
    #[must_use]
    pub fn leading_exp(&self, ctx: &Ctx) -> Option<&[u64]> {
        if self.is_zero() {
            None
        } else {
            Some(self.term_exp(ctx, 0))
        }
    }

    /// The degree in variable `var`, or -1 for the zero polynomial.
    #[must_use]
    pub fn degree(&self, ctx: &Ctx, var: usize) -> i64 {
        let f = pack::var_field(ctx, var);
        (0..self.len())
            .map(|t| pack::get_field(self.bits, self.term_exp(ctx, t), f) as i64)
            .max()
            .unwrap_or(-1)
    }

    /// The total degree, or -1 for the zero polynomial.
    #[must_use]
    pub fn total_degree(&self, ctx: &Ctx) -> i64 {
        (0..self.len())
            .map(|t| pack::total_degree(ctx, self.bits, self.term_exp(ctx, t)) as i64)
            .max()
            .unwrap_or(-1)
    }

    /// Appends one term without keeping canonical form. The polynomial
    /// is unusable by other operations until [`MPoly::normalize`] runs.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unsupported`] when the exponent tuple cannot
    /// be packed at the largest supported width.
    pub fn push_term(&mut self, ctx: &Ctx, coeff: Integer, exps: &[u64]) -> Result<(), Error> {
        assert_eq!(exps.len(), ctx.nvars(), "one exponent per variable");
        let needed = pack::min_bits(ctx, exps)
            .and_then(ctx::round_bits)
            .ok_or(Error::Unsupported("exponent too large for packed layout"))?;
        if needed > self.bits {
            self.repack_bits(ctx, needed)?;
        }
        self.coeffs.push(coeff);
        self.exps.extend(pack::pack(ctx, self.bits, exps));
        Ok(())
    }

    /// Restores canonical form: sorts terms into decreasing order,
    /// merges equal monomials, reduces coefficients, drops zeros.
    pub fn normalize(&mut self, ctx: &Ctx) {
        self.sort_terms(ctx);
        self.combine_like_terms(ctx);
    }

    /// Sorts terms into decreasing monomial order. MSB-first radix sort
    /// on the masked key words, one byte per pass, falling back to
    /// insertion-style sorting on small runs.
    pub(crate) fn sort_terms(&mut self, ctx: &Ctx) {
        let n = self.len();
        if n < 2 {
            return;
        }
        let nw = ctx.words_per_exp(self.bits);
        let mask = ctx.cmpmask(self.bits);

        let mut keys = Vec::with_capacity(n * nw);
        for t in 0..n {
            for w in 0..nw {
                keys.push(self.exps[t * nw + w] ^ mask[w]);
            }
        }
        let mut order: Vec<usize> = (0..n).collect();
        radix_sort_desc(&keys, nw, &mut order, 0);

        let mut coeffs = Vec::with_capacity(n);
        let mut exps = Vec::with_capacity(n * nw);
        for &t in &order {
            coeffs.push(std::mem::take(&mut self.coeffs[t]));
            exps.extend_from_slice(&self.exps[t * nw..(t + 1) * nw]);
        }
        self.coeffs = coeffs;
        self.exps = exps;
    }

    /// Merges runs of equal monomials in a sorted term list, reducing
    /// every coefficient and dropping the ones that cancel to zero.
    pub(crate) fn combine_like_terms(&mut self, ctx: &Ctx) {
        let nw = ctx.words_per_exp(self.bits);
        let ring = ctx.ring();
        let mut coeffs: Vec<Integer> = Vec::with_capacity(self.len());
        let mut exps: Vec<u64> = Vec::with_capacity(self.exps.len());

        for t in 0..self.len() {
            let exp = &self.exps[t * nw..(t + 1) * nw];
            let c = ring.reduce(&self.coeffs[t]);
            if !coeffs.is_empty() && exps[exps.len() - nw..] == *exp {
                let last = coeffs.len() - 1;
                coeffs[last] = ring.add(&coeffs[last], &c);
                if coeffs[last].is_zero() {
                    coeffs.pop();
                    exps.truncate(exps.len() - nw);
                }
            } else if !c.is_zero() {
                coeffs.push(c);
                exps.extend_from_slice(exp);
            }
        }
        self.coeffs = coeffs;
        self.exps = exps;
    }

    /// Checks the canonical-form invariants. Meant for tests and
    /// debug assertions; all public operations preserve this.
    #[must_use]
    pub fn is_canonical(&self, ctx: &Ctx) -> bool {
        let nw = ctx.words_per_exp(self.bits);
        if self.exps.len() != self.len() * nw {
            return false;
        }
        let ring = ctx.ring();
        let oflow = ctx::overflow_mask(self.bits);
        let mask = ctx.cmpmask(self.bits);
        for t in 0..self.len() {
            let exp = &self.exps[t * nw..(t + 1) * nw];
            if exp.iter().any(|&w| w & oflow != 0) {
                return false;
            }
            if !ring.is_canonical(&self.coeffs[t]) || self.coeffs[t].is_zero() {
                return false;
            }
            if t > 0 {
                let prev = &self.exps[(t - 1) * nw..t * nw];
                if pack::compare(prev, exp, &mask) != Ordering::Greater {
                    return false;
                }
            }
        }
        true
    }

    /// Structural equality in the same ring, tolerant of the two sides
    /// sitting at different packing widths.
    #[must_use]
    pub fn equal(&self, ctx: &Ctx, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.bits == other.bits {
            return self.coeffs == other.coeffs && self.exps == other.exps;
        }
        for t in 0..self.len() {
            if self.coeffs[t] != other.coeffs[t]
                || self.term_degrees(ctx, t) != other.term_degrees(ctx, t)
            {
                return false;
            }
        }
        true
    }

    /// Re-encodes every exponent at a new width.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unsupported`] when `new_bits` is not on the
    /// supported ladder or some exponent does not fit in it.
    pub fn repack_bits(&mut self, ctx: &Ctx, new_bits: u16) -> Result<(), Error> {
        if ctx::round_bits(new_bits) != Some(new_bits) {
            return Err(Error::Unsupported("unsupported packing width"));
        }
        if new_bits == self.bits {
            return Ok(());
        }
        let old_nw = ctx.words_per_exp(self.bits);
        let mut exps = Vec::with_capacity(self.len() * ctx.words_per_exp(new_bits));
        for t in 0..self.len() {
            let degs = pack::unpack(ctx, self.bits, &self.exps[t * old_nw..(t + 1) * old_nw]);
            let needed = pack::min_bits(ctx, &degs)
                .ok_or(Error::Unsupported("exponent too large for packed layout"))?;
            if needed > new_bits {
                return Err(Error::Unsupported("exponent does not fit requested width"));
            }
            exps.extend(pack::pack(ctx, new_bits, &degs));
        }
        self.exps = exps;
        self.bits = new_bits;
        Ok(())
    }

    /// Grows the width until at least `min_bits`, never shrinking.
    pub(crate) fn fit_bits(&mut self, ctx: &Ctx, min_bits: u16) -> Result<(), Error> {
        if min_bits > self.bits {
            self.repack_bits(ctx, min_bits)?;
        }
        Ok(())
    }

    /// The additive inverse.
    #[must_use]
    pub fn neg(&self, ctx: &Ctx) -> Self {
        let ring = ctx.ring();
        Self {
            coeffs: self.coeffs.iter().map(|c| ring.neg(c)).collect(),
            exps: self.exps.clone(),
            bits: self.bits,
        }
    }

    /// Adds two polynomials by merging their sorted term lists.
    #[must_use]
    pub fn add(&self, ctx: &Ctx, other: &Self) -> Self {
        let bits = self.bits.max(other.bits);
        let a = self.at_bits(ctx, bits);
        let b = other.at_bits(ctx, bits);
        let nw = ctx.words_per_exp(bits);
        let mask = ctx.cmpmask(bits);
        let ring = ctx.ring();

        let mut coeffs = Vec::with_capacity(a.len() + b.len());
        let mut exps = Vec::with_capacity((a.len() + b.len()) * nw);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let ea = &a.exps[i * nw..(i + 1) * nw];
            let eb = &b.exps[j * nw..(j + 1) * nw];
            match pack::compare(ea, eb, &mask) {
                Ordering::Greater => {
                    coeffs.push(a.coeffs[i].clone());
                    exps.extend_from_slice(ea);
                    i += 1;
                }
                Ordering::Less => {
                    coeffs.push(b.coeffs[j].clone());
                    exps.extend_from_slice(eb);
                    j += 1;
                }
                Ordering::Equal => {
                    let s = ring.add(&a.coeffs[i], &b.coeffs[j]);
                    if !s.is_zero() {
                        coeffs.push(s);
                        exps.extend_from_slice(ea);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        for t in i..a.len() {
            coeffs.push(a.coeffs[t].clone());
            exps.extend_from_slice(&a.exps[t * nw..(t + 1) * nw]);
        }
        for t in j..b.len() {
            coeffs.push(b.coeffs[t].clone());
            exps.extend_from_slice(&b.exps[t * nw..(t + 1) * nw]);
        }
        Self { coeffs, exps, bits }
    }

    /// Subtracts `other` from `self`.
    #[must_use]
    pub fn sub(&self, ctx: &Ctx, other: &Self) -> Self {
        self.add(ctx, &other.neg(ctx))
    }

    /// Multiplies every coefficient by a scalar. Zero coefficients
    /// produced by zero divisors are dropped.
    #[must_use]
    pub fn scalar_mul(&self, ctx: &Ctx, c: &Integer) -> Self {
        let ring = ctx.ring();
        let c = ring.reduce(c);
        if c.is_zero() {
            return Self::zero(ctx);
        }
        let nw = ctx.words_per_exp(self.bits);
        let mut coeffs = Vec::with_capacity(self.len());
        let mut exps = Vec::with_capacity(self.exps.len());
        for t in 0..self.len() {
            let p = ring.mul(&self.coeffs[t], &c);
            if !p.is_zero() {
                coeffs.push(p);
                exps.extend_from_slice(&self.exps[t * nw..(t + 1) * nw]);
            }
        }
        Self {
            coeffs,
            exps,
            bits: self.bits,
        }
    }

    /// Scales so the leading coefficient becomes one.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NonInvertible`] when the leading coefficient
    /// has no inverse modulo n.
    pub fn make_monic(&self, ctx: &Ctx) -> Result<Self, Error> {
        match self.leading_coeff() {
            None => Ok(self.clone()),
            Some(lc) => {
                let inv = ctx.ring().inv(lc)?;
                Ok(self.scalar_mul(ctx, &inv))
            }
        }
    }

    /// Returns self repacked (or borrowed) at exactly `bits`.
    fn at_bits<'a>(&'a self, ctx: &Ctx, bits: u16) -> std::borrow::Cow<'a, Self> {
        if self.bits == bits {
            std::borrow::Cow::Borrowed(self)
        } else {
            let mut p = self.clone();
            // widening only, cannot fail
            p.repack_bits(ctx, bits).unwrap_or_else(|_| unreachable!());
            std::borrow::Cow::Owned(p)
        }
    }

    /// Evaluates at a full point, one coordinate per variable.
    ///
    /// # Panics
    ///
    /// Panics if `point` does not supply one value per variable.
    #[must_use]
    pub fn evaluate(&self, ctx: &Ctx, point: &[Integer]) -> Integer {
        assert_eq!(point.len(), ctx.nvars(), "one coordinate per variable");
        let ring = ctx.ring();
        let point: Vec<Integer> = point.iter().map(|x| ring.reduce(x)).collect();
        let mut total = Integer::zero();
        for t in 0..self.len() {
            let mut v = self.coeffs[t].clone();
            for (x, d) in point.iter().zip(self.term_degrees(ctx, t)) {
                if d > 0 {
                    v = ring.mul(&v, &ring.pow(x, d));
                }
            }
            total = ring.add(&total, &v);
        }
        total
    }

    /// Debug-grade rendering: terms in order, variables named `x0..`.
    #[must_use]
    pub fn pretty(&self, ctx: &Ctx) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut out = String::new();
        for t in 0..self.len() {
            if t > 0 {
                out.push_str(" + ");
            }
            let degs = self.term_degrees(ctx, t);
            let constant = degs.iter().all(|&d| d == 0);
            let c = &self.coeffs[t];
            if constant || !c.is_one() {
                out.push_str(&c.to_string());
            }
            let mut first = constant || !c.is_one();
            for (v, &d) in degs.iter().enumerate() {
                if d == 0 {
                    continue;
                }
                if first {
                    out.push('*');
                }
                first = true;
                out.push_str(&format!("x{v}"));
                if d > 1 {
                    out.push_str(&format!("^{d}"));
                }
            }
        }
        out
    }
}

/// Sorts `order` so the `nw`-word keys run in decreasing order,
/// radixing on the byte at `digit` (byte 0 is the most significant
/// byte of word 0).
fn radix_sort_desc(keys: &[u64], nw: usize, order: &mut [usize], digit: usize) {
    if order.len() <= SORT_CUTOFF || digit >= nw * 8 {
        order.sort_unstable_by(|&a, &b| keys[b * nw..(b + 1) * nw].cmp(&keys[a * nw..(a + 1) * nw]));
        return;
    }
    let byte_of = |t: usize| -> usize {
        let shift = 56 - 8 * (digit % 8) as u32;
        ((keys[t * nw + digit / 8] >> shift) & 0xff) as usize
    };

    let mut counts = [0usize; 256];
    for &t in order.iter() {
        counts[byte_of(t)] += 1;
    }
    let mut starts = [0usize; 256];
    let mut acc = 0;
    for b in (0..256).rev() {
        starts[b] = acc;
        acc += counts[b];
    }

    let mut scratch = vec![0usize; order.len()];
    let mut next = starts;
    for &t in order.iter() {
        let b = byte_of(t);
        scratch[next[b]] = t;
        next[b] += 1;
    }
    order.copy_from_slice(&scratch);

    for b in 0..256 {
        if counts[b] > 1 {
            radix_sort_desc(keys, nw, &mut order[starts[b]..starts[b] + counts[b]], digit + 1);
        }
    }
}
