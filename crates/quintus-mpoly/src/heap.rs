//! The candidate heap shared by the merge-based arithmetic.
//!
//! Multiplication and division both walk the terms of a product in
//! decreasing monomial order by keeping a max-heap of candidate
//! monomials. Several candidates can carry the same monomial; those are
//! chained onto a single heap entry when insertion happens to pass an
//! equal ancestor, and [`ExpHeap::pop_group`] collects whatever equal
//! entries remain at the top, so each distinct monomial surfaces
//! exactly once with all of its `(i, j)` sources.

use std::cmp::Ordering;

use smallvec::{smallvec, SmallVec};

use crate::pack;

/// A packed exponent vector small enough to keep inline for typical
/// variable counts.
pub(crate) type Exp = SmallVec<[u64; 2]>;

/// One source of a candidate monomial: term `i` of one factor against
/// term `j` of the other, in divisor `p` for multi-divisor division.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pair {
    pub p: usize,
    pub i: usize,
    pub j: usize,
}

struct Entry {
    exp: Exp,
    pairs: SmallVec<[Pair; 2]>,
}

/// A binary max-heap of candidate monomials keyed by packed exponent.
pub(crate) struct ExpHeap {
    entries: Vec<Entry>,
    cmpmask: Vec<u64>,
}

impl ExpHeap {
    pub fn new(cmpmask: Vec<u64>) -> Self {
        Self {
            entries: Vec::new(),
            cmpmask,
        }
    }

    /// Inserts one candidate. If an ancestor on the insertion path
    /// already holds the same monomial the pair chains onto it and the
    /// heap does not grow.
    pub fn insert(&mut self, exp: Exp, pair: Pair) {
        let mut a = self.entries.len();
        while a > 0 {
            a = (a - 1) / 2;
            match pack::compare(&exp, &self.entries[a].exp, &self.cmpmask) {
                Ordering::Equal => {
                    self.entries[a].pairs.push(pair);
                    return;
                }
                // ancestors only grow toward the root
                Ordering::Less => break,
                Ordering::Greater => {}
            }
        }

        self.entries.push(Entry {
            exp,
            pairs: smallvec![pair],
        });
        let mut pos = self.entries.len() - 1;
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if pack::compare(
                &self.entries[pos].exp,
                &self.entries[parent].exp,
                &self.cmpmask,
            ) == Ordering::Greater
            {
                self.entries.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    /// Pops the largest monomial together with every pair chained to
    /// it, across however many equal entries sit at the top.
    pub fn pop_group(&mut self) -> Option<(Exp, SmallVec<[Pair; 4]>)> {
        let top = self.pop()?;
        let exp = top.exp;
        let mut pairs: SmallVec<[Pair; 4]> = SmallVec::new();
        pairs.extend(top.pairs);
        while let Some(next) = self.entries.first() {
            if pack::compare(&next.exp, &exp, &self.cmpmask) != Ordering::Equal {
                break;
            }
            let e = self.pop().unwrap_or_else(|| unreachable!());
            pairs.extend(e.pairs);
        }
        Some((exp, pairs))
    }

    fn pop(&mut self) -> Option<Entry> {
        if self.entries.is_empty() {
            return None;
        }
        let top = self.entries.swap_remove(0);
        let n = self.entries.len();
        let mut pos = 0;
        loop {
            let (l, r) = (2 * pos + 1, 2 * pos + 2);
            if l >= n {
                break;
            }
            let mut largest = l;
            if r < n
                && pack::compare(
                    &self.entries[r].exp,
                    &self.entries[l].exp,
                    &self.cmpmask,
                ) == Ordering::Greater
            {
                largest = r;
            }
            if pack::compare(
                &self.entries[largest].exp,
                &self.entries[pos].exp,
                &self.cmpmask,
            ) == Ordering::Greater
            {
                self.entries.swap(pos, largest);
                pos = largest;
            } else {
                break;
            }
        }
        Some(top)
    }
}
