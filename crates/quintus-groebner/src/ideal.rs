//! A growable vector of polynomials representing an ideal basis.

use quintus_mpoly::{Ctx, MPoly};

/// An owned list of polynomials: a generating set or a working basis.
///
/// Insertion order is the only ordering; reductions can leave zero
/// entries behind and callers compact them explicitly.
#[derive(Clone, Debug, Default)]
pub struct PolyVec {
    polys: Vec<MPoly>,
}

impl PolyVec {
    /// An empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing list of polynomials as-is.
    #[must_use]
    pub fn from_vec(polys: Vec<MPoly>) -> Self {
        Self { polys }
    }

    /// Number of entries, zero entries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polys.len()
    }

    /// Whether the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    /// The entry at `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> &MPoly {
        &self.polys[i]
    }

    /// All entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[MPoly] {
        &self.polys
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, MPoly> {
        self.polys.iter()
    }

    /// Whether an equal polynomial is already present.
    #[must_use]
    pub fn contains(&self, ctx: &Ctx, p: &MPoly) -> bool {
        self.polys.iter().any(|q| q.equal(ctx, p))
    }

    /// Appends unconditionally.
    pub fn push(&mut self, p: MPoly) {
        self.polys.push(p);
    }

    /// Appends unless zero or already present. Returns whether the
    /// vector grew.
    pub fn push_unique(&mut self, ctx: &Ctx, p: MPoly) -> bool {
        if p.is_zero() || self.contains(ctx, &p) {
            return false;
        }
        self.polys.push(p);
        true
    }

    /// Drops every zero entry, preserving the order of the rest.
    pub fn compact_zeros(&mut self) {
        self.polys.retain(|p| !p.is_zero());
    }
}

impl std::ops::Index<usize> for PolyVec {
    type Output = MPoly;

    fn index(&self, i: usize) -> &MPoly {
        &self.polys[i]
    }
}

impl<'a> IntoIterator for &'a PolyVec {
    type Item = &'a MPoly;
    type IntoIter = std::slice::Iter<'a, MPoly>;

    fn into_iter(self) -> Self::IntoIter {
        self.polys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quintus_mpoly::MonomialOrder;
    use quintus_rings::Integer;

    fn ctx() -> Ctx {
        Ctx::new(2, MonomialOrder::Lex, Integer::new(7))
    }

    #[test]
    fn test_push_unique_dedups() {
        let c = ctx();
        let mut v = PolyVec::new();
        let x = MPoly::gen(&c, 0);
        assert!(v.push_unique(&c, x.clone()));
        assert!(!v.push_unique(&c, x.clone()));
        assert!(!v.push_unique(&c, MPoly::zero(&c)));
        assert!(v.push_unique(&c, MPoly::gen(&c, 1)));
        assert_eq!(v.len(), 2);
        assert!(v.contains(&c, &x));
    }

    #[test]
    fn test_compact_zeros() {
        let c = ctx();
        let mut v = PolyVec::new();
        v.push(MPoly::gen(&c, 0));
        v.push(MPoly::zero(&c));
        v.push(MPoly::gen(&c, 1));
        assert_eq!(v.len(), 3);
        v.compact_zeros();
        assert_eq!(v.len(), 2);
        assert!(v[0].equal(&c, &MPoly::gen(&c, 0)));
        assert!(v[1].equal(&c, &MPoly::gen(&c, 1)));
    }
}
