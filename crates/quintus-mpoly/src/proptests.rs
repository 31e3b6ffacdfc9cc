//! Property-based tests for the sparse polynomial layer.

use proptest::prelude::*;

use quintus_rings::Integer;

use crate::ctx::{Ctx, MonomialOrder};
use crate::pack;
use crate::poly::MPoly;

fn z101(order: MonomialOrder) -> Ctx {
    Ctx::new(2, order, Integer::new(101))
}

fn order() -> impl Strategy<Value = MonomialOrder> {
    prop_oneof![
        Just(MonomialOrder::Lex),
        Just(MonomialOrder::Deglex),
        Just(MonomialOrder::Degrevlex),
    ]
}

// Small random term lists over two variables
fn terms() -> impl Strategy<Value = Vec<(i64, Vec<u64>)>> {
    proptest::collection::vec(
        (-200i64..200, proptest::collection::vec(0u64..6, 2)),
        0..8,
    )
}

fn mk(ctx: &Ctx, terms: &[(i64, Vec<u64>)]) -> MPoly {
    let terms: Vec<(Integer, Vec<u64>)> = terms
        .iter()
        .map(|(c, e)| (Integer::new(*c), e.clone()))
        .collect();
    MPoly::from_terms(ctx, &terms).unwrap()
}

proptest! {
    #[test]
    fn canonical_after_construction(o in order(), t in terms()) {
        let ctx = z101(o);
        let p = mk(&ctx, &t);
        prop_assert!(p.is_canonical(&ctx));
    }

    #[test]
    fn normalize_is_idempotent(o in order(), t in terms()) {
        let ctx = z101(o);
        let p = mk(&ctx, &t);
        let mut q = p.clone();
        q.normalize(&ctx);
        prop_assert!(q.equal(&ctx, &p));
    }

    #[test]
    fn add_commutes(o in order(), s in terms(), t in terms()) {
        let ctx = z101(o);
        let (p, q) = (mk(&ctx, &s), mk(&ctx, &t));
        prop_assert!(p.add(&ctx, &q).equal(&ctx, &q.add(&ctx, &p)));
    }

    #[test]
    fn sub_self_is_zero(o in order(), t in terms()) {
        let ctx = z101(o);
        let p = mk(&ctx, &t);
        prop_assert!(p.sub(&ctx, &p).is_zero());
    }

    #[test]
    fn mul_commutes(o in order(), s in terms(), t in terms()) {
        let ctx = z101(o);
        let (p, q) = (mk(&ctx, &s), mk(&ctx, &t));
        let pq = p.mul(&ctx, &q).unwrap();
        prop_assert!(pq.is_canonical(&ctx));
        prop_assert!(pq.equal(&ctx, &q.mul(&ctx, &p).unwrap()));
    }

    #[test]
    fn mul_distributes(o in order(), s in terms(), t in terms(), u in terms()) {
        let ctx = z101(o);
        let (p, q, r) = (mk(&ctx, &s), mk(&ctx, &t), mk(&ctx, &u));
        let left = p.mul(&ctx, &q.add(&ctx, &r)).unwrap();
        let right = p.mul(&ctx, &q).unwrap().add(&ctx, &p.mul(&ctx, &r).unwrap());
        prop_assert!(left.equal(&ctx, &right));
    }

    #[test]
    fn divides_roundtrip(o in order(), s in terms(), t in terms()) {
        let ctx = z101(o);
        let (p, q) = (mk(&ctx, &s), mk(&ctx, &t));
        prop_assume!(!q.is_zero());

        let prod = p.mul(&ctx, &q).unwrap();
        let back = prod.divides(&ctx, &q).unwrap();
        prop_assert!(back.is_some());
        prop_assert!(back.unwrap().equal(&ctx, &p));
    }

    #[test]
    fn divrem_identity(o in order(), s in terms(), t in terms()) {
        let ctx = z101(o);
        let (a, b) = (mk(&ctx, &s), mk(&ctx, &t));
        prop_assume!(!b.is_zero());

        let (q, r) = a.divrem(&ctx, &b).unwrap();
        prop_assert!(q.is_canonical(&ctx));
        prop_assert!(r.is_canonical(&ctx));
        let check = q.mul(&ctx, &b).unwrap().add(&ctx, &r);
        prop_assert!(check.equal(&ctx, &a));

        // no remainder term is divisible by lt(b)
        let mut bw = b.clone();
        bw.fit_bits(&ctx, r.bits()).unwrap();
        let nw = ctx.words_per_exp(r.bits());
        let oflow = crate::ctx::overflow_mask(r.bits());
        for i in 0..r.len() {
            prop_assert!(!pack::monomial_divides(
                r.term_exp(&ctx, i),
                &bw.exps()[..nw],
                oflow
            ));
        }
    }

    #[test]
    fn divrem_ideal_identity(o in order(), s in terms(), t in terms(), u in terms()) {
        let ctx = z101(o);
        let a = mk(&ctx, &s);
        let f = vec![mk(&ctx, &t), mk(&ctx, &u)];
        prop_assume!(f.iter().all(|p| !p.is_zero()));

        let (qs, r) = a.divrem_ideal(&ctx, &f).unwrap();
        let mut acc = r.clone();
        for (q, d) in qs.iter().zip(&f) {
            acc = acc.add(&ctx, &q.mul(&ctx, d).unwrap());
        }
        prop_assert!(acc.equal(&ctx, &a));
    }

    #[test]
    fn gcd_cofactors_exact(s in terms(), t in terms(), u in terms()) {
        let ctx = z101(MonomialOrder::Lex);
        // force a common factor so the gcd is not always trivial
        let f = mk(&ctx, &s);
        let a = f.mul(&ctx, &mk(&ctx, &t)).unwrap();
        let b = f.mul(&ctx, &mk(&ctx, &u)).unwrap();

        let (g, abar, bbar) = a.gcd_cofactors(&ctx, &b).unwrap();
        prop_assert!(g.mul(&ctx, &abar).unwrap().equal(&ctx, &a));
        prop_assert!(g.mul(&ctx, &bbar).unwrap().equal(&ctx, &b));
        if !a.is_zero() || !b.is_zero() {
            prop_assert!(!g.is_zero());
            // g divides the forced common factor's contribution
            prop_assert!(a.divides(&ctx, &g).unwrap().is_some());
        }
    }

    #[test]
    fn push_then_normalize_matches_adds(o in order(), t in terms()) {
        let ctx = z101(o);
        // build once with push_term + normalize, once with repeated add
        let mut pushed = MPoly::zero(&ctx);
        let mut added = MPoly::zero(&ctx);
        for (c, e) in &t {
            pushed.push_term(&ctx, Integer::new(*c), e).unwrap();
            let one_term =
                MPoly::from_terms(&ctx, &[(Integer::new(*c), e.clone())]).unwrap();
            added = added.add(&ctx, &one_term);
        }
        pushed.normalize(&ctx);
        prop_assert!(pushed.equal(&ctx, &added));
        prop_assert!(pushed.is_canonical(&ctx));
    }
}
