//! End-to-end walks through the whole stack over Z/7Z with lex order.

use quintus::prelude::*;

fn z7(nvars: usize) -> Ctx {
    Ctx::new(nvars, MonomialOrder::Lex, Integer::new(7))
}

fn mk(ctx: &Ctx, terms: &[(i64, &[u64])]) -> MPoly {
    let terms: Vec<(Integer, Vec<u64>)> = terms
        .iter()
        .map(|&(c, e)| (Integer::new(c), e.to_vec()))
        .collect();
    MPoly::from_terms(ctx, &terms).unwrap()
}

#[test]
fn exact_division_by_a_generator() {
    let ctx = z7(2);
    // (x^2 y + 3x) / x = xy + 3, and y does not divide
    let a = mk(&ctx, &[(1, &[2, 1]), (3, &[1, 0])]);
    let q = a.divides(&ctx, &MPoly::gen(&ctx, 0)).unwrap().unwrap();
    assert!(q.equal(&ctx, &mk(&ctx, &[(1, &[1, 1]), (3, &[0, 0])])));
    assert!(a.divides(&ctx, &MPoly::gen(&ctx, 1)).unwrap().is_none());
}

#[test]
fn division_with_remainder() {
    let ctx = z7(2);
    // x^2 + y^2 = (x - y)(x + y) + 2y^2
    let a = mk(&ctx, &[(1, &[2, 0]), (1, &[0, 2])]);
    let b = mk(&ctx, &[(1, &[1, 0]), (1, &[0, 1])]);
    let (q, r) = a.divrem(&ctx, &b).unwrap();
    assert!(q.equal(&ctx, &mk(&ctx, &[(1, &[1, 0]), (6, &[0, 1])])));
    assert!(r.equal(&ctx, &mk(&ctx, &[(2, &[0, 2])])));
    assert!(q.mul(&ctx, &b).unwrap().add(&ctx, &r).equal(&ctx, &a));
}

#[test]
fn gcd_of_univariate_images() {
    let ctx = z7(1);
    // gcd(x^2 - 1, x^2 + 2x + 1) = x + 1
    let a = mk(&ctx, &[(1, &[2]), (-1, &[0])]);
    let b = mk(&ctx, &[(1, &[2]), (2, &[1]), (1, &[0])]);
    let (g, abar, bbar) = a.gcd_cofactors(&ctx, &b).unwrap();
    assert!(g.equal(&ctx, &mk(&ctx, &[(1, &[1]), (1, &[0])])));
    assert!(g.mul(&ctx, &abar).unwrap().equal(&ctx, &a));
    assert!(g.mul(&ctx, &bbar).unwrap().equal(&ctx, &b));
}

#[test]
fn buchberger_reaches_a_groebner_basis() {
    let ctx = z7(2);
    let f = vec![
        mk(&ctx, &[(1, &[2, 0]), (1, &[0, 1])]),
        mk(&ctx, &[(1, &[1, 1]), (-1, &[0, 0])]),
    ];
    let basis = buchberger(&ctx, &f).unwrap();
    assert!(is_groebner(&ctx, &basis, Some(&f)).unwrap());

    // a random-looking ideal member reduces to zero
    let member = f[0]
        .mul(&ctx, &mk(&ctx, &[(3, &[1, 1]), (2, &[0, 0])]))
        .unwrap()
        .add(&ctx, &f[1].mul(&ctx, &MPoly::gen(&ctx, 0)).unwrap());
    assert!(normal_form(&ctx, &member, &basis).unwrap().is_zero());
}

#[test]
fn staged_construction_matches_arithmetic() {
    let ctx = z7(2);
    // push terms out of order with duplicates, then normalize
    let mut p = MPoly::zero(&ctx);
    p.push_term(&ctx, Integer::new(3), &[0, 1]).unwrap();
    p.push_term(&ctx, Integer::new(1), &[1, 0]).unwrap();
    p.push_term(&ctx, Integer::new(5), &[0, 1]).unwrap();
    p.push_term(&ctx, Integer::new(6), &[1, 0]).unwrap();
    p.normalize(&ctx);

    // 7x cancels entirely, 8y reduces to y
    assert!(p.equal(&ctx, &MPoly::gen(&ctx, 1)));
    assert!(p.is_canonical(&ctx));
}

#[test]
fn packing_width_grows_at_the_boundary() {
    let ctx = z7(1);
    let p = mk(&ctx, &[(1, &[127])]);
    assert_eq!(p.bits(), 7);

    // squaring leaves the 7-bit range and forces a promotion
    let sq = p.mul(&ctx, &p).unwrap();
    assert_eq!(sq.bits(), 15);
    assert_eq!(sq.term_degrees(&ctx, 0), vec![254]);

    // and the promoted result still divides back exactly
    let back = sq.divides(&ctx, &p).unwrap().unwrap();
    assert!(back.equal(&ctx, &p));
}
