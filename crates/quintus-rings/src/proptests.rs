//! Property-based tests for the base rings.

use proptest::prelude::*;

use crate::integer::Integer;
use crate::modular::ModRing;
use crate::poly::ModPoly;

fn z101() -> ModRing {
    ModRing::new(Integer::new(101))
}

// Strategy for ring elements mod 101
fn elem() -> impl Strategy<Value = i64> {
    -200i64..200i64
}

// Strategy for small polynomials over Z/101Z (degree 0-4)
fn small_poly() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(elem(), 1..=5)
}

fn mk(ring: &ModRing, coeffs: &[i64]) -> ModPoly {
    ModPoly::new(coeffs.iter().map(|&c| Integer::new(c)).collect(), ring)
}

proptest! {
    #[test]
    fn modring_add_commutative(a in elem(), b in elem()) {
        let r = z101();
        let (a, b) = (r.element(a), r.element(b));
        prop_assert_eq!(r.add(&a, &b), r.add(&b, &a));
    }

    #[test]
    fn modring_sub_add_roundtrip(a in elem(), b in elem()) {
        let r = z101();
        let (a, b) = (r.element(a), r.element(b));
        prop_assert_eq!(r.add(&r.sub(&a, &b), &b), a);
    }

    #[test]
    fn modring_inverse(a in 1i64..101i64) {
        let r = z101();
        let a = r.element(a);
        let inv = r.inv(&a).unwrap();
        prop_assert!(r.is_one(&r.mul(&a, &inv)));
    }

    #[test]
    fn poly_mul_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
        let r = z101();
        let (a, b, c) = (mk(&r, &a), mk(&r, &b), mk(&r, &c));
        let left = a.mul(&b.add(&c, &r), &r);
        let right = a.mul(&b, &r).add(&a.mul(&c, &r), &r);
        prop_assert_eq!(left, right);
    }

    #[test]
    fn poly_divrem_identity(a in small_poly(), b in small_poly()) {
        let r = z101();
        let (a, b) = (mk(&r, &a), mk(&r, &b));
        prop_assume!(!b.is_zero());

        let (q, rem) = a.divrem(&b, &r).unwrap();
        prop_assert_eq!(q.mul(&b, &r).add(&rem, &r), a);
        prop_assert!(rem.degree() < b.degree());
    }

    #[test]
    fn poly_gcd_divides_both(a in small_poly(), b in small_poly()) {
        let r = z101();
        let (a, b) = (mk(&r, &a), mk(&r, &b));
        prop_assume!(!a.is_zero() || !b.is_zero());

        let (g, abar, bbar) = a.gcd_cofactors(&b, &r).unwrap();
        prop_assert_eq!(g.mul(&abar, &r), a);
        prop_assert_eq!(g.mul(&bbar, &r), b);
    }

    #[test]
    fn poly_eval_is_homomorphism(a in small_poly(), b in small_poly(), x in elem()) {
        let r = z101();
        let (a, b) = (mk(&r, &a), mk(&r, &b));
        let x = r.element(x);

        let prod = a.mul(&b, &r);
        prop_assert_eq!(
            prod.evaluate(&x, &r),
            r.mul(&a.evaluate(&x, &r), &b.evaluate(&x, &r))
        );
    }
}
