//! Property-based tests for the Buchberger layer.

use proptest::prelude::*;

use quintus_mpoly::{Ctx, MPoly, MonomialOrder};
use quintus_rings::{Error, Integer};

use crate::buchberger::{buchberger_with_limits, is_groebner, normal_form, spoly};
use crate::ideal::PolyVec;

fn z101() -> Ctx {
    Ctx::new(2, MonomialOrder::Degrevlex, Integer::new(101))
}

// Very small polynomials: random ideals blow up quickly
fn terms() -> impl Strategy<Value = Vec<(i64, Vec<u64>)>> {
    proptest::collection::vec(
        (-100i64..100, proptest::collection::vec(0u64..3, 2)),
        1..4,
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
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn spoly_leading_terms_cancel(s in terms(), t in terms()) {
        let ctx = z101();
        let (f, g) = (mk(&ctx, &s), mk(&ctx, &t));
        prop_assume!(!f.is_zero() && !g.is_zero());

        let sp = spoly(&ctx, &f, &g).unwrap();
        // the S-polynomial drops below the lcm of the leading monomials
        let lf = f.term_degrees(&ctx, 0);
        let lg = g.term_degrees(&ctx, 0);
        let lcm_deg: u64 = lf.iter().zip(&lg).map(|(&a, &b)| a.max(b)).sum();
        if !sp.is_zero() {
            let top: u64 = sp.term_degrees(&ctx, 0).iter().sum();
            prop_assert!(top <= lcm_deg);
            prop_assert_ne!(sp.term_degrees(&ctx, 0),
                lf.iter().zip(&lg).map(|(&a, &b)| a.max(b)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn normal_form_is_stable(s in terms(), t in terms(), u in terms()) {
        let ctx = z101();
        let p = mk(&ctx, &s);
        let basis = PolyVec::from_vec(vec![mk(&ctx, &t), mk(&ctx, &u)]);

        let r = normal_form(&ctx, &p, &basis).unwrap();
        // reducing a normal form changes nothing
        let r2 = normal_form(&ctx, &r, &basis).unwrap();
        prop_assert!(r2.equal(&ctx, &r));
    }

    #[test]
    fn buchberger_output_is_groebner(s in terms(), t in terms()) {
        let ctx = z101();
        let f = vec![mk(&ctx, &s), mk(&ctx, &t)];
        // bounded: pathological ideals may hit the safety valve, which
        // is an acceptable outcome, not a failure
        match buchberger_with_limits(&ctx, &f, 30, 200) {
            Ok(basis) => {
                prop_assert!(is_groebner(&ctx, &basis, Some(&f)).unwrap());
            }
            Err(Error::CapacityExceeded { .. }) => {}
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn generators_reduce_to_zero_against_basis(s in terms(), t in terms()) {
        let ctx = z101();
        let f = vec![mk(&ctx, &s), mk(&ctx, &t)];
        if let Ok(basis) = buchberger_with_limits(&ctx, &f, 30, 200) {
            for p in &f {
                prop_assert!(normal_form(&ctx, p, &basis).unwrap().is_zero());
            }
        }
    }
}
