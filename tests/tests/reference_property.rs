use precalc::{evaluate_source, to_postfix};
use precalc_env::ValueEnv;
use proptest::prelude::*;
use tests::{reference_eval, same_value};

/// Random well-formed expressions over small decimals, with arbitrary
/// spacing and redundant parentheses
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof!["[0-9]{1,3}", "[0-9]{1,2}\\.[0-9]{1,2}"];
    leaf.prop_recursive(8, 64, 2, |inner| {
        prop_oneof![
            4 => (inner.clone(), "[-+*/]", inner.clone(), "[ ]{0,2}")
                .prop_map(|(l, op, r, pad)| format!("{l}{pad}{op}{pad}{r}")),
            1 => inner.prop_map(|e| format!("({e})")),
        ]
    })
}

proptest! {
    #[test]
    fn prop_postfix_evaluation_matches_recursive_descent(source in expression()) {
        let expected = reference_eval(&source).expect("generated input is well formed");
        let actual = evaluate_source(&source, &ValueEnv::new()).unwrap();
        prop_assert!(
            same_value(actual, expected),
            "{} evaluated to {} but the reference gives {}",
            source,
            actual,
            expected
        );
    }

    #[test]
    fn prop_parsing_is_deterministic(source in expression()) {
        let first = to_postfix(&source).unwrap();
        let second = to_postfix(&source).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_operand_pairs_are_always_rejected(a in "[0-9]{1,3}", b in "[0-9]{1,3}") {
        let source = format!("{a} {b}");
        prop_assert!(to_postfix(&source).is_err());
    }
}
