//! Property tests for the matching engine's reporting invariants.

use proptest::prelude::*;
use serde_json::{json, Value};
use treespec_schema::{validate, validate_with, Grammar, ValidateOptions};

fn int_list_grammar() -> Grammar {
    Grammar::from_yaml_str("list: [ {int: ~} ]\n").unwrap()
}

fn record_grammar() -> Grammar {
    Grammar::from_yaml_str(
        "map:\n  a: [ {int: ~} ]\n  b: [ {enum: [x, y]} ]\n  c:\n    list: [ {uint: ~} ]\n",
    )
    .unwrap()
}

/// Arbitrary JSON values up to a small depth.
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,4}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_valid_iff_no_violations(doc in value_strategy(), closed in any::<bool>()) {
        let opts = ValidateOptions::default().with_closed(closed);
        let report = validate_with(&record_grammar(), &doc, &opts);
        prop_assert_eq!(report.valid, report.violations.is_empty());
    }

    #[test]
    fn prop_list_reports_each_failing_element(items in prop::collection::vec(
        prop_oneof![
            any::<i32>().prop_map(|n| json!(n)),
            "[a-z]{1,3}".prop_map(Value::String),
        ],
        0..20,
    )) {
        let failing: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_string())
            .map(|(i, _)| format!("[{i}]"))
            .collect();
        let report = validate(&int_list_grammar(), &Value::Array(items));
        let paths: Vec<String> = report
            .violations
            .iter()
            .map(|v| v.document_path.to_string())
            .collect();
        prop_assert_eq!(paths, failing);
    }

    #[test]
    fn prop_undeclared_keys_never_reported_when_open(
        extra in prop::collection::btree_map("[e-z][a-z]{0,3}", value_strategy(), 0..5)
    ) {
        let mut doc = json!({"a": 1, "b": "x", "c": [1, 2]});
        if let Value::Object(map) = &mut doc {
            map.extend(extra);
        }
        let report = validate(&record_grammar(), &doc);
        prop_assert!(report.valid, "{}", report.violations);
    }
}
