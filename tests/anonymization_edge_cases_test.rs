//! Edge case tests for the anonymization engine

use seman::anonymization::AnonymizationEngine;
use seman::domain::SemanError;
use seman::schema::{Schema, SchemaNode, TransformerConfig};
use seman::transformers::{TransformerKind, TransformerRegistry, ValueMapperOptions};
use serde_json::{json, Value};
use test_case::test_case;

fn debts_engine() -> AnonymizationEngine {
    AnonymizationEngine::new(Schema::object([
        ("age", Schema::number().range_bucket([30, 40], ["jung", "mittel", "alt"])),
        (
            "debts",
            Schema::array(Schema::object([
                ("type", Schema::string()),
                (
                    "amount",
                    Schema::number().range_bucket([1000, 5000], ["Small", "Medium", "Large"]),
                ),
            ])),
        ),
    ]))
    .expect("Failed to create engine")
}

#[test_case(json!({}), json!({}) ; "empty object")]
#[test_case(json!({"debts": []}), json!({"debts": []}) ; "empty array")]
#[test_case(json!({"age": null, "debts": null}), json!({"age": null, "debts": null}) ; "null fields")]
#[test_case(json!({"debts": [null]}), json!({"debts": [null]}) ; "null array element")]
#[test_case(json!({"debts": [42]}), json!({"debts": [{}]}) ; "primitive where object expected")]
#[test_case(json!({"debts": {"type": "Kredit"}}), json!({"debts": {"type": "Kredit"}}) ; "object where array expected")]
#[test_case(json!({"age": "vierunddreißig"}), json!({"age": "vierunddreißig"}) ; "non numeric age")]
#[test_case(json!(42), json!({}) ; "number at root")]
#[test_case(Value::Null, Value::Null ; "null at root")]
fn test_structural_edge_cases(input: Value, expected: Value) {
    assert_eq!(debts_engine().anonymize(&input), expected);
}

#[test]
fn test_array_length_and_order_are_preserved() {
    let amounts: Vec<Value> = (0..100)
        .map(|i| json!({"type": format!("t{i}"), "amount": i * 100, "creditor": "Bank"}))
        .collect();
    let output = debts_engine().anonymize(&json!({ "debts": amounts }));

    let debts = output["debts"].as_array().unwrap();
    assert_eq!(debts.len(), 100);
    for (i, debt) in debts.iter().enumerate() {
        assert_eq!(debt["type"], json!(format!("t{i}")));
        assert!(debt.get("creditor").is_none());
    }
    assert_eq!(debts[0]["amount"], "Small");
    assert_eq!(debts[10]["amount"], "Medium");
    assert_eq!(debts[50]["amount"], "Large");
}

#[test]
fn test_injected_fields_are_dropped_at_every_depth() {
    let output = debts_engine().anonymize(&json!({
        "__proto__": {"admin": true},
        "constructor": "x",
        "debts": [{"type": "Kredit", "hasOwnProperty": "y", "amount": 10}]
    }));
    assert_eq!(output, json!({"debts": [{"type": "Kredit", "amount": "Small"}]}));
}

#[test]
fn test_transformer_on_object_receives_filtered_object() {
    // A ValueMapper on an object maps the filtered object; objects have no key
    let schema = Schema::object([(
        "profile",
        Schema::object([("age", Schema::number())])
            .value_mapper(ValueMapperOptions::new().default_value("Profil")),
    )]);
    let engine = AnonymizationEngine::new(schema).unwrap();

    let output = engine.anonymize(&json!({"profile": {"age": 34, "name": "Max"}}));
    assert_eq!(output, json!({"profile": "Profil"}));
}

#[test]
fn test_primitive_node_passes_composite_through() {
    let engine = AnonymizationEngine::new(Schema::object([("score", Schema::number())])).unwrap();
    let output = engine.anonymize(&json!({"score": {"value": 85}}));
    assert_eq!(output, json!({"score": {"value": 85}}));
}

#[test]
fn test_unknown_transformer_kind_is_not_fatal() {
    let schema: SchemaNode = serde_json::from_value(json!({
        "type": "object",
        "fields": {
            "iban": {"type": "string", "transformer": {"kind": "Hash", "options": {"salt": "x"}}},
            "age": {"type": "number", "transformer": {"kind": "RangeBucket", "options": {"buckets": [30], "labels": ["jung", "alt"]}}}
        }
    }))
    .unwrap();

    let engine = AnonymizationEngine::new(schema).unwrap();
    let result = engine.anonymize_with_report(&json!({"iban": "DE89370400440532013000", "age": 40}));

    assert_eq!(
        result.data,
        json!({"iban": "DE89370400440532013000", "age": "alt"})
    );
    assert_eq!(result.report.unknown_transformers.get("Hash"), Some(&1));
    assert!(result.report.has_warnings());
}

#[test]
fn test_too_few_labels_yield_unknown() {
    let engine = AnonymizationEngine::new(Schema::object([(
        "income",
        Schema::number().range_bucket([1000, 2000, 3000], ["niedrig", "mittel"]),
    )]))
    .unwrap();

    assert_eq!(engine.anonymize(&json!({"income": 1500})), json!({"income": "mittel"}));
    assert_eq!(engine.anonymize(&json!({"income": 2500})), json!({"income": "Unknown"}));
    assert_eq!(engine.anonymize(&json!({"income": 9000})), json!({"income": "Unknown"}));
}

#[test]
fn test_malformed_builtin_options_fail_construction() {
    let schema = Schema::object([(
        "birthDate",
        Schema::string().transform(TransformerConfig::new(
            TransformerKind::FuzzyDate,
            json!({"precision": 4}),
        )),
    )]);

    match AnonymizationEngine::new(schema) {
        Err(SemanError::InvalidTransformerOptions { path, kind, message }) => {
            assert_eq!(path, "$.birthDate");
            assert_eq!(kind, "FuzzyDate");
            assert!(message.contains("Invalid FuzzyDate options"));
        }
        other => panic!("expected invalid options error, got {other:?}"),
    }
}

#[test]
fn test_depth_guard_rejects_deep_schema() {
    let mut node = Schema::number();
    for _ in 0..70 {
        node = Schema::array(node);
    }

    let err = AnonymizationEngine::new(node.clone()).unwrap_err();
    assert!(matches!(
        err,
        SemanError::SchemaTooDeep {
            depth: 71,
            max_depth: 64
        }
    ));

    let engine = AnonymizationEngine::builder(node).max_depth(100).build();
    assert!(engine.is_ok());
}

#[test]
fn test_deep_input_within_guard() {
    let mut schema = Schema::number().range_bucket([0], ["negativ", "positiv"]);
    let mut input = json!(5);
    let mut expected = json!("positiv");
    for _ in 0..60 {
        schema = Schema::object([("inner", schema)]);
        input = json!({ "inner": input, "noise": 1 });
        expected = json!({ "inner": expected });
    }

    let engine = AnonymizationEngine::new(schema).unwrap();
    assert_eq!(engine.anonymize(&input), expected);
}

#[test]
fn test_empty_registry_leaves_values_untransformed() {
    let engine = AnonymizationEngine::builder(Schema::object([(
        "age",
        Schema::number().range_bucket([30], ["jung", "alt"]),
    )]))
    .registry(TransformerRegistry::empty())
    .build()
    .unwrap();

    let result = engine.anonymize_with_report(&json!({"age": 34, "name": "Max"}));
    assert_eq!(result.data, json!({"age": 34}));
    assert_eq!(result.report.unknown_transformers.get("RangeBucket"), Some(&1));
}

#[test]
fn test_reanonymizing_is_not_assumed_idempotent() {
    let engine = debts_engine();
    let once = engine.anonymize(&json!({"age": 34}));
    let twice = engine.anonymize(&once);

    assert_eq!(once, json!({"age": "mittel"}));
    // Labels are not numbers, so the second pass falls back to the string form
    assert_eq!(twice, json!({"age": "mittel"}));
}
