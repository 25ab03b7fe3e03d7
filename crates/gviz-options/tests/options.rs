//! Tests for the typed option mechanism.

use gviz_options::{OptionSpec, OptionStore, OptionsError, Rule, TypedConfig};
use serde_json::{Value, json};

fn number_schema() -> Vec<OptionSpec> {
    vec![
        OptionSpec::with_default("decimalSymbol", Rule::NonEmptyString, json!(".")),
        OptionSpec::with_default("groupingSymbol", Rule::NonEmptyString, json!(",")),
        OptionSpec::new("fractionDigits", Rule::Int),
        OptionSpec::new("negativeColor", Rule::NonEmptyString),
        OptionSpec::with_default("negativeParens", Rule::Bool, json!(false)),
        OptionSpec::new("pattern", Rule::NonEmptyString),
        OptionSpec::new("prefix", Rule::NonEmptyString),
        OptionSpec::new("suffix", Rule::NonEmptyString),
    ]
}

#[test]
fn store_roundtrip_with_defaults() {
    let mut store = OptionStore::new([("pattern", Value::Null), ("prefix", json!(""))]);
    assert!(store.has_option("pattern"));
    assert!(!store.has_option("width"));

    store.set("prefix", json!("$")).unwrap();
    assert_eq!(store.get("prefix").unwrap(), &json!("$"));
    assert_eq!(store.get("pattern").unwrap(), &Value::Null);

    // Full payload, defaults included.
    assert_eq!(
        serde_json::to_value(&store).unwrap(),
        json!({ "pattern": null, "prefix": "$" })
    );
}

#[test]
fn store_rejects_unknown_names_on_both_paths() {
    let mut store = OptionStore::new([("pattern", Value::Null)]);
    assert_eq!(
        store.get("width").unwrap_err(),
        OptionsError::unknown_option("width")
    );
    assert_eq!(
        store.set("width", json!(400)).unwrap_err(),
        OptionsError::unknown_option("width")
    );
}

#[test]
fn config_applies_valid_mapping() {
    let mut config = TypedConfig::new(number_schema());
    config
        .apply(&json!({
            "pattern": "#,##0.00",
            "fractionDigits": 2,
            "negativeParens": true,
            "prefix": "$",
        }))
        .unwrap();

    assert_eq!(config.get("pattern").unwrap(), &json!("#,##0.00"));
    assert_eq!(config.get("negativeParens").unwrap(), &json!(true));
    // Untouched options keep their defaults.
    assert_eq!(config.get("decimalSymbol").unwrap(), &json!("."));
}

#[test]
fn config_rejects_non_mapping_input() {
    let mut config = TypedConfig::new(number_schema());
    for raw in [json!(["pattern"]), json!("pattern"), json!(42)] {
        let err = config.apply(&raw).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidValue { .. }), "{raw}");
    }
}

#[test]
fn config_rejects_unrecognized_key_and_reports_defaults() {
    let mut config = TypedConfig::new(number_schema());
    let err = config.apply(&json!({ "paterrn": "0.00" })).unwrap_err();
    match &err {
        OptionsError::InvalidProperty { property, defaults } => {
            assert_eq!(property, "paterrn");
            // The diagnostic carries the whole recognized-defaults mapping.
            let parsed: Value = serde_json::from_str(defaults).unwrap();
            assert_eq!(parsed["decimalSymbol"], json!("."));
            assert_eq!(parsed["negativeParens"], json!(false));
        }
        other => panic!("expected InvalidProperty, got {other:?}"),
    }
}

#[test]
fn config_rejects_rule_violations() {
    let mut config = TypedConfig::new(number_schema());
    let cases = [
        ("pattern", json!(""), "a non-empty string"),
        ("fractionDigits", json!(1.5), "an integer"),
        ("negativeParens", json!("yes"), "a boolean"),
    ];
    for (option, value, expected) in cases {
        assert_eq!(
            config.set(option, value).unwrap_err(),
            OptionsError::invalid_value(option, expected)
        );
    }
    // A failed set leaves the previous value in place.
    assert_eq!(config.get("negativeParens").unwrap(), &json!(false));
}

#[test]
fn config_serializes_full_value_mapping() {
    let mut config = TypedConfig::new(number_schema());
    config.set("suffix", json!(" kg")).unwrap();
    let doc = serde_json::to_value(&config).unwrap();
    assert_eq!(
        doc,
        json!({
            "decimalSymbol": ".",
            "groupingSymbol": ",",
            "fractionDigits": null,
            "negativeColor": null,
            "negativeParens": false,
            "pattern": null,
            "prefix": null,
            "suffix": " kg",
        })
    );
}
