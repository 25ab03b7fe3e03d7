//! Tests for the serialized table document and the formats accessor.

use gviz_datatable::{Datatable, DatatableError, DateFormat, Format, NumberFormat};
use serde_json::{Value, json};

#[test]
fn document_has_exactly_cols_and_rows() {
    let mut table = Datatable::new();
    table.add_string_column("Name");
    table.add_row(&json!(["Amy"])).unwrap();

    let doc = serde_json::to_value(&table).unwrap();
    let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["cols", "rows"]);
}

#[test]
fn name_age_scenario() {
    let mut table = Datatable::new();
    table.add_string_column("Name");
    table.add_number_column("Age");
    table.add_row(&json!(["Amy", 5])).unwrap();

    assert_eq!(
        serde_json::to_value(&table).unwrap(),
        json!({
            "cols": [
                { "type": "string", "label": "Name" },
                { "type": "number", "label": "Age" },
            ],
            "rows": [
                { "c": [ { "v": "Amy" }, { "v": 5 } ] },
            ],
        })
    );
}

#[test]
fn name_age_scenario_snapshot() {
    let mut table = Datatable::new();
    table.add_string_column("Name");
    table.add_number_column("Age");
    table.add_row(&json!(["Amy", 5])).unwrap();

    insta::assert_snapshot!(
        table.to_json().unwrap(),
        @r#"{"cols":[{"type":"string","label":"Name"},{"type":"number","label":"Age"}],"rows":[{"c":[{"v":"Amy"},{"v":5}]}]}"#
    );
}

#[test]
fn document_shape_tracks_columns_and_rows() {
    let mut table = Datatable::new();
    table.add_string_column("a");
    table.add_number_column("b");
    table.add_number_column("c");
    table
        .add_rows(&json!([["x", 1, 2], ["y", 3, 4], ["z", 5, 6], ["w", 7, 8]]))
        .unwrap();

    let doc = serde_json::to_value(&table).unwrap();
    assert_eq!(doc["cols"].as_array().unwrap().len(), 3);
    assert_eq!(doc["rows"].as_array().unwrap().len(), 4);
    for row in doc["rows"].as_array().unwrap() {
        assert_eq!(row["c"].as_array().unwrap().len(), 3);
    }
}

#[test]
fn unset_column_parts_are_omitted() {
    let mut table = Datatable::new();
    table.add_column(&json!("number")).unwrap();

    assert_eq!(
        serde_json::to_value(&table).unwrap()["cols"],
        json!([{ "type": "number" }])
    );
}

#[test]
fn format_column_registers_by_index() {
    let mut table = Datatable::new();
    table.add_string_column("Name");
    table.add_number_column("Salary");
    assert!(!table.has_formats());

    let mut salary = NumberFormat::default();
    salary.prefix("$").unwrap().fraction_digits(2).unwrap();
    table.format_column(1, salary.clone()).unwrap();

    assert!(table.has_formats());
    let formats = table.formats();
    assert_eq!(formats.len(), 1);
    assert_eq!(*formats[&1], Format::Number(salary));

    let err = table.format_column(2, NumberFormat::default()).unwrap_err();
    assert_eq!(err, DatatableError::invalid_column_index(2, 2));
}

#[test]
fn format_column_overwrites_prior_registration() {
    let mut table = Datatable::new();
    table.add_date_column("Day");

    table.format_column(0, NumberFormat::default()).unwrap();
    table.format_column(0, DateFormat::default()).unwrap();

    assert_eq!(table.formats()[&0].format_type(), "DateFormat");
}

#[test]
fn format_columns_applies_each_entry_by_its_own_index() {
    let mut table = Datatable::new();
    table.add_date_column("Day");
    table.add_number_column("Total");

    table
        .format_columns([
            (0, Format::Date(DateFormat::default())),
            (1, Format::Number(NumberFormat::default())),
        ])
        .unwrap();

    let formats = table.formats();
    assert_eq!(formats[&0].format_type(), "DateFormat");
    assert_eq!(formats[&1].format_type(), "NumberFormat");

    let err = table
        .format_columns([(5, Format::Number(NumberFormat::default()))])
        .unwrap_err();
    assert_eq!(err, DatatableError::invalid_column_index(5, 2));
}

#[test]
fn formats_merge_attached_and_registered() {
    let mut table = Datatable::new();
    table
        .add_column(&json!([
            "number",
            "Salary",
            "",
            { "type": "NumberFormat", "options": { "prefix": "$" } },
        ]))
        .unwrap();
    table.add_date_column("Day");
    table.format_column(1, DateFormat::default()).unwrap();

    let formats = table.formats();
    assert_eq!(formats.len(), 2);
    assert_eq!(formats[&0].format_type(), "NumberFormat");
    assert_eq!(formats[&1].format_type(), "DateFormat");

    // A registration at the same index overrides the attached format.
    table.format_column(0, DateFormat::default()).unwrap();
    assert_eq!(table.formats()[&0].format_type(), "DateFormat");
}

#[test]
fn serialized_format_carries_full_option_payload() {
    let format: Format = NumberFormat::new(&json!({ "prefix": "$" })).unwrap().into();
    let doc = serde_json::to_value(&format).unwrap();
    assert_eq!(
        doc,
        json!({
            "type": "NumberFormat",
            "options": {
                "decimalSymbol": ".",
                "groupingSymbol": ",",
                "fractionDigits": null,
                "negativeColor": null,
                "negativeParens": false,
                "pattern": null,
                "prefix": "$",
                "suffix": null,
            },
        })
    );
}

#[test]
fn to_json_matches_value_serialization() {
    let mut table = Datatable::new();
    table.add_string_column("Name");
    table.add_row(&json!(["Amy"])).unwrap();

    let from_string: Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
    assert_eq!(from_string, serde_json::to_value(&table).unwrap());
}
