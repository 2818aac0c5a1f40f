use proptest::prelude::*;

use tsgen_config::{ConfigError, load_configuration, parse_configuration};
use tsgen_model::{Resolution, SheetId, SliceBounds, ValueKind};

fn config_with_mappings(mappings: &str) -> String {
    format!(
        r#"{{
            "productName": "FCN",
            "templatePath": "templates/fcn.json",
            "outputPath": "output/fcn.json",
            "inputPath": "input.xlsx",
            "expectedCount": 8,
            "mappings": {mappings}
        }}"#
    )
}

#[test]
fn parses_all_mapping_shapes_in_order() {
    let text = config_with_mappings(
        r#"{
            "[[Issuer]]": { "inputField": "Issuer" },
            "[[Count i]]": { "customOperation": "numBBGValues" },
            "[[ObservationDatesTab]]": {
                "customOperation": "getTableData",
                "sheetNumber": 2,
                "type": "table",
                "params": { "start_row": 2, "end_row": 4 }
            },
            "[[Trade Date]]": { "inputField": "Trade Date", "formatter": "dateFormatter" }
        }"#,
    );
    let config = parse_configuration(&text).expect("valid config");

    assert_eq!(config.product_label(), "FCN");
    assert_eq!(config.expected_count, Some(8));
    let names: Vec<&str> = config.mappings.iter().map(|s| s.placeholder.as_str()).collect();
    assert_eq!(
        names,
        vec!["[[Issuer]]", "[[Count i]]", "[[ObservationDatesTab]]", "[[Trade Date]]"]
    );

    let table = config.spec("[[ObservationDatesTab]]").unwrap();
    assert_eq!(
        table.resolution,
        Resolution::Operation {
            name: "getTableData".to_string()
        }
    );
    assert_eq!(table.sheet, SheetId::new(2).unwrap());
    assert_eq!(table.kind, ValueKind::Table);
    assert_eq!(table.bounds, SliceBounds::rows(2, 4));

    let date = config.spec("[[Trade Date]]").unwrap();
    assert_eq!(date.formatter.as_deref(), Some("dateFormatter"));
    assert_eq!(date.sheet, SheetId::FIRST);
}

#[test]
fn reports_every_missing_key() {
    let err = parse_configuration(r#"{ "templatePath": "t.json", "outputPath": "o.json" }"#)
        .unwrap_err();
    match err {
        ConfigError::MissingKeys { keys } => assert_eq!(keys, vec!["inputPath", "mappings"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_both_strategies() {
    let text = config_with_mappings(
        r#"{ "[[X]]": { "inputField": "X", "customOperation": "rowCount" } }"#,
    );
    let err = parse_configuration(&text).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMapping { ref placeholder, .. } if placeholder == "[[X]]"));
}

#[test]
fn rejects_missing_strategy_and_sheet_zero() {
    let none = config_with_mappings(r#"{ "[[X]]": { "formatter": "upperCase" } }"#);
    assert!(matches!(
        parse_configuration(&none),
        Err(ConfigError::InvalidMapping { .. })
    ));

    let zero = config_with_mappings(r#"{ "[[X]]": { "inputField": "X", "sheetNumber": 0 } }"#);
    assert!(matches!(
        parse_configuration(&zero),
        Err(ConfigError::InvalidMapping { .. })
    ));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        parse_configuration("{ \"mappings\": [1, 2] "),
        Err(ConfigError::Json { .. })
    ));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = load_configuration(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));

    let path = dir.path().join("fcn.json");
    std::fs::write(
        &path,
        config_with_mappings(r#"{ "[[A]]": { "inputField": "A" } }"#),
    )
    .unwrap();
    let config = load_configuration(&path).expect("load config");
    assert_eq!(config.mappings.len(), 1);
}

fn mappings_json(names: &[String]) -> String {
    let entries: Vec<String> = names
        .iter()
        .map(|name| format!(r#""{name}": {{ "inputField": "{name}" }}"#))
        .collect();
    format!("{{ {} }}", entries.join(", "))
}

proptest! {
    #[test]
    fn unique_placeholder_names_validate(names in prop::collection::btree_set("[A-Za-z][A-Za-z0-9 ]{0,12}", 1..8)) {
        let names: Vec<String> = names.into_iter().map(|n| format!("[[{n}]]")).collect();
        let config = parse_configuration(&config_with_mappings(&mappings_json(&names)));
        prop_assert!(config.is_ok());
        prop_assert_eq!(config.unwrap().mappings.len(), names.len());
    }

    #[test]
    fn repeated_placeholder_name_is_rejected(
        names in prop::collection::btree_set("[A-Za-z][A-Za-z0-9]{0,8}", 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut names: Vec<String> = names.into_iter().map(|n| format!("[[{n}]]")).collect();
        let repeated = names[pick.index(names.len())].clone();
        names.push(repeated.clone());
        match parse_configuration(&config_with_mappings(&mappings_json(&names))) {
            Err(ConfigError::DuplicatePlaceholder { names }) => prop_assert_eq!(names, vec![repeated]),
            other => prop_assert!(false, "expected duplicate error, got {:?}", other.map(|c| c.mappings.len())),
        }
    }
}
