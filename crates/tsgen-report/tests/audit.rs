use tsgen_model::{
    Configuration, PlaceholderSpec, RecordSet, ResolvedValue, SliceBounds, ValueKind,
};
use tsgen_report::{EntryStatus, LogOptions, ReplacementAudit, reconcile, render_log};
use tsgen_resolve::{ResolvedPlaceholder, ResolvedSet};
use tsgen_substitute::{PlaceholderCount, SubstitutionReport};

fn config() -> Configuration {
    Configuration {
        template_path: "template.json".into(),
        output_path: "out.json".into(),
        input_path: "input.csv".into(),
        mappings: vec![
            PlaceholderSpec::field("[[Issuer]]", "Issuer"),
            PlaceholderSpec::field("[[Isin]]", "ISIN"),
            PlaceholderSpec::field("[[Coupon]]", "Coupon"),
            PlaceholderSpec::operation("[[Basket]]", "getTableData")
                .with_kind(ValueKind::Table)
                .with_bounds(SliceBounds::rows(1, 2)),
        ],
        product_name: Some("Fixed Coupon Note".to_string()),
        expected_count: Some(5),
        should_ignore: false,
    }
}

fn resolved() -> ResolvedSet {
    ResolvedSet {
        values: vec![
            ResolvedPlaceholder {
                placeholder: "[[Issuer]]".to_string(),
                source: "Issuer".to_string(),
                value: ResolvedValue::Scalar("Acme Corp".to_string()),
            },
            ResolvedPlaceholder {
                placeholder: "[[Coupon]]".to_string(),
                source: "Coupon".to_string(),
                value: ResolvedValue::Scalar("5%".to_string()),
            },
            ResolvedPlaceholder {
                placeholder: "[[Basket]]".to_string(),
                source: "getTableData".to_string(),
                value: ResolvedValue::Table(RecordSet::new(
                    vec!["Underlying".to_string()],
                    vec![vec!["AAPL UW".to_string()]],
                )),
            },
        ],
        unresolved: vec!["[[Isin]]".to_string()],
        diagnostics: Vec::new(),
    }
}

fn substitution() -> SubstitutionReport {
    let count = |placeholder: &str, kind, locations: &[&str]| PlaceholderCount {
        placeholder: placeholder.to_string(),
        kind,
        count: locations.len(),
        locations: locations.iter().map(ToString::to_string).collect(),
    };
    SubstitutionReport {
        counts: vec![
            count("[[Issuer]]", ValueKind::Scalar, &[
                "body paragraph 1",
                "body paragraph 1",
                "table 1, row 2, cell 1, paragraph 1",
            ]),
            count("[[Coupon]]", ValueKind::Scalar, &[]),
            count("[[Basket]]", ValueKind::Table, &["body paragraph 4"]),
        ],
        tables_created: 1,
    }
}

#[test]
fn statuses_keep_unresolved_apart_from_missing() {
    let audit = ReplacementAudit::build(&config(), &resolved(), &substitution());

    assert_eq!(audit.entry("[[Issuer]]").unwrap().status, EntryStatus::Replaced);
    assert_eq!(audit.entry("[[Isin]]").unwrap().status, EntryStatus::Unresolved);
    assert_eq!(audit.entry("[[Coupon]]").unwrap().status, EntryStatus::Missing);
    assert_eq!(audit.missing, vec!["[[Coupon]]"]);
    assert_eq!(audit.unresolved, vec!["[[Isin]]"]);
    assert_eq!(audit.total, 4);
    assert_eq!(audit.table_replacements, 1);
    assert_eq!(audit.product, "Fixed Coupon Note");
    assert_eq!(audit.entry("[[Basket]]").unwrap().value.as_deref(), Some("<table 1x1>"));
}

#[test]
fn reconcile_reports_missing_then_mismatch() {
    let report = substitution();
    let audit = ReplacementAudit::build(&config(), &resolved(), &report);
    let diagnostics = reconcile(&report.counts, &audit.missing, audit.expected);

    let messages: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec![
        "error[document]: placeholder [[Coupon]] not found in the document",
        "error[reconciliation]: replaced 4 placeholder value(s) but expected 5",
    ]);
}

#[test]
fn log_lists_scalars_and_footers() {
    let audit = ReplacementAudit::build(&config(), &resolved(), &substitution());
    let log = render_log(&audit, LogOptions {
        show_locations: true,
        plain: true,
    });

    assert!(log.starts_with("Product: Fixed Coupon Note\n"));
    assert!(log.contains("Acme Corp"));
    assert!(log.contains("unresolved"));
    assert!(log.contains("missing"));
    assert!(log.contains("⮡ 2 time(s) at body paragraph 1"));
    assert!(!log.contains("[[Basket]]"));
    assert!(log.contains("Tables created: 1\n"));
    assert!(log.contains("Total placeholder values changed: 4\n"));
    assert!(log.ends_with("Expected placeholder values: 5\n"));
}

#[test]
fn audit_serializes_for_reports() {
    let audit = ReplacementAudit::build(&config(), &resolved(), &substitution());
    let json = serde_json::to_value(&audit).unwrap();
    assert_eq!(json["entries"][1]["status"], "unresolved");
    assert_eq!(json["entries"][1]["value"], serde_json::Value::Null);
    assert_eq!(json["entries"][3]["kind"], "table");
    assert_eq!(json["expected"], 5);
}
