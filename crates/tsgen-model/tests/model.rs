use tsgen_model::{InputTable, RecordSet, ResolvedValue, SheetId};

fn sheet(columns: &[&str], rows: &[&[&str]]) -> RecordSet {
    RecordSet::new(
        columns.iter().map(|c| (*c).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| (*v).to_string()).collect())
            .collect(),
    )
}

#[test]
fn input_table_is_keyed_by_sheet_position() {
    let mut input = InputTable::new();
    input.insert(SheetId::FIRST, sheet(&["Issuer"], &[&["Acme"]]));
    let second = SheetId::new(2).unwrap();
    input.insert(second, sheet(&["Date"], &[&["1 May 2025"], &["1 June 2025"]]));

    assert_eq!(input.len(), 2);
    assert!(input.contains(second));
    assert!(!input.contains(SheetId::new(3).unwrap()));
    assert_eq!(input.sheet(second).map(RecordSet::len), Some(2));
    let ids: Vec<u32> = input.sheet_ids().map(SheetId::position).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn resolved_value_serializes_with_kind_tag() {
    let value = ResolvedValue::Table(sheet(&["A"], &[&["1"]]));
    let json = serde_json::to_value(&value).expect("serialize value");
    assert_eq!(json["kind"], "table");
    assert_eq!(json["value"]["columns"][0], "A");

    let scalar = serde_json::to_value(ResolvedValue::Scalar("Acme".into())).unwrap();
    assert_eq!(scalar["kind"], "scalar");
    assert_eq!(scalar["value"], "Acme");
}
