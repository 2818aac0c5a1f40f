use tsgen_document::{
    Block, CellBlock, Document, Paragraph, Run, RunStyle, TableBlock, TableBorders,
};
use tsgen_model::{RecordSet, ResolvedValue};
use tsgen_resolve::ResolvedPlaceholder;
use tsgen_substitute::substitute;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn scalar(placeholder: &str, value: &str) -> ResolvedPlaceholder {
    ResolvedPlaceholder {
        placeholder: placeholder.to_string(),
        source: "Issuer".to_string(),
        value: ResolvedValue::Scalar(value.to_string()),
    }
}

fn table(placeholder: &str, columns: &[&str], rows: &[&[&str]]) -> ResolvedPlaceholder {
    ResolvedPlaceholder {
        placeholder: placeholder.to_string(),
        source: "getTableData".to_string(),
        value: ResolvedValue::Table(RecordSet::new(
            strings(columns),
            rows.iter().map(|row| strings(row)).collect(),
        )),
    }
}

#[test]
fn scalar_round_trip() {
    let mut document = Document::from_blocks(vec![Paragraph::plain("{{NAME}}").into()]);
    let report = substitute(&mut document, &[scalar("{{NAME}}", "Acme Corp")]).unwrap();

    assert_eq!(document.plain_text(), "Acme Corp");
    assert_eq!(report.count("{{NAME}}"), Some(1));
    assert!(report.missing().is_empty());
}

#[test]
fn table_replaces_paragraph_with_surrounding_text() {
    let mut document = Document::from_blocks(vec![Paragraph::plain("prefix {{TBL}} suffix").into()]);
    let values = [table("{{TBL}}", &["A", "B"], &[&["1", "2"], &["3", "4"]])];
    let report = substitute(&mut document, &values).unwrap();

    let blocks = document.to_blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].as_paragraph().unwrap().text(), "prefix ");
    assert_eq!(blocks[2].as_paragraph().unwrap().text(), " suffix");

    let grid = blocks[1].as_table().unwrap();
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.column_count(), 2);
    assert_eq!(grid.borders, TableBorders::single());
    assert_eq!(grid.cell_texts(), vec![
        strings(&["A", "B"]),
        strings(&["1", "2"]),
        strings(&["3", "4"]),
    ]);
    let header = grid.rows[0][1].blocks[0].as_paragraph().unwrap();
    assert!(header.runs[0].style.bold);

    assert_eq!(report.count("{{TBL}}"), Some(1));
    assert_eq!(report.tables_created, 1);
}

#[test]
fn absent_placeholder_leaves_document_untouched() {
    let original = vec![
        Block::from(Paragraph::plain("Issuer: [[Issuer]]")),
        TableBlock::grid(&strings(&["Code"]), &[strings(&["[[Code]]"])]).into(),
    ];
    let mut document = Document::from_blocks(original.clone());
    let values = [
        scalar("[[Coupon]]", "5%"),
        table("[[Basket]]", &["A"], &[&["1"]]),
    ];
    let report = substitute(&mut document, &values).unwrap();

    assert_eq!(document.to_blocks(), original);
    assert_eq!(report.missing(), vec!["[[Coupon]]", "[[Basket]]"]);
    assert_eq!(report.total(), 0);
}

#[test]
fn counts_once_per_run_not_per_occurrence() {
    let mut document = Document::from_blocks(vec![
        Paragraph::new(vec![
            Run::new("[[X]] and [[X]]"),
            Run::styled(" then [[X]]", RunStyle::bold()),
        ])
        .into(),
    ]);
    let report = substitute(&mut document, &[scalar("[[X]]", "x")]).unwrap();

    assert_eq!(document.plain_text(), "x and x then x");
    assert_eq!(report.count("[[X]]"), Some(2));
    let blocks = document.to_blocks();
    let runs = &blocks[0].as_paragraph().unwrap().runs;
    assert!(runs[1].style.bold);
}

#[test]
fn token_split_across_runs_is_not_replaced() {
    let mut document = Document::from_blocks(vec![
        Paragraph::new(vec![Run::new("[[Iss"), Run::styled("uer]]", RunStyle::bold())]).into(),
    ]);
    let report = substitute(&mut document, &[scalar("[[Issuer]]", "Acme")]).unwrap();

    assert_eq!(document.plain_text(), "[[Issuer]]");
    assert_eq!(report.missing(), vec!["[[Issuer]]"]);
}

#[test]
fn table_cells_and_nested_tables_are_walked() {
    let nested = TableBlock {
        borders: TableBorders::default(),
        rows: vec![vec![CellBlock::text("Strike [[Strike]]")]],
    };
    let outer = TableBlock {
        borders: TableBorders::single(),
        rows: vec![vec![
            CellBlock::text("[[Issuer]]"),
            CellBlock {
                blocks: vec![Paragraph::plain("[[Issuer]] again").into(), nested.into()],
            },
        ]],
    };
    let mut document = Document::from_blocks(vec![
        Paragraph::plain("Issued by [[Issuer]]").into(),
        outer.into(),
    ]);
    let report = substitute(&mut document, &[
        scalar("[[Issuer]]", "Acme"),
        scalar("[[Strike]]", "85%"),
    ])
    .unwrap();

    assert_eq!(document.plain_text(), "Issued by Acme\nAcme\nAcme again\nStrike 85%");
    assert_eq!(report.count("[[Issuer]]"), Some(3));
    insta::assert_snapshot!(
        report.counts.iter().flat_map(|c| c.locations.clone()).collect::<Vec<_>>().join("\n"),
        @r"
    body paragraph 1
    table 1, row 1, cell 1, paragraph 1
    table 1, row 1, cell 2, paragraph 1
    table 1, row 1, cell 2 > table 1, row 1, cell 1, paragraph 1
    "
    );
}

#[test]
fn table_inside_cell_replaces_cell_paragraph() {
    let mut document = Document::from_blocks(vec![
        TableBlock {
            borders: TableBorders::single(),
            rows: vec![vec![CellBlock::text("[[Basket]]")]],
        }
        .into(),
    ]);
    let values = [table("[[Basket]]", &["Underlying"], &[&["AAPL UW"], &["MSFT UW"]])];
    let report = substitute(&mut document, &values).unwrap();

    let blocks = document.to_blocks();
    let outer = blocks[0].as_table().unwrap();
    let cell = &outer.rows[0][0];
    assert_eq!(cell.blocks.len(), 2);
    assert_eq!(cell.blocks[0].as_table().unwrap().row_count(), 3);
    assert!(cell.blocks[1].as_paragraph().unwrap().is_empty());
    assert_eq!(report.tables_created, 1);
}

#[test]
fn generated_tables_are_not_rescanned() {
    let mut document = Document::from_blocks(vec![Paragraph::plain("[[Basket]]").into()]);
    let values = [
        scalar("[[Issuer]]", "Acme"),
        table("[[Basket]]", &["Note"], &[&["see [[Issuer]]"]]),
    ];
    let report = substitute(&mut document, &values).unwrap();

    assert_eq!(document.plain_text(), "Note\nsee [[Issuer]]");
    assert_eq!(report.count("[[Issuer]]"), Some(0));
}

#[test]
fn two_table_tokens_in_one_paragraph() {
    let mut document =
        Document::from_blocks(vec![Paragraph::plain("[[Second]] mid [[First]] end").into()]);
    let values = [
        table("[[First]]", &["F"], &[&["f1"]]),
        table("[[Second]]", &["S"], &[&["s1"]]),
    ];
    let report = substitute(&mut document, &values).unwrap();

    let blocks = document.to_blocks();
    let shape: Vec<String> = blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => format!("p:{}", p.text()),
            Block::Table(t) => format!("t:{}", t.cell_texts()[0][0]),
        })
        .collect();
    assert_eq!(shape, vec!["t:S", "p: mid ", "t:F", "p: end"]);
    assert_eq!(report.tables_created, 2);
    assert_eq!(report.total(), 2);
}

#[test]
fn empty_table_value_counts_but_emits_nothing() {
    let mut document = Document::from_blocks(vec![
        Paragraph::plain("before [[Basket]] after").into(),
        TableBlock {
            borders: TableBorders::single(),
            rows: vec![vec![CellBlock::text("[[Basket]]")]],
        }
        .into(),
    ]);
    let values = [table("[[Basket]]", &["Underlying"], &[])];
    let report = substitute(&mut document, &values).unwrap();

    assert_eq!(report.count("[[Basket]]"), Some(2));
    assert_eq!(report.tables_created, 0);
    let blocks = document.to_blocks();
    assert_eq!(blocks[0].as_paragraph().unwrap().text(), "before ");
    assert_eq!(blocks[1].as_paragraph().unwrap().text(), " after");
    let cell = &blocks[2].as_table().unwrap().rows[0][0];
    assert!(matches!(cell.blocks.as_slice(), [Block::Paragraph(p)] if p.is_empty()));
}

#[test]
fn scalars_apply_before_tables_in_the_same_paragraph() {
    let mut document =
        Document::from_blocks(vec![Paragraph::plain("[[Issuer]] basket: [[Basket]]").into()]);
    let values = [
        scalar("[[Issuer]]", "Acme"),
        table("[[Basket]]", &["U"], &[&["AAPL"]]),
    ];
    let report = substitute(&mut document, &values).unwrap();

    let blocks = document.to_blocks();
    assert_eq!(blocks[0].as_paragraph().unwrap().text(), "Acme basket: ");
    assert!(blocks[1].as_table().is_some());
    assert_eq!(blocks.len(), 2);
    assert_eq!(report.total(), 2);
}
