//! Raw rows to normalized records.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, info_span, warn};
use tsgen_model::{InputTable, RecordSet, SheetId};

use crate::error::{IngestError, Result};
use crate::source::{RawRows, WorkbookSource};

/// Result of normalizing the required sheets of one source.
///
/// A sheet with an error is absent from `table`; other sheets are unaffected.
#[derive(Debug, Default)]
pub struct NormalizedInput {
    pub table: InputTable,
    pub errors: Vec<IngestError>,
}

/// Load and normalize every sheet in `required`, in ascending order.
pub fn normalize(source: &mut dyn WorkbookSource, required: &BTreeSet<SheetId>) -> NormalizedInput {
    let span = info_span!("normalize", source = %source.describe());
    let _guard = span.enter();
    let start = Instant::now();
    let available = source.sheet_count();
    let mut normalized = NormalizedInput::default();

    for &sheet in required {
        if sheet.index() >= available {
            warn!(%sheet, available, "required sheet missing from input");
            normalized
                .errors
                .push(IngestError::MissingSheet { sheet, available });
            continue;
        }
        match source.load_sheet(sheet).and_then(|rows| build_records(sheet, rows)) {
            Ok(records) => {
                debug!(%sheet, columns = records.width(), rows = records.len(), "sheet normalized");
                normalized.table.insert(sheet, records);
            }
            Err(error) => {
                warn!(%sheet, %error, "sheet rejected");
                normalized.errors.push(error);
            }
        }
    }

    info!(
        sheets = normalized.table.len(),
        errors = normalized.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "input normalized"
    );
    normalized
}

/// First non-empty row is the header, the rest are records.
fn build_records(sheet: SheetId, rows: RawRows) -> Result<RecordSet> {
    let mut rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.render()).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|value| !value.is_empty()))
        .collect();
    if rendered.len() < 2 {
        return Err(IngestError::InsufficientRows {
            sheet,
            found: rendered.len(),
        });
    }
    let data = rendered.split_off(1);
    let header = rendered.into_iter().next().unwrap_or_default();
    Ok(RecordSet::new(header, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{NumberFormat, RawCell};
    use crate::source::MemoryWorkbook;

    fn required(positions: &[u32]) -> BTreeSet<SheetId> {
        positions.iter().filter_map(|p| SheetId::new(*p)).collect()
    }

    #[test]
    fn aligns_rows_and_skips_blank_ones() {
        let mut source = MemoryWorkbook::from_text_rows(&[
            &["", "  "],
            &[" Issuer ", "Rate", "Notional"],
            &["", "", ""],
            &["Acme", " 5% "],
            &["Globex", "6%", "1,000", "overflow"],
        ]);
        let normalized = normalize(&mut source, &required(&[1]));
        assert!(normalized.errors.is_empty());
        let sheet = normalized.table.sheet(SheetId::FIRST).expect("sheet 1");
        assert_eq!(sheet.columns, vec!["Issuer", "Rate", "Notional"]);
        assert_eq!(sheet.rows, vec![
            vec!["Acme".to_string(), "5%".to_string(), String::new()],
            vec!["Globex".to_string(), "6%".to_string(), "1,000".to_string()],
        ]);
    }

    #[test]
    fn header_only_sheet_is_rejected() {
        let mut source = MemoryWorkbook::from_text_rows(&[&["Issuer"], &["", ""]]);
        let normalized = normalize(&mut source, &required(&[1]));
        assert!(normalized.table.is_empty());
        assert!(matches!(
            normalized.errors.as_slice(),
            [IngestError::InsufficientRows { found: 1, .. }]
        ));
    }

    #[test]
    fn unreferenced_sheets_are_never_loaded() {
        let good = vec![
            vec![RawCell::text("Rate")],
            vec![RawCell::Number {
                value: 0.98,
                format: NumberFormat::Percent,
            }],
        ];
        let malformed = vec![vec![RawCell::text("only header")]];
        let mut source = MemoryWorkbook::new(vec![malformed, good]);
        let normalized = normalize(&mut source, &required(&[2]));
        assert!(normalized.errors.is_empty());
        let sheet = normalized.table.sheet(SheetId::new(2).unwrap()).unwrap();
        assert_eq!(sheet.rows[0], vec!["98%".to_string()]);
    }

    #[test]
    fn missing_sheet_does_not_stop_others() {
        let mut source = MemoryWorkbook::from_text_rows(&[&["A"], &["1"]]);
        let normalized = normalize(&mut source, &required(&[1, 3]));
        assert_eq!(normalized.table.len(), 1);
        assert!(matches!(
            normalized.errors.as_slice(),
            [IngestError::MissingSheet { available: 1, .. }]
        ));
    }
}
