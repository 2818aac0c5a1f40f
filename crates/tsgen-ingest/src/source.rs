//! Sheet sources and extension-based source selection.

use std::path::Path;

use tsgen_model::SheetId;

use crate::cell::RawCell;
use crate::delimited::CsvSource;
use crate::error::{IngestError, Result};
use crate::workbook::SpreadsheetSource;

/// Raw rows of one sheet.
pub type RawRows = Vec<Vec<RawCell>>;

/// Anything that can hand out the raw rows of a sheet by position.
///
/// Sheets are loaded on request so unreferenced sheets are never read.
pub trait WorkbookSource {
    /// Short description for logs and messages (usually the file path).
    fn describe(&self) -> String;

    fn sheet_count(&self) -> usize;

    /// Load one sheet. Callers check `sheet` against [`Self::sheet_count`] first.
    fn load_sheet(&mut self, sheet: SheetId) -> Result<RawRows>;
}

/// In-memory source, used by callers that already hold raw rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<RawRows>,
}

impl MemoryWorkbook {
    pub fn new(sheets: Vec<RawRows>) -> Self {
        Self { sheets }
    }

    /// Single sheet of text cells.
    pub fn from_text_rows(rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|value| RawCell::text(*value)).collect())
            .collect();
        Self::new(vec![rows])
    }
}

impl WorkbookSource for MemoryWorkbook {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn load_sheet(&mut self, sheet: SheetId) -> Result<RawRows> {
        self.sheets
            .get(sheet.index())
            .cloned()
            .ok_or(IngestError::MissingSheet {
                sheet,
                available: self.sheets.len(),
            })
    }
}

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Open the right source for `path` based on its extension.
///
/// `.csv` is comma separated, `.tsv` and `.txt` tab separated; workbook
/// formats go through calamine.
pub fn open_source(path: &Path) -> Result<Box<dyn WorkbookSource>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(Box::new(CsvSource::new(path, b','))),
        "tsv" | "txt" => Ok(Box::new(CsvSource::new(path, b'\t'))),
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => {
            Ok(Box::new(SpreadsheetSource::open(path)?))
        }
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
