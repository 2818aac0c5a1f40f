//! Spreadsheet workbooks (xlsx, xls, ods) read through calamine.
//!
//! Cell values come from calamine. Percent and grouping number formats are
//! only known for xlsx/xlsm packages; other workbook formats render numbers
//! in the general format.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use chrono::NaiveDateTime;
use tracing::{debug, warn};
use tsgen_model::SheetId;
use zip::ZipArchive;

use crate::cell::{NumberFormat, RawCell};
use crate::error::{IngestError, Result};
use crate::source::{RawRows, WorkbookSource};
use crate::styles::{SheetFormats, read_sheet_formats};

/// A workbook whose sheets are addressed by 1-based position.
pub struct SpreadsheetSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
    /// The raw OOXML package, for number formats calamine does not expose.
    package: Option<ZipArchive<BufReader<File>>>,
}

impl SpreadsheetSource {
    pub fn open(path: &Path) -> Result<Self> {
        let workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let sheet_names = workbook.sheet_names();
        let package = open_package(path);
        debug!(
            path = %path.display(),
            sheets = sheet_names.len(),
            number_formats = package.is_some(),
            "workbook opened"
        );
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            sheet_names,
            package,
        })
    }

    /// Number formats of `sheet`; general everywhere when unavailable.
    fn sheet_formats(&mut self, name: &str) -> SheetFormats {
        let Some(package) = self.package.as_mut() else {
            return SheetFormats::default();
        };
        match read_sheet_formats(package, name) {
            Ok(formats) => {
                debug!(sheet = name, styled_cells = formats.len(), "number formats read");
                formats
            }
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    sheet = name,
                    %error,
                    "number formats unavailable, rendering numbers in general format"
                );
                SheetFormats::default()
            }
        }
    }
}

/// Zip package of an xlsx/xlsm workbook; `None` for other formats.
fn open_package(path: &Path) -> Option<ZipArchive<BufReader<File>>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)?;
    if !matches!(extension.as_str(), "xlsx" | "xlsm") {
        return None;
    }
    let file = File::open(path).ok()?;
    match ZipArchive::new(BufReader::new(file)) {
        Ok(package) => Some(package),
        Err(error) => {
            warn!(path = %path.display(), %error, "cannot read workbook package for number formats");
            None
        }
    }
}

impl WorkbookSource for SpreadsheetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn sheet_count(&self) -> usize {
        self.sheet_names.len()
    }

    fn load_sheet(&mut self, sheet: SheetId) -> Result<RawRows> {
        let Some(name) = self.sheet_names.get(sheet.index()).cloned() else {
            return Err(IngestError::MissingSheet {
                sheet,
                available: self.sheet_names.len(),
            });
        };
        let range = self
            .workbook
            .worksheet_range(&name)
            .map_err(|e| IngestError::Workbook {
                path: self.path.clone(),
                message: format!("sheet '{name}': {e}"),
            })?;
        let formats = self.sheet_formats(&name);
        let (first_row, first_column) = range.start().unwrap_or((0, 0));
        let (first_row, first_column) = (first_row as usize, first_column as usize);
        Ok(range
            .rows()
            .enumerate()
            .map(|(row_offset, row)| {
                row.iter()
                    .enumerate()
                    .map(|(column_offset, cell)| {
                        let format =
                            formats.get(first_row + row_offset, first_column + column_offset);
                        convert_cell(cell, format)
                    })
                    .collect()
            })
            .collect())
    }
}

fn convert_cell(cell: &Data, format: NumberFormat) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(text) => RawCell::Text(text.clone()),
        Data::Int(value) => RawCell::Number {
            value: *value as f64,
            format,
        },
        Data::Float(value) => RawCell::Number {
            value: *value,
            format,
        },
        Data::Bool(value) => RawCell::Bool(*value),
        Data::DateTime(value) => match value.as_datetime() {
            Some(date) if !value.is_duration() => RawCell::Date(date),
            _ => RawCell::number(value.as_f64()),
        },
        Data::DateTimeIso(text) => parse_iso_datetime(text)
            .map(RawCell::Date)
            .unwrap_or_else(|| RawCell::Text(text.clone())),
        Data::DurationIso(text) => RawCell::Text(text.clone()),
    }
}

fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
