//! Comma and tab separated inputs.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tsgen_model::SheetId;

use crate::cell::RawCell;
use crate::error::{IngestError, Result};
use crate::source::{RawRows, WorkbookSource};

/// A delimited text file exposed as a single sheet of text cells.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(path: &Path, delimiter: u8) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter,
        }
    }
}

impl WorkbookSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn sheet_count(&self) -> usize {
        1
    }

    fn load_sheet(&mut self, sheet: SheetId) -> Result<RawRows> {
        if sheet != SheetId::FIRST {
            return Err(IngestError::MissingSheet {
                sheet,
                available: 1,
            });
        }
        let csv_error = |source| IngestError::Csv {
            path: self.path.clone(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(csv_error)?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            rows.push(record.iter().map(RawCell::text).collect());
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_ragged_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "A,B,C\n1,2\n\"x, y\",z,w,extra\n").unwrap();

        let rows = CsvSource::new(&path, b',').load_sheet(SheetId::FIRST).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![RawCell::text("1"), RawCell::text("2")]);
        assert_eq!(rows[2][0], RawCell::text("x, y"));
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn tab_separated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "Issuer\tRate\nAcme, Inc\t5%\n").unwrap();

        let rows = CsvSource::new(&path, b'\t').load_sheet(SheetId::FIRST).unwrap();
        assert_eq!(rows[1], vec![RawCell::text("Acme, Inc"), RawCell::text("5%")]);
    }

    #[test]
    fn only_one_sheet() {
        let mut source = CsvSource::new(Path::new("unused.csv"), b',');
        let err = source.load_sheet(SheetId::new(2).unwrap()).unwrap_err();
        assert!(matches!(err, IngestError::MissingSheet { available: 1, .. }));
    }
}
