//! Error types for input loading.

use std::path::PathBuf;

use thiserror::Error;
use tsgen_model::SheetId;

/// Errors that can occur while loading tabular input.
///
/// File-level errors make the whole input unusable; sheet-level errors only
/// remove that sheet from the normalized table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File Errors ===
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("unsupported input format '{extension}' for {path}; use CSV, TSV or XLSX")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    // === Sheet Errors ===
    #[error("sheet {sheet} not found (input has {available} sheet(s))")]
    MissingSheet { sheet: SheetId, available: usize },

    #[error("sheet {sheet} must contain at least two non-empty rows, found {found}")]
    InsufficientRows { sheet: SheetId, found: usize },
}

impl IngestError {
    /// The sheet this error is confined to, if any.
    pub fn sheet(&self) -> Option<SheetId> {
        match self {
            Self::MissingSheet { sheet, .. } | Self::InsufficientRows { sheet, .. } => {
                Some(*sheet)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
