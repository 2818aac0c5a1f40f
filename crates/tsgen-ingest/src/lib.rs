//! Input loading for the term sheet generator.
//!
//! Raw rows come from a [`WorkbookSource`] (CSV, TSV or a spreadsheet
//! workbook) and are turned into an [`InputTable`](tsgen_model::InputTable)
//! by [`normalize`]:
//!
//! - only sheets referenced by the configuration are loaded
//! - a missing or short sheet is an error for that sheet alone
//! - cells are trimmed, fully blank rows skipped, rows aligned to the header
//! - typed cells (dates, percentages, grouped numbers) are rendered to text
//!
//! # Example
//!
//! ```ignore
//! use tsgen_ingest::{normalize, open_source};
//!
//! let mut source = open_source(&config.input_path)?;
//! let normalized = normalize(source.as_mut(), &config.required_sheets());
//! for error in &normalized.errors {
//!     eprintln!("{error}");
//! }
//! ```

mod cell;
mod delimited;
mod error;
mod normalize;
mod source;
mod styles;
mod workbook;

pub use cell::{NumberFormat, RawCell};
pub use delimited::CsvSource;
pub use error::{IngestError, Result};
pub use normalize::{NormalizedInput, normalize};
pub use source::{MemoryWorkbook, WorkbookSource, open_source};
pub use workbook::SpreadsheetSource;
