//! Mapping configuration for the term sheet generator.
//!
//! A configuration is a JSON document naming the template, output and input
//! files plus a `mappings` object from placeholder token to resolution spec:
//!
//! ```json
//! {
//!   "productName": "FCN",
//!   "templatePath": "products/fcn/template.json",
//!   "outputPath": "output/fcn.json",
//!   "inputPath": "input.xlsx",
//!   "expectedCount": 12,
//!   "mappings": {
//!     "[[Issuer]]": { "inputField": "Issuer" },
//!     "[[Count i]]": { "customOperation": "numBBGValues" },
//!     "[[ObservationDatesTab]]": {
//!       "customOperation": "getTableData",
//!       "sheetNumber": 2,
//!       "type": "table",
//!       "params": { "start_row": 1, "end_col": 3 }
//!     }
//!   }
//! }
//! ```
//!
//! Parsing keeps mapping order and duplicate keys so duplicates can be
//! rejected instead of silently overwritten.

mod error;
mod listing;
mod loader;
mod raw;
mod validate;

pub use error::{ConfigError, Result};
pub use listing::{ConfigEntry, ConfigListing, SkippedConfig, list_configurations};
pub use loader::{load_configuration, parse_configuration};
