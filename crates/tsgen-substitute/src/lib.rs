//! Substitution engine.
//!
//! [`substitute`] walks every paragraph of a [`Document`](tsgen_document::Document)
//! (body first, then table cells) and applies resolved placeholder values:
//!
//! - scalar values replace the token inside each run that contains it
//! - table values replace the whole paragraph with
//!   `[text before, generated table, text after]`
//!
//! Scalar matching is per run. A token split across two runs by a formatting
//! boundary is not found; counts are per run, not per occurrence.

mod engine;
mod outcome;

pub use engine::substitute;
pub use outcome::{PlaceholderCount, SubstitutionReport};
