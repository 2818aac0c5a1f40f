//! Shared data model for the term sheet generator.
//!
//! Every stage of the pipeline exchanges the types defined here:
//!
//! - [`Configuration`] and [`PlaceholderSpec`] describe what to compute
//! - [`InputTable`] and [`RecordSet`] hold normalized tabular input
//! - [`ResolvedValue`] is what a placeholder resolves to
//! - [`Diagnostic`] is the single channel for every reported problem

pub mod diagnostic;
pub mod ids;
pub mod spec;
pub mod table;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, error_count};
pub use ids::SheetId;
pub use spec::{
    Configuration, DEFAULT_PRODUCT_NAME, PlaceholderSpec, Resolution, SliceBounds, ValueKind,
};
pub use table::{InputTable, Record, RecordSet, ResolvedValue};
