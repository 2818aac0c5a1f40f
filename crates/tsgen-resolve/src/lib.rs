//! Value resolution for placeholders.
//!
//! For every [`PlaceholderSpec`](tsgen_model::PlaceholderSpec) of a
//! configuration, in order, the [`Resolver`] computes a
//! [`ResolvedValue`](tsgen_model::ResolvedValue) by:
//!
//! 1. looking up a column in the first record of the target sheet, or
//! 2. invoking a named [`CustomOperation`] from the [`OperationRegistry`]
//!
//! and then applying an optional named [`Formatter`] to scalar values.
//!
//! Failures are isolated per placeholder: an error or a panic inside an
//! operation becomes a diagnostic for that placeholder and the batch goes on.
//!
//! # Example
//!
//! ```ignore
//! use tsgen_resolve::Resolver;
//!
//! let resolved = Resolver::default().resolve(&config, &input);
//! for diagnostic in &resolved.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

mod builtins;
mod error;
mod formatter;
mod operation;
mod resolver;
mod slice;

pub use builtins::{default_formatters, default_operations};
pub use error::{OperationError, ResolveError};
pub use formatter::{Formatter, FormatterFn, FormatterRegistry, FunctionFormatter};
pub use operation::{CustomOperation, FunctionOperation, OperationFn, OperationRegistry};
pub use resolver::{ResolvedPlaceholder, ResolvedSet, Resolver};
pub use slice::slice_records;
