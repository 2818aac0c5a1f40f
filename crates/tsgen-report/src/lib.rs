//! Audit and reconciliation of a substitution run.
//!
//! - [`ReplacementAudit`] joins configuration, resolution and substitution
//!   results into one entry per placeholder
//! - [`reconcile`] turns counts into diagnostics (missing placeholders,
//!   expected-count mismatch)
//! - [`render_log`] draws the replacement log table

mod audit;
mod reconcile;
mod render;

pub use audit::{AuditEntry, EntryStatus, ReplacementAudit};
pub use reconcile::reconcile;
pub use render::{LogOptions, render_log};
