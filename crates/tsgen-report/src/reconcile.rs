//! Count reconciliation.

use tracing::{info, warn};
use tsgen_model::{Diagnostic, DiagnosticKind};
use tsgen_substitute::PlaceholderCount;

/// Diagnostics for missing placeholders and an expected-count mismatch.
///
/// One error per name in `missing`, then one error when `expected` is
/// declared and differs from the sum of `counts`.
pub fn reconcile(
    counts: &[PlaceholderCount],
    missing: &[String],
    expected: Option<usize>,
) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = missing
        .iter()
        .map(|placeholder| {
            Diagnostic::error(
                DiagnosticKind::Document,
                format!("placeholder {placeholder} not found in the document"),
            )
            .for_placeholder(placeholder.as_str())
        })
        .collect();

    let total: usize = counts.iter().map(|entry| entry.count).sum();
    match expected {
        Some(expected) if expected != total => {
            warn!(total, expected, "replacement count mismatch");
            diagnostics.push(Diagnostic::error(
                DiagnosticKind::Reconciliation,
                format!("replaced {total} placeholder value(s) but expected {expected}"),
            ));
        }
        Some(expected) => info!(total, expected, "replacement count matches"),
        None => {}
    }
    diagnostics
}
