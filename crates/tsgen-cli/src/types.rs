use std::path::PathBuf;

use serde::Serialize;
use tsgen_model::{Diagnostic, error_count};
use tsgen_report::ReplacementAudit;

/// Everything a `run` produced, for the summary and the JSON report.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub config_path: PathBuf,
    pub product: String,
    /// Absent when the template could not be loaded.
    pub audit: Option<ReplacementAudit>,
    pub diagnostics: Vec<Diagnostic>,
    /// Where the document was written; `None` on dry runs and failed saves.
    pub output_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunResult {
    pub fn error_count(&self) -> usize {
        error_count(&self.diagnostics)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
