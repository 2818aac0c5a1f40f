//! Generation pipeline with explicit stages.
//!
//! 1. **Ingest**: open the input and normalize the referenced sheets
//! 2. **Resolve**: compute a value for every placeholder
//! 3. **Substitute**: load the template and apply the values
//! 4. **Audit**: tally counts and reconcile against the expected total
//! 5. **Save**: write the output document
//!
//! Stages after configuration loading never abort the run; their problems are
//! collected as diagnostics in order.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, trace};
use tsgen_document::{Document, DocumentStore};
use tsgen_ingest::{IngestError, normalize, open_source};
use tsgen_model::{Configuration, Diagnostic, DiagnosticKind, InputTable, ResolvedValue};
use tsgen_report::{ReplacementAudit, reconcile};
use tsgen_resolve::{ResolvedSet, Resolver};
use tsgen_substitute::{SubstitutionReport, substitute};

use crate::logging::redact_value;

// ============================================================================
// Stage 1: Ingest
// ============================================================================

#[derive(Debug, Default)]
pub struct IngestResult {
    pub input: InputTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Load only the sheets the configuration refers to.
///
/// A file-level failure yields an empty table and one diagnostic.
pub fn ingest(config: &Configuration) -> IngestResult {
    let required = config.required_sheets();
    let mut source = match open_source(&config.input_path) {
        Ok(source) => source,
        Err(error) => {
            return IngestResult {
                input: InputTable::new(),
                diagnostics: vec![input_diagnostic(&error)],
            };
        }
    };
    let normalized = normalize(source.as_mut(), &required);
    IngestResult {
        input: normalized.table,
        diagnostics: normalized.errors.iter().map(input_diagnostic).collect(),
    }
}

fn input_diagnostic(error: &IngestError) -> Diagnostic {
    Diagnostic::error(DiagnosticKind::Input, error.to_string())
}

// ============================================================================
// Stage 2: Resolve
// ============================================================================

pub fn resolve(config: &Configuration, input: &InputTable, resolver: &Resolver) -> ResolvedSet {
    let resolved = resolver.resolve(config, input);
    for value in &resolved.values {
        let shown = match &value.value {
            ResolvedValue::Scalar(text) => text.clone(),
            ResolvedValue::Table(_) => value.value.preview(),
        };
        trace!(placeholder = %value.placeholder, value = redact_value(&shown), "resolved value");
    }
    resolved
}

// ============================================================================
// Stage 3: Substitute
// ============================================================================

pub struct SubstituteResult {
    pub document: Document,
    pub report: SubstitutionReport,
}

/// Load the template and apply resolved values to it.
pub fn substitute_template(
    config: &Configuration,
    resolved: &ResolvedSet,
    store: &dyn DocumentStore,
) -> std::result::Result<SubstituteResult, Diagnostic> {
    let mut document = store
        .load(&config.template_path)
        .map_err(|error| Diagnostic::error(DiagnosticKind::Document, error.to_string()))?;
    let report = substitute(&mut document, &resolved.values)
        .map_err(|error| Diagnostic::error(DiagnosticKind::Document, error.to_string()))?;
    Ok(SubstituteResult { document, report })
}

// ============================================================================
// Stage 4: Audit
// ============================================================================

pub fn audit(
    config: &Configuration,
    resolved: &ResolvedSet,
    report: &SubstitutionReport,
) -> (ReplacementAudit, Vec<Diagnostic>) {
    let audit = ReplacementAudit::build(config, resolved, report);
    let diagnostics = reconcile(&report.counts, &audit.missing, audit.expected);
    (audit, diagnostics)
}

// ============================================================================
// Full run
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Do everything except writing the output document.
    pub dry_run: bool,
}

/// Outcome of stages 1 to 5 for one configuration.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub audit: Option<ReplacementAudit>,
    pub diagnostics: Vec<Diagnostic>,
    pub saved: bool,
}

pub fn run_pipeline(
    config: &Configuration,
    resolver: &Resolver,
    store: &dyn DocumentStore,
    options: RunOptions,
) -> PipelineOutcome {
    let span = info_span!("generate", product = %config.product_label());
    let _guard = span.enter();
    let start = Instant::now();
    let mut diagnostics = Vec::new();

    let ingest_start = Instant::now();
    let ingested = info_span!("ingest", input = %config.input_path.display()).in_scope(|| ingest(config));
    info!(
        sheets = ingested.input.len(),
        errors = ingested.diagnostics.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );
    diagnostics.extend(ingested.diagnostics);

    let resolved = resolve(config, &ingested.input, resolver);
    diagnostics.extend(resolved.diagnostics.iter().cloned());

    let substituted = match substitute_template(config, &resolved, store) {
        Ok(substituted) => substituted,
        Err(diagnostic) => {
            diagnostics.push(diagnostic);
            return PipelineOutcome {
                audit: None,
                diagnostics,
                saved: false,
            };
        }
    };

    let (audit, reconciliation) = audit(config, &resolved, &substituted.report);
    diagnostics.extend(reconciliation);

    let mut saved = false;
    if options.dry_run {
        info!("dry run, output not written");
    } else {
        let save_start = Instant::now();
        match store.save(&substituted.document, &config.output_path) {
            Ok(()) => {
                saved = true;
                info!(
                    output = %config.output_path.display(),
                    duration_ms = save_start.elapsed().as_millis(),
                    "output saved"
                );
            }
            Err(error) => {
                diagnostics.push(Diagnostic::error(DiagnosticKind::Document, error.to_string()));
            }
        }
    }

    info!(
        replacements = audit.total,
        diagnostics = diagnostics.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    PipelineOutcome {
        audit: Some(audit),
        diagnostics,
        saved,
    }
}

/// JSON form of `--report`.
#[derive(Serialize)]
struct ReportFile<'a, T: Serialize> {
    generated_by: &'static str,
    run: &'a T,
}

/// Write `run` as pretty JSON, creating the parent directory.
pub fn write_report<T: Serialize>(path: &Path, run: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(&ReportFile {
        generated_by: concat!("tsgen ", env!("CARGO_PKG_VERSION")),
        run,
    })
    .context("serialize report")?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
