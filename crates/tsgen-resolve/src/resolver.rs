//! The resolver: configuration plus input table to placeholder values.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

use tracing::{debug, error, info, info_span, warn};
use tsgen_model::{
    Configuration, Diagnostic, InputTable, PlaceholderSpec, RecordSet, Resolution, ResolvedValue,
    ValueKind,
};

use crate::builtins::{default_formatters, default_operations};
use crate::error::{OperationError, ResolveError};
use crate::formatter::FormatterRegistry;
use crate::operation::OperationRegistry;
use crate::slice::slice_records;

/// One successfully resolved placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlaceholder {
    pub placeholder: String,
    /// Column or operation name the value came from.
    pub source: String,
    pub value: ResolvedValue,
}

/// Outcome of resolving a whole configuration.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    /// Resolved values in configuration order.
    pub values: Vec<ResolvedPlaceholder>,
    /// Placeholders that produced no value, in configuration order.
    pub unresolved: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedSet {
    pub fn get(&self, placeholder: &str) -> Option<&ResolvedValue> {
        self.values
            .iter()
            .find(|resolved| resolved.placeholder == placeholder)
            .map(|resolved| &resolved.value)
    }
}

/// Resolves placeholders against registered operations and formatters.
pub struct Resolver {
    operations: OperationRegistry,
    formatters: FormatterRegistry,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(default_operations(), default_formatters())
    }
}

impl Resolver {
    pub fn new(operations: OperationRegistry, formatters: FormatterRegistry) -> Self {
        Self {
            operations,
            formatters,
        }
    }

    pub fn operations(&self) -> &OperationRegistry {
        &self.operations
    }

    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Resolve every placeholder of `config`, in order.
    ///
    /// Never fails as a whole: each placeholder either lands in `values` or
    /// in `unresolved` with a diagnostic. Formatter problems keep the value
    /// and add a warning.
    pub fn resolve(&self, config: &Configuration, input: &InputTable) -> ResolvedSet {
        let span = info_span!("resolve", placeholders = config.mappings.len());
        let _guard = span.enter();
        let start = Instant::now();
        let mut resolved = ResolvedSet::default();

        for spec in &config.mappings {
            match self.resolve_spec(spec, input) {
                Ok(value) => {
                    let value = match self.apply_formatter(spec, value) {
                        Ok(value) => value,
                        Err((value, error)) => {
                            warn!(placeholder = %spec.placeholder, %error, "formatter skipped");
                            resolved.diagnostics.push(error.to_diagnostic());
                            value
                        }
                    };
                    debug!(
                        placeholder = %spec.placeholder,
                        source = spec.source_label(),
                        kind = value.kind().as_str(),
                        "placeholder resolved"
                    );
                    resolved.values.push(ResolvedPlaceholder {
                        placeholder: spec.placeholder.clone(),
                        source: spec.source_label().to_string(),
                        value,
                    });
                }
                Err(error) => {
                    warn!(placeholder = %spec.placeholder, %error, "placeholder unresolved");
                    resolved.diagnostics.push(error.to_diagnostic());
                    resolved.unresolved.push(spec.placeholder.clone());
                }
            }
        }

        info!(
            resolved = resolved.values.len(),
            unresolved = resolved.unresolved.len(),
            duration_ms = start.elapsed().as_millis(),
            "placeholders resolved"
        );
        resolved
    }

    fn resolve_spec(
        &self,
        spec: &PlaceholderSpec,
        input: &InputTable,
    ) -> Result<ResolvedValue, ResolveError> {
        let records = input.sheet(spec.sheet);
        match &spec.resolution {
            // A field on a sheet without data is the same failure as a missing column.
            Resolution::Field { column } => match records {
                Some(records) => resolve_field(spec, column, records),
                None => Err(column_not_found(spec, column)),
            },
            Resolution::Operation { name } => {
                let records = records.ok_or_else(|| ResolveError::SheetUnavailable {
                    placeholder: spec.placeholder.clone(),
                    sheet: spec.sheet,
                })?;
                self.resolve_operation(spec, name, records)
            }
        }
    }

    fn resolve_operation(
        &self,
        spec: &PlaceholderSpec,
        name: &str,
        records: &RecordSet,
    ) -> Result<ResolvedValue, ResolveError> {
        let operation =
            self.operations
                .get(name)
                .ok_or_else(|| ResolveError::OperationNotFound {
                    placeholder: spec.placeholder.clone(),
                    name: name.to_string(),
                })?;

        let value = isolate(|| operation.apply(records, &spec.bounds)).map_err(|source| {
            ResolveError::OperationFailed {
                placeholder: spec.placeholder.clone(),
                name: name.to_string(),
                source,
            }
        })?;

        if value.kind() != spec.kind {
            return Err(ResolveError::KindMismatch {
                placeholder: spec.placeholder.clone(),
                name: name.to_string(),
                expected: spec.kind,
                found: value.kind(),
            });
        }
        Ok(value)
    }

    /// Returns the formatted value, or the unchanged value with a warning.
    fn apply_formatter(
        &self,
        spec: &PlaceholderSpec,
        value: ResolvedValue,
    ) -> Result<ResolvedValue, (ResolvedValue, ResolveError)> {
        let Some(name) = spec.formatter.as_deref() else {
            return Ok(value);
        };
        let ResolvedValue::Scalar(text) = &value else {
            debug!(placeholder = %spec.placeholder, formatter = name, "formatter ignored for table value");
            return Ok(value);
        };
        let Some(formatter) = self.formatters.get(name) else {
            return Err((
                value,
                ResolveError::FormatterNotFound {
                    placeholder: spec.placeholder.clone(),
                    name: name.to_string(),
                },
            ));
        };
        match isolate(|| formatter.format(text)) {
            Ok(formatted) => Ok(ResolvedValue::Scalar(formatted)),
            Err(source) => Err((
                value,
                ResolveError::FormatterFailed {
                    placeholder: spec.placeholder.clone(),
                    name: name.to_string(),
                    source,
                },
            )),
        }
    }
}

/// Column value from the first record, or the whole column for table specs.
fn resolve_field(
    spec: &PlaceholderSpec,
    column: &str,
    records: &RecordSet,
) -> Result<ResolvedValue, ResolveError> {
    let not_found = || column_not_found(spec, column);
    match spec.kind {
        ValueKind::Scalar => records
            .first_record()
            .and_then(|record| record.get(column))
            .map(|value| ResolvedValue::Scalar(value.to_string()))
            .ok_or_else(not_found),
        ValueKind::Table => {
            let values = records.column_values(column).ok_or_else(not_found)?;
            let single = RecordSet::new(
                vec![column.to_string()],
                values.into_iter().map(|value| vec![value]).collect(),
            );
            Ok(ResolvedValue::Table(slice_records(&single, &spec.bounds)))
        }
    }
}

fn column_not_found(spec: &PlaceholderSpec, column: &str) -> ResolveError {
    ResolveError::ColumnNotFound {
        placeholder: spec.placeholder.clone(),
        column: column.to_string(),
        sheet: spec.sheet,
    }
}

thread_local! {
    static ISOLATED: Cell<bool> = const { Cell::new(false) };
}

static ISOLATION_HOOK: Once = Once::new();

/// Routes panics raised inside [`isolate`] to tracing instead of stderr.
/// Panics elsewhere still reach the previously installed hook.
fn install_isolation_hook() {
    ISOLATION_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if ISOLATED.get() {
                error!(
                    location = ?info.location(),
                    message = %panic_message(info.payload()),
                    "custom function panicked"
                );
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, turning a panic into an [`OperationError::Panicked`].
fn isolate<T>(f: impl FnOnce() -> Result<T, OperationError>) -> Result<T, OperationError> {
    install_isolation_hook();
    let outer = ISOLATED.replace(true);
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    ISOLATED.set(outer);
    outcome.unwrap_or_else(|payload| {
        Err(OperationError::Panicked {
            message: panic_message(payload.as_ref()),
        })
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
