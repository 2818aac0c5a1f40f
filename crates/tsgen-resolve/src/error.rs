//! Error types for value resolution.

use thiserror::Error;
use tsgen_model::{Diagnostic, DiagnosticKind, SheetId, ValueKind};

/// Failure reported by an operation or formatter body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("sheet has no data records")]
    NoRecords,

    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    #[error("invalid value '{value}': expected {expected}")]
    InvalidValue { value: String, expected: &'static str },

    #[error("{message}")]
    Failed { message: String },

    #[error("panicked: {message}")]
    Panicked { message: String },
}

/// Per-placeholder resolution failure.
///
/// Formatter variants are warnings: the value resolved before the formatter
/// is kept. Every other variant drops the placeholder from the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{placeholder}: expected column '{column}' not found in sheet {sheet}")]
    ColumnNotFound {
        placeholder: String,
        column: String,
        sheet: SheetId,
    },

    #[error("{placeholder}: sheet {sheet} has no usable data")]
    SheetUnavailable { placeholder: String, sheet: SheetId },

    #[error("{placeholder}: custom function '{name}' not found")]
    OperationNotFound { placeholder: String, name: String },

    #[error("{placeholder}: custom function '{name}' failed: {source}")]
    OperationFailed {
        placeholder: String,
        name: String,
        #[source]
        source: OperationError,
    },

    #[error(
        "{placeholder}: expected a {} value, '{name}' produced a {} value",
        .expected.as_str(),
        .found.as_str()
    )]
    KindMismatch {
        placeholder: String,
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("{placeholder}: formatter '{name}' not found, value left unchanged")]
    FormatterNotFound { placeholder: String, name: String },

    #[error("{placeholder}: formatter '{name}' failed, value left unchanged: {source}")]
    FormatterFailed {
        placeholder: String,
        name: String,
        #[source]
        source: OperationError,
    },
}

impl ResolveError {
    pub fn placeholder(&self) -> &str {
        match self {
            Self::ColumnNotFound { placeholder, .. }
            | Self::SheetUnavailable { placeholder, .. }
            | Self::OperationNotFound { placeholder, .. }
            | Self::OperationFailed { placeholder, .. }
            | Self::KindMismatch { placeholder, .. }
            | Self::FormatterNotFound { placeholder, .. }
            | Self::FormatterFailed { placeholder, .. } => placeholder,
        }
    }

    pub fn is_formatter(&self) -> bool {
        matches!(
            self,
            Self::FormatterNotFound { .. } | Self::FormatterFailed { .. }
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = if self.is_formatter() {
            Diagnostic::warning(DiagnosticKind::Formatter, self.to_string())
        } else {
            Diagnostic::error(DiagnosticKind::Resolution, self.to_string())
        };
        diagnostic.for_placeholder(self.placeholder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsgen_model::Severity;

    #[test]
    fn formatter_errors_are_warnings() {
        let error = ResolveError::FormatterNotFound {
            placeholder: "[[Date]]".to_string(),
            name: "isoDate".to_string(),
        };
        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.kind, DiagnosticKind::Formatter);
        assert_eq!(diagnostic.placeholder.as_deref(), Some("[[Date]]"));
    }

    #[test]
    fn resolution_errors_are_errors() {
        let error = ResolveError::ColumnNotFound {
            placeholder: "[[Issuer]]".to_string(),
            column: "Issuer".to_string(),
            sheet: SheetId::FIRST,
        };
        assert!(error.to_diagnostic().is_error());
        assert_eq!(
            error.to_string(),
            "[[Issuer]]: expected column 'Issuer' not found in sheet 1"
        );
    }
}
