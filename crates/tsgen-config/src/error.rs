//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run before any resolution happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("config directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// One or more required top-level keys are absent.
    #[error("config is missing required keys: {}", keys.join(", "))]
    MissingKeys { keys: Vec<String> },

    /// Two or more mapping entries share a placeholder name.
    #[error("config contains duplicate placeholders: {}", names.join(", "))]
    DuplicatePlaceholder { names: Vec<String> },

    #[error("invalid mapping for placeholder '{placeholder}': {reason}")]
    InvalidMapping { placeholder: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
