use std::path::Path;

use tracing::debug;
use tsgen_model::Configuration;

use crate::error::{ConfigError, Result};
use crate::raw::RawConfiguration;
use crate::validate::validate;

/// Parse and validate a configuration from JSON text.
///
/// # Errors
///
/// Returns [`ConfigError::Json`] for malformed JSON, [`ConfigError::MissingKeys`]
/// when a required key is absent, [`ConfigError::DuplicatePlaceholder`] when a
/// placeholder name repeats and [`ConfigError::InvalidMapping`] for entries
/// that do not set exactly one resolution strategy.
///
/// Referenced operations and formatters are not checked here; unknown names
/// surface per placeholder at resolution time.
pub fn parse_configuration(text: &str) -> Result<Configuration> {
    let raw: RawConfiguration =
        serde_json::from_str(text).map_err(|source| ConfigError::Json { source })?;
    validate(raw)
}

/// Read and validate a configuration file.
pub fn load_configuration(path: &Path) -> Result<Configuration> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_configuration(&text)?;
    debug!(
        path = %path.display(),
        placeholders = config.mappings.len(),
        "configuration loaded"
    );
    Ok(config)
}
