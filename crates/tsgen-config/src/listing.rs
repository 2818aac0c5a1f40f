//! Discovery of selectable configurations in a directory.

use std::path::{Path, PathBuf};

use tracing::warn;
use tsgen_model::DEFAULT_PRODUCT_NAME;

use crate::error::{ConfigError, Result};
use crate::raw::ConfigHeader;

/// A configuration offered for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub product_name: String,
}

/// A `.json` file that could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedConfig {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigListing {
    pub entries: Vec<ConfigEntry>,
    pub skipped: Vec<SkippedConfig>,
}

/// Lists `*.json` configurations in `dir`, sorted by file name.
///
/// Only `productName` and `shouldIgnore` are read; a file is not validated
/// until it is selected. Files marked `shouldIgnore` are left out, unreadable
/// ones are reported in [`ConfigListing::skipped`].
pub fn list_configurations(dir: &Path) -> Result<ConfigListing> {
    if !dir.is_dir() {
        return Err(ConfigError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source| ConfigError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut listing = ConfigListing::default();
    for path in files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match read_header(&path) {
            Ok(header) if header.should_ignore => {}
            Ok(header) => listing.entries.push(ConfigEntry {
                file_name,
                path,
                product_name: header
                    .product_name
                    .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
            }),
            Err(reason) => {
                warn!(file = %file_name, %reason, "skipping unreadable configuration");
                listing.skipped.push(SkippedConfig { file_name, reason });
            }
        }
    }
    Ok(listing)
}

fn read_header(path: &Path) -> std::result::Result<ConfigHeader, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_sorted_and_skips_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.json"), r#"{ "productName": "FCN" }"#).unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{}"#).unwrap();
        std::fs::write(
            dir.path().join("c.json"),
            r#"{ "productName": "Draft", "shouldIgnore": true }"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("d.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let listing = list_configurations(dir.path()).unwrap();
        let names: Vec<(&str, &str)> = listing
            .entries
            .iter()
            .map(|e| (e.file_name.as_str(), e.product_name.as_str()))
            .collect();
        assert_eq!(names, vec![("a.json", DEFAULT_PRODUCT_NAME), ("b.json", "FCN")]);
        assert_eq!(listing.skipped.len(), 1);
        assert_eq!(listing.skipped[0].file_name, "d.json");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = list_configurations(&dir.path().join("config")).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryNotFound { .. }));
    }
}
