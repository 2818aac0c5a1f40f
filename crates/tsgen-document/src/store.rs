//! Loading templates and saving generated documents.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::block::Block;
use crate::error::{DocumentError, Result};
use crate::tree::Document;

/// Persistence boundary for documents.
pub trait DocumentStore {
    fn load(&self, path: &Path) -> Result<Document>;

    /// Write `document` to `path`, creating the parent directory if needed.
    fn save(&self, document: &Document, path: &Path) -> Result<()>;
}

/// On-disk form: `{"blocks": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
struct DocumentFile {
    blocks: Vec<Block>,
}

/// Documents stored as pretty-printed JSON block trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentStore;

impl DocumentStore for JsonDocumentStore {
    fn load(&self, path: &Path) -> Result<Document> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DocumentError::TemplateNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DocumentError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let file: DocumentFile =
            serde_json::from_str(&content).map_err(|source| DocumentError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), blocks = file.blocks.len(), "template loaded");
        Ok(Document::from_blocks(file.blocks))
    }

    fn save(&self, document: &Document, path: &Path) -> Result<()> {
        let file = DocumentFile {
            blocks: document.to_blocks(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|source| DocumentError::Serialize { source })?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DocumentError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "document saved");
        Ok(())
    }
}
