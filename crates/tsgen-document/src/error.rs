//! Error types for document loading, saving and editing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tree::NodeId;

#[derive(Debug, Error)]
pub enum DocumentError {
    // === Load Errors ===
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template {path} is not a valid document: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Save Errors ===
    #[error("failed to write document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize document: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    // === Edit Errors ===
    #[error("node {node} is not attached to a container")]
    DetachedNode { node: NodeId },

    #[error("node {node} does not exist or cannot hold blocks")]
    UnknownNode { node: NodeId },
}

pub type Result<T> = std::result::Result<T, DocumentError>;
