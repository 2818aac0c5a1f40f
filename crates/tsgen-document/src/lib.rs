//! Document model for templates and generated output.
//!
//! Two views of the same content:
//!
//! - [`Block`] is the owned, recursive form used to build and serialize documents
//! - [`Document`] is an arena of nodes addressed by [`NodeId`], used while
//!   editing; [`Document::splice`] replaces one node with a sequence of blocks
//!
//! Templates and outputs are persisted through a [`DocumentStore`].

mod block;
mod error;
mod paragraph;
mod store;
mod tree;

pub use block::{Block, BorderStyle, CellBlock, TableBlock, TableBorders};
pub use error::{DocumentError, Result};
pub use paragraph::{Paragraph, Run, RunStyle};
pub use store::{DocumentStore, JsonDocumentStore};
pub use tree::{CellAddress, Document, NodeId, NodeKind, ParagraphLocation};
