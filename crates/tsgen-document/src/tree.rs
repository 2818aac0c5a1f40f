//! Index-addressed document tree.
//!
//! Nodes live in one arena and refer to each other by [`NodeId`]. Edits
//! detach nodes instead of freeing them, so an id handed out earlier never
//! points at a different node later.

use std::fmt;

use crate::block::{Block, CellBlock, TableBlock, TableBorders};
use crate::error::{DocumentError, Result};
use crate::paragraph::Paragraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Body,
    Paragraph(Paragraph),
    Table { borders: TableBorders },
    Row,
    Cell,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// One cell on the path from the body to a nested paragraph. All 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub table: usize,
    pub row: usize,
    pub cell: usize,
}

/// Human-readable position of a paragraph. All indices 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphLocation {
    Body { paragraph: usize },
    Table { path: Vec<CellAddress>, paragraph: usize },
}

impl fmt::Display for ParagraphLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body { paragraph } => write!(f, "body paragraph {paragraph}"),
            Self::Table { path, paragraph } => {
                for (depth, address) in path.iter().enumerate() {
                    if depth > 0 {
                        f.write_str(" > ")?;
                    }
                    write!(
                        f,
                        "table {}, row {}, cell {}",
                        address.table, address.row, address.cell
                    )?;
                }
                write!(f, ", paragraph {paragraph}")
            }
        }
    }
}

/// Arena document: a body node whose children are paragraphs and tables.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Body,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut document = Self::new();
        let body = document.body();
        for block in blocks {
            let id = document.build(body, block);
            document.nodes[body.0].children.push(id);
        }
        document
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|node| &node.kind)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |node| node.children.as_slice())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    pub fn paragraph(&self, id: NodeId) -> Option<&Paragraph> {
        match self.kind(id)? {
            NodeKind::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn paragraph_mut(&mut self, id: NodeId) -> Option<&mut Paragraph> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    /// Whether the node is reachable from the body.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.body() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn append_block(&mut self, parent: NodeId, block: Block) -> Result<NodeId> {
        let index = self.container(parent)?.children.len();
        self.insert_block(parent, index, block)
    }

    /// Insert `block` as the `index`-th child of `parent` (clamped to the end).
    pub fn insert_block(&mut self, parent: NodeId, index: usize, block: Block) -> Result<NodeId> {
        self.container(parent)?;
        let id = self.build(parent, block);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, id);
        self.ensure_cell_paragraph(parent);
        Ok(id)
    }

    /// The body or a cell; anything else cannot hold blocks.
    fn container(&self, id: NodeId) -> Result<&Node> {
        match self.nodes.get(id.0) {
            Some(node) if matches!(node.kind, NodeKind::Body | NodeKind::Cell) => Ok(node),
            _ => Err(DocumentError::UnknownNode { node: id }),
        }
    }

    /// Replace `id` with `blocks` at the same position under the same parent.
    ///
    /// Returns the ids of the inserted blocks in order. `id` is detached. A
    /// cell left without a paragraph child receives one empty paragraph.
    pub fn splice(&mut self, id: NodeId, blocks: Vec<Block>) -> Result<Vec<NodeId>> {
        let parent = self
            .parent(id)
            .ok_or(DocumentError::DetachedNode { node: id })?;
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|child| *child == id)
            .ok_or(DocumentError::DetachedNode { node: id })?;

        let inserted: Vec<NodeId> = blocks
            .into_iter()
            .map(|block| self.build(parent, block))
            .collect();
        let _replaced: Vec<NodeId> = self.nodes[parent.0]
            .children
            .splice(position..=position, inserted.iter().copied())
            .collect();
        self.nodes[id.0].parent = None;
        self.ensure_cell_paragraph(parent);
        Ok(inserted)
    }

    /// A cell holds at least one paragraph, even when it also holds tables.
    fn ensure_cell_paragraph(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        if !matches!(node.kind, NodeKind::Cell) {
            return;
        }
        let has_paragraph = node
            .children
            .iter()
            .any(|child| matches!(self.kind(*child), Some(NodeKind::Paragraph(_))));
        if !has_paragraph {
            let paragraph = self.alloc(NodeKind::Paragraph(Paragraph::empty()), id);
            self.nodes[id.0].children.push(paragraph);
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        self.splice(id, Vec::new()).map(|_| ())
    }

    /// Paragraph ids in traversal order with their locations.
    ///
    /// Body paragraphs come first, then every table row by row and cell by
    /// cell; inside a cell the same rule applies recursively.
    pub fn paragraphs_in_order(&self) -> Vec<(NodeId, ParagraphLocation)> {
        let mut out = Vec::new();
        self.collect_paragraphs(self.body(), &[], &mut out);
        out
    }

    fn collect_paragraphs(
        &self,
        container: NodeId,
        path: &[CellAddress],
        out: &mut Vec<(NodeId, ParagraphLocation)>,
    ) {
        let children = self.children(container);
        let paragraphs = children
            .iter()
            .filter(|child| matches!(self.kind(**child), Some(NodeKind::Paragraph(_))));
        for (index, id) in paragraphs.enumerate() {
            let paragraph = index + 1;
            let location = if path.is_empty() {
                ParagraphLocation::Body { paragraph }
            } else {
                ParagraphLocation::Table {
                    path: path.to_vec(),
                    paragraph,
                }
            };
            out.push((*id, location));
        }

        let tables = children
            .iter()
            .filter(|child| matches!(self.kind(**child), Some(NodeKind::Table { .. })));
        for (table_index, table) in tables.enumerate() {
            for (row_index, row) in self.children(*table).iter().enumerate() {
                for (cell_index, cell) in self.children(*row).iter().enumerate() {
                    let mut nested = path.to_vec();
                    nested.push(CellAddress {
                        table: table_index + 1,
                        row: row_index + 1,
                        cell: cell_index + 1,
                    });
                    self.collect_paragraphs(*cell, &nested, out);
                }
            }
        }
    }

    /// Tables reachable from the body, nested ones included.
    pub fn table_count(&self) -> usize {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| matches!(self.kind(*id), Some(NodeKind::Table { .. })))
            .filter(|id| self.is_attached(*id))
            .count()
    }

    /// Paragraph texts in traversal order, one per line.
    pub fn plain_text(&self) -> String {
        self.paragraphs_in_order()
            .into_iter()
            .filter_map(|(id, _)| self.paragraph(id).map(Paragraph::text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Owned block form of the body.
    pub fn to_blocks(&self) -> Vec<Block> {
        self.children(self.body())
            .iter()
            .filter_map(|id| self.block(*id))
            .collect()
    }

    /// Owned block form of a paragraph or table node.
    pub fn block(&self, id: NodeId) -> Option<Block> {
        match self.kind(id)? {
            NodeKind::Paragraph(paragraph) => Some(Block::Paragraph(paragraph.clone())),
            NodeKind::Table { borders } => {
                let rows = self
                    .children(id)
                    .iter()
                    .map(|row| {
                        self.children(*row)
                            .iter()
                            .map(|cell| CellBlock {
                                blocks: self
                                    .children(*cell)
                                    .iter()
                                    .filter_map(|child| self.block(*child))
                                    .collect(),
                            })
                            .collect()
                    })
                    .collect();
                Some(Block::Table(TableBlock {
                    borders: *borders,
                    rows,
                }))
            }
            NodeKind::Body | NodeKind::Row | NodeKind::Cell => None,
        }
    }

    /// Allocate `block` and its descendants with `parent` as owner.
    /// The caller links the returned id into the parent's children.
    fn build(&mut self, parent: NodeId, block: Block) -> NodeId {
        match block {
            Block::Paragraph(paragraph) => self.alloc(NodeKind::Paragraph(paragraph), parent),
            Block::Table(table) => {
                let table_id = self.alloc(
                    NodeKind::Table {
                        borders: table.borders,
                    },
                    parent,
                );
                for row in table.rows {
                    let row_id = self.alloc(NodeKind::Row, table_id);
                    self.nodes[table_id.0].children.push(row_id);
                    for cell in row {
                        let cell_id = self.alloc(NodeKind::Cell, row_id);
                        self.nodes[row_id.0].children.push(cell_id);
                        for child in cell.blocks {
                            let child_id = self.build(cell_id, child);
                            self.nodes[cell_id.0].children.push(child_id);
                        }
                        self.ensure_cell_paragraph(cell_id);
                    }
                }
                table_id
            }
        }
    }

    fn alloc(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }
}
