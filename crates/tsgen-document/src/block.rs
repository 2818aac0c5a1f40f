//! Owned block form of a document.

use serde::{Deserialize, Serialize};

use crate::paragraph::{Paragraph, Run, RunStyle};

/// Top-level or cell-level content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph(Paragraph),
    Table(TableBlock),
}

impl Block {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Self::Paragraph(paragraph) => Some(paragraph),
            Self::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableBlock> {
        match self {
            Self::Table(table) => Some(table),
            Self::Paragraph(_) => None,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<TableBlock> for Block {
    fn from(table: TableBlock) -> Self {
        Self::Table(table)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    None,
    Single,
}

/// Outer edges plus the internal separators between rows and columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableBorders {
    pub top: BorderStyle,
    pub bottom: BorderStyle,
    pub left: BorderStyle,
    pub right: BorderStyle,
    pub inside_horizontal: BorderStyle,
    pub inside_vertical: BorderStyle,
}

impl TableBorders {
    /// Single line on every edge and separator.
    pub fn single() -> Self {
        Self {
            top: BorderStyle::Single,
            bottom: BorderStyle::Single,
            left: BorderStyle::Single,
            right: BorderStyle::Single,
            inside_horizontal: BorderStyle::Single,
            inside_vertical: BorderStyle::Single,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBlock {
    pub blocks: Vec<Block>,
}

impl CellBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Paragraph::plain(text).into()],
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            blocks: vec![Paragraph::new(vec![Run::styled(text, style)]).into()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    #[serde(default)]
    pub borders: TableBorders,
    pub rows: Vec<Vec<CellBlock>>,
}

impl TableBlock {
    /// Bordered grid: one bold header row from `columns`, then one plain row
    /// per entry of `rows`, written row-major.
    pub fn grid(columns: &[String], rows: &[Vec<String>]) -> Self {
        let header = columns
            .iter()
            .map(|label| CellBlock::styled(label.as_str(), RunStyle::bold()))
            .collect();
        let mut grid = Vec::with_capacity(rows.len() + 1);
        grid.push(header);
        grid.extend(rows.iter().map(|row| {
            (0..columns.len())
                .map(|index| CellBlock::text(row.get(index).map_or("", String::as_str)))
                .collect()
        }));
        Self {
            borders: TableBorders::single(),
            rows: grid,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Text of each cell, row-major.
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.blocks
                            .iter()
                            .filter_map(Block::as_paragraph)
                            .map(Paragraph::text)
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_bold_header_and_single_borders() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let rows = vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string()],
        ];
        let table = TableBlock::grid(&columns, &rows);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.borders, TableBorders::single());
        assert_eq!(table.cell_texts(), vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string(), String::new()],
        ]);
        let header = table.rows[0][0].blocks[0].as_paragraph().unwrap();
        assert!(header.runs[0].style.bold);
        let data = table.rows[1][0].blocks[0].as_paragraph().unwrap();
        assert!(!data.runs[0].style.bold);
    }

    #[test]
    fn block_json_is_tagged() {
        let block = Block::from(Paragraph::plain("hi"));
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"type":"paragraph","runs":[{"text":"hi"}]}"#);
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
