//! Normalized tabular data and resolved placeholder values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::SheetId;
use crate::spec::ValueKind;

/// Ordered records sharing one column set.
///
/// Every row holds exactly `columns.len()` values; [`RecordSet::new`] pads
/// short rows with empty strings and drops values beyond the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    pub fn first_record(&self) -> Option<Record<'_>> {
        self.record(0)
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<String>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index].clone()).collect())
    }
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let columns = self.columns;
        let values = self.values;
        columns
            .iter()
            .zip(values.iter())
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }
}

/// Normalized input keyed by sheet position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTable {
    sheets: BTreeMap<SheetId, RecordSet>,
}

impl InputTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: SheetId, data: RecordSet) {
        self.sheets.insert(sheet, data);
    }

    pub fn sheet(&self, sheet: SheetId) -> Option<&RecordSet> {
        self.sheets.get(&sheet)
    }

    pub fn contains(&self, sheet: SheetId) -> bool {
        self.sheets.contains_key(&sheet)
    }

    pub fn sheet_ids(&self) -> impl Iterator<Item = SheetId> + '_ {
        self.sheets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// What a placeholder resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ResolvedValue {
    Scalar(String),
    Table(RecordSet),
}

impl ResolvedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Table(_) => ValueKind::Table,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&RecordSet> {
        match self {
            Self::Scalar(_) => None,
            Self::Table(table) => Some(table),
        }
    }

    /// Short human-readable rendering for logs.
    pub fn preview(&self) -> String {
        match self {
            Self::Scalar(text) => text.clone(),
            Self::Table(table) => format!("<table {}x{}>", table.len(), table.width()),
        }
    }
}
