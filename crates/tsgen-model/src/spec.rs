//! Placeholder specifications and the run configuration.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ids::SheetId;

/// Product label used when a configuration does not declare one.
pub const DEFAULT_PRODUCT_NAME: &str = "Unknown Product";

/// How a placeholder's value is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Resolution {
    /// Direct lookup of a column in the target sheet.
    Field { column: String },
    /// A registered custom operation over the target sheet's records.
    Operation { name: String },
}

/// Declared shape of a placeholder's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Scalar,
    Table,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Table => "table",
        }
    }
}

/// Inclusive, 1-based row and column bounds for table extraction.
///
/// Every bound is optional; an absent start means "from the first", an absent
/// end means "to the natural extent of the data".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceBounds {
    pub start_row: Option<i64>,
    pub end_row: Option<i64>,
    pub start_col: Option<i64>,
    pub end_col: Option<i64>,
}

impl SliceBounds {
    pub fn rows(start: i64, end: i64) -> Self {
        Self {
            start_row: Some(start),
            end_row: Some(end),
            ..Self::default()
        }
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }
}

/// One entry of the mapping table: a placeholder and how to compute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSpec {
    /// Literal token searched for in the template, e.g. `[[Issuer]]`.
    pub placeholder: String,
    pub resolution: Resolution,
    pub sheet: SheetId,
    pub kind: ValueKind,
    pub bounds: SliceBounds,
    pub formatter: Option<String>,
}

impl PlaceholderSpec {
    pub fn field(placeholder: impl Into<String>, column: impl Into<String>) -> Self {
        Self::new(
            placeholder,
            Resolution::Field {
                column: column.into(),
            },
        )
    }

    pub fn operation(placeholder: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(placeholder, Resolution::Operation { name: name.into() })
    }

    fn new(placeholder: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            placeholder: placeholder.into(),
            resolution,
            sheet: SheetId::FIRST,
            kind: ValueKind::Scalar,
            bounds: SliceBounds::default(),
            formatter: None,
        }
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: SheetId) -> Self {
        self.sheet = sheet;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: SliceBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    /// Column or operation name, as shown in the replacement log.
    pub fn source_label(&self) -> &str {
        match &self.resolution {
            Resolution::Field { column } => column,
            Resolution::Operation { name } => name,
        }
    }

    pub fn is_table(&self) -> bool {
        self.kind == ValueKind::Table
    }
}

/// A validated run configuration. Built once by `tsgen-config`, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub input_path: PathBuf,
    /// Placeholder specs in declaration order; names are unique.
    pub mappings: Vec<PlaceholderSpec>,
    pub product_name: Option<String>,
    pub expected_count: Option<usize>,
    pub should_ignore: bool,
}

impl Configuration {
    pub fn product_label(&self) -> &str {
        self.product_name.as_deref().unwrap_or(DEFAULT_PRODUCT_NAME)
    }

    pub fn spec(&self, placeholder: &str) -> Option<&PlaceholderSpec> {
        self.mappings
            .iter()
            .find(|spec| spec.placeholder == placeholder)
    }

    /// Sheets referenced by at least one placeholder. Only these are loaded.
    pub fn required_sheets(&self) -> BTreeSet<SheetId> {
        self.mappings.iter().map(|spec| spec.sheet).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mappings: Vec<PlaceholderSpec>) -> Configuration {
        Configuration {
            template_path: "template.json".into(),
            output_path: "out/result.json".into(),
            input_path: "input.csv".into(),
            mappings,
            product_name: None,
            expected_count: None,
            should_ignore: false,
        }
    }

    #[test]
    fn required_sheets_are_deduplicated() {
        let sheet_two = SheetId::new(2).unwrap();
        let cfg = config(vec![
            PlaceholderSpec::field("[[A]]", "A"),
            PlaceholderSpec::field("[[B]]", "B").with_sheet(sheet_two),
            PlaceholderSpec::operation("[[C]]", "rowCount"),
        ]);
        let sheets: Vec<SheetId> = cfg.required_sheets().into_iter().collect();
        assert_eq!(sheets, vec![SheetId::FIRST, sheet_two]);
    }

    #[test]
    fn product_label_falls_back() {
        let mut cfg = config(vec![]);
        assert_eq!(cfg.product_label(), DEFAULT_PRODUCT_NAME);
        cfg.product_name = Some("FCN".to_string());
        assert_eq!(cfg.product_label(), "FCN");
    }

    #[test]
    fn source_label_names_column_or_operation() {
        assert_eq!(PlaceholderSpec::field("[[A]]", "Issuer").source_label(), "Issuer");
        assert_eq!(
            PlaceholderSpec::operation("[[T]]", "getTableData").source_label(),
            "getTableData"
        );
    }
}
