//! Conversion of the raw serde form into a validated [`Configuration`].

use std::collections::BTreeSet;

use tsgen_model::{Configuration, PlaceholderSpec, Resolution, SheetId, SliceBounds, ValueKind};

use crate::error::{ConfigError, Result};
use crate::raw::{RawConfiguration, RawMapping};

const TABLE_KIND: &str = "table";

pub(crate) fn validate(raw: RawConfiguration) -> Result<Configuration> {
    let mut missing = Vec::new();
    if raw.template_path.is_none() {
        missing.push("templatePath");
    }
    if raw.output_path.is_none() {
        missing.push("outputPath");
    }
    if raw.input_path.is_none() {
        missing.push("inputPath");
    }
    if raw.mappings.is_none() {
        missing.push("mappings");
    }
    let (Some(template_path), Some(output_path), Some(input_path), Some(entries)) = (
        raw.template_path,
        raw.output_path,
        raw.input_path,
        raw.mappings,
    ) else {
        return Err(ConfigError::MissingKeys {
            keys: missing.into_iter().map(String::from).collect(),
        });
    };

    let duplicates = duplicate_placeholders(entries.0.iter().map(|(name, _)| name.as_str()));
    if !duplicates.is_empty() {
        return Err(ConfigError::DuplicatePlaceholder { names: duplicates });
    }

    let mappings = entries
        .0
        .into_iter()
        .map(|(placeholder, mapping)| build_spec(placeholder, mapping))
        .collect::<Result<Vec<_>>>()?;

    Ok(Configuration {
        template_path,
        output_path,
        input_path,
        mappings,
        product_name: raw.product_name,
        expected_count: raw.expected_count,
        should_ignore: raw.should_ignore,
    })
}

/// Names that appear more than once, each reported once, in order of first repeat.
fn duplicate_placeholders<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut duplicates = Vec::new();
    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

fn build_spec(placeholder: String, mapping: RawMapping) -> Result<PlaceholderSpec> {
    let invalid = |reason: &str| ConfigError::InvalidMapping {
        placeholder: placeholder.clone(),
        reason: reason.to_string(),
    };
    if placeholder.is_empty() {
        return Err(invalid("placeholder name is empty"));
    }
    let resolution = match (mapping.input_field, mapping.custom_operation) {
        (Some(column), None) => Resolution::Field { column },
        (None, Some(name)) => Resolution::Operation { name },
        (Some(_), Some(_)) => {
            return Err(invalid(
                "set either inputField or customOperation, not both",
            ));
        }
        (None, None) => return Err(invalid("one of inputField or customOperation is required")),
    };
    let sheet = match mapping.sheet_number {
        None => SheetId::FIRST,
        Some(number) => SheetId::new(number).ok_or_else(|| invalid("sheetNumber starts at 1"))?,
    };
    let kind = match mapping.kind.as_deref() {
        Some(TABLE_KIND) => ValueKind::Table,
        _ => ValueKind::Scalar,
    };
    let bounds = mapping
        .params
        .map(|params| SliceBounds {
            start_row: params.start_row,
            end_row: params.end_row,
            start_col: params.start_col,
            end_col: params.end_col,
        })
        .unwrap_or_default();
    Ok(PlaceholderSpec {
        placeholder,
        resolution,
        sheet,
        kind,
        bounds,
        formatter: mapping.formatter,
    })
}
