//! Built-in operations and formatters.

use chrono::NaiveDate;
use tsgen_model::{RecordSet, ResolvedValue, SliceBounds, ValueKind};

use crate::error::OperationError;
use crate::formatter::{FormatterRegistry, FunctionFormatter};
use crate::operation::{FunctionOperation, OperationRegistry};
use crate::slice::slice_records;

/// Columns inspected by `numBBGValues`.
const BBG_COLUMNS: [&str; 4] = ["BBG Code 1", "BBG Code 2", "BBG Code 3", "BBG Code 4"];

const LONG_DATE: &str = "%d %B %Y";
const SHORT_DATE: &str = "%d %b %y";

/// Registry holding `getTableData`, `numBBGValues` and `rowCount`.
pub fn default_operations() -> OperationRegistry {
    let mut registry = OperationRegistry::new();
    registry.register(Box::new(FunctionOperation::new(
        "getTableData",
        ValueKind::Table,
        "Sheet records restricted to the row and column bounds",
        get_table_data,
    )));
    registry.register(Box::new(FunctionOperation::new(
        "numBBGValues",
        ValueKind::Scalar,
        "Number of non-empty BBG Code 1-4 values in the first record",
        num_bbg_values,
    )));
    registry.register(Box::new(FunctionOperation::new(
        "rowCount",
        ValueKind::Scalar,
        "Number of data records in the sheet",
        row_count,
    )));
    registry
}

/// Registry holding `dateFormatter`, `percentageFormatter` and `upperCase`.
pub fn default_formatters() -> FormatterRegistry {
    let mut registry = FormatterRegistry::new();
    registry.register(Box::new(FunctionFormatter::new(
        "dateFormatter",
        "'10 October 2024' to '10 Oct 24'",
        date_formatter,
    )));
    registry.register(Box::new(FunctionFormatter::new(
        "percentageFormatter",
        "Fraction to whole percent, '0.98' to '98%'",
        percentage_formatter,
    )));
    registry.register(Box::new(FunctionFormatter::new(
        "upperCase",
        "Uppercase text",
        upper_case,
    )));
    registry
}

fn get_table_data(
    records: &RecordSet,
    bounds: &SliceBounds,
) -> Result<ResolvedValue, OperationError> {
    Ok(ResolvedValue::Table(slice_records(records, bounds)))
}

fn num_bbg_values(records: &RecordSet, _: &SliceBounds) -> Result<ResolvedValue, OperationError> {
    let first = records.first_record().ok_or(OperationError::NoRecords)?;
    let count = BBG_COLUMNS
        .iter()
        .filter(|column| first.get(column).is_some_and(|value| !value.is_empty()))
        .count();
    Ok(ResolvedValue::Scalar(count.to_string()))
}

fn row_count(records: &RecordSet, _: &SliceBounds) -> Result<ResolvedValue, OperationError> {
    Ok(ResolvedValue::Scalar(records.len().to_string()))
}

/// Text that is not a long-form date passes through unchanged.
fn date_formatter(value: &str) -> Result<String, OperationError> {
    Ok(NaiveDate::parse_from_str(value.trim(), LONG_DATE)
        .map_or_else(|_| value.to_string(), |date| date.format(SHORT_DATE).to_string()))
}

fn percentage_formatter(value: &str) -> Result<String, OperationError> {
    let fraction: f64 = value
        .trim()
        .parse()
        .map_err(|_| OperationError::InvalidValue {
            value: value.to_string(),
            expected: "a number",
        })?;
    Ok(format!("{:.0}%", fraction * 100.0))
}

fn upper_case(value: &str) -> Result<String, OperationError> {
    Ok(value.to_uppercase())
}
