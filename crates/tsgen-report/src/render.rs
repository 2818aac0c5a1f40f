//! Replacement log table.

use std::fmt::Write;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::audit::{AuditEntry, EntryStatus, ReplacementAudit};

const PREVIEW_CHARS: usize = 48;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Add `⮡ N time(s) at <location>` lines under each placeholder.
    pub show_locations: bool,
    /// Disable colors regardless of the terminal.
    pub plain: bool,
}

/// Replacement log for scalar placeholders followed by the footer lines.
pub fn render_log(audit: &ReplacementAudit, options: LogOptions) -> String {
    let mut table = Table::new();
    if options.plain {
        table.force_no_tty();
    }
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Placeholder"),
        header_cell("Value"),
        header_cell("Count"),
        header_cell("Status"),
    ]);
    apply_log_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    if let Some(column) = table.column_mut(4) {
        column.set_cell_alignment(CellAlignment::Center);
    }

    for entry in audit.scalar_entries() {
        table.add_row(vec![
            Cell::new(&entry.source),
            placeholder_cell(entry, options.show_locations),
            value_cell(entry.value.as_deref()),
            count_cell(entry.count),
            status_cell(entry.status),
        ]);
    }

    let mut out = format!("Product: {}\n{table}\n", audit.product);
    let _ = writeln!(out, "Tables created: {}", audit.table_replacements);
    let _ = writeln!(out, "Total placeholder values changed: {}", audit.total);
    if let Some(expected) = audit.expected {
        let _ = writeln!(out, "Expected placeholder values: {expected}");
    }
    out
}

fn apply_log_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(35)),
        ColumnConstraint::UpperBoundary(Width::Percentage(35)),
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
    ]);
}

fn placeholder_cell(entry: &AuditEntry, show_locations: bool) -> Cell {
    if !show_locations || entry.locations.is_empty() {
        return Cell::new(&entry.placeholder);
    }
    let mut text = entry.placeholder.clone();
    for (location, times) in group_locations(&entry.locations) {
        let _ = write!(text, "\n  ⮡ {times} time(s) at {location}");
    }
    Cell::new(text)
}

/// Consecutive identical locations collapsed with their repeat count.
fn group_locations(locations: &[String]) -> Vec<(&str, usize)> {
    let mut grouped: Vec<(&str, usize)> = Vec::new();
    for location in locations {
        match grouped.last_mut() {
            Some((last, times)) if *last == location.as_str() => *times += 1,
            _ => grouped.push((location.as_str(), 1)),
        }
    }
    grouped
}

fn value_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(preview(value)),
        None => dim_cell("-"),
    }
}

fn preview(value: &str) -> String {
    if value.chars().count() <= PREVIEW_CHARS {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(PREVIEW_CHARS - 1).collect();
    cut.push('…');
    cut
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn status_cell(status: EntryStatus) -> Cell {
    match status {
        EntryStatus::Replaced => Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
        EntryStatus::Missing => Cell::new(status.as_str()).fg(Color::Red),
        EntryStatus::Unresolved => Cell::new(status.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
