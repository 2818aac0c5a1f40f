//! Document walk and node edits.

use std::time::Instant;

use tracing::{debug, info, info_span};
use tsgen_document::{Block, Document, NodeId, ParagraphLocation, Result, TableBlock};
use tsgen_model::{RecordSet, ResolvedValue};
use tsgen_resolve::ResolvedPlaceholder;

use crate::outcome::{PlaceholderCount, SubstitutionReport};

/// Apply `values` to `document` in place and count every substitution.
///
/// Paragraph ids are captured before any edit, so generated tables and the
/// paragraphs split off around them are not scanned again for scalars. A
/// paragraph with two table tokens yields two tables.
pub fn substitute(document: &mut Document, values: &[ResolvedPlaceholder]) -> Result<SubstitutionReport> {
    let span = info_span!("substitute", placeholders = values.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = SubstitutionReport {
        counts: values
            .iter()
            .map(|resolved| PlaceholderCount {
                placeholder: resolved.placeholder.clone(),
                kind: resolved.value.kind(),
                count: 0,
                locations: Vec::new(),
            })
            .collect(),
        tables_created: 0,
    };

    let paragraphs = document.paragraphs_in_order();
    for (id, location) in &paragraphs {
        replace_scalars(document, *id, location, values, &mut report);
        replace_tables(document, *id, location, values, &mut report)?;
    }

    info!(
        paragraphs = paragraphs.len(),
        replacements = report.total(),
        tables = report.tables_created,
        missing = report.missing().len(),
        duration_ms = start.elapsed().as_millis(),
        "substitution complete"
    );
    Ok(report)
}

/// Replace scalar tokens run by run; one count per run containing the token.
fn replace_scalars(
    document: &mut Document,
    id: NodeId,
    location: &ParagraphLocation,
    values: &[ResolvedPlaceholder],
    report: &mut SubstitutionReport,
) {
    let Some(paragraph) = document.paragraph_mut(id) else {
        return;
    };
    for run in &mut paragraph.runs {
        for (index, resolved) in values.iter().enumerate() {
            let ResolvedValue::Scalar(text) = &resolved.value else {
                continue;
            };
            let token = resolved.placeholder.as_str();
            if token.is_empty() || !run.text.contains(token) {
                continue;
            }
            run.text = run.text.replace(token, text);
            report.counts[index].record(location);
            debug!(placeholder = token, %location, "scalar replaced");
        }
    }
}

/// Replace the paragraph around each table token, earliest token first.
fn replace_tables(
    document: &mut Document,
    id: NodeId,
    location: &ParagraphLocation,
    values: &[ResolvedPlaceholder],
    report: &mut SubstitutionReport,
) -> Result<()> {
    let mut current = id;
    loop {
        let Some(paragraph) = document.paragraph(current) else {
            return Ok(());
        };
        let Some((index, records)) = earliest_table_token(&paragraph.text(), values) else {
            return Ok(());
        };
        let token = values[index].placeholder.as_str();
        let Some((before, after)) = paragraph.split_around(token) else {
            return Ok(());
        };

        let mut blocks: Vec<Block> = Vec::with_capacity(3);
        if !before.is_empty() {
            blocks.push(before.into());
        }
        let has_table = !records.is_empty() && records.width() > 0;
        if has_table {
            blocks.push(TableBlock::grid(&records.columns, &records.rows).into());
        }
        let continues = !after.is_empty();
        if continues {
            blocks.push(after.into());
        }

        let inserted = document.splice(current, blocks)?;
        report.counts[index].record(location);
        if has_table {
            report.tables_created += 1;
        }
        debug!(
            placeholder = token,
            %location,
            rows = records.len(),
            table = has_table,
            "paragraph replaced by table"
        );

        match inserted.last() {
            Some(last) if continues => current = *last,
            _ => return Ok(()),
        }
    }
}

/// Index and records of the table token occurring first in `text`.
/// Ties go to the earlier configuration entry.
fn earliest_table_token<'a>(
    text: &str,
    values: &'a [ResolvedPlaceholder],
) -> Option<(usize, &'a RecordSet)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, resolved)| {
            let ResolvedValue::Table(records) = &resolved.value else {
                return None;
            };
            if resolved.placeholder.is_empty() {
                return None;
            }
            text.find(&resolved.placeholder)
                .map(|position| (position, index, records))
        })
        .min_by_key(|(position, index, _)| (*position, *index))
        .map(|(_, index, records)| (index, records))
}
