//! Row and column slicing of record sets.

use std::ops::Range;

use tsgen_model::{RecordSet, SliceBounds};

/// Apply inclusive, 1-based bounds to `records`.
///
/// Bounds below 1 clamp to 1, an absent start is 1 and an absent end is the
/// natural extent. Bounds past the end are cut to the data. Column order
/// follows the header; row order is preserved.
pub fn slice_records(records: &RecordSet, bounds: &SliceBounds) -> RecordSet {
    let rows = span(bounds.start_row, bounds.end_row, records.len());
    let cols = span(bounds.start_col, bounds.end_col, records.width());

    let columns = records.columns[cols.clone()].to_vec();
    let data = records.rows[rows]
        .iter()
        .map(|row| {
            cols.clone()
                .map(|index| row.get(index).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    RecordSet::new(columns, data)
}

/// Zero-based half-open range for inclusive 1-based `start..=end` over `len` items.
fn span(start: Option<i64>, end: Option<i64>, len: usize) -> Range<usize> {
    let clamp = |bound: i64| usize::try_from(bound.max(1)).unwrap_or(usize::MAX);
    let start = start.map_or(1, clamp);
    let end = end.map_or(len, clamp).min(len);
    if start > end {
        return 0..0;
    }
    (start - 1)..end
}
