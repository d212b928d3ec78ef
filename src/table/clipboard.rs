//! Clipboard interchange for table cells
//!
//! The portable form is UTF-8 text with columns separated by `\t` and rows
//! by `\n`. Delimiter and padding semantics do not apply to it.

use super::model::{ByteRange, DetachedGrid, Grid, ESCAPE};

/// Serialize a detached grid to the tab/newline form
pub fn encode(grid: &DetachedGrid) -> String {
    grid.rows()
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse tab/newline text into a detached grid
///
/// Cells are trimmed and raw delimiters inside them are escaped so they stay
/// cell text once merged into a table. Text without any tab or newline
/// becomes a single cell. A single trailing newline is ignored.
pub fn decode(text: &str, delimiter: char) -> DetachedGrid {
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);

    let rows = text
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.split('\t')
                .map(|cell| escape_delimiters(cell.trim(), delimiter))
                .collect()
        })
        .collect();
    DetachedGrid::from_rows(rows)
}

/// Check if clipboard text carries grid structure (a tab or a line break)
pub fn is_structured(text: &str) -> bool {
    text.contains('\t') || text.trim_end_matches(['\r', '\n']).contains('\n')
}

/// Extract the cells covered by a set of document ranges
///
/// Each range is split along the rows it crosses; every row slice becomes
/// one output row. A cell contributes its covered substring, trimmed; cells
/// the slice does not reach contribute nothing. Returns `None` when no cell
/// is covered at all.
pub fn extract_ranges(grid: &Grid, ranges: &[ByteRange]) -> Option<DetachedGrid> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for range in ranges {
        for row in &grid.rows {
            let slice = if range.is_empty() {
                // A collapsed block caret still picks the cell it sits in
                (row.range.start <= range.start && range.start <= row.range.end)
                    .then_some(*range)
            } else {
                row.range.intersection(*range)
            };
            let Some(slice) = slice else {
                continue;
            };

            let cells: Vec<String> = row
                .cells
                .iter()
                .filter_map(|cell| {
                    let covered = cell.range.intersection(slice)?;
                    let from = covered.start - cell.range.start;
                    let to = covered.end - cell.range.start;
                    Some(cell.text.get(from..to)?.trim().to_string())
                })
                .collect();

            if !cells.is_empty() {
                rows.push(cells);
            }
        }
    }

    (!rows.is_empty()).then(|| DetachedGrid::from_rows(rows))
}

/// Tab/newline text for the cells covered by `ranges`
pub fn copy_ranges(grid: &Grid, ranges: &[ByteRange]) -> Option<String> {
    extract_ranges(grid, ranges).map(|cells| encode(&cells))
}

/// Check if the ranges cross table structure (a delimiter or a row break)
///
/// Selections inside one cell are plain text and copy as such.
pub fn crosses_structure(grid: &Grid, ranges: &[ByteRange]) -> bool {
    ranges.iter().filter(|r| !r.is_empty()).any(|range| {
        let rows_touched = grid
            .rows
            .iter()
            .filter(|row| row.range.intersects(*range))
            .count();
        rows_touched > 1
            || grid
                .rows
                .iter()
                .flat_map(|row| row.delimiters.iter())
                .any(|&d| range.contains(d))
    })
}

fn escape_delimiters(cell: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(cell.len());
    let mut escaped = false;
    for ch in cell.chars() {
        if ch == delimiter && !escaped {
            out.push(ESCAPE);
        }
        escaped = ch == ESCAPE && !escaped;
        out.push(ch);
    }
    out
}
