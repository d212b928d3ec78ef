//! Column alignment
//!
//! Every mutating operation ends by re-rendering the whole table through
//! [`render`], which pads each column to its widest trimmed cell.

use super::model::{DetachedGrid, Grid};
use super::parser::parse_text;

/// Width in chars of every column, measured on trimmed cell text
pub fn column_widths(grid: &DetachedGrid) -> Vec<usize> {
    let mut widths = vec![0; grid.column_count()];
    for row in grid.rows() {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.trim().chars().count());
        }
    }
    widths
}

/// Render a detached grid as aligned table text, rows joined by `\n`
///
/// Each cell is written as `delimiter + " " + trimmed text padded to the
/// column width + " "`, short rows get empty trailing cells, and each row is
/// closed by a final delimiter. Rendering the result again is a no-op.
pub fn render(grid: &DetachedGrid, indent: &str, delimiter: char) -> String {
    let widths = column_widths(grid);
    let mut out = String::new();

    for (y, row) in grid.rows().iter().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        out.push_str(indent);
        for (x, width) in widths.iter().enumerate() {
            let text = row.get(x).map_or("", |c| c.trim());
            out.push(delimiter);
            out.push(' ');
            out.push_str(text);
            for _ in text.chars().count()..*width {
                out.push(' ');
            }
            out.push(' ');
        }
        out.push(delimiter);
    }

    out
}

/// Aligned text of a parsed grid
pub fn format_grid(grid: &Grid) -> String {
    render(&grid.to_detached(), &grid.indent, grid.delimiter)
}

/// Render `next` in place of `grid` and re-parse it at the same base offset
///
/// The returned grid carries the new absolute ranges, used to place the
/// caret and highlight after a structural change. It is `None` only when
/// `next` has no rows.
pub(crate) fn rebuild(grid: &Grid, next: &DetachedGrid) -> (String, Option<Grid>) {
    let text = render(next, &grid.indent, grid.delimiter);
    let parsed = parse_text(&text, grid.range.start, grid.delimiter);
    (text, parsed)
}
