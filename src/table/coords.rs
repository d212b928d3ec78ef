//! Offset <-> coordinate mapping
//!
//! Cell `i` of a row owns the offsets from just after its left delimiter up
//! to and including the offset of its right delimiter, so a caret placed
//! right after a delimiter belongs to the following cell.

use super::model::{ByteRange, Coordinate, Grid};

/// Where an offset sits relative to the grid structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Inside a cell
    Cell(Coordinate),
    /// On a row line, at or before its first delimiter
    BeforeRow(usize),
    /// On a row line, after its last delimiter and outside any cell
    AfterRow(usize),
}

impl Location {
    pub fn row(self) -> usize {
        match self {
            Location::Cell(at) => at.row,
            Location::BeforeRow(row) | Location::AfterRow(row) => row,
        }
    }
}

/// Locate an offset on one of the grid's row lines
pub fn locate(grid: &Grid, offset: usize) -> Option<Location> {
    let (y, row) = grid
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.range.start <= offset && offset <= row.range.end)?;

    let first = row.delimiters.first().copied().unwrap_or(row.range.end);
    if offset <= first {
        return Some(Location::BeforeRow(y));
    }

    let location = row
        .cells
        .iter()
        .position(|cell| cell.range.start <= offset && offset <= cell.range.end)
        .map_or(Location::AfterRow(y), |x| {
            Location::Cell(Coordinate::new(x, y))
        });
    tracing::trace!(offset, ?location, "located offset");
    Some(location)
}

/// Cell coordinate holding `offset`, `None` outside every cell
pub fn offset_to_coordinate(grid: &Grid, offset: usize) -> Option<Coordinate> {
    match locate(grid, offset)? {
        Location::Cell(at) => Some(at),
        Location::BeforeRow(_) | Location::AfterRow(_) => None,
    }
}

/// Caret landing offset for a cell: right after its left delimiter
///
/// `None` for coordinates outside the physical cells; writers extend the
/// grid and re-parse instead of asking for a missing cell.
pub fn coordinate_to_offset(grid: &Grid, at: Coordinate) -> Option<usize> {
    grid.cell(at).map(|cell| cell.range.start)
}

/// Caret landing for a cell of a freshly rebuilt grid
///
/// Rows without cells land at their end; `fallback` covers a missing grid.
pub(crate) fn landing(rebuilt: Option<&Grid>, at: Coordinate, fallback: usize) -> usize {
    rebuilt
        .and_then(|g| {
            coordinate_to_offset(g, at).or_else(|| g.row(at.row).map(|row| row.range.end))
        })
        .unwrap_or(fallback)
}

/// Caret position as a cell plus a char index into the trimmed content
///
/// Offsets inside the padding clamp to the content edges.
pub fn caret_in_cell(grid: &Grid, offset: usize) -> Option<(Coordinate, usize)> {
    let at = offset_to_coordinate(grid, offset)?;
    let cell = grid.cell(at)?;
    let content = cell.content_range();
    let clamped = offset.clamp(content.start, content.end);
    let index = cell.content()[..clamped - content.start].chars().count();
    Some((at, index))
}

/// Offset of the char index `index` inside a cell's trimmed content
///
/// The inverse of [`caret_in_cell`]; indices past the content clamp to its end.
pub fn offset_in_cell(grid: &Grid, at: Coordinate, index: usize) -> Option<usize> {
    let cell = grid.cell(at)?;
    let content = cell.content_range();
    if cell.is_blank() {
        // Blank cells land one past the left padding space when there is one
        return Some((cell.range.start + 1).min(cell.range.end));
    }
    let bytes = cell
        .content()
        .char_indices()
        .nth(index)
        .map_or(content.len(), |(i, _)| i);
    Some(content.start + bytes)
}

/// Span covering one column from the first to the last row, delimiters included
pub fn column_span(grid: &Grid, column: usize) -> Option<ByteRange> {
    let first = grid.rows.first()?;
    let last = grid.rows.last()?;
    let start = *first.delimiters.get(column)?;
    let end = *last.delimiters.get(column + 1)? + 1;
    Some(ByteRange::new(start, end))
}

/// Span of one row from its first delimiter through its closing delimiter
pub fn row_span(grid: &Grid, row: usize) -> Option<ByteRange> {
    Some(grid.row(row)?.content_range())
}

/// Span from the left delimiter of `from` through the right delimiter of `to`
pub fn cells_span(grid: &Grid, from: Coordinate, to: Coordinate) -> Option<ByteRange> {
    let start = *grid.row(from.row)?.delimiters.get(from.column)?;
    let end_row = grid.row(to.row)?;
    let end = end_row
        .delimiters
        .get(to.column + 1)
        .map(|d| d + 1)
        .or_else(|| end_row.cell(to.column).map(|c| c.range.end))?;
    Some(ByteRange::new(start, end))
}
