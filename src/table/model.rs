//! Grid data model types
//!
//! A [`Grid`] is parsed fresh from the live document for every operation and
//! dropped afterwards. All ranges are absolute byte offsets into the document
//! the grid was parsed from, and go stale after any mutation.

use serde::{Deserialize, Serialize};

/// Column delimiter used when nothing else is configured
pub const DEFAULT_DELIMITER: char = '|';

/// Escape character that makes the following delimiter part of the cell text
pub const ESCAPE: char = '\\';

/// Half-open byte range `[start, end)` into a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Create a range, ordering the bounds if they arrive reversed
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Collapsed range at a single offset (a caret)
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset lies inside the range (end exclusive)
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if `other` lies entirely inside this range
    pub fn covers(&self, other: ByteRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Overlapping part of two ranges, `None` when they share no byte
    pub fn intersection(&self, other: ByteRange) -> Option<ByteRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(ByteRange { start, end })
    }

    pub fn intersects(&self, other: ByteRange) -> bool {
        self.intersection(other).is_some()
    }

    /// Smallest range spanning both
    pub fn union(&self, other: ByteRange) -> ByteRange {
        ByteRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Zero-based address of a cell; row 0 is the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub column: usize,
    pub row: usize,
}

impl Coordinate {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// One row/column intersection as it appears in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Raw text between the delimiters, padding included
    pub text: String,
    /// Span of `text` in the document
    pub range: ByteRange,
}

impl Cell {
    /// Cell text without padding
    pub fn content(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.content().is_empty()
    }

    /// Document span of the trimmed content (collapsed after the padding for blank cells)
    pub fn content_range(&self) -> ByteRange {
        let leading = self.text.len() - self.text.trim_start().len();
        let start = self.range.start + leading;
        ByteRange::new(start, start + self.content().len())
    }
}

/// One table line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cells in left-to-right order
    pub cells: Vec<Cell>,
    pub is_header: bool,
    /// Whole line, indentation included, newline excluded
    pub range: ByteRange,
    /// Offsets of every unescaped delimiter on the line
    pub delimiters: Vec<usize>,
}

impl Row {
    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Span from the first delimiter to the end of the last structural character
    pub fn content_range(&self) -> ByteRange {
        let start = self.delimiters.first().copied().unwrap_or(self.range.start);
        let closing = self.delimiters.last().map_or(start, |d| d + 1);
        let end = self
            .cells
            .last()
            .map_or(closing, |cell| cell.range.end.max(closing));
        ByteRange::new(start, end)
    }
}

/// Parsed structural view of a delimiter-based table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<Row>,
    /// First row start to last row end
    pub range: ByteRange,
    /// Leading whitespace of the first row, reused when re-rendering
    pub indent: String,
    pub delimiter: char,
    column_count: usize,
}

impl Grid {
    pub(crate) fn new(rows: Vec<Row>, indent: String, delimiter: char) -> Self {
        let column_count = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        let range = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => ByteRange::new(first.range.start, last.range.end),
            _ => ByteRange::default(),
        };
        Self {
            rows,
            range,
            indent,
            delimiter,
            column_count,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row's cell count; shorter rows have virtual empty trailing cells
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Physical cell at a coordinate, `None` for virtual or out-of-bounds cells
    pub fn cell(&self, at: Coordinate) -> Option<&Cell> {
        self.rows.get(at.row)?.cells.get(at.column)
    }

    /// Trimmed cell content, empty for virtual cells
    pub fn content(&self, at: Coordinate) -> &str {
        self.cell(at).map_or("", Cell::content)
    }

    /// Rectangular copy of the cell texts, short rows padded with empty cells
    pub fn to_detached(&self) -> DetachedGrid {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> =
                    row.cells.iter().map(|c| c.content().to_string()).collect();
                cells.resize(self.column_count, String::new());
                cells
            })
            .collect();
        DetachedGrid::from_rows(rows)
    }

    /// Copy of the cells inside a coordinate selection
    pub fn extract(&self, selection: Selection) -> DetachedGrid {
        let Some((top_left, bottom_right)) = selection.bounds(self.column_count) else {
            return DetachedGrid::new();
        };
        let rows = (top_left.row..=bottom_right.row)
            .filter(|&y| y < self.row_count())
            .map(|y| {
                (top_left.column..=bottom_right.column)
                    .map(|x| self.content(Coordinate::new(x, y)).to_string())
                    .collect()
            })
            .collect();
        DetachedGrid::from_rows(rows)
    }
}

/// A grid-shaped value with no document ranges
///
/// Produced by clipboard decoding and sub-rectangle extraction, and used as
/// the intermediate for merge, shift and structural edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedGrid {
    rows: Vec<Vec<String>>,
}

impl DetachedGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// `columns` x `rows` grid of empty cells
    pub fn with_size(columns: usize, rows: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); columns]; rows],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row's cell count
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text, empty when outside the grid
    pub fn get(&self, at: Coordinate) -> &str {
        self.rows
            .get(at.row)
            .and_then(|r| r.get(at.column))
            .map_or("", String::as_str)
    }

    /// Set a cell, growing the grid as needed
    pub fn set(&mut self, at: Coordinate, value: impl Into<String>) {
        if self.rows.len() <= at.row {
            self.rows.resize_with(at.row + 1, Vec::new);
        }
        let row = &mut self.rows[at.row];
        if row.len() <= at.column {
            row.resize(at.column + 1, String::new());
        }
        row[at.column] = value.into();
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Vec<String>> {
        &mut self.rows
    }

    /// Right-pad every row with empty cells up to the widest row
    pub fn pad(&mut self) {
        let width = self.column_count();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }
}

/// A selection expressed in grid coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    /// Reading-order span from `start` to `end`, both inclusive
    Linear { start: Coordinate, end: Coordinate },
    /// Block of cells between two corners, both inclusive
    Rectangular {
        top_left: Coordinate,
        bottom_right: Coordinate,
    },
}

impl Selection {
    /// Rectangle selecting whole columns `first..=last` over `rows` rows
    pub fn columns(first: usize, last: usize, rows: usize) -> Self {
        Selection::Rectangular {
            top_left: Coordinate::new(first, 0),
            bottom_right: Coordinate::new(last, rows.saturating_sub(1)),
        }
    }

    /// Bounding rectangle of the selection
    ///
    /// A linear selection spanning several rows covers those rows completely,
    /// so its bounds run from column 0 to the last column.
    pub fn bounds(&self, column_count: usize) -> Option<(Coordinate, Coordinate)> {
        match *self {
            Selection::None => None,
            Selection::Rectangular {
                top_left,
                bottom_right,
            } => Some((
                Coordinate::new(
                    top_left.column.min(bottom_right.column),
                    top_left.row.min(bottom_right.row),
                ),
                Coordinate::new(
                    top_left.column.max(bottom_right.column),
                    top_left.row.max(bottom_right.row),
                ),
            )),
            Selection::Linear { start, end } => {
                let (first, last) = if (start.row, start.column) <= (end.row, end.column) {
                    (start, end)
                } else {
                    (end, start)
                };
                if first.row == last.row {
                    Some((first, last))
                } else {
                    Some((
                        Coordinate::new(0, first.row),
                        Coordinate::new(column_count.saturating_sub(1), last.row),
                    ))
                }
            }
        }
    }

    /// Top-left cell, where a paste of the extracted cells lands
    pub fn anchor(&self, column_count: usize) -> Option<Coordinate> {
        self.bounds(column_count).map(|(top_left, _)| top_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached(rows: &[&[&str]]) -> DetachedGrid {
        DetachedGrid::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_byte_range_new_orders_bounds() {
        let range = ByteRange::new(10, 4);
        assert_eq!(range, ByteRange { start: 4, end: 10 });
        assert_eq!(range.len(), 6);
    }

    #[test]
    fn test_byte_range_intersection() {
        let a = ByteRange::new(0, 5);
        assert_eq!(a.intersection(ByteRange::new(3, 8)), Some(ByteRange::new(3, 5)));
        assert_eq!(a.intersection(ByteRange::new(5, 8)), None);
        assert!(a.covers(ByteRange::new(1, 5)));
        assert!(!a.covers(ByteRange::new(1, 6)));
    }

    #[test]
    fn test_cell_content_range() {
        let cell = Cell {
            text: "  abc ".to_string(),
            range: ByteRange::new(10, 16),
        };
        assert_eq!(cell.content(), "abc");
        assert_eq!(cell.content_range(), ByteRange::new(12, 15));

        let blank = Cell {
            text: "   ".to_string(),
            range: ByteRange::new(3, 6),
        };
        assert!(blank.is_blank());
        assert!(blank.content_range().is_empty());
    }

    #[test]
    fn test_detached_set_grows() {
        let mut grid = DetachedGrid::new();
        grid.set(Coordinate::new(2, 1), "x");

        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.get(Coordinate::new(2, 1)), "x");
        assert_eq!(grid.get(Coordinate::new(0, 0)), "");
        assert_eq!(grid.get(Coordinate::new(9, 9)), "");
    }

    #[test]
    fn test_detached_pad() {
        let mut grid = detached(&[&["a", "b", "c"], &["1"]]);
        grid.pad();
        assert_eq!(grid.rows()[1], vec!["1", "", ""]);
    }

    #[test]
    fn test_selection_bounds_linear_multi_row() {
        let selection = Selection::Linear {
            start: Coordinate::new(2, 3),
            end: Coordinate::new(1, 1),
        };
        assert_eq!(
            selection.bounds(4),
            Some((Coordinate::new(0, 1), Coordinate::new(3, 3)))
        );
    }

    #[test]
    fn test_selection_bounds_rectangular_normalized() {
        let selection = Selection::Rectangular {
            top_left: Coordinate::new(2, 0),
            bottom_right: Coordinate::new(1, 2),
        };
        assert_eq!(
            selection.bounds(5),
            Some((Coordinate::new(1, 0), Coordinate::new(2, 2)))
        );
        assert_eq!(selection.anchor(5), Some(Coordinate::new(1, 0)));
        assert_eq!(Selection::None.bounds(5), None);
    }
}
