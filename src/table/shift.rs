//! Moving a whole row or column one step
//!
//! The target index is swapped with its neighbor in a permutation of row
//! (or column) indices, the grid is re-emitted in permutation order and then
//! re-aligned. At the grid edge the permutation clamps, so the shift is a
//! no-op instead of wrapping around.

use serde::{Deserialize, Serialize};

use super::coords::{column_span, row_span};
use super::format::rebuild;
use super::model::{ByteRange, Coordinate, DetachedGrid, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    fn step(self, index: usize, count: usize) -> Option<usize> {
        match self {
            Direction::Left | Direction::Up => index.checked_sub(1),
            Direction::Right | Direction::Down => (index + 1 < count).then_some(index + 1),
        }
    }
}

/// Result of a shift, with ranges in the new text's document coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shifted {
    /// Replacement for the whole table range
    pub text: String,
    /// The grid re-parsed from `text`
    pub grid: Grid,
    /// Where the moved cell now lives
    pub focus: Coordinate,
    /// The full moved column or row in the new text
    pub highlight: ByteRange,
}

/// Move the column holding `focus` one step left or right
pub fn shift_column(grid: &Grid, focus: Coordinate, direction: Direction) -> Option<Shifted> {
    if !direction.is_horizontal() {
        return None;
    }
    let target = direction.step(focus.column, grid.column_count())?;
    let mut order: Vec<usize> = (0..grid.column_count()).collect();
    order.swap(focus.column, target);

    let source = grid.to_detached();
    let rows = source
        .rows()
        .iter()
        .map(|row| order.iter().map(|&x| row[x].clone()).collect())
        .collect();

    let (text, shifted) = rebuild(grid, &DetachedGrid::from_rows(rows));
    let shifted = shifted?;
    let highlight = column_span(&shifted, target)?;
    tracing::debug!(from = focus.column, to = target, "shifted column");

    Some(Shifted {
        text,
        grid: shifted,
        focus: Coordinate::new(target, focus.row),
        highlight,
    })
}

/// Move the row holding `focus` one step up or down
pub fn shift_row(grid: &Grid, focus: Coordinate, direction: Direction) -> Option<Shifted> {
    if direction.is_horizontal() {
        return None;
    }
    let target = direction.step(focus.row, grid.row_count())?;
    let mut order: Vec<usize> = (0..grid.row_count()).collect();
    order.swap(focus.row, target);

    let source = grid.to_detached();
    let rows = order.iter().map(|&y| source.rows()[y].clone()).collect();

    let (text, shifted) = rebuild(grid, &DetachedGrid::from_rows(rows));
    let shifted = shifted?;
    let highlight = row_span(&shifted, target)?;
    tracing::debug!(from = focus.row, to = target, "shifted row");

    Some(Shifted {
        text,
        grid: shifted,
        focus: Coordinate::new(focus.column, target),
        highlight,
    })
}

/// Shift the row or column holding `focus`, depending on the direction
pub fn shift(grid: &Grid, focus: Coordinate, direction: Direction) -> Option<Shifted> {
    if direction.is_horizontal() {
        shift_column(grid, focus, direction)
    } else {
        shift_row(grid, focus, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_text;

    fn grid(text: &str) -> Grid {
        parse_text(text, 0, '|').unwrap()
    }

    #[test]
    fn test_shift_column_right() {
        let grid = grid("| a | bb | c |\n| 1 | 2  | 3 |");
        let shifted = shift(&grid, Coordinate::new(0, 1), Direction::Right).unwrap();

        assert_eq!(shifted.text, "| bb | a | c |\n| 2  | 1 | 3 |");
        assert_eq!(shifted.focus, Coordinate::new(1, 1));
        assert_eq!(
            &shifted.text[shifted.highlight.start..shifted.highlight.end],
            "| a | c |\n| 2  | 1 |"
        );
    }

    #[test]
    fn test_shift_row_up() {
        let grid = grid("| h |\n| a |\n| b |");
        let shifted = shift(&grid, Coordinate::new(0, 2), Direction::Up).unwrap();

        assert_eq!(shifted.text, "| h |\n| b |\n| a |");
        assert_eq!(shifted.focus, Coordinate::new(0, 1));
        assert_eq!(shifted.highlight, ByteRange::new(6, 11));
    }

    #[test]
    fn test_shift_at_boundary_is_noop() {
        let grid = grid("| a | b |\n| c | d |");
        assert!(shift(&grid, Coordinate::new(0, 0), Direction::Left).is_none());
        assert!(shift(&grid, Coordinate::new(1, 0), Direction::Right).is_none());
        assert!(shift(&grid, Coordinate::new(0, 0), Direction::Up).is_none());
        assert!(shift(&grid, Coordinate::new(0, 1), Direction::Down).is_none());
    }

    #[test]
    fn test_shift_column_rejects_vertical_direction() {
        let grid = grid("| a | b |\n| c | d |");
        assert!(shift_column(&grid, Coordinate::new(0, 0), Direction::Down).is_none());
        assert!(shift_row(&grid, Coordinate::new(0, 0), Direction::Right).is_none());
    }

    #[test]
    fn test_shift_right_then_left_restores_content() {
        let original = grid("| a | b | c |\n| 1 | 2 | 3 |");
        let right = shift(&original, Coordinate::new(1, 0), Direction::Right).unwrap();
        let back = shift(&right.grid, Coordinate::new(2, 0), Direction::Left).unwrap();
        assert_eq!(back.grid.to_detached(), original.to_detached());
    }

    #[test]
    fn test_shift_preserves_indent_and_base_offset() {
        let document = "Examples:\n  | a | b |";
        let grid = crate::table::parse_table(
            document,
            ByteRange::new(0, document.len()),
            '|',
        )
        .unwrap();
        let shifted = shift(&grid, Coordinate::new(1, 0), Direction::Left).unwrap();

        assert_eq!(shifted.text, "  | b | a |");
        assert_eq!(shifted.grid.range.start, 10);
        assert_eq!(shifted.highlight, ByteRange::new(12, 17));
    }
}
