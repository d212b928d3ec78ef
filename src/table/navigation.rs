//! Tab / Shift-Tab / Enter traversal between cells

use serde::{Deserialize, Serialize};

use super::coords::{coordinate_to_offset, landing, locate, Location};
use super::format::rebuild;
use super::model::{Coordinate, Grid};
use super::mutation::insert_column;
use super::outcome::Outcome;
use crate::config::TableConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    Tab,
    ShiftTab,
    Enter,
}

/// Where a traversal goes from a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Move(Coordinate),
    /// Grow a one-row table by a trailing column and enter it
    AppendColumn,
}

/// Plan a traversal from the cell at `from`
///
/// Tab wraps from the last cell of a row to the first cell of the next one
/// and from the very last cell back to the first. A one-row table grows a
/// column instead. Enter moves one row down and stops at the last row.
pub fn plan(grid: &Grid, from: Coordinate, traversal: Traversal) -> Option<Step> {
    let rows = grid.row_count();
    if rows == 0 {
        return None;
    }
    let last = rows - 1;
    let width = |y: usize| grid.row(y).map_or(1, |row| row.cells.len().max(1));
    let Coordinate { column: x, row: y } = from;

    let step = match traversal {
        Traversal::Tab if x + 1 < width(y) => Step::Move(Coordinate::new(x + 1, y)),
        Traversal::Tab if y < last => Step::Move(Coordinate::new(0, y + 1)),
        Traversal::Tab if rows == 1 => Step::AppendColumn,
        Traversal::Tab => Step::Move(Coordinate::new(0, 0)),

        Traversal::ShiftTab if x > 0 => Step::Move(Coordinate::new(x - 1, y)),
        Traversal::ShiftTab if y > 0 => Step::Move(Coordinate::new(width(y - 1) - 1, y - 1)),
        Traversal::ShiftTab => Step::Move(Coordinate::new(width(last) - 1, last)),

        Traversal::Enter if y < last => {
            Step::Move(Coordinate::new(x.min(width(y + 1) - 1), y + 1))
        }
        Traversal::Enter => return None,
    };
    Some(step)
}

/// Resolve a traversal from the caret into a caret move
///
/// Left of a row the caret acts as if in the first cell, right of a row as
/// if in the last one. `None` when the caret is not on the table or there is
/// nowhere to go; the key then keeps its ordinary meaning.
pub fn next_cell(
    grid: &Grid,
    caret: usize,
    traversal: Traversal,
    config: &TableConfig,
) -> Option<Outcome> {
    let location = locate(grid, caret)?;
    let last_column = |y: usize| grid.row(y).map_or(0, |row| row.cells.len().saturating_sub(1));

    let step = match (location, traversal) {
        (Location::BeforeRow(y), Traversal::Tab) => Step::Move(Coordinate::new(0, y)),
        (Location::AfterRow(y), Traversal::ShiftTab) => {
            Step::Move(Coordinate::new(last_column(y), y))
        }
        // Past a row's closing delimiter Enter is a line break, which adds a row
        (Location::AfterRow(_), Traversal::Enter) => return None,
        (Location::BeforeRow(y), _) => plan(grid, Coordinate::new(0, y), traversal)?,
        (Location::AfterRow(y), _) => plan(grid, Coordinate::new(last_column(y), y), traversal)?,
        (Location::Cell(at), _) => plan(grid, at, traversal)?,
    };
    tracing::trace!(?location, ?traversal, ?step, "navigation step");

    match step {
        Step::Move(at) => Some(Outcome::caret_only(enter_cell(grid, at)?)),
        Step::AppendColumn if config.structural_edits => {
            let column = grid.column_count();
            let next = insert_column(&grid.to_detached(), column);
            let (text, rebuilt) = rebuild(grid, &next);
            let caret = landing(rebuilt.as_ref(), Coordinate::new(column, 0), grid.range.start);
            tracing::debug!(column, "tab appended column");
            Some(Outcome::replace(grid.range, text, caret))
        }
        Step::AppendColumn => Some(Outcome::caret_only(enter_cell(grid, Coordinate::new(0, 0))?)),
    }
}

/// Landing offset for a cell, or the end of a row that has no cells
fn enter_cell(grid: &Grid, at: Coordinate) -> Option<usize> {
    coordinate_to_offset(grid, at).or_else(|| grid.row(at.row).map(|row| row.range.end))
}
