//! Clipboard and shift commands resolved against the caret
//!
//! These glue the codec, merge and shift engines to a document position and
//! produce the same [`Outcome`]/[`Mutation`] values as the edit policy.

use super::clipboard::{copy_ranges, crosses_structure, decode, is_structured};
use super::coords::{caret_in_cell, cells_span, landing, locate, offset_in_cell, Location};
use super::format::{format_grid, rebuild};
use super::merge::{merge, Anchor, Placement};
use super::model::{ByteRange, Coordinate, DetachedGrid, Grid};
use super::mutation::{delete, single_cell, splice_cell, DeleteDirection};
use super::outcome::{Mutation, Outcome};
use super::parser::{line_at, previous_line};
use super::shift::{shift, Direction};
use crate::config::TableConfig;

/// Structured copy: tab/newline text of the cells the selections cover
///
/// `None` means ordinary copy: smart copy is off, or the selections stay
/// inside a single cell.
pub fn copy(grid: &Grid, selections: &[ByteRange], config: &TableConfig) -> Option<String> {
    if !config.smart_copy || !crosses_structure(grid, selections) {
        return None;
    }
    copy_ranges(grid, selections)
}

/// Structured copy followed by the structured delete of the same selections
pub fn cut(
    document: &str,
    grid: &Grid,
    selections: &[ByteRange],
    config: &TableConfig,
) -> Option<(String, Mutation)> {
    let text = copy(grid, selections, config)?;
    let mutation = delete(document, grid, selections, DeleteDirection::Backward, config);
    Some((text, mutation))
}

/// Merge clipboard text into the table at the selection
///
/// A caret in a cell anchors there, left of a row prepends the incoming
/// columns, right of a row appends them, and a caret on a blank line right
/// below the table appends rows. Text without tabs or line breaks is a
/// single cell: it is spliced into the cell under the caret (or replaces a
/// selection inside one cell) with its delimiters escaped.
pub fn paste(
    document: &str,
    grid: &Grid,
    selection: ByteRange,
    clipboard: &str,
    config: &TableConfig,
) -> Mutation {
    if !config.smart_paste || clipboard.is_empty() {
        return Mutation::NotHandled;
    }
    let incoming = decode(clipboard, grid.delimiter);
    let structured = is_structured(clipboard);
    if !structured {
        if let Some(mutation) = paste_into_cell(grid, selection, &incoming) {
            return mutation;
        }
    }

    let caret = selection.end;
    let width = isize::try_from(incoming.column_count()).unwrap_or(isize::MAX);
    let (anchor, range) = match locate(grid, caret) {
        Some(Location::Cell(at)) => (Anchor::from(at), grid.range),
        Some(Location::BeforeRow(row)) => {
            let at = Anchor::from(Coordinate::new(0, row));
            (Anchor::new(-width, at.row), grid.range)
        }
        Some(Location::AfterRow(row)) => (
            Anchor::from(Coordinate::new(grid.column_count(), row)),
            grid.range,
        ),
        None if !structured => return Mutation::NotHandled,
        None => match blank_line_below(document, grid, caret) {
            Some(line) => (
                Anchor::from(Coordinate::new(0, grid.row_count())),
                grid.range.union(line),
            ),
            None => return Mutation::NotHandled,
        },
    };

    let merged = merge(&grid.to_detached(), &incoming, anchor);
    let (text, rebuilt) = rebuild(grid, &merged);

    let placement = Placement::for_anchor(anchor);
    let first = placement.incoming;
    let last = Coordinate::new(
        first.column + incoming.column_count().saturating_sub(1),
        first.row + incoming.row_count().saturating_sub(1),
    );
    let caret = landing(rebuilt.as_ref(), first, range.start);
    let highlight = rebuilt.as_ref().and_then(|g| cells_span(g, first, last));
    tracing::debug!(?anchor, rows = incoming.row_count(), "pasted cells");

    Mutation::Applied(Outcome::replace(range, text, caret).with_highlight(highlight))
}

/// Single-cell paste at a caret in a cell or over a selection
///
/// `None` leaves a collapsed caret outside the cells to the merge path.
fn paste_into_cell(grid: &Grid, selection: ByteRange, incoming: &DetachedGrid) -> Option<Mutation> {
    let text = incoming.get(Coordinate::new(0, 0));
    match single_cell(grid, selection) {
        Some(at) => {
            tracing::debug!(?at, "pasted text into cell");
            Some(splice_cell(grid, at, selection, text))
        }
        None if selection.is_empty() => None,
        None if grid.range.intersects(selection) => {
            tracing::debug!(?selection, "blocked pasting over table structure");
            Some(Mutation::Blocked)
        }
        None => Some(Mutation::NotHandled),
    }
}

/// The line holding `caret` when it is blank and directly follows the table
fn blank_line_below(document: &str, grid: &Grid, caret: usize) -> Option<ByteRange> {
    let line = line_at(document, caret)?;
    let above = previous_line(document, line)?;
    let last_row = grid.rows.last()?;
    let blank = document.get(line.start..line.end)?.trim().is_empty();
    (blank && above == last_row.range).then_some(line)
}

/// Shift the row or column under the caret, keeping the caret on the moved cell
pub fn shift_at(grid: &Grid, caret: usize, direction: Direction) -> Option<Outcome> {
    let (at, index) = caret_in_cell(grid, caret)?;
    let shifted = shift(grid, at, direction)?;
    let caret = offset_in_cell(&shifted.grid, shifted.focus, index).unwrap_or(grid.range.start);
    Some(Outcome::replace(grid.range, shifted.text, caret).with_highlight(Some(shifted.highlight)))
}

/// Realign the whole table, keeping the caret in its cell
pub fn reformat(grid: &Grid, caret: usize) -> Outcome {
    let text = format_grid(grid);
    let caret = caret_in_cell(grid, caret)
        .and_then(|(at, index)| {
            let rebuilt = rebuild(grid, &grid.to_detached()).1?;
            offset_in_cell(&rebuilt, at, index)
        })
        .unwrap_or(caret.min(grid.range.start + text.len()));
    Outcome::replace(grid.range, text, caret)
}
