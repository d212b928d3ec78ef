//! Edit policy for arbitrary document edits that land on a table
//!
//! Each edit is either rewritten into a whole-table replacement
//! ([`Mutation::Applied`]), refused because it would leave a malformed table
//! ([`Mutation::Blocked`]), or left to the host's ordinary text handling
//! ([`Mutation::NotHandled`]).
//!
//! Structural deletes work in two passes: an aligned selection of whole rows
//! or columns first clears the covered cells, and deleting the same, now
//! blank, selection again removes the rows or columns themselves.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::coords::{cells_span, landing, locate, offset_in_cell, Location};
use super::format::{rebuild, render};
use super::model::{ByteRange, Coordinate, DetachedGrid, Grid};
use super::outcome::{Mutation, Outcome};
use super::parser::{has_unescaped_delimiter, line_at};
use crate::config::TableConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteDirection {
    /// Backspace
    #[default]
    Backward,
    /// Delete
    Forward,
}

// ============================================================================
// Structural primitives
// ============================================================================

/// Insert an empty column at `index` in every row
pub fn insert_column(grid: &DetachedGrid, index: usize) -> DetachedGrid {
    let mut next = grid.clone();
    next.pad();
    for row in next.rows_mut() {
        let at = index.min(row.len());
        row.insert(at, String::new());
    }
    next
}

/// Insert an empty row at `index`, as wide as the widest row
pub fn insert_row(grid: &DetachedGrid, index: usize) -> DetachedGrid {
    let mut next = grid.clone();
    next.pad();
    let width = next.column_count();
    let at = index.min(next.row_count());
    next.rows_mut().insert(at, vec![String::new(); width]);
    next
}

/// Remove rows outright
pub fn remove_rows(grid: &DetachedGrid, rows: RangeInclusive<usize>) -> DetachedGrid {
    let kept = grid
        .rows()
        .iter()
        .enumerate()
        .filter(|(y, _)| !rows.contains(y))
        .map(|(_, row)| row.clone())
        .collect();
    DetachedGrid::from_rows(kept)
}

/// Remove columns from every row; a row never drops below one (empty) column
pub fn remove_columns(grid: &DetachedGrid, columns: RangeInclusive<usize>) -> DetachedGrid {
    let kept = grid
        .rows()
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row
                .iter()
                .enumerate()
                .filter(|(x, _)| !columns.contains(x))
                .map(|(_, cell)| cell.clone())
                .collect();
            if cells.is_empty() {
                cells.push(String::new());
            }
            cells
        })
        .collect();
    DetachedGrid::from_rows(kept)
}

/// Empty the text of the given cells, keeping the structure
pub fn clear_cells(grid: &DetachedGrid, cells: impl IntoIterator<Item = Coordinate>) -> DetachedGrid {
    let mut next = grid.clone();
    for at in cells {
        next.set(at, String::new());
    }
    next.pad();
    next
}

// ============================================================================
// Typing
// ============================================================================

/// Policy for typing `ch` with `selection` active (collapsed for a plain caret)
pub fn type_char(
    grid: &Grid,
    selection: ByteRange,
    ch: char,
    config: &TableConfig,
) -> Mutation {
    if !selection.is_empty() {
        return type_over_selection(grid, selection, ch, config);
    }

    let caret = selection.start;
    if ch == grid.delimiter {
        return insert_delimiter(grid, caret, config);
    }
    if ch == '\n' {
        return insert_line_break(grid, caret, config);
    }
    if !config.format_on_type || ch.is_whitespace() || ch.is_control() {
        return Mutation::NotHandled;
    }

    let Some(Location::Cell(at)) = locate(grid, caret) else {
        return Mutation::NotHandled;
    };
    splice_cell(grid, at, ByteRange::caret(caret), &ch.to_string())
}

fn type_over_selection(
    grid: &Grid,
    selection: ByteRange,
    ch: char,
    config: &TableConfig,
) -> Mutation {
    let structural = ch == grid.delimiter || ch == '\n';
    match single_cell(grid, selection) {
        Some(at) if config.format_on_type && !structural && !ch.is_control() => {
            splice_cell(grid, at, selection, &ch.to_string())
        }
        Some(_) if !structural => Mutation::NotHandled,
        _ if grid.range.intersects(selection) => {
            tracing::debug!(?selection, "blocked typing over table structure");
            Mutation::Blocked
        }
        _ => Mutation::NotHandled,
    }
}

/// Typing the delimiter: author a new empty column
///
/// The column goes after the caret's cell, or before it when the caret sits
/// in the leading padding of a non-blank cell. Left of the row's first
/// delimiter it is prepended, right of the last one it is appended.
pub fn insert_delimiter(grid: &Grid, caret: usize, config: &TableConfig) -> Mutation {
    if !config.structural_edits {
        return Mutation::NotHandled;
    }
    let Some(location) = locate(grid, caret) else {
        return Mutation::NotHandled;
    };

    let index = match location {
        Location::BeforeRow(_) => 0,
        Location::AfterRow(_) => grid.column_count(),
        Location::Cell(at) => match grid.cell(at) {
            Some(cell) if !cell.is_blank() && caret <= cell.content_range().start => at.column,
            _ => at.column + 1,
        },
    };
    let target = Coordinate::new(index, location.row());

    let next = insert_column(&grid.to_detached(), index);
    let (text, rebuilt) = rebuild(grid, &next);
    let caret = landing(rebuilt.as_ref(), target, grid.range.start);
    tracing::debug!(column = index, "inserted column");

    Mutation::Applied(Outcome::replace(grid.range, text, caret))
}

/// A line break inside the table: add a blank row after the caret row
///
/// At the end of the last row, and left of a row's first delimiter, the
/// line break is ordinary text. The caret lands in the first cell of the
/// new row when it was at the end of its line, in the same column otherwise.
pub fn insert_line_break(grid: &Grid, caret: usize, config: &TableConfig) -> Mutation {
    if !config.structural_edits {
        return Mutation::NotHandled;
    }
    let Some(location) = locate(grid, caret) else {
        return Mutation::NotHandled;
    };
    let y = location.row();
    let column = match location {
        Location::BeforeRow(_) => return Mutation::NotHandled,
        Location::AfterRow(_) => None,
        Location::Cell(at) => Some(at.column),
    };

    // Past the closing delimiter of the last row the table simply ends
    if column.is_none() && y + 1 == grid.row_count() {
        return Mutation::NotHandled;
    }

    let target = Coordinate::new(column.unwrap_or(0), y + 1);
    let next = insert_row(&grid.to_detached(), y + 1);
    let (text, rebuilt) = rebuild(grid, &next);
    let caret = landing(rebuilt.as_ref(), target, grid.range.start);
    tracing::debug!(row = y + 1, "inserted row");

    Mutation::Applied(Outcome::replace(grid.range, text, caret))
}

// ============================================================================
// Deleting
// ============================================================================

/// Policy for Backspace/Delete over `selections`
///
/// A single collapsed selection deletes one character in `direction`;
/// otherwise the non-empty selections (one per line for a block selection)
/// are deleted together.
pub fn delete(
    document: &str,
    grid: &Grid,
    selections: &[ByteRange],
    direction: DeleteDirection,
    config: &TableConfig,
) -> Mutation {
    let ranges: Vec<ByteRange> = selections.iter().filter(|r| !r.is_empty()).copied().collect();
    if ranges.is_empty() {
        return match selections.first() {
            Some(caret) => delete_char(document, grid, caret.start, direction, config),
            None => Mutation::NotHandled,
        };
    }
    delete_ranges(document, grid, &ranges, config)
}

fn delete_char(
    document: &str,
    grid: &Grid,
    caret: usize,
    direction: DeleteDirection,
    config: &TableConfig,
) -> Mutation {
    let target = match direction {
        DeleteDirection::Backward => document
            .get(..caret)
            .and_then(|before| before.chars().next_back())
            .map(|ch| ByteRange::new(caret - ch.len_utf8(), caret)),
        DeleteDirection::Forward => document
            .get(caret..)
            .and_then(|after| after.chars().next())
            .map(|ch| ByteRange::new(caret, caret + ch.len_utf8())),
    };
    let Some(target) = target else {
        return Mutation::NotHandled;
    };

    if !grid.range.covers(target) {
        return if joins_table_line(document, grid, target) {
            tracing::debug!(?target, "blocked joining a line into the table");
            Mutation::Blocked
        } else {
            Mutation::NotHandled
        };
    }
    if touches_structure(grid, target) {
        tracing::debug!(?target, "blocked deleting table structure");
        return Mutation::Blocked;
    }

    match single_cell(grid, target) {
        Some(at) if config.format_on_type => splice_cell(grid, at, target, ""),
        _ => Mutation::NotHandled,
    }
}

fn delete_ranges(
    document: &str,
    grid: &Grid,
    ranges: &[ByteRange],
    config: &TableConfig,
) -> Mutation {
    let table = grid.range;
    let inside: Vec<ByteRange> = ranges
        .iter()
        .filter_map(|r| r.intersection(table))
        .collect();

    if inside.is_empty() {
        return if ranges.iter().any(|r| joins_table_line(document, grid, *r)) {
            tracing::debug!("blocked joining a line into the table");
            Mutation::Blocked
        } else {
            Mutation::NotHandled
        };
    }

    if let [range] = ranges {
        if let Some(at) = single_cell(grid, *range) {
            return if config.format_on_type {
                splice_cell(grid, at, *range, "")
            } else {
                Mutation::NotHandled
            };
        }
    }

    let coverage = Coverage::measure(grid, &inside);
    let Some(shape) = coverage.shape(grid) else {
        tracing::debug!(?ranges, "blocked misaligned delete");
        return Mutation::Blocked;
    };

    let straddles = ranges.iter().any(|r| !table.covers(*r));
    if straddles {
        return match ranges {
            [range] if shape.whole_rows => remove_rows_straddling(document, grid, *range, &shape),
            _ => {
                tracing::debug!(?ranges, "blocked delete straddling the table edge");
                Mutation::Blocked
            }
        };
    }

    if !coverage.is_blank(grid) {
        return clear_selection(grid, &coverage, &shape);
    }
    if shape.whole_rows {
        return remove_whole_rows(document, grid, &shape);
    }
    remove_whole_columns(grid, &shape)
}

/// Cells reached by a set of in-table ranges
struct Coverage {
    /// Fully covered cells
    cells: BTreeSet<Coordinate>,
    /// Some cell had part of its text covered
    partial: bool,
}

/// Aligned extent of a coverage
struct Shape {
    rows: RangeInclusive<usize>,
    columns: RangeInclusive<usize>,
    whole_rows: bool,
}

impl Coverage {
    /// A cell counts as covered when every non-blank character is selected;
    /// touching a blank cell at all covers it
    fn measure(grid: &Grid, ranges: &[ByteRange]) -> Self {
        let mut cells = BTreeSet::new();
        let mut partial = false;

        for (y, row) in grid.rows.iter().enumerate() {
            for (x, cell) in row.cells.iter().enumerate() {
                let hits: Vec<ByteRange> = ranges
                    .iter()
                    .filter_map(|r| cell.range.intersection(*r))
                    .collect();
                if hits.is_empty() {
                    continue;
                }
                let content = cell.content_range();
                if cell.is_blank() || hits.iter().any(|h| h.covers(content)) {
                    cells.insert(Coordinate::new(x, y));
                } else {
                    partial = true;
                }
            }
        }

        Self { cells, partial }
    }

    fn is_blank(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|&at| grid.content(at).is_empty())
    }

    /// Whole rows or whole columns, `None` for anything else
    fn shape(&self, grid: &Grid) -> Option<Shape> {
        if self.partial || self.cells.is_empty() {
            return None;
        }
        let rows = self.cells.iter().map(|c| c.row);
        let columns = self.cells.iter().map(|c| c.column);
        let (y0, y1) = (rows.clone().min()?, rows.max()?);
        let (x0, x1) = (columns.clone().min()?, columns.max()?);

        let whole_rows = self.cells
            == grid.rows[y0..=y1]
                .iter()
                .enumerate()
                .flat_map(|(dy, row)| {
                    (0..row.cells.len()).map(move |x| Coordinate::new(x, y0 + dy))
                })
                .collect::<BTreeSet<_>>();

        let whole_columns = self.cells
            == grid
                .rows
                .iter()
                .enumerate()
                .flat_map(|(y, row)| {
                    (x0..=x1)
                        .filter(move |&x| x < row.cells.len())
                        .map(move |x| Coordinate::new(x, y))
                })
                .collect::<BTreeSet<_>>();

        (whole_rows || whole_columns).then_some(Shape {
            rows: y0..=y1,
            columns: x0..=x1,
            whole_rows,
        })
    }
}

fn clear_selection(grid: &Grid, coverage: &Coverage, shape: &Shape) -> Mutation {
    let next = clear_cells(&grid.to_detached(), coverage.cells.iter().copied());
    let (text, rebuilt) = rebuild(grid, &next);

    let top_left = Coordinate::new(*shape.columns.start(), *shape.rows.start());
    let bottom_right = Coordinate::new(*shape.columns.end(), *shape.rows.end());
    let caret = landing(rebuilt.as_ref(), top_left, grid.range.start);
    let highlight = rebuilt
        .as_ref()
        .and_then(|g| cells_span(g, top_left, bottom_right));
    tracing::debug!(cells = coverage.cells.len(), "cleared cells");

    Mutation::Applied(Outcome::replace(grid.range, text, caret).with_highlight(highlight))
}

fn remove_whole_rows(document: &str, grid: &Grid, shape: &Shape) -> Mutation {
    let next = remove_rows(&grid.to_detached(), shape.rows.clone());
    tracing::debug!(rows = ?shape.rows, "removed rows");

    if next.is_empty() {
        // The table itself goes, along with its line break
        let end = line_break_after(document, grid.range.end).unwrap_or(grid.range.end);
        let range = ByteRange::new(grid.range.start, end);
        return Mutation::Applied(Outcome::replace(range, "", grid.range.start));
    }

    let (text, rebuilt) = rebuild(grid, &next);
    let row = (*shape.rows.start()).min(next.row_count() - 1);
    let caret = landing(rebuilt.as_ref(), Coordinate::new(0, row), grid.range.start);
    Mutation::Applied(Outcome::replace(grid.range, text, caret))
}

fn remove_whole_columns(grid: &Grid, shape: &Shape) -> Mutation {
    let next = remove_columns(&grid.to_detached(), shape.columns.clone());
    let (text, rebuilt) = rebuild(grid, &next);
    let column = (*shape.columns.start()).min(next.column_count().saturating_sub(1));
    let caret = landing(rebuilt.as_ref(), Coordinate::new(column, 0), grid.range.start);
    tracing::debug!(columns = ?shape.columns, "removed columns");

    Mutation::Applied(Outcome::replace(grid.range, text, caret))
}

/// Delete text on both sides of the table edge together with whole rows
fn remove_rows_straddling(document: &str, grid: &Grid, range: ByteRange, shape: &Shape) -> Mutation {
    let next = remove_rows(&grid.to_detached(), shape.rows.clone());
    let region = range.union(grid.range);

    let mut text = String::new();
    if !next.is_empty() {
        let starts_mid_line = range.start < grid.range.start
            && line_at(document, range.start).is_some_and(|line| line.start < range.start);
        if starts_mid_line {
            text.push('\n');
        }
        text.push_str(&render(&next, &grid.indent, grid.delimiter));
        let ends_mid_line = range.end > grid.range.end
            && line_at(document, range.end).is_some_and(|line| range.end < line.end);
        if ends_mid_line {
            text.push('\n');
        }
    }

    let caret = if range.start < grid.range.start {
        range.start
    } else {
        region.start + text.len()
    };
    tracing::debug!(rows = ?shape.rows, "removed rows across the table edge");

    Mutation::Applied(Outcome::replace(region, text, caret))
}

// ============================================================================
// Helpers
// ============================================================================

/// The cell whose text fully contains `range`
pub(super) fn single_cell(grid: &Grid, range: ByteRange) -> Option<Coordinate> {
    grid.rows.iter().enumerate().find_map(|(y, row)| {
        row.cells
            .iter()
            .position(|cell| {
                cell.range.start <= range.start
                    && range.end <= cell.range.end
                    && (!range.is_empty() || cell.range.start < cell.range.end)
            })
            .map(|x| Coordinate::new(x, y))
    })
}

/// Check if a range removes a delimiter, a row break or row indentation
fn touches_structure(grid: &Grid, range: ByteRange) -> bool {
    grid.rows.iter().any(|row| {
        let first = row.delimiters.first().copied().unwrap_or(row.range.end);
        let indentation = ByteRange::new(row.range.start, first);
        row.delimiters.iter().any(|&d| range.contains(d)) || indentation.intersects(range)
    }) || !grid.rows.iter().any(|row| row.range.covers(range))
}

/// Check if deleting `range` pulls a non-blank outside line into a table row
fn joins_table_line(document: &str, grid: &Grid, range: ByteRange) -> bool {
    let before = range.start < grid.range.start && range.end >= grid.range.start;
    if before {
        let kept = line_at(document, range.start)
            .and_then(|line| document.get(line.start..range.start));
        if kept.is_some_and(|text| !text.trim().is_empty()) {
            return true;
        }
    }

    let after = range.start <= grid.range.end && range.end > grid.range.end;
    if after {
        let kept = line_at(document, range.end)
            .and_then(|line| document.get(range.end..line.end));
        if kept.is_some_and(|text| !text.trim().is_empty()) {
            return true;
        }
    }
    false
}

/// Replace `range` inside the text of the cell at `at`, then realign
///
/// The caret is restored to the end of the inserted text, measured in the
/// trimmed content so it survives re-padding.
pub(super) fn splice_cell(grid: &Grid, at: Coordinate, range: ByteRange, insert: &str) -> Mutation {
    let Some(cell) = grid.cell(at) else {
        return Mutation::NotHandled;
    };
    let from = range.start - cell.range.start;
    let to = range.end - cell.range.start;
    let (Some(head), Some(tail)) = (cell.text.get(..from), cell.text.get(to..)) else {
        return Mutation::NotHandled;
    };

    let edited = format!("{head}{insert}{tail}");
    if has_unescaped_delimiter(&edited, grid.delimiter) {
        tracing::debug!(?at, "blocked edit exposing a delimiter");
        return Mutation::Blocked;
    }
    let index = format!("{head}{insert}").trim_start().chars().count();

    let mut next = grid.to_detached();
    next.set(at, edited.trim());
    let (text, rebuilt) = rebuild(grid, &next);
    let caret = rebuilt
        .as_ref()
        .and_then(|g| offset_in_cell(g, at, index))
        .unwrap_or(range.start);

    Mutation::Applied(Outcome::replace(grid.range, text, caret))
}

fn line_break_after(document: &str, offset: usize) -> Option<usize> {
    let rest = document.get(offset..)?;
    if rest.starts_with("\r\n") {
        Some(offset + 2)
    } else if rest.starts_with('\n') {
        Some(offset + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{format_grid, parse_text};

    fn config() -> TableConfig {
        TableConfig::default()
    }

    fn formatted(text: &str) -> (String, Grid) {
        let raw = parse_text(text, 0, '|').unwrap();
        let document = format_grid(&raw);
        let grid = parse_text(&document, 0, '|').unwrap();
        (document, grid)
    }

    fn detached(rows: &[&[&str]]) -> DetachedGrid {
        DetachedGrid::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_insert_column_pads_short_rows() {
        let grid = detached(&[&["a", "b"], &["c"]]);
        assert_eq!(
            insert_column(&grid, 1),
            detached(&[&["a", "", "b"], &["c", "", ""]])
        );
    }

    #[test]
    fn test_remove_columns_keeps_one_column() {
        let grid = detached(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(remove_columns(&grid, 0..=1), detached(&[&[""], &[""]]));
        assert_eq!(remove_columns(&grid, 1..=1), detached(&[&["a"], &["c"]]));
    }

    #[test]
    fn test_remove_rows() {
        let grid = detached(&[&["a"], &["b"], &["c"]]);
        assert_eq!(remove_rows(&grid, 1..=2), detached(&[&["a"]]));
    }

    #[test]
    fn test_delimiter_inside_cell_adds_column_after() {
        let (document, grid) = formatted("| abc | d |\n| e   | f |");
        let caret = document.find('b').unwrap();
        let mutation = type_char(&grid, ByteRange::caret(caret), '|', &config());
        let outcome = mutation.outcome().unwrap();

        let text = outcome.apply(&document);
        assert_eq!(text, "| abc |  | d |\n| e   |  | f |");
        assert_eq!(outcome.caret, 7);
    }

    #[test]
    fn test_delimiter_in_leading_padding_adds_column_before() {
        let (document, grid) = formatted("| abc | d |");
        let mutation = type_char(&grid, ByteRange::caret(1), '|', &config());
        assert_eq!(mutation.apply(&document), "|  | abc | d |");
        assert_eq!(mutation.outcome().unwrap().caret, 1);
    }

    #[test]
    fn test_delimiter_after_row_appends_column() {
        let document = "| a |  ";
        let grid = parse_text(document, 0, '|').unwrap();
        let mutation = type_char(&grid, ByteRange::caret(7), '|', &config());
        assert_eq!(mutation.apply(document), "| a |  |");
        assert_eq!(mutation.outcome().unwrap().caret, 5);
    }

    #[test]
    fn test_delimiter_ignored_when_structural_edits_disabled() {
        let (_, grid) = formatted("| abc |");
        let config = TableConfig {
            structural_edits: false,
            ..TableConfig::default()
        };
        assert_eq!(
            type_char(&grid, ByteRange::caret(3), '|', &config),
            Mutation::NotHandled
        );
    }

    #[test]
    fn test_typing_in_cell_realigns() {
        let (document, grid) = formatted("| a | b |\n| c | d |");
        let caret = 3; // after "a"
        let mutation = type_char(&grid, ByteRange::caret(caret), 'x', &config());
        let outcome = mutation.outcome().unwrap();
        assert_eq!(outcome.apply(&document), "| ax | b |\n| c  | d |");
        assert_eq!(outcome.caret, 4);
    }

    #[test]
    fn test_typing_whitespace_is_plain_text() {
        let (_, grid) = formatted("| a |");
        assert_eq!(
            type_char(&grid, ByteRange::caret(3), ' ', &config()),
            Mutation::NotHandled
        );
    }

    #[test]
    fn test_typing_over_structure_is_blocked() {
        let (_, grid) = formatted("| a | b |");
        assert!(type_char(&grid, ByteRange::new(2, 7), 'x', &config()).is_blocked());
    }

    #[test]
    fn test_line_break_mid_row_adds_row_in_same_column() {
        let (document, grid) = formatted("| a | b |\n| c | d |");
        let caret = document.find('b').unwrap();
        let mutation = insert_line_break(&grid, caret, &config());
        let outcome = mutation.outcome().unwrap();

        assert_eq!(outcome.apply(&document), "| a | b |\n|   |   |\n| c | d |");
        assert_eq!(outcome.caret, 15);
    }

    #[test]
    fn test_line_break_at_row_end_lands_in_first_cell() {
        let (document, grid) = formatted("| a | b |\n| c | d |");
        let mutation = insert_line_break(&grid, 9, &config());
        let outcome = mutation.outcome().unwrap();

        assert_eq!(outcome.apply(&document), "| a | b |\n|   |   |\n| c | d |");
        assert_eq!(outcome.caret, 11);
    }

    #[test]
    fn test_line_break_at_end_of_last_row_is_plain_text() {
        let (document, grid) = formatted("| a |\n| b |");
        assert_eq!(
            insert_line_break(&grid, document.len(), &config()),
            Mutation::NotHandled
        );
    }

    #[test]
    fn test_line_break_before_row_is_plain_text() {
        let document = "  | a |\n  | b |";
        let grid = parse_text(document, 0, '|').unwrap();
        assert_eq!(insert_line_break(&grid, 0, &config()), Mutation::NotHandled);
    }

    #[test]
    fn test_backspace_on_delimiter_is_blocked() {
        let (document, grid) = formatted("| a | b |");
        let caret = 5; // right after the middle delimiter
        let mutation = delete(
            &document,
            &grid,
            &[ByteRange::caret(caret)],
            DeleteDirection::Backward,
            &config(),
        );
        assert!(mutation.is_blocked());
    }

    #[test]
    fn test_backspace_on_row_break_is_blocked() {
        let (document, grid) = formatted("| a |\n| b |");
        let mutation = delete(
            &document,
            &grid,
            &[ByteRange::caret(6)],
            DeleteDirection::Backward,
            &config(),
        );
        assert!(mutation.is_blocked());
    }

    #[test]
    fn test_backspace_inside_cell_removes_char() {
        let (document, grid) = formatted("| abc | d |\n| e   | f |");
        let mutation = delete(
            &document,
            &grid,
            &[ByteRange::caret(4)],
            DeleteDirection::Backward,
            &config(),
        );
        let outcome = mutation.outcome().unwrap();
        assert_eq!(outcome.apply(&document), "| ac | d |\n| e  | f |");
        assert_eq!(outcome.caret, 3);
    }

    #[test]
    fn test_forward_delete_joining_text_into_table_is_blocked() {
        let document = "| a |\nThen";
        let grid = parse_text(document, 0, '|').unwrap();
        let mutation = delete(
            document,
            &grid,
            &[ByteRange::caret(5)],
            DeleteDirection::Forward,
            &config(),
        );
        assert!(mutation.is_blocked());
    }

    #[test]
    fn test_delete_outside_table_is_not_handled() {
        let document = "Given x\n| a |";
        let grid = parse_text(document, 0, '|').unwrap();
        let mutation = delete(
            document,
            &grid,
            &[ByteRange::new(0, 5)],
            DeleteDirection::Backward,
            &config(),
        );
        assert_eq!(mutation, Mutation::NotHandled);
    }

    #[test]
    fn test_misaligned_delete_is_blocked() {
        let (document, grid) = formatted("| h1 | h2 |\n| aa | bb |\n| cc | dd |");
        let start = document.find("aa").unwrap() + 1;
        let end = document.find("dd").unwrap() + 1;
        let mutation = delete(
            &document,
            &grid,
            &[ByteRange::new(start, end)],
            DeleteDirection::Forward,
            &config(),
        );
        assert!(mutation.is_blocked());
        assert_eq!(mutation.apply(&document), document);
    }

    #[test]
    fn test_whole_row_delete_clears_then_removes() {
        let (document, grid) = formatted("| h | i |\n| a | b |\n| c | d |");
        let row = grid.rows[1].range;
        let first = delete(&document, &grid, &[row], DeleteDirection::Backward, &config());
        let cleared = first.apply(&document);
        assert_eq!(cleared, "| h | i |\n|   |   |\n| c | d |");

        let grid = parse_text(&cleared, 0, '|').unwrap();
        let row = grid.rows[1].range;
        let second = delete(&cleared, &grid, &[row], DeleteDirection::Backward, &config());
        assert_eq!(second.apply(&cleared), "| h | i |\n| c | d |");
    }

    #[test]
    fn test_whole_column_delete_clears_then_removes() {
        let (document, grid) = formatted("| h | i |\n| a | b |");
        let column: Vec<ByteRange> = grid.rows.iter().map(|r| r.cells[1].range).collect();
        let cleared = delete(&document, &grid, &column, DeleteDirection::Forward, &config())
            .apply(&document);
        assert_eq!(cleared, "| h |  |\n| a |  |");

        let grid = parse_text(&cleared, 0, '|').unwrap();
        let column: Vec<ByteRange> = grid.rows.iter().map(|r| r.cells[1].range).collect();
        let removed = delete(&cleared, &grid, &column, DeleteDirection::Forward, &config())
            .apply(&cleared);
        assert_eq!(removed, "| h |\n| a |");
    }

    #[test]
    fn test_deleting_every_blank_row_removes_table() {
        let document = "Given\n|   |\n|   |\nThen";
        let grid = parse_text(document, 0, '|').unwrap();
        let mutation = delete(
            document,
            &grid,
            &[grid.range],
            DeleteDirection::Backward,
            &config(),
        );
        assert_eq!(mutation.apply(document), "Given\nThen");
    }

    #[test]
    fn test_straddling_delete_with_whole_rows() {
        let document = "Given x\n| a |\n| b |";
        let grid = parse_text(document, 0, '|').unwrap();
        // From "x" through the end of the first row
        let range = ByteRange::new(6, grid.rows[0].range.end);
        let mutation = delete(document, &grid, &[range], DeleteDirection::Backward, &config());

        let outcome = mutation.outcome().unwrap();
        assert_eq!(outcome.apply(document), "Given \n| b |");
        assert_eq!(outcome.caret, 6);
    }

    #[test]
    fn test_straddling_delete_with_partial_row_is_blocked() {
        let document = "Given x\n| abc |";
        let grid = parse_text(document, 0, '|').unwrap();
        let range = ByteRange::new(6, document.find('b').unwrap());
        let mutation = delete(document, &grid, &[range], DeleteDirection::Backward, &config());
        assert!(mutation.is_blocked());
    }
}
