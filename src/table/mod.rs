//! Plain-text pipe table engine
//!
//! Tables are rows of cells separated by a delimiter character, written
//! directly in a text document:
//!
//! ```text
//! | name  | ready |
//! | alpha | yes   |
//! ```
//!
//! Every operation takes the current document text plus a parsed [`Grid`],
//! works out the structural change, and returns one whole-table replacement
//! together with a caret/highlight update. Nothing is cached between calls.
//!
//! # Architecture
//!
//! ```text
//! parser ──> Grid ──┬─> coords      (offset <-> cell)
//!                   ├─> format      (alignment)
//!                   ├─> clipboard   (tab/newline codec)
//!                   ├─> merge       (paste)
//!                   ├─> shift       (row/column moves)
//!                   ├─> mutation    (typing and deleting)
//!                   └─> navigation  (Tab / Shift-Tab / Enter)
//! ```

mod actions;
mod clipboard;
mod coords;
mod format;
mod merge;
mod model;
mod mutation;
mod navigation;
mod outcome;
mod parser;
mod shift;

pub use actions::{copy, cut, paste, reformat, shift_at};
pub use clipboard::{copy_ranges, crosses_structure, decode, encode, extract_ranges, is_structured};
pub use coords::{
    caret_in_cell, cells_span, column_span, coordinate_to_offset, locate, offset_in_cell,
    offset_to_coordinate, row_span, Location,
};
pub use format::{column_widths, format_grid, render};
pub use merge::{merge, Anchor, Placement};
pub use model::{
    ByteRange, Cell, Coordinate, DetachedGrid, Grid, Row, Selection, DEFAULT_DELIMITER,
};
pub use mutation::{
    clear_cells, delete, insert_column, insert_delimiter, insert_line_break, insert_row,
    remove_columns, remove_rows, type_char, DeleteDirection,
};
pub use navigation::{next_cell, plan, Step, Traversal};
pub use outcome::{Mutation, Outcome, Replacement};
pub use parser::{is_row_line, line_at, locate_table, parse_table, parse_text};
pub use shift::{shift, shift_column, shift_row, Direction, Shifted};
