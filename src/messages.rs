//! Message types for table editing
//!
//! Every change to a [`crate::buffer::TableBuffer`] flows through one of
//! these messages and [`crate::update::update`].

use crate::table::{DeleteDirection, Direction, Traversal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMsg {
    /// Realign the table under the caret
    Format,
    /// Copy the selection, as cells when it crosses table structure
    Copy,
    /// Copy then delete the selection
    Cut,
    /// Paste text at the caret
    Paste(String),
    /// Move the row or column under the caret one step
    Shift(Direction),
    /// Tab / Shift-Tab / Enter
    Navigate(Traversal),
    /// A typed character; `'\n'` is a line break
    TypeChar(char),
    /// Backspace or Delete
    Delete(DeleteDirection),
}
