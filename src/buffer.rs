//! Rope-backed document host for the table engine
//!
//! Owns the text, caret, selections, highlight and an in-process clipboard,
//! and applies engine [`Outcome`]s as a single replacement plus caret move.
//! When the engine leaves an edit to the host, the plain-text fallbacks here
//! perform it.

use std::path::PathBuf;

use ropey::Rope;

use crate::table::{
    locate_table, parse_table, ByteRange, DeleteDirection, Grid, Outcome, Replacement,
};

#[derive(Debug, Clone)]
pub struct TableBuffer {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for in-memory text)
    pub file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Incremented on each edit
    pub revision: u64,

    caret: usize,
    /// Non-empty for active selections; several for block selections
    selections: Vec<ByteRange>,
    highlight: Option<ByteRange>,
    clipboard: String,
}

impl TableBuffer {
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            is_modified: false,
            revision: 0,
            caret: 0,
            selections: Vec::new(),
            highlight: None,
            clipboard: String::new(),
        }
    }

    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        let mut buffer = Self::with_text(&content);
        buffer.file_path = Some(path);
        Ok(buffer)
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret and drop any selection
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = self.snap(offset);
        self.selections.clear();
    }

    /// Active selections, or the collapsed caret when there are none
    pub fn selections(&self) -> Vec<ByteRange> {
        if self.selections.is_empty() {
            vec![ByteRange::caret(self.caret)]
        } else {
            self.selections.clone()
        }
    }

    /// Replace the selections; the caret follows the end of the last one
    pub fn select(&mut self, ranges: &[ByteRange]) {
        self.selections = ranges
            .iter()
            .map(|r| ByteRange::new(self.snap(r.start), self.snap(r.end)))
            .collect();
        if let Some(last) = self.selections.last() {
            self.caret = last.end;
        }
    }

    pub fn highlight(&self) -> Option<ByteRange> {
        self.highlight
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = text.into();
    }

    /// Text covered by the selections, one line per selection
    pub fn selected_text(&self) -> String {
        self.selections
            .iter()
            .map(|r| self.slice(*r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The table under the caret or any selection edge
    ///
    /// The lines right above and below the caret are probed as well, so
    /// edits that would join a neighboring line into the table still see it.
    pub fn table(&self, delimiter: char) -> Option<Grid> {
        let document = self.text();
        let mut probes = vec![self.caret];
        for range in &self.selections {
            probes.push(range.start);
            probes.push(range.end);
        }
        if let Some(line) = crate::table::line_at(&document, self.caret) {
            probes.push(line.start.saturating_sub(1));
            if let Some(newline) = document[line.end..].find('\n') {
                probes.push(line.end + newline + 1);
            }
        }

        let range = probes
            .into_iter()
            .find_map(|offset| locate_table(&document, offset, delimiter))?;
        parse_table(&document, range, delimiter)
    }

    /// Apply an engine outcome: one replacement, then caret and highlight
    pub fn apply(&mut self, outcome: &Outcome) {
        if let Some(Replacement { range, text }) = &outcome.replacement {
            self.replace(*range, text);
        }
        self.caret = self.snap(outcome.caret);
        self.selections.clear();
        self.highlight = outcome.highlight;
    }

    /// Ordinary typing: replace the selections (or insert at the caret)
    pub fn insert_text(&mut self, text: &str) {
        let mut ranges = self.selections();
        // Back to front so earlier offsets stay valid
        ranges.sort_by_key(|r| std::cmp::Reverse(r.start));
        let mut caret = self.caret;
        for range in &ranges {
            self.replace(*range, text);
            caret = range.start + text.len();
        }
        self.caret = self.snap(caret);
        self.selections.clear();
        self.highlight = None;
    }

    /// Ordinary Backspace/Delete
    pub fn delete_plain(&mut self, direction: DeleteDirection) {
        if !self.selections.is_empty() {
            self.insert_text("");
            return;
        }
        let document = self.text();
        let target = match direction {
            DeleteDirection::Backward => document[..self.caret]
                .chars()
                .next_back()
                .map(|ch| ByteRange::new(self.caret - ch.len_utf8(), self.caret)),
            DeleteDirection::Forward => document[self.caret..]
                .chars()
                .next()
                .map(|ch| ByteRange::new(self.caret, self.caret + ch.len_utf8())),
        };
        if let Some(target) = target {
            self.replace(target, "");
            self.caret = target.start;
        }
        self.highlight = None;
    }

    fn replace(&mut self, range: ByteRange, text: &str) {
        if range.is_empty() && text.is_empty() {
            return;
        }
        let start = self.buffer.byte_to_char(self.snap(range.start));
        let end = self.buffer.byte_to_char(self.snap(range.end));
        self.buffer.remove(start..end);
        self.buffer.insert(start, text);
        self.is_modified = true;
        self.revision += 1;
    }

    fn slice(&self, range: ByteRange) -> String {
        let start = self.buffer.byte_to_char(self.snap(range.start));
        let end = self.buffer.byte_to_char(self.snap(range.end));
        self.buffer.slice(start..end).to_string()
    }

    /// Clamp to the buffer and back onto a char boundary
    fn snap(&self, offset: usize) -> usize {
        let offset = offset.min(self.buffer.len_bytes());
        let char_idx = self.buffer.byte_to_char(offset);
        self.buffer.char_to_byte(char_idx)
    }
}
