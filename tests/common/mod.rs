//! Shared test helpers for integration tests
//!
//! Fixtures mark the caret with `‸` and selections with `«` .. `»`; several
//! selection pairs make a block selection.
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use pipegrid::table::{parse_text, ByteRange, Grid, Mutation};
use pipegrid::update::update;
use pipegrid::{TableBuffer, TableConfig, TableMsg};

pub const CARET: char = '‸';
pub const SELECT_START: char = '«';
pub const SELECT_END: char = '»';

/// Strip markers from a fixture, returning text, caret and selections
pub fn parse_markers(marked: &str) -> (String, usize, Vec<ByteRange>) {
    let mut text = String::with_capacity(marked.len());
    let mut caret = None;
    let mut selections = Vec::new();
    let mut open = None;

    for ch in marked.chars() {
        match ch {
            CARET => caret = Some(text.len()),
            SELECT_START => open = Some(text.len()),
            SELECT_END => {
                let start = open.take().expect("unbalanced selection marker");
                selections.push(ByteRange::new(start, text.len()));
            }
            _ => text.push(ch),
        }
    }

    let caret = caret
        .or_else(|| selections.last().map(|r| r.end))
        .unwrap_or(0);
    (text, caret, selections)
}

/// Create a buffer from a marked fixture
pub fn test_buffer(marked: &str) -> TableBuffer {
    let (text, caret, selections) = parse_markers(marked);
    let mut buffer = TableBuffer::with_text(&text);
    buffer.set_caret(caret);
    if !selections.is_empty() {
        buffer.select(&selections);
    }
    buffer
}

/// Helper to get buffer content as string
pub fn buffer_to_string(buffer: &TableBuffer) -> String {
    buffer.text()
}

/// Buffer content with the caret marker re-inserted
pub fn with_caret(buffer: &TableBuffer) -> String {
    let mut text = buffer.text();
    text.insert(buffer.caret(), CARET);
    text
}

/// Run one message with the default config
pub fn run(marked: &str, msg: TableMsg) -> (TableBuffer, Mutation) {
    run_with(marked, msg, &TableConfig::default())
}

pub fn run_with(marked: &str, msg: TableMsg, config: &TableConfig) -> (TableBuffer, Mutation) {
    let mut buffer = test_buffer(marked);
    let mutation = update(&mut buffer, msg, config);
    (buffer, mutation)
}

/// Parse a standalone table starting at offset 0
pub fn grid(text: &str) -> Grid {
    parse_text(text, 0, '|').expect("fixture is not a table")
}

/// Text covered by a range
pub fn slice(text: &str, range: ByteRange) -> &str {
    &text[range.start..range.end]
}
