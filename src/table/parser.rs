//! Table parsing from raw document text
//!
//! A row line is any line whose first non-whitespace character is the
//! delimiter. A table is the first contiguous block of row lines in the
//! probed span; text without any row line is not a table.

use super::model::{ByteRange, Cell, Grid, Row, ESCAPE};

/// Parse the table inside `span` of `document`
///
/// Returns `None` when the span holds no row line, or when the span does
/// not fall on character boundaries. Callers treat `None` as "ordinary text".
pub fn parse_table(document: &str, span: ByteRange, delimiter: char) -> Option<Grid> {
    let end = span.end.min(document.len());
    let text = document.get(span.start.min(end)..end)?;
    parse_text(text, span.start, delimiter)
}

/// Parse standalone table text as if it started at document offset `base`
pub fn parse_text(text: &str, base: usize, delimiter: char) -> Option<Grid> {
    let mut rows: Vec<Row> = Vec::new();
    let mut indent = String::new();

    for line in lines(text, base) {
        let content = &text[line.start - base..line.end - base];
        if is_row_line(content, delimiter) {
            if rows.is_empty() {
                indent = leading_whitespace(content).to_string();
            }
            let is_header = rows.is_empty();
            rows.push(parse_row(content, line, delimiter, is_header));
        } else if !rows.is_empty() {
            break;
        }
    }

    if rows.is_empty() {
        return None;
    }
    tracing::trace!(rows = rows.len(), base, "parsed table");
    Some(Grid::new(rows, indent, delimiter))
}

/// Find the table around `offset` by scanning outward from the caret line
///
/// Used when the host has no tighter hint for the table location.
pub fn locate_table(document: &str, offset: usize, delimiter: char) -> Option<ByteRange> {
    let caret_line = line_at(document, offset)?;
    if !is_row_line(&document[caret_line.start..caret_line.end], delimiter) {
        return None;
    }

    let mut first = caret_line;
    while let Some(previous) = previous_line(document, first) {
        if !is_row_line(&document[previous.start..previous.end], delimiter) {
            break;
        }
        first = previous;
    }

    let mut last = caret_line;
    while let Some(next) = next_line(document, last) {
        if !is_row_line(&document[next.start..next.end], delimiter) {
            break;
        }
        last = next;
    }

    Some(ByteRange::new(first.start, last.end))
}

/// Check if a line belongs to a table
pub fn is_row_line(line: &str, delimiter: char) -> bool {
    line.trim_start().starts_with(delimiter)
}

/// Bounds of the line holding `offset`, newline excluded
pub fn line_at(document: &str, offset: usize) -> Option<ByteRange> {
    if offset > document.len() || !document.is_char_boundary(offset) {
        return None;
    }
    let start = document[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = document[offset..]
        .find('\n')
        .map_or(document.len(), |i| offset + i);
    Some(trim_carriage_return(document, ByteRange::new(start, end)))
}

pub(crate) fn previous_line(document: &str, line: ByteRange) -> Option<ByteRange> {
    if line.start == 0 {
        return None;
    }
    line_at(document, line.start - 1)
}

pub(crate) fn next_line(document: &str, line: ByteRange) -> Option<ByteRange> {
    let newline = document[line.end..].find('\n')? + line.end;
    line_at(document, newline + 1)
}

fn trim_carriage_return(document: &str, line: ByteRange) -> ByteRange {
    if document[line.start..line.end].ends_with('\r') {
        ByteRange::new(line.start, line.end - 1)
    } else {
        line
    }
}

/// Absolute line ranges of `text`, carriage returns excluded
fn lines(text: &str, base: usize) -> impl Iterator<Item = ByteRange> + '_ {
    let mut start = 0;
    text.split('\n').map(move |line| {
        let content = line.strip_suffix('\r').unwrap_or(line);
        let range = ByteRange::new(base + start, base + start + content.len());
        start += line.len() + 1;
        range
    })
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Split one row line into cells
///
/// `line` is the text of `range`. Each pair of consecutive delimiters bounds
/// a cell; a non-blank segment after the last delimiter is an unclosed cell.
fn parse_row(line: &str, range: ByteRange, delimiter: char, is_header: bool) -> Row {
    let delimiters = delimiter_offsets(line, delimiter)
        .into_iter()
        .map(|i| range.start + i)
        .collect::<Vec<_>>();

    let mut cells: Vec<Cell> = delimiters
        .windows(2)
        .map(|pair| {
            let cell_range = ByteRange::new(pair[0] + 1, pair[1]);
            Cell {
                text: slice(line, range, cell_range).to_string(),
                range: cell_range,
            }
        })
        .collect();

    if let Some(&last) = delimiters.last() {
        let tail = ByteRange::new(last + 1, range.end);
        let text = slice(line, range, tail);
        if !text.trim().is_empty() {
            cells.push(Cell {
                text: text.to_string(),
                range: tail,
            });
        }
    }

    Row {
        cells,
        is_header,
        range,
        delimiters,
    }
}

fn slice(line: &str, line_range: ByteRange, part: ByteRange) -> &str {
    &line[part.start - line_range.start..part.end - line_range.start]
}

/// Check if `text` holds a delimiter that would split it into two cells
pub(crate) fn has_unescaped_delimiter(text: &str, delimiter: char) -> bool {
    !delimiter_offsets(text, delimiter).is_empty()
}

/// Byte offsets (relative to `line`) of every unescaped delimiter
fn delimiter_offsets(line: &str, delimiter: char) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut escaped = false;
    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == ESCAPE {
            escaped = true;
        } else if ch == delimiter {
            offsets.push(i);
        }
    }
    offsets
}
