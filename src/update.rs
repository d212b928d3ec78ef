//! Message dispatch for table editing
//!
//! Each handler asks the table engine for a verdict and applies it to the
//! buffer. A [`Mutation::NotHandled`] verdict falls through to the buffer's
//! ordinary text behavior; [`Mutation::Blocked`] leaves the buffer untouched.

use crate::buffer::TableBuffer;
use crate::config::TableConfig;
use crate::messages::TableMsg;
use crate::table::{
    self, DeleteDirection, Direction, Grid, Mutation, Outcome, Traversal,
};
use crate::tracing::CaretSnapshot;

/// Handle one table message
pub fn update(buffer: &mut TableBuffer, msg: TableMsg, config: &TableConfig) -> Mutation {
    let before = CaretSnapshot::from_buffer(buffer);
    tracing::debug!(?msg, "table message");

    let grid = buffer.table(config.delimiter);
    let mutation = match msg {
        TableMsg::Format => format(buffer, grid.as_ref()),
        TableMsg::Copy => copy(buffer, grid.as_ref(), config),
        TableMsg::Cut => cut(buffer, grid.as_ref(), config),
        TableMsg::Paste(text) => paste(buffer, grid.as_ref(), &text, config),
        TableMsg::Shift(direction) => shift(buffer, grid.as_ref(), direction),
        TableMsg::Navigate(traversal) => navigate(buffer, grid.as_ref(), traversal, config),
        TableMsg::TypeChar(ch) => type_char(buffer, grid.as_ref(), ch, config),
        TableMsg::Delete(direction) => delete(buffer, grid.as_ref(), direction, config),
    };

    if let Some(diff) = before.diff(&CaretSnapshot::from_buffer(buffer)) {
        tracing::trace!("caret: {}", diff);
    }
    mutation
}

fn apply(buffer: &mut TableBuffer, mutation: Mutation) -> Mutation {
    if let Some(outcome) = mutation.outcome() {
        buffer.apply(outcome);
    }
    mutation
}

fn format(buffer: &mut TableBuffer, grid: Option<&Grid>) -> Mutation {
    let Some(grid) = grid else {
        return Mutation::NotHandled;
    };
    apply(buffer, Mutation::Applied(table::reformat(grid, buffer.caret())))
}

fn copy(buffer: &mut TableBuffer, grid: Option<&Grid>, config: &TableConfig) -> Mutation {
    let structured = grid.and_then(|g| table::copy(g, &buffer.selections(), config));
    match structured {
        Some(text) => {
            buffer.set_clipboard(text);
            Mutation::Applied(Outcome::caret_only(buffer.caret()))
        }
        None => {
            let text = buffer.selected_text();
            buffer.set_clipboard(text);
            Mutation::NotHandled
        }
    }
}

fn cut(buffer: &mut TableBuffer, grid: Option<&Grid>, config: &TableConfig) -> Mutation {
    let document = buffer.text();
    let structured = grid.and_then(|g| table::cut(&document, g, &buffer.selections(), config));
    match structured {
        Some((text, mutation)) => {
            buffer.set_clipboard(text);
            apply(buffer, mutation)
        }
        None => {
            let text = buffer.selected_text();
            buffer.set_clipboard(text);
            buffer.insert_text("");
            Mutation::NotHandled
        }
    }
}

fn paste(
    buffer: &mut TableBuffer,
    grid: Option<&Grid>,
    text: &str,
    config: &TableConfig,
) -> Mutation {
    let document = buffer.text();
    let selection = buffer.selections().last().copied();
    let mutation = match (grid, selection) {
        (Some(grid), Some(selection)) => table::paste(&document, grid, selection, text, config),
        _ => Mutation::NotHandled,
    };
    if mutation == Mutation::NotHandled {
        buffer.insert_text(text);
    }
    apply(buffer, mutation)
}

fn shift(buffer: &mut TableBuffer, grid: Option<&Grid>, direction: Direction) -> Mutation {
    let outcome = grid.and_then(|g| table::shift_at(g, buffer.caret(), direction));
    apply(buffer, Mutation::from(outcome))
}

fn navigate(
    buffer: &mut TableBuffer,
    grid: Option<&Grid>,
    traversal: Traversal,
    config: &TableConfig,
) -> Mutation {
    let outcome = grid.and_then(|g| table::next_cell(g, buffer.caret(), traversal, config));
    if let Some(outcome) = outcome {
        return apply(buffer, Mutation::Applied(outcome));
    }

    match traversal {
        // Past the last row Enter becomes a line break
        Traversal::Enter => type_char(buffer, grid, '\n', config),
        Traversal::Tab => {
            buffer.insert_text("\t");
            Mutation::NotHandled
        }
        Traversal::ShiftTab => Mutation::NotHandled,
    }
}

fn type_char(
    buffer: &mut TableBuffer,
    grid: Option<&Grid>,
    ch: char,
    config: &TableConfig,
) -> Mutation {
    let selection = buffer.selections().first().copied();
    let mutation = match (grid, selection) {
        (Some(grid), Some(selection)) => table::type_char(grid, selection, ch, config),
        _ => Mutation::NotHandled,
    };
    if mutation == Mutation::NotHandled {
        buffer.insert_text(ch.encode_utf8(&mut [0; 4]));
    }
    apply(buffer, mutation)
}

fn delete(
    buffer: &mut TableBuffer,
    grid: Option<&Grid>,
    direction: DeleteDirection,
    config: &TableConfig,
) -> Mutation {
    let document = buffer.text();
    let mutation = grid.map_or(Mutation::NotHandled, |g| {
        table::delete(&document, g, &buffer.selections(), direction, config)
    });
    if mutation == Mutation::NotHandled {
        buffer.delete_plain(direction);
    }
    apply(buffer, mutation)
}
