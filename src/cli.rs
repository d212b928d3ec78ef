//! Command-line argument parsing
//!
//! One invocation runs one table command against a file:
//!
//! ```text
//! pipegrid features/login.feature --caret 120 tab
//! pipegrid data.md --select 40..52 --select 60..72 copy --system-clipboard
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::messages::TableMsg;
use crate::table::{ByteRange, DeleteDirection, Direction, Traversal};

/// Structural editing for plain-text pipe tables
#[derive(Parser, Debug)]
#[command(name = "pipegrid", version, about = "Structural editing for plain-text pipe tables")]
pub struct CliArgs {
    /// File holding the table
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,

    /// Caret byte offset
    #[arg(long, value_name = "OFFSET", default_value_t = 0, global = true)]
    pub caret: usize,

    /// Selected byte range; repeat for a block selection
    #[arg(long, value_name = "START..END", value_parser = parse_range, global = true)]
    pub select: Vec<ByteRange>,

    /// Write the result back to FILE instead of printing it
    #[arg(short = 'i', long, global = true)]
    pub in_place: bool,

    /// Print the verdict, caret and highlight as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read paste text from / write copied text to the system clipboard
    #[arg(long, global = true)]
    pub system_clipboard: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Realign the table
    Format,
    /// Copy the selection
    Copy,
    /// Copy and delete the selection
    Cut,
    /// Paste text (or the system clipboard) at the caret
    Paste {
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },
    /// Move the row or column under the caret
    Shift {
        #[arg(value_enum)]
        direction: ShiftDirection,
    },
    /// Next cell
    Tab,
    /// Previous cell
    ShiftTab,
    /// Cell below, or a new row
    Enter,
    /// Type one character
    Type {
        #[arg(value_name = "CHAR")]
        ch: char,
    },
    /// Backspace, or Delete with --forward
    Delete {
        #[arg(long)]
        forward: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Left,
    Right,
    Up,
    Down,
}

impl From<ShiftDirection> for Direction {
    fn from(direction: ShiftDirection) -> Self {
        match direction {
            ShiftDirection::Left => Direction::Left,
            ShiftDirection::Right => Direction::Right,
            ShiftDirection::Up => Direction::Up,
            ShiftDirection::Down => Direction::Down,
        }
    }
}

impl Command {
    /// Whether the command places text on the clipboard
    pub fn copies(&self) -> bool {
        matches!(self, Command::Copy | Command::Cut)
    }

    /// Build the message; `clipboard` supplies paste text when none was given
    pub fn into_msg(self, clipboard: Option<String>) -> Result<TableMsg, String> {
        Ok(match self {
            Command::Format => TableMsg::Format,
            Command::Copy => TableMsg::Copy,
            Command::Cut => TableMsg::Cut,
            Command::Paste { text } => TableMsg::Paste(
                text.or(clipboard)
                    .ok_or_else(|| "Nothing to paste: pass TEXT or --system-clipboard".to_string())?,
            ),
            Command::Shift { direction } => TableMsg::Shift(direction.into()),
            Command::Tab => TableMsg::Navigate(Traversal::Tab),
            Command::ShiftTab => TableMsg::Navigate(Traversal::ShiftTab),
            Command::Enter => TableMsg::Navigate(Traversal::Enter),
            Command::Type { ch } => TableMsg::TypeChar(ch),
            Command::Delete { forward } => TableMsg::Delete(if forward {
                DeleteDirection::Forward
            } else {
                DeleteDirection::Backward
            }),
        })
    }
}

/// Parse `START..END` into a byte range
pub fn parse_range(value: &str) -> Result<ByteRange, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("Expected START..END, got '{}'", value))?;
    let start = start
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("Invalid range start '{}': {}", start, e))?;
    let end = end
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("Invalid range end '{}': {}", end, e))?;
    Ok(ByteRange::new(start, end))
}
