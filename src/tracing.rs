//! Tracing setup and caret diagnostics
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs, including blocked edits
//! - `RUST_LOG=pipegrid::table=trace` - offset resolution and navigation steps
//!
//! Logs are also written to `~/.config/pipegrid/logs/pipegrid.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::buffer::TableBuffer;
use crate::table::ByteRange;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so stdout stays clean for command output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "pipegrid.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Caret, selection and highlight state for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretSnapshot {
    pub caret: usize,
    pub selections: Vec<ByteRange>,
    pub highlight: Option<ByteRange>,
    pub revision: u64,
}

impl CaretSnapshot {
    pub fn from_buffer(buffer: &TableBuffer) -> Self {
        Self {
            caret: buffer.caret(),
            selections: buffer.selections(),
            highlight: buffer.highlight(),
            revision: buffer.revision,
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &CaretSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.caret != other.caret {
            changes.push(format!("caret {} → {}", self.caret, other.caret));
        }
        if self.selections != other.selections {
            changes.push(format!("{} selection(s)", other.selections.len()));
        }
        if self.highlight != other.highlight {
            changes.push(match other.highlight {
                Some(range) => format!("highlight {}..{}", range.start, range.end),
                None => "highlight cleared".to_string(),
            });
        }
        if self.revision != other.revision {
            changes.push(format!("revision {}", other.revision));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff() {
        let mut buffer = TableBuffer::with_text("| a | b |");
        let before = CaretSnapshot::from_buffer(&buffer);
        assert_eq!(before.diff(&CaretSnapshot::from_buffer(&buffer)), None);

        buffer.set_caret(5);
        let diff = before.diff(&CaretSnapshot::from_buffer(&buffer)).unwrap();
        assert!(diff.contains("caret 0 → 5"));
    }
}
