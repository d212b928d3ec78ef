//! pipegrid - structural editing for plain-text pipe tables
//!
//! The [`table`] module is a pure engine over document text: parse a table,
//! map offsets to cells, align columns, copy and paste cell blocks, move rows
//! and columns, and decide how typing and deleting reshape the table.
//! [`buffer::TableBuffer`] is a rope-backed host that applies its results,
//! driven by [`messages::TableMsg`] through [`update::update`].

pub mod buffer;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod table;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use buffer::TableBuffer;
pub use config::TableConfig;
pub use messages::TableMsg;
pub use table::{Grid, Mutation, Outcome};
