//! Operation results handed back to the host
//!
//! Every operation yields at most one whole-table replacement plus one
//! caret/highlight update, applied by the host as a single edit.

use serde::Serialize;

use super::model::ByteRange;

/// Replace `range` of the current document with `text`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub range: ByteRange,
    pub text: String,
}

/// Document change plus caret and highlight placement
///
/// `caret` and `highlight` are offsets into the document *after* the
/// replacement has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub replacement: Option<Replacement>,
    pub caret: usize,
    pub highlight: Option<ByteRange>,
}

impl Outcome {
    /// Move the caret without touching the text
    pub fn caret_only(caret: usize) -> Self {
        Self {
            replacement: None,
            caret,
            highlight: None,
        }
    }

    pub fn replace(range: ByteRange, text: impl Into<String>, caret: usize) -> Self {
        Self {
            replacement: Some(Replacement {
                range,
                text: text.into(),
            }),
            caret,
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, highlight: Option<ByteRange>) -> Self {
        self.highlight = highlight;
        self
    }

    /// New document text with the replacement applied
    pub fn apply(&self, document: &str) -> String {
        match &self.replacement {
            Some(Replacement { range, text }) => {
                let end = range.end.min(document.len());
                let start = range.start.min(end);
                let mut out = String::with_capacity(document.len() + text.len());
                out.push_str(&document[..start]);
                out.push_str(text);
                out.push_str(&document[end..]);
                out
            }
            None => document.to_string(),
        }
    }
}

/// Verdict of the mutation policy for one edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Mutation {
    /// The edit was translated into a table rewrite
    Applied(Outcome),
    /// The edit would break the table; the document stays byte-for-byte unchanged
    Blocked,
    /// Not a table edit; the host performs its ordinary text behavior
    NotHandled,
}

impl Mutation {
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Mutation::Applied(outcome) => Some(outcome),
            Mutation::Blocked | Mutation::NotHandled => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Mutation::Blocked)
    }

    /// Document text after the mutation; blocked and unhandled edits leave it as is
    pub fn apply(&self, document: &str) -> String {
        self.outcome()
            .map_or_else(|| document.to_string(), |outcome| outcome.apply(document))
    }
}

impl From<Option<Outcome>> for Mutation {
    fn from(outcome: Option<Outcome>) -> Self {
        outcome.map_or(Mutation::NotHandled, Mutation::Applied)
    }
}
