//! Error type shared by the whole crate.
//!
//! Operations that simply have nothing to do (no enclosing bracket, cursor already on the
//! first line, ...) are not errors: they return the selection unchanged. [`EditorError`] is
//! reserved for broken contracts with the host and for configuration input that fails to parse.

use crate::position::Position;
use thiserror::Error;

/// Editing error type
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("line {line} is out of range (document has {line_count} lines)")]
    /// A line index past the end of the document.
    LineOutOfRange {
        /// Requested zero-based line index.
        line: usize,
        /// Number of lines in the document.
        line_count: usize,
    },

    #[error("selections are not in document order")]
    /// The host handed over a selection list that is not sorted top to bottom.
    UnorderedSelections,

    #[error("invalid range: {from:?}..{to:?}")]
    /// An edit whose end precedes its start.
    InvalidRange {
        /// Start of the range.
        from: Position,
        /// End of the range.
        to: Position,
    },

    #[error("search pattern failed to compile: {0}")]
    /// The escaped search pattern was rejected by the regex engine.
    Search(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    /// Settings or command JSON failed to parse.
    Config(#[from] serde_json::Error),

    #[error("host editor rejected the edit: {0}")]
    /// The host's commit primitive failed.
    Host(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EditorError>;
