//! Capability interface the actions need from a host editor.
//!
//! # Overview
//!
//! The crate never owns a document. A host editor binding implements [`Document`] for read
//! access and [`EditorHost`] for the few mutations the engine performs. [`crate::TextBuffer`]
//! is an in-memory implementation used by tests and headless callers.
//!
//! Positions handed to and returned from these methods use character columns. Linear offsets
//! count characters across the whole text with lines joined by `'\n'`.

use crate::edit::Transaction;
use crate::error::Result;
use crate::position::{Position, Selection};

/// Read access to the document text.
pub trait Document {
    /// Number of logical lines (an empty document has one line).
    fn line_count(&self) -> usize;

    /// Text of `line` without its line break, or `None` past the end.
    fn line(&self, line: usize) -> Option<String>;

    /// Index of the last line.
    fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    /// Text between two positions.
    fn range_text(&self, from: Position, to: Position) -> String;

    /// Linear character offset of `pos` (clamped into the document).
    fn pos_to_offset(&self, pos: Position) -> usize;

    /// Position of a linear character offset (clamped into the document).
    fn offset_to_pos(&self, offset: usize) -> Position;

    /// Whole document text.
    fn text(&self) -> String;
}

/// Mutating capabilities of a host editor.
pub trait EditorHost: Document {
    /// Current selections, top to bottom.
    fn selections(&self) -> Vec<Selection>;

    /// Replace the selection list.
    fn set_selections(&mut self, selections: Vec<Selection>);

    /// Replace `from..to` (or insert at `from` when `to` is `None`) immediately.
    ///
    /// Only the immediate edit sink calls this.
    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) -> Result<()>;

    /// Apply all edits and the final selections as one undoable step.
    fn transaction(&mut self, transaction: Transaction) -> Result<()>;

    /// Best-effort hint to reveal a range.
    fn scroll_into_view(&mut self, _from: Position, _to: Position) {}

    /// Open a scope that groups subsequent [`EditorHost::replace_range`] calls into one undo
    /// step. Returns `false` if the host has no such scope.
    fn begin_batch(&mut self) -> bool {
        false
    }

    /// Close the scope opened by [`EditorHost::begin_batch`].
    fn end_batch(&mut self) {}
}
