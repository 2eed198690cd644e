//! Positions, selections and line-boundary helpers.
//!
//! Columns are counted in characters (Unicode scalar values) within a logical line.

use crate::error::{EditorError, Result};
use crate::host::Document;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection range
///
/// `anchor` is where the selection started and `head` is where it currently ends, so a
/// selection dragged upwards has `head < anchor`. A collapsed selection is a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Fixed end of the selection
    pub anchor: Position,
    /// Moving end of the selection
    pub head: Position,
}

/// Document-ordered view of a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBoundaries {
    /// Textually first end.
    pub from: Position,
    /// Textually last end.
    pub to: Position,
    /// `to` sits at column 0 of a line after `from.line`, so that line holds no selected text.
    pub has_trailing_newline: bool,
}

impl SelectionBoundaries {
    /// Last line that actually contains selected text.
    pub fn last_content_line(&self) -> usize {
        if self.has_trailing_newline {
            self.to.line - 1
        } else {
            self.to.line
        }
    }
}

impl Selection {
    /// Create a selection from its anchor and head.
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection.
    pub fn cursor(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Returns `true` if anchor and head coincide.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Returns `true` if the head lies before the anchor.
    pub fn is_backward(&self) -> bool {
        self.head < self.anchor
    }

    /// Textually first end.
    pub fn from(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Textually last end.
    pub fn to(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Sort anchor and head into document order.
    pub fn boundaries(&self) -> SelectionBoundaries {
        let from = self.from();
        let to = self.to();
        SelectionBoundaries {
            from,
            to,
            has_trailing_newline: to.line > from.line && to.column == 0,
        }
    }

    /// Build a selection spanning `from..to` that points the same way as `self`.
    pub fn reshaped(&self, from: Position, to: Position) -> Self {
        if self.is_backward() {
            Self::new(to, from)
        } else {
            Self::new(from, to)
        }
    }

    /// Apply `f` to both ends.
    pub fn map(&self, mut f: impl FnMut(Position) -> Position) -> Self {
        Self::new(f(self.anchor), f(self.head))
    }
}

/// Start of `line`.
pub fn line_start(line: usize) -> Position {
    Position::new(line, 0)
}

/// Text of `line` without its line break.
pub fn line_text(doc: &dyn Document, line: usize) -> Result<String> {
    doc.line(line).ok_or(EditorError::LineOutOfRange {
        line,
        line_count: doc.line_count(),
    })
}

/// Length of `line` in characters.
pub fn line_len(doc: &dyn Document, line: usize) -> Result<usize> {
    Ok(line_text(doc, line)?.chars().count())
}

/// End of `line`.
pub fn line_end(doc: &dyn Document, line: usize) -> Result<Position> {
    Ok(Position::new(line, line_len(doc, line)?))
}

/// Clamp `pos` to an existing line and a column within that line.
pub fn clamp_position(doc: &dyn Document, pos: Position) -> Position {
    let line = pos.line.min(doc.last_line());
    let len = doc.line(line).map(|t| t.chars().count()).unwrap_or(0);
    Position::new(line, pos.column.min(len))
}

/// End of the document.
pub fn document_end(doc: &dyn Document) -> Position {
    let last = doc.last_line();
    Position::new(last, doc.line(last).map(|t| t.chars().count()).unwrap_or(0))
}
