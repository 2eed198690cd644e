//! Edits, transactions and the sinks that deliver them to a host.
//!
//! # Overview
//!
//! Every action describes its buffer changes as [`Edit`]s. How those edits reach the host is
//! decided by an [`EditSink`]:
//!
//! - [`TransactionSink`] buffers every edit and commits them together with the final
//!   selections through [`EditorHost::transaction`], so the whole multi-cursor action is one
//!   undo step.
//! - [`ImmediateSink`] applies edits through [`EditorHost::replace_range`] as soon as they are
//!   produced, inside the host's batch scope when it has one. Hosts without a batch scope get
//!   one undo step per edit.
//!
//! The sink is chosen once through [`EngineMode`] when the command executor is built.

use crate::error::Result;
use crate::host::EditorHost;
use crate::position::{Position, Selection};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

/// A single replace-range operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start of the replaced range.
    pub from: Position,
    /// End of the replaced range (equal to `from` for a pure insertion).
    pub to: Position,
    /// Replacement text.
    pub text: String,
}

impl Edit {
    /// Insert `text` at `at`.
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self {
            from: at,
            to: at,
            text: text.into(),
        }
    }

    /// Replace `from..to` with `text`.
    pub fn replace(from: Position, to: Position, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            text: text.into(),
        }
    }

    /// Delete `from..to`.
    pub fn delete(from: Position, to: Position) -> Self {
        Self::replace(from, to, String::new())
    }

    /// Returns `true` if nothing is removed.
    pub fn is_insertion(&self) -> bool {
        self.from == self.to
    }

    /// Net number of lines this edit adds (negative when it removes line breaks).
    pub fn line_delta(&self) -> isize {
        let inserted = self.text.matches('\n').count() as isize;
        let removed = self.to.line.saturating_sub(self.from.line) as isize;
        inserted - removed
    }
}

/// Edits plus the selections that follow them, applied atomically.
///
/// All edit positions refer to the document as it was before the transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Buffer changes in emission order.
    pub edits: Vec<Edit>,
    /// Selections after the changes.
    pub selections: Vec<Selection>,
}

/// Order in which edits sharing one coordinate space can be applied one by one.
///
/// Later starts go first. Among equal starts the longer replacement goes first, and edits
/// with identical ranges are applied in reverse emission order so that insertions at one
/// point end up in emission order.
pub(crate) fn application_order(edits: &[Edit]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by_key(|&i| (Reverse(edits[i].from), Reverse(edits[i].to), Reverse(i)));
    order
}

/// Append `edit` to edits sharing its coordinate space.
///
/// A replacement that covers earlier replacements supersedes them, so a range rewritten by
/// several iterations ends up with the text of the last one.
pub(crate) fn merge_edit(edits: &mut Vec<Edit>, edit: Edit) {
    if !edit.is_insertion() {
        edits.retain(|e| e.is_insertion() || e.from < edit.from || e.to > edit.to);
    }
    edits.push(edit);
}

/// Which sink the engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineMode {
    /// Buffer everything and commit one transaction.
    #[default]
    Transaction,
    /// Apply each edit right away (hosts without atomic transactions).
    Immediate,
}

impl EngineMode {
    /// Build a fresh sink for one engine run.
    pub fn sink(self) -> Box<dyn EditSink> {
        match self {
            Self::Transaction => Box::new(TransactionSink::default()),
            Self::Immediate => Box::new(ImmediateSink::default()),
        }
    }
}

/// Destination of the edits produced during one engine run.
pub trait EditSink {
    /// Mode this sink implements.
    fn mode(&self) -> EngineMode;

    /// Called once before the first action runs.
    fn begin(&mut self, _host: &mut dyn EditorHost) {}

    /// Hand over the edits of one action invocation.
    ///
    /// Edits of later invocations may replace exactly the range an earlier one replaced (or a
    /// range covering it); the later text wins.
    fn push(&mut self, host: &mut dyn EditorHost, edits: Vec<Edit>) -> Result<()>;

    /// Deliver the final selections and close the run.
    fn commit(&mut self, host: &mut dyn EditorHost, selections: Vec<Selection>) -> Result<()>;

    /// Close the run after a failure.
    fn abandon(&mut self, _host: &mut dyn EditorHost) {}
}

/// Buffers edits and commits them once.
#[derive(Debug, Default)]
pub struct TransactionSink {
    edits: Vec<Edit>,
}

impl EditSink for TransactionSink {
    fn mode(&self) -> EngineMode {
        EngineMode::Transaction
    }

    fn push(&mut self, _host: &mut dyn EditorHost, edits: Vec<Edit>) -> Result<()> {
        for edit in edits {
            merge_edit(&mut self.edits, edit);
        }
        Ok(())
    }

    fn commit(&mut self, host: &mut dyn EditorHost, selections: Vec<Selection>) -> Result<()> {
        let edits = std::mem::take(&mut self.edits);
        debug!(edits = edits.len(), selections = selections.len(), "committing transaction");
        host.transaction(Transaction { edits, selections })
    }

    fn abandon(&mut self, _host: &mut dyn EditorHost) {
        self.edits.clear();
    }
}

/// Applies edits as they arrive.
#[derive(Debug, Default)]
pub struct ImmediateSink {
    batched: bool,
}

impl EditSink for ImmediateSink {
    fn mode(&self) -> EngineMode {
        EngineMode::Immediate
    }

    fn begin(&mut self, host: &mut dyn EditorHost) {
        self.batched = host.begin_batch();
        if !self.batched {
            debug!("host has no batch scope, edits will not be grouped");
        }
    }

    fn push(&mut self, host: &mut dyn EditorHost, edits: Vec<Edit>) -> Result<()> {
        for i in application_order(&edits) {
            let edit = &edits[i];
            let to = (!edit.is_insertion()).then_some(edit.to);
            host.replace_range(&edit.text, edit.from, to)?;
        }
        Ok(())
    }

    fn commit(&mut self, host: &mut dyn EditorHost, selections: Vec<Selection>) -> Result<()> {
        host.set_selections(selections);
        self.abandon(host);
        Ok(())
    }

    fn abandon(&mut self, host: &mut dyn EditorHost) {
        if std::mem::take(&mut self.batched) {
            host.end_batch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_order_puts_replacement_before_insertion_at_same_start() {
        let edits = vec![
            Edit::replace(Position::new(1, 0), Position::new(1, 4), "3. b"),
            Edit::replace(Position::new(2, 0), Position::new(2, 4), "4. c"),
            Edit::insert(Position::new(1, 0), "2. \n"),
        ];
        assert_eq!(application_order(&edits), vec![1, 0, 2]);
    }

    #[test]
    fn test_application_order_keeps_insertions_in_emission_order() {
        let edits = vec![
            Edit::insert(Position::new(0, 3), "a"),
            Edit::insert(Position::new(0, 3), "b"),
        ];
        // "b" goes in first, then "a" in front of it.
        assert_eq!(application_order(&edits), vec![1, 0]);
    }

    #[test]
    fn test_merge_edit_later_replacement_supersedes_covered_ones() {
        let mut edits = Vec::new();
        merge_edit(&mut edits, Edit::insert(Position::new(1, 0), "2. \n"));
        merge_edit(&mut edits, Edit::replace(Position::new(2, 0), Position::new(2, 1), "4"));
        merge_edit(&mut edits, Edit::replace(Position::new(3, 0), Position::new(3, 1), "5"));
        merge_edit(&mut edits, Edit::replace(Position::new(3, 0), Position::new(3, 1), "6"));
        merge_edit(&mut edits, Edit::delete(Position::new(2, 0), Position::new(2, 4)));
        assert_eq!(
            edits,
            vec![
                Edit::insert(Position::new(1, 0), "2. \n"),
                Edit::replace(Position::new(3, 0), Position::new(3, 1), "6"),
                Edit::delete(Position::new(2, 0), Position::new(2, 4)),
            ]
        );
    }

    #[test]
    fn test_line_delta() {
        assert_eq!(Edit::insert(Position::new(0, 0), "x\n\n").line_delta(), 2);
        assert_eq!(
            Edit::delete(Position::new(0, 3), Position::new(2, 0)).line_delta(),
            -2
        );
    }
}
