//! In-memory host editor.
//!
//! [`TextBuffer`] implements [`EditorHost`] on top of a [`ropey::Rope`]. It is what the tests,
//! benchmarks and headless callers drive the actions with, and it keeps the host-side
//! guarantees the actions rely on:
//!
//! - selections are kept sorted, merged and clamped into the document;
//! - a [`Transaction`] is one undo step, and so is every `replace_range` group inside a batch
//!   scope;
//! - `replace_range` maps the stored selections through the edit.

use crate::edit::{Transaction, application_order};
use crate::error::{EditorError, Result};
use crate::host::{Document, EditorHost};
use crate::line_ending::LineEnding;
use crate::position::{Position, Selection};
use crate::selection_set::normalize_selections;
use crate::text::char_len;
use ropey::Rope;

#[derive(Debug, Clone)]
struct AppliedEdit {
    start: usize,
    deleted: String,
    inserted: String,
}

impl AppliedEdit {
    fn is_noop(&self) -> bool {
        self.deleted.is_empty() && self.inserted.is_empty()
    }
}

#[derive(Debug, Clone)]
struct UndoStep {
    edits: Vec<AppliedEdit>,
    before: Vec<Selection>,
    after: Vec<Selection>,
}

#[derive(Debug)]
struct UndoStack {
    undo: Vec<UndoStep>,
    redo: Vec<UndoStep>,
    max_undo: usize,
}

impl UndoStack {
    fn new(max_undo: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_undo,
        }
    }

    fn push(&mut self, step: UndoStep) {
        self.redo.clear();
        if self.undo.len() >= self.max_undo {
            self.undo.remove(0);
        }
        self.undo.push(step);
    }
}

#[derive(Debug)]
struct OpenBatch {
    depth: usize,
    step: UndoStep,
}

/// Rope-backed document with selections and undo history.
#[derive(Debug)]
pub struct TextBuffer {
    rope: Rope,
    line_ending: LineEnding,
    selections: Vec<Selection>,
    history: UndoStack,
    batch: Option<OpenBatch>,
    last_scroll: Option<(Position, Position)>,
}

impl TextBuffer {
    /// Load `text` with a cursor at the start of the document.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&LineEnding::normalize(text)),
            line_ending: LineEnding::detect(text),
            selections: vec![Selection::cursor(Position::default())],
            history: UndoStack::new(1000),
            batch: None,
            last_scroll: None,
        }
    }

    /// Replace the initial selections.
    pub fn with_selections(mut self, selections: Vec<Selection>) -> Self {
        self.set_selections(selections);
        self
    }

    /// Line ending detected on load.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Text with the line ending it was loaded with.
    pub fn to_text_with_line_ending(&self) -> String {
        self.line_ending.restore(&self.rope.to_string())
    }

    /// Range passed to the last [`EditorHost::scroll_into_view`] call.
    pub fn last_scroll(&self) -> Option<(Position, Position)> {
        self.last_scroll
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        !self.history.undo.is_empty()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        !self.history.redo.is_empty()
    }

    /// Number of undo steps.
    pub fn undo_depth(&self) -> usize {
        self.history.undo.len()
    }

    /// Revert the last step. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(step) = self.history.undo.pop() else {
            return false;
        };
        for edit in step.edits.iter().rev() {
            let inserted_end = edit.start + char_len(&edit.inserted);
            self.rope.remove(edit.start..inserted_end);
            self.rope.insert(edit.start, &edit.deleted);
        }
        self.selections = step.before.clone();
        self.history.redo.push(step);
        true
    }

    /// Re-apply the last undone step. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(step) = self.history.redo.pop() else {
            return false;
        };
        for edit in &step.edits {
            let deleted_end = edit.start + char_len(&edit.deleted);
            self.rope.remove(edit.start..deleted_end);
            self.rope.insert(edit.start, &edit.inserted);
        }
        self.selections = step.after.clone();
        self.history.undo.push(step);
        true
    }

    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn apply_raw(&mut self, start: usize, end: usize, text: &str) -> AppliedEdit {
        let deleted = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        AppliedEdit {
            start,
            deleted,
            inserted: text.to_string(),
        }
    }

    fn checked_offsets(&self, from: Position, to: Position) -> Result<(usize, usize)> {
        if to < from {
            return Err(EditorError::InvalidRange { from, to });
        }
        Ok((self.pos_to_offset(from), self.pos_to_offset(to)))
    }

    fn record(&mut self, edits: Vec<AppliedEdit>, before: Vec<Selection>) {
        if let Some(batch) = self.batch.as_mut() {
            batch.step.edits.extend(edits);
            return;
        }
        if edits.iter().all(AppliedEdit::is_noop) {
            return;
        }
        self.history.push(UndoStep {
            edits,
            before,
            after: self.selections.clone(),
        });
    }
}

impl Document for TextBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let text = self.rope.line(line).to_string();
        Some(match text.strip_suffix('\n') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    fn range_text(&self, from: Position, to: Position) -> String {
        let a = self.pos_to_offset(from.min(to));
        let b = self.pos_to_offset(from.max(to));
        self.rope.slice(a..b).to_string()
    }

    fn pos_to_offset(&self, pos: Position) -> usize {
        let line = pos.line.min(self.last_line());
        self.rope.line_to_char(line) + pos.column.min(self.line_len(line))
    }

    fn offset_to_pos(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Position::new(line, offset - self.rope.line_to_char(line))
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }
}

fn map_offset(offset: usize, start: usize, end: usize, inserted: usize) -> usize {
    if offset < start {
        offset
    } else if offset <= end {
        start + inserted
    } else {
        offset - (end - start) + inserted
    }
}

impl EditorHost for TextBuffer {
    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        let clamped = selections
            .into_iter()
            .map(|sel| sel.map(|p| self.offset_to_pos(self.pos_to_offset(p))))
            .collect();
        self.selections = normalize_selections(clamped);
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) -> Result<()> {
        let (start, end) = self.checked_offsets(from, to.unwrap_or(from))?;
        let before = self.selections.clone();

        let old_offsets: Vec<(usize, usize)> = before
            .iter()
            .map(|sel| (self.pos_to_offset(sel.anchor), self.pos_to_offset(sel.head)))
            .collect();

        let applied = self.apply_raw(start, end, text);
        let inserted = char_len(text);

        self.selections = old_offsets
            .into_iter()
            .map(|(anchor, head)| {
                Selection::new(
                    self.offset_to_pos(map_offset(anchor, start, end, inserted)),
                    self.offset_to_pos(map_offset(head, start, end, inserted)),
                )
            })
            .collect();

        self.record(vec![applied], before);
        Ok(())
    }

    fn transaction(&mut self, transaction: Transaction) -> Result<()> {
        let before = self.selections.clone();
        let offsets = transaction
            .edits
            .iter()
            .map(|edit| self.checked_offsets(edit.from, edit.to))
            .collect::<Result<Vec<_>>>()?;

        let mut applied = Vec::with_capacity(offsets.len());
        let mut floor = usize::MAX;
        for i in application_order(&transaction.edits) {
            let (start, end) = offsets[i];
            let end = end.min(floor);
            let start = start.min(end);
            applied.push(self.apply_raw(start, end, &transaction.edits[i].text));
            floor = start;
        }

        self.set_selections(transaction.selections);
        self.record(applied, before);
        Ok(())
    }

    fn scroll_into_view(&mut self, from: Position, to: Position) {
        self.last_scroll = Some((from, to));
    }

    fn begin_batch(&mut self) -> bool {
        match self.batch.as_mut() {
            Some(batch) => batch.depth += 1,
            None => {
                self.batch = Some(OpenBatch {
                    depth: 1,
                    step: UndoStep {
                        edits: Vec::new(),
                        before: self.selections.clone(),
                        after: Vec::new(),
                    },
                });
            }
        }
        true
    }

    fn end_batch(&mut self) {
        let Some(batch) = self.batch.as_mut() else {
            return;
        };
        batch.depth -= 1;
        if batch.depth > 0 {
            return;
        }
        if let Some(batch) = self.batch.take() {
            let OpenBatch { step, .. } = batch;
            self.record(step.edits, step.before);
        }
    }
}
