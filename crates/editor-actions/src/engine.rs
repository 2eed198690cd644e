//! Multi-selection execution engine.
//!
//! # Overview
//!
//! [`apply_across_selections`] runs one [`SelectionAction`] for every selection of the host and
//! hands the resulting edits to an [`EditSink`]:
//!
//! 1. read the selection list once (it must be in document order);
//! 2. optionally keep only the first selection per head line;
//! 3. run the action per selection, folding every emitted edit into a [`Drift`];
//! 4. collect the new selections, optionally merging those that land on one line;
//! 5. pass them through an optional selection handler;
//! 6. commit edits and selections through the sink.
//!
//! With the transaction sink every action sees the document as it was before the run and
//! expresses its edits in those coordinates. [`Drift::map`] translates a pre-run position into
//! the document the transaction will produce, so actions place their new selections with it.
//! With the immediate sink the document changes as edits arrive; the engine re-reads each
//! selection from the host and hands actions an empty drift.

use crate::edit::{Edit, EditSink, EngineMode, merge_edit};
use crate::error::{EditorError, Result};
use crate::host::{Document, EditorHost};
use crate::position::{Position, Selection, line_start};
use crate::selection_set::{first_per_head_line, is_document_ordered, push_combining_same_line};
use crate::settings::Settings;
use crate::text::char_len;
use std::fmt;
use tracing::{debug, trace};

/// Position shift caused by the edits of earlier iterations.
///
/// All recorded edits use pre-run coordinates and do not overlap each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drift {
    iteration: usize,
    edits: Vec<Edit>,
}

impl Drift {
    /// Empty drift for the given iteration.
    pub fn starting_at(iteration: usize) -> Self {
        Self {
            iteration,
            edits: Vec::new(),
        }
    }

    /// Index of the selection being processed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Net lines added by all recorded edits.
    pub fn line_shift(&self) -> isize {
        self.edits.iter().map(Edit::line_delta).sum()
    }

    /// Fold the edits of one iteration in.
    ///
    /// A replacement covering replacements of earlier iterations supersedes them.
    pub fn advance(mut self, edits: &[Edit]) -> Self {
        self.iteration += 1;
        for edit in edits {
            merge_edit(&mut self.edits, edit.clone());
        }
        // Stable: insertions before replacements sharing a start, emission order otherwise.
        self.edits.sort_by_key(|e| (e.from, !e.is_insertion()));
        self
    }

    /// Translate a pre-run position through every recorded edit at or before it.
    ///
    /// A position inside a replaced range moves to the end of the replacement, and so does a
    /// position exactly at an insertion point.
    pub fn map(&self, pos: Position) -> Position {
        let mut pos = pos;
        let mut line_delta: isize = 0;
        // (pre-run line, pre-run column, post-run column) of the latest edit end.
        let mut anchor: Option<(usize, usize, usize)> = None;

        let shifted_column = |anchor: Option<(usize, usize, usize)>, p: Position| match anchor {
            Some((line, old, new)) if line == p.line && old <= p.column => new + (p.column - old),
            _ => p.column,
        };

        for edit in &self.edits {
            if edit.from > pos {
                break;
            }
            if edit.to > pos {
                pos = edit.to;
            }
            let start_column = shifted_column(anchor, edit.from);
            let end_column = match edit.text.rfind('\n') {
                Some(i) => char_len(&edit.text[i + 1..]),
                None => start_column + char_len(&edit.text),
            };
            anchor = Some((edit.to.line, edit.to.column, end_column));
            line_delta += edit.line_delta();
        }

        let line = (pos.line as isize + line_delta).max(0) as usize;
        Position::new(line, shifted_column(anchor, pos))
    }

    /// Map both ends of a selection.
    pub fn map_selection(&self, selection: &Selection) -> Selection {
        selection.map(|p| self.map(p))
    }

    /// Text an earlier iteration put in place of exactly `from..to`.
    pub fn replacement(&self, from: Position, to: Position) -> Option<&str> {
        self.edits
            .iter()
            .rev()
            .find(|e| e.from == from && e.to == to && !e.is_insertion())
            .map(|e| e.text.as_str())
    }

    /// Character right before pre-run position `pos` once the recorded edits are applied.
    pub fn char_before(&self, doc: &dyn Document, pos: Position) -> Option<char> {
        let mut pos = pos;
        while let Some(edit) = self
            .edits
            .iter()
            .rev()
            .find(|e| e.to == pos && !(e.is_insertion() && e.text.is_empty()))
        {
            if let Some(ch) = edit.text.chars().next_back() {
                return Some(ch);
            }
            pos = edit.from;
        }

        if pos.column == 0 {
            return (pos.line > 0).then_some('\n');
        }
        doc.line(pos.line)?.chars().nth(pos.column - 1)
    }

    /// First line of the whole lines earlier iterations deleted right above `line`, or `line`
    /// itself when there are none.
    pub fn deleted_lines_start(&self, line: usize) -> usize {
        let mut start = line;
        while let Some(edit) = self.edits.iter().find(|e| {
            e.text.is_empty()
                && e.to == line_start(start)
                && e.from.column == 0
                && e.from.line < start
        }) {
            start = edit.from.line;
        }
        start
    }
}

/// What an action sees besides the document and its selection.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Shift caused by earlier iterations.
    pub drift: &'a Drift,
    /// User settings.
    pub settings: &'a Settings,
}

/// Result of one action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Edits in the coordinates of the document the action was given.
    pub edits: Vec<Edit>,
    /// Selection after the edits (in post-run coordinates).
    pub selection: Selection,
}

impl ActionOutcome {
    /// No edits; the selection only moves with the drift.
    pub fn unchanged(selection: &Selection, ctx: &ActionContext<'_>) -> Self {
        Self {
            edits: Vec::new(),
            selection: ctx.drift.map_selection(selection),
        }
    }

    /// No edits; the selection becomes `selection`.
    pub fn moved(selection: Selection) -> Self {
        Self {
            edits: Vec::new(),
            selection,
        }
    }

    /// Edits plus the resulting selection.
    pub fn edited(edits: Vec<Edit>, selection: Selection) -> Self {
        Self { edits, selection }
    }
}

/// An operation designed for one selection.
pub trait SelectionAction {
    /// Compute the edits and the new selection for `selection`.
    fn apply(
        &self,
        doc: &dyn Document,
        selection: &Selection,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionOutcome>;
}

impl<F> SelectionAction for F
where
    F: Fn(&dyn Document, &Selection, &ActionContext<'_>) -> Result<ActionOutcome>,
{
    fn apply(
        &self,
        doc: &dyn Document,
        selection: &Selection,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionOutcome> {
        self(doc, selection, ctx)
    }
}

/// Rewrites the final selection list.
pub type SelectionHandler = dyn Fn(Vec<Selection>) -> Vec<Selection>;

/// Engine options.
#[derive(Clone, Copy)]
pub struct MultiSelectionOptions<'a> {
    /// Run the action for every selection even when several share a head line.
    pub repeat_same_line_actions: bool,
    /// Merge new selections that start on the same line.
    pub combine_same_line_selections: bool,
    /// Final rewrite of the selection list.
    pub selection_handler: Option<&'a SelectionHandler>,
}

impl Default for MultiSelectionOptions<'_> {
    fn default() -> Self {
        Self {
            repeat_same_line_actions: true,
            combine_same_line_selections: false,
            selection_handler: None,
        }
    }
}

impl fmt::Debug for MultiSelectionOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSelectionOptions")
            .field("repeat_same_line_actions", &self.repeat_same_line_actions)
            .field(
                "combine_same_line_selections",
                &self.combine_same_line_selections,
            )
            .field("selection_handler", &self.selection_handler.is_some())
            .finish()
    }
}

impl<'a> MultiSelectionOptions<'a> {
    /// Set [`MultiSelectionOptions::repeat_same_line_actions`].
    pub fn repeat_same_line_actions(mut self, value: bool) -> Self {
        self.repeat_same_line_actions = value;
        self
    }

    /// Set [`MultiSelectionOptions::combine_same_line_selections`].
    pub fn combine_same_line_selections(mut self, value: bool) -> Self {
        self.combine_same_line_selections = value;
        self
    }

    /// Set [`MultiSelectionOptions::selection_handler`].
    pub fn selection_handler(mut self, handler: &'a SelectionHandler) -> Self {
        self.selection_handler = Some(handler);
        self
    }
}

/// Spread new cursors that share a line over consecutive lines.
///
/// Used with the immediate sink for "insert line below", where every cursor on one original
/// line reports the same new line.
pub fn spread_same_line_selections(selections: Vec<Selection>) -> Vec<Selection> {
    let mut run_line = None;
    let mut offset = 0;
    selections
        .into_iter()
        .map(|sel| {
            if run_line == Some(sel.head.line) {
                offset += 1;
            } else {
                run_line = Some(sel.head.line);
                offset = 0;
            }
            sel.map(|p| Position::new(p.line + offset, p.column))
        })
        .collect()
}

/// Apply `action` to every selection of `host` and commit through `sink`.
///
/// Zero selections is a no-op. The run either commits fully or returns the first error; with
/// the immediate sink edits already applied stay applied.
pub fn apply_across_selections(
    host: &mut dyn EditorHost,
    action: &dyn SelectionAction,
    settings: &Settings,
    options: &MultiSelectionOptions<'_>,
    sink: &mut dyn EditSink,
) -> Result<()> {
    let selections = host.selections();
    if selections.is_empty() {
        return Ok(());
    }
    if !is_document_ordered(&selections) {
        return Err(EditorError::UnorderedSelections);
    }

    let targets: Vec<(usize, Selection)> = if options.repeat_same_line_actions {
        selections.iter().copied().enumerate().collect()
    } else {
        let kept = first_per_head_line(&selections);
        selections
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, sel)| kept.contains(sel))
            .collect()
    };

    debug!(
        selections = selections.len(),
        targets = targets.len(),
        mode = ?sink.mode(),
        "applying action across selections"
    );

    sink.begin(host);
    match collect_outcomes(host, action, settings, options, sink, &targets) {
        Ok(new_selections) => sink.commit(host, new_selections),
        Err(err) => {
            sink.abandon(host);
            Err(err)
        }
    }
}

fn collect_outcomes(
    host: &mut dyn EditorHost,
    action: &dyn SelectionAction,
    settings: &Settings,
    options: &MultiSelectionOptions<'_>,
    sink: &mut dyn EditSink,
    targets: &[(usize, Selection)],
) -> Result<Vec<Selection>> {
    let live = sink.mode() == EngineMode::Immediate;
    let mut drift = Drift::default();
    let mut new_selections: Vec<Selection> = Vec::with_capacity(targets.len());

    for (iteration, (index, original)) in targets.iter().enumerate() {
        let (selection, fresh) = if live {
            // Selections may disappear as earlier edits merge them.
            let Some(current) = host.selections().get(*index).copied() else {
                continue;
            };
            (current, Drift::starting_at(iteration))
        } else {
            (*original, Drift::default())
        };
        let ctx = ActionContext {
            drift: if live { &fresh } else { &drift },
            settings,
        };

        let outcome = action.apply(&*host, &selection, &ctx)?;
        trace!(
            iteration,
            edits = outcome.edits.len(),
            selection = ?outcome.selection,
            "action applied"
        );

        if !live {
            drift = drift.advance(&outcome.edits);
        }
        sink.push(host, outcome.edits)?;

        if options.combine_same_line_selections {
            push_combining_same_line(&mut new_selections, outcome.selection);
        } else {
            new_selections.push(outcome.selection);
        }
    }

    Ok(match options.selection_handler {
        Some(handler) => handler(new_selections),
        None => new_selections,
    })
}
