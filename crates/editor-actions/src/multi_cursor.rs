//! Commands that work on the whole selection list at once.
//!
//! Unlike [`crate::Action`]s these do not run per selection through the engine: they read all
//! selections, compute a new list and hand it back to the host. None of them edits text.

use crate::actions::VerticalDirection;
use crate::error::Result;
use crate::host::EditorHost;
use crate::position::{Position, Selection, line_end, line_len, line_start};
use crate::scan::{DelimiterKind, enclosing_range};
use crate::search::{canonical_search_text, find_all_occurrences, find_next_match_after};
use crate::session::SelectionTracker;
use crate::text::word_range_at;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Editor whose multi-cursor behaviour to emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CodeEditor {
    /// Cursors only.
    #[default]
    #[serde(rename = "vscode")]
    VsCode,
    /// Each line's part of the selection stays selected.
    #[serde(rename = "sublime")]
    Sublime,
}

/// Expand cursors to words, or add the next occurrence of the selected text.
///
/// When every selection holds the same non-empty text, the next occurrence after the last
/// selection is added (wrapping to the top, skipping occurrences already selected). The
/// occurrence must be a whole word unless the user made the first selection by hand.
/// Otherwise every cursor is expanded to the word under it.
pub fn select_word_or_next_occurrence(
    host: &mut dyn EditorHost,
    tracker: &mut SelectionTracker,
) -> Result<()> {
    tracker.mark_programmatic();
    let selections = host.selections();
    let Some(last) = selections.last().copied() else {
        return Ok(());
    };

    let search = canonical_search_text(&*host, &selections, false);
    if !search.text.is_empty() && search.single {
        let within_words = tracker.is_manual();
        let next = find_next_match_after(
            &*host,
            &search.text,
            last.from(),
            within_words,
            &selections,
        )?;
        debug!(query = %search.text, within_words, found = next.is_some(), "next occurrence");

        let revealed = next.unwrap_or(last);
        let mut updated = selections;
        updated.extend(next);
        host.set_selections(updated);
        host.scroll_into_view(revealed.from(), revealed.to());
        return Ok(());
    }

    let mut updated = Vec::with_capacity(selections.len());
    for sel in selections {
        if !sel.is_empty() {
            updated.push(sel);
            continue;
        }
        let from = sel.from();
        let line = host.line(from.line).unwrap_or_default();
        updated.push(word_range_at(from, &line));
        tracker.mark_expanded();
    }
    host.set_selections(updated);
    Ok(())
}

/// Select every occurrence of the selected text (or of the word under the first cursor).
///
/// Does nothing when the selections hold different texts.
pub fn select_all_occurrences(host: &mut dyn EditorHost) -> Result<()> {
    let selections = host.selections();
    if selections.is_empty() {
        return Ok(());
    }
    let search = canonical_search_text(&*host, &selections, true);
    if !search.single || search.text.is_empty() {
        return Ok(());
    }

    let matches = find_all_occurrences(&*host, &search.text, true)?;
    debug!(query = %search.text, matches = matches.len(), "select all occurrences");
    if !matches.is_empty() {
        host.set_selections(matches);
    }
    Ok(())
}

/// Split a single selection into one cursor (or segment) per line it spans.
///
/// A line reached only through a trailing line break gets no cursor.
pub fn add_cursors_to_selection_ends(
    host: &mut dyn EditorHost,
    emulate: CodeEditor,
) -> Result<()> {
    let selections = host.selections();
    let [selection] = selections.as_slice() else {
        return Ok(());
    };

    let bounds = selection.boundaries();
    let mut updated = Vec::new();
    for line in bounds.from.line..=bounds.last_content_line() {
        let head = if line == bounds.to.line {
            bounds.to
        } else {
            line_end(&*host, line)?
        };
        let anchor = match emulate {
            CodeEditor::VsCode => head,
            CodeEditor::Sublime if line == bounds.from.line => bounds.from,
            CodeEditor::Sublime => line_start(line),
        };
        updated.push(Selection::new(anchor, head));
    }
    host.set_selections(updated);
    Ok(())
}

/// Add the content of the quotes or brackets around the first selection as a new selection.
pub fn expand_first_to_quotes_or_brackets(host: &mut dyn EditorHost) {
    let mut selections = host.selections();
    let Some(first) = selections.first().copied() else {
        return;
    };
    let pairs = DelimiterKind::QuotesOrBrackets.pairs();
    selections.push(enclosing_range(&*host, &first, &pairs).unwrap_or(first));
    host.set_selections(selections);
}

/// Add a copy of every selection one line up or down.
///
/// Selections whose head is already on the first (or last) line get no copy. Columns are
/// clamped to the length of the head's target line.
pub fn insert_cursor(host: &mut dyn EditorHost, direction: VerticalDirection) -> Result<()> {
    let mut selections = host.selections();
    let last = host.last_line();

    let mut added = Vec::new();
    for sel in &selections {
        let target = match direction {
            VerticalDirection::Up if sel.head.line > 0 => sel.head.line - 1,
            VerticalDirection::Down if sel.head.line < last => sel.head.line + 1,
            _ => continue,
        };
        let target_len = line_len(&*host, target)?;
        let anchor_line = match direction {
            VerticalDirection::Up => sel.anchor.line.saturating_sub(1),
            VerticalDirection::Down => sel.anchor.line + 1,
        };
        added.push(Selection::new(
            Position::new(anchor_line, sel.anchor.column.min(target_len)),
            Position::new(target, sel.head.column.min(target_len)),
        ));
    }

    debug!(added = added.len(), ?direction, "insert cursors");
    selections.extend(added);
    host.set_selections(selections);
    Ok(())
}

/// Move the cursor to the start of a 1-based line number typed by the user.
///
/// Returns `false` (and leaves the selections alone) for input that is not a line number of
/// the document.
pub fn go_to_line(host: &mut dyn EditorHost, input: &str) -> bool {
    let Ok(number) = input.trim().parse::<usize>() else {
        return false;
    };
    if number == 0 || number > host.line_count() {
        return false;
    }
    let pos = line_start(number - 1);
    host.set_selections(vec![Selection::cursor(pos)]);
    host.scroll_into_view(pos, pos);
    true
}
