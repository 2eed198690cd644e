//! Operations designed for one selection.
//!
//! Every operation reads the document, takes the selection it is responsible for and returns
//! an [`ActionOutcome`]: the edits (in the coordinates of the document it was given) and the
//! new selection (mapped through [`crate::Drift`] so it is valid once the whole run commits).
//! [`Action`] bundles them as a tagged value with strongly typed arguments, and
//! [`Action::options`] carries the per-operation engine options.

use crate::case::{CaseType, apply_case};
use crate::edit::{Edit, EngineMode};
use crate::engine::{
    ActionContext, ActionOutcome, MultiSelectionOptions, SelectionAction, SelectionHandler,
    spread_same_line_selections,
};
use crate::error::Result;
use crate::host::Document;
use crate::list::{
    ListContinuation, ListInsert, detect_list_prefix, is_ordered_prefix, join_trim_len,
    next_list_prefix, ordered_number_span, renumber_list_from,
};
use crate::position::{
    Position, Selection, clamp_position, document_end, line_end, line_len, line_start, line_text,
};
use crate::scan::{DelimiterKind, enclosing_range};
use crate::text::{char_len, char_slice, leading_whitespace, word_range_at};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalDirection {
    /// Towards the first line.
    Up,
    /// Towards the last line.
    Down,
}

/// Left or right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalDirection {
    /// Towards the line start.
    Left,
    /// Towards the line end.
    Right,
}

/// Start or end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineBoundary {
    /// Column 0.
    Start,
    /// After the last character.
    End,
}

/// Target of [`Action::NavigateLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineTarget {
    /// Line above the head.
    Prev,
    /// Line below the head.
    Next,
    /// Start of the document.
    First,
    /// End of the document.
    Last,
}

/// One-step cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorDirection {
    /// One line up.
    Up,
    /// One line down.
    Down,
    /// One character back.
    Left,
    /// One character forward.
    Right,
}

/// A single-selection operation with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open a line above the head line.
    InsertLineAbove,
    /// Open a line below the head line.
    InsertLineBelow,
    /// Delete every line the selection touches.
    DeleteLines,
    /// Delete from the head back to the line start.
    DeleteToLineStart,
    /// Delete from the head to the line end.
    DeleteToLineEnd,
    /// Pull the following line(s) onto the first selected line.
    JoinLines,
    /// Duplicate the selected lines.
    CopyLine(VerticalDirection),
    /// Select whole lines.
    SelectLine,
    /// Expand a cursor to the word under it.
    SelectWord,
    /// Jump to a line boundary.
    GoToLineBoundary(LineBoundary),
    /// Move the head to another line.
    NavigateLine(LineTarget),
    /// Move the cursor one step.
    MoveCursor(CursorDirection),
    /// Move the cursor by one word.
    MoveWord(HorizontalDirection),
    /// Change the case of the selected text.
    TransformCase(CaseType),
    /// Select the content between the nearest enclosing delimiters.
    ExpandSelection(DelimiterKind),
}

const SPREAD_SAME_LINE: &SelectionHandler = &spread_same_line_selections;

impl Action {
    /// Engine options this action runs with under `mode`.
    pub fn options(self, mode: EngineMode) -> MultiSelectionOptions<'static> {
        let options = MultiSelectionOptions::default();
        match self {
            Self::DeleteLines => options
                .repeat_same_line_actions(false)
                .combine_same_line_selections(true),
            Self::JoinLines => options.repeat_same_line_actions(false),
            Self::InsertLineBelow if mode == EngineMode::Immediate => {
                options.selection_handler(SPREAD_SAME_LINE)
            }
            _ => options,
        }
    }
}

impl SelectionAction for Action {
    fn apply(
        &self,
        doc: &dyn Document,
        selection: &Selection,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionOutcome> {
        match *self {
            Self::InsertLineAbove => insert_line_above(doc, selection, ctx),
            Self::InsertLineBelow => insert_line_below(doc, selection, ctx),
            Self::DeleteLines => delete_lines(doc, selection, ctx),
            Self::DeleteToLineStart => delete_to_line_start(doc, selection, ctx),
            Self::DeleteToLineEnd => delete_to_line_end(doc, selection, ctx),
            Self::JoinLines => join_lines(doc, selection, ctx),
            Self::CopyLine(direction) => copy_line(doc, selection, ctx, direction),
            Self::SelectLine => select_line(doc, selection, ctx),
            Self::SelectWord => select_word(doc, selection, ctx),
            Self::GoToLineBoundary(boundary) => {
                go_to_line_boundary(doc, selection, ctx, boundary)
            }
            Self::NavigateLine(target) => navigate_line(doc, selection, ctx, target),
            Self::MoveCursor(direction) => move_cursor(doc, selection, ctx, direction),
            Self::MoveWord(direction) => move_word(doc, selection, ctx, direction),
            Self::TransformCase(case) => transform_case(doc, selection, ctx, case),
            Self::ExpandSelection(kind) => expand_selection(doc, selection, ctx, kind),
        }
    }
}

/// Number an earlier iteration already gave the ordered marker at `from..to`.
fn renumbered_to(ctx: &ActionContext<'_>, from: Position, to: Position) -> Option<u64> {
    ctx.drift.replacement(from, to)?.parse().ok()
}

/// Text of `line` with its ordered marker as earlier iterations renumbered it.
fn current_line_text(doc: &dyn Document, line: usize, ctx: &ActionContext<'_>) -> Result<String> {
    let text = line_text(doc, line)?;
    let Some((start, end)) = ordered_number_span(&text) else {
        return Ok(text);
    };
    let from = Position::new(line, start);
    let to = Position::new(line, end);
    Ok(match renumbered_to(ctx, from, to) {
        Some(number) => format!(
            "{}{number}{}",
            char_slice(&text, 0, start),
            char_slice(&text, end, char_len(&text))
        ),
        None => text,
    })
}

/// Bump the ordered markers from `from_line` on, continuing from the numbers earlier
/// iterations assigned.
fn renumbering(
    doc: &dyn Document,
    from_line: usize,
    indentation: &str,
    ctx: &ActionContext<'_>,
) -> Vec<Edit> {
    renumber_list_from(doc, from_line, indentation, |from, to, number| {
        renumbered_to(ctx, from, to).unwrap_or(number)
    })
}

/// Insert a line above the head line, continuing its list item when the line above is part
/// of the same list.
pub fn insert_line_above(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let line = clamp_position(doc, selection.head).line;
    let text = current_line_text(doc, line, ctx)?;
    let indentation = leading_whitespace(&text);
    let markers = &ctx.settings.list_markers;

    let mut prefix = String::new();
    let mut renumbered = Vec::new();
    if ctx.settings.auto_insert_list_prefix
        && line > 0
        && !line_text(doc, line - 1)?.trim().is_empty()
    {
        prefix = match next_list_prefix(&text, ListInsert::Before, markers) {
            ListContinuation::Continue(prefix) => prefix,
            ListContinuation::EndList => detect_list_prefix(&text, markers).to_string(),
        };
        if is_ordered_prefix(&prefix) {
            renumbered = renumbering(doc, line, indentation, ctx);
        }
    }

    let mut edits = vec![Edit::insert(
        line_start(line),
        format!("{indentation}{prefix}\n"),
    )];
    edits.extend(renumbered);

    let cursor = Position::new(
        ctx.drift.map(line_start(line)).line,
        char_len(indentation) + char_len(&prefix),
    );
    Ok(ActionOutcome::edited(edits, Selection::cursor(cursor)))
}

/// Insert a line below the head line, continuing its list item.
///
/// On an empty list item (with list continuation enabled) the item's content is removed
/// instead and the cursor lands at the start of the now empty line.
pub fn insert_line_below(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let line = clamp_position(doc, selection.head).line;
    let text = current_line_text(doc, line, ctx)?;
    let indentation = leading_whitespace(&text);
    let end = line_end(doc, line)?;

    let mut prefix = String::new();
    let mut renumbered = Vec::new();
    if ctx.settings.auto_insert_list_prefix {
        match next_list_prefix(&text, ListInsert::After, &ctx.settings.list_markers) {
            ListContinuation::EndList => {
                let start = line_start(line);
                return Ok(ActionOutcome::edited(
                    vec![Edit::delete(start, end)],
                    Selection::cursor(ctx.drift.map(start)),
                ));
            }
            ListContinuation::Continue(next) => prefix = next,
        }
        if is_ordered_prefix(&prefix) {
            renumbered = renumbering(doc, line + 1, indentation, ctx);
        }
    }

    let mut edits = vec![Edit::insert(end, format!("\n{indentation}{prefix}"))];
    edits.extend(renumbered);

    let cursor = Position::new(
        ctx.drift.map(end).line + 1,
        char_len(indentation) + char_len(&prefix),
    );
    Ok(ActionOutcome::edited(edits, Selection::cursor(cursor)))
}

/// Delete every line the selection touches.
///
/// A selection ending at column 0 of a later line leaves that line alone. On the last line
/// the line break before the remaining lines goes instead of the following one, also when
/// earlier iterations deleted the lines right above.
pub fn delete_lines(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let bounds = selection.boundaries();
    let from = clamp_position(doc, bounds.from);
    let last = doc.last_line();
    let to_line = bounds.last_content_line().min(last);

    if to_line == last {
        let start_line = ctx.drift.deleted_lines_start(from.line);
        let own = Edit::delete(line_start(from.line), line_end(doc, last)?);
        if start_line == 0 {
            return Ok(ActionOutcome::edited(
                vec![own],
                Selection::cursor(ctx.drift.map(line_start(from.line))),
            ));
        }

        let prev = start_line - 1;
        let line_break = Edit::delete(line_end(doc, prev)?, line_start(start_line));
        let edits = if start_line == from.line {
            vec![Edit::delete(line_break.from, own.to)]
        } else {
            vec![line_break, own]
        };
        let cursor = Position::new(
            ctx.drift.map(line_start(prev)).line,
            from.column.min(line_len(doc, prev)?),
        );
        return Ok(ActionOutcome::edited(edits, Selection::cursor(cursor)));
    }

    let cursor = Position::new(
        ctx.drift.map(line_start(from.line)).line,
        bounds.to.column.min(line_len(doc, to_line + 1)?),
    );
    Ok(ActionOutcome::edited(
        vec![Edit::delete(line_start(from.line), line_start(to_line + 1))],
        Selection::cursor(cursor),
    ))
}

/// Delete from the head to the start of its line, or the preceding line break at column 0.
pub fn delete_to_line_start(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let head = clamp_position(doc, selection.head);
    if head == Position::default() {
        return Ok(ActionOutcome::unchanged(selection, ctx));
    }

    let start = if head.column == 0 {
        line_end(doc, head.line - 1)?
    } else {
        line_start(head.line)
    };
    Ok(ActionOutcome::edited(
        vec![Edit::delete(start, head)],
        Selection::cursor(ctx.drift.map(start)),
    ))
}

/// Delete from the head to the end of its line, or the following line break at the end.
pub fn delete_to_line_end(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let head = clamp_position(doc, selection.head);
    let mut end = line_end(doc, head.line)?;
    if head == end {
        if head.line >= doc.last_line() {
            return Ok(ActionOutcome::unchanged(selection, ctx));
        }
        end = line_start(head.line + 1);
    }
    Ok(ActionOutcome::edited(
        vec![Edit::delete(head, end)],
        Selection::cursor(ctx.drift.map(head)),
    ))
}

/// Join the line(s) below onto the first selected line.
///
/// Each joined line loses its indentation and one list or quote marker. A single space
/// separates the parts unless the line already ends in one or the joined content is empty.
pub fn join_lines(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let bounds = selection.boundaries();
    let line = bounds.from.line;
    let last = doc.last_line();
    let limit = bounds.to.line.saturating_sub(line).max(1);
    let markers = &ctx.settings.list_markers;

    let mut current_len = line_len(doc, line)?;
    let mut ends_with_space =
        ctx.drift.char_before(doc, Position::new(line, current_len)) == Some(' ');
    let mut edits = Vec::new();
    for i in 0..limit {
        let next = line + i + 1;
        if next > last {
            break;
        }
        let next_text = line_text(doc, next)?;
        let next_len = char_len(&next_text);
        let trim = join_trim_len(&next_text, markers);
        let content = char_slice(&next_text, trim, next_len);
        let separator = if !content.is_empty() && !ends_with_space {
            " "
        } else {
            ""
        };

        edits.push(Edit::replace(
            Position::new(line + i, current_len),
            Position::new(next, trim),
            separator,
        ));
        if !content.is_empty() {
            ends_with_space = content.ends_with(' ');
        }
        current_len = next_len;
    }

    let new_selection = if selection.is_empty() {
        let cursor = match edits.split_last() {
            Some((own, earlier)) => ctx.drift.clone().advance(earlier).map(own.from),
            None => ctx.drift.map(line_end(doc, line)?),
        };
        Selection::cursor(cursor)
    } else {
        let from = ctx.drift.map(bounds.from);
        let to = ctx.drift.clone().advance(&edits).map(bounds.to);
        selection.reshaped(from, to)
    };
    Ok(ActionOutcome::edited(edits, new_selection))
}

/// Duplicate the lines the selection touches.
///
/// Copying up leaves the selection on the original lines (now the lower copy); copying down
/// moves it along to the new lines.
pub fn copy_line(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
    direction: VerticalDirection,
) -> Result<ActionOutcome> {
    let bounds = selection.boundaries();
    let from_start = line_start(bounds.from.line);
    let to_end = line_end(doc, bounds.last_content_line())?;
    let contents = doc.range_text(from_start, to_end);

    Ok(match direction {
        VerticalDirection::Up => ActionOutcome::edited(
            vec![Edit::insert(to_end, format!("\n{contents}"))],
            ctx.drift.map_selection(selection),
        ),
        VerticalDirection::Down => {
            let edits = vec![Edit::insert(from_start, format!("{contents}\n"))];
            let drift = ctx.drift.clone().advance(&edits);
            ActionOutcome::edited(edits, drift.map_selection(selection))
        }
    })
}

/// Select whole lines, growing by one line when whole lines are already selected.
pub fn select_line(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let bounds = selection.boundaries();
    let last = doc.last_line();
    let to = if bounds.to.line < last {
        line_start(bounds.to.line + 1)
    } else {
        line_end(doc, last)?
    };
    let selected = Selection::new(line_start(bounds.from.line.min(last)), to);
    Ok(ActionOutcome::moved(ctx.drift.map_selection(&selected)))
}

/// Expand a cursor to the word under it. Ranges stay as they are.
pub fn select_word(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    if !selection.is_empty() {
        return Ok(ActionOutcome::unchanged(selection, ctx));
    }
    let head = clamp_position(doc, selection.head);
    let word = word_range_at(head, &line_text(doc, head.line)?);
    Ok(ActionOutcome::moved(ctx.drift.map_selection(&word)))
}

/// Place a cursor at the start of the first or the end of the last selected line.
pub fn go_to_line_boundary(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
    boundary: LineBoundary,
) -> Result<ActionOutcome> {
    let bounds = selection.boundaries();
    let target = match boundary {
        LineBoundary::Start => line_start(clamp_position(doc, bounds.from).line),
        LineBoundary::End => line_end(doc, clamp_position(doc, bounds.to).line)?,
    };
    Ok(ActionOutcome::moved(Selection::cursor(ctx.drift.map(target))))
}

/// Move the head to another line, keeping its column where the target line allows.
pub fn navigate_line(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
    target: LineTarget,
) -> Result<ActionOutcome> {
    let head = clamp_position(doc, selection.head);
    let last = doc.last_line();
    let pos = match target {
        LineTarget::Prev => {
            let line = head.line.saturating_sub(1);
            Position::new(line, head.column.min(line_len(doc, line)?))
        }
        LineTarget::Next => {
            let line = (head.line + 1).min(last);
            Position::new(line, head.column.min(line_len(doc, line)?))
        }
        LineTarget::First => Position::default(),
        LineTarget::Last => document_end(doc),
    };
    Ok(ActionOutcome::moved(Selection::cursor(ctx.drift.map(pos))))
}

/// Move the head one step and collapse the selection there.
pub fn move_cursor(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
    direction: CursorDirection,
) -> Result<ActionOutcome> {
    let head = clamp_position(doc, selection.head);
    let pos = match direction {
        CursorDirection::Up => {
            return navigate_line(doc, selection, ctx, LineTarget::Prev);
        }
        CursorDirection::Down => {
            return navigate_line(doc, selection, ctx, LineTarget::Next);
        }
        CursorDirection::Left if head.column > 0 => Position::new(head.line, head.column - 1),
        CursorDirection::Left if head.line > 0 => line_end(doc, head.line - 1)?,
        CursorDirection::Left => head,
        CursorDirection::Right => {
            if head.column < line_len(doc, head.line)? {
                Position::new(head.line, head.column + 1)
            } else if head.line < doc.last_line() {
                line_start(head.line + 1)
            } else {
                head
            }
        }
    };
    Ok(ActionOutcome::moved(Selection::cursor(ctx.drift.map(pos))))
}

fn is_word_segment(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// Column at the end of the first word ending after `column`.
fn word_end_after(line: &str, column: usize) -> Option<usize> {
    let byte = line.char_indices().nth(column).map_or(line.len(), |(b, _)| b);
    line.split_word_bound_indices()
        .find(|(start, segment)| start + segment.len() > byte && is_word_segment(segment))
        .map(|(start, segment)| char_len(&line[..start + segment.len()]))
}

/// Column at the start of the last word starting before `column`.
fn word_start_before(line: &str, column: usize) -> Option<usize> {
    let byte = line.char_indices().nth(column).map_or(line.len(), |(b, _)| b);
    line.split_word_bound_indices()
        .rev()
        .find(|(start, segment)| *start < byte && is_word_segment(segment))
        .map(|(start, _)| char_len(&line[..start]))
}

/// Move the cursor to the next word end or the previous word start.
///
/// At a line edge the move continues on the neighbouring line.
pub fn move_word(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
    direction: HorizontalDirection,
) -> Result<ActionOutcome> {
    let mut head = clamp_position(doc, selection.head);
    let pos = match direction {
        HorizontalDirection::Right => {
            let mut text = line_text(doc, head.line)?;
            if head.column >= char_len(&text) && head.line < doc.last_line() {
                head = line_start(head.line + 1);
                text = line_text(doc, head.line)?;
            }
            let column = word_end_after(&text, head.column).unwrap_or(char_len(&text));
            Position::new(head.line, column)
        }
        HorizontalDirection::Left => {
            let mut text = line_text(doc, head.line)?;
            if head.column == 0 && head.line > 0 {
                text = line_text(doc, head.line - 1)?;
                head = Position::new(head.line - 1, char_len(&text));
            }
            Position::new(head.line, word_start_before(&text, head.column).unwrap_or(0))
        }
    };
    Ok(ActionOutcome::moved(Selection::cursor(ctx.drift.map(pos))))
}

/// Change the case of the selection, or of the word under a cursor.
///
/// The selection itself is kept.
pub fn transform_case(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
    case: CaseType,
) -> Result<ActionOutcome> {
    let (from, to) = if selection.is_empty() {
        let head = clamp_position(doc, selection.head);
        let word = word_range_at(head, &line_text(doc, head.line)?);
        (word.from(), word.to())
    } else {
        (selection.from(), selection.to())
    };

    let text = doc.range_text(from, to);
    let replaced = apply_case(&text, case, &ctx.settings.title_case);
    if replaced == text {
        return Ok(ActionOutcome::unchanged(selection, ctx));
    }

    let edits = vec![Edit::replace(from, to, replaced)];
    let new_selection = if selection.is_empty() {
        ctx.drift.map_selection(selection)
    } else {
        let after = ctx.drift.clone().advance(&edits);
        selection.reshaped(ctx.drift.map(from), after.map(to))
    };
    Ok(ActionOutcome::edited(edits, new_selection))
}

/// Select the content of the nearest enclosing delimiter pair; without one the selection is
/// left alone.
pub fn expand_selection(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
    kind: DelimiterKind,
) -> Result<ActionOutcome> {
    let expanded = enclosing_range(doc, selection, &kind.pairs()).unwrap_or(*selection);
    Ok(ActionOutcome::moved(ctx.drift.map_selection(&expanded)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::engine::Drift;
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;

    fn run(text: &str, action: Action, selection: Selection) -> (Vec<Edit>, Selection) {
        let doc = TextBuffer::new(text);
        let drift = Drift::default();
        let settings = Settings::default();
        let ctx = ActionContext {
            drift: &drift,
            settings: &settings,
        };
        let outcome = action.apply(&doc, &selection, &ctx).unwrap();
        (outcome.edits, outcome.selection)
    }

    fn caret(line: usize, column: usize) -> Selection {
        Selection::cursor(Position::new(line, column))
    }

    #[test]
    fn test_insert_line_above_plain() {
        let (edits, sel) = run("lorem ipsum\ndolor sit", Action::InsertLineAbove, caret(1, 3));
        assert_eq!(edits, vec![Edit::insert(Position::new(1, 0), "\n")]);
        assert_eq!(sel, caret(1, 0));
    }

    #[test]
    fn test_insert_line_below_ends_empty_list_item() {
        let (edits, sel) = run("- aaa\n- ", Action::InsertLineBelow, caret(1, 2));
        assert_eq!(edits, vec![Edit::delete(Position::new(1, 0), Position::new(1, 2))]);
        assert_eq!(sel, caret(1, 0));
    }

    #[test]
    fn test_delete_to_line_start_at_document_start_is_noop() {
        let (edits, sel) = run("abc", Action::DeleteToLineStart, caret(0, 0));
        assert!(edits.is_empty());
        assert_eq!(sel, caret(0, 0));
    }

    #[test]
    fn test_delete_to_line_end_joins_at_line_end() {
        let (edits, sel) = run("ab\ncd", Action::DeleteToLineEnd, caret(0, 2));
        assert_eq!(edits, vec![Edit::delete(Position::new(0, 2), Position::new(1, 0))]);
        assert_eq!(sel, caret(0, 2));
    }

    #[test]
    fn test_join_lines_on_last_line_is_noop() {
        let (edits, sel) = run("ab\ncd", Action::JoinLines, caret(1, 1));
        assert!(edits.is_empty());
        assert_eq!(sel, caret(1, 2));
    }

    #[test]
    fn test_word_motion_helpers() {
        assert_eq!(word_end_after("lorem ipsum", 0), Some(5));
        assert_eq!(word_end_after("lorem ipsum", 5), Some(11));
        assert_eq!(word_end_after("lorem ipsum", 11), None);
        assert_eq!(word_start_before("lorem ipsum", 11), Some(6));
        assert_eq!(word_start_before("lorem ipsum", 6), Some(0));
        assert_eq!(word_start_before("  lorem", 2), None);
    }

    #[test]
    fn test_move_word_crosses_line_edges() {
        let text = "lorem\nipsum dolor";
        let (_, sel) = run(text, Action::MoveWord(HorizontalDirection::Right), caret(0, 5));
        assert_eq!(sel, caret(1, 5));
        let (_, sel) = run(text, Action::MoveWord(HorizontalDirection::Left), caret(1, 0));
        assert_eq!(sel, caret(0, 0));
    }

    #[test]
    fn test_options_per_action() {
        let options = Action::DeleteLines.options(EngineMode::Transaction);
        assert!(!options.repeat_same_line_actions);
        assert!(options.combine_same_line_selections);
        let below = Action::InsertLineBelow;
        assert!(below.options(EngineMode::Transaction).selection_handler.is_none());
        assert!(below.options(EngineMode::Immediate).selection_handler.is_some());
    }
}
