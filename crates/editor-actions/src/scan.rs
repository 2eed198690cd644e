//! Character scanning across line boundaries and delimiter matching.

use crate::host::Document;
use crate::position::{Position, Selection, clamp_position};
use editor_actions_lang::MatchingPairs;
use serde::{Deserialize, Serialize};

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Towards the end of the document.
    Forward,
    /// Towards the start of the document.
    Backward,
}

/// A character found by [`scan_for_character`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharMatch {
    /// The matched character.
    pub ch: char,
    /// Boundary on the side the scan came from: just after the character for a backward
    /// scan, just before it for a forward scan.
    pub pos: Position,
}

/// Walk from `start` one character at a time until `predicate` accepts one.
///
/// A forward scan looks at the character at `start` first, a backward scan at the one before
/// it. Line breaks are skipped. Returns `None` when the scan runs off the document.
pub fn scan_for_character(
    doc: &dyn Document,
    start: Position,
    direction: ScanDirection,
    mut predicate: impl FnMut(char) -> bool,
) -> Option<CharMatch> {
    let start = clamp_position(doc, start);

    match direction {
        ScanDirection::Forward => {
            let mut line = start.line;
            let mut skip = start.column;
            loop {
                let text = doc.line(line)?;
                for (column, ch) in text.chars().enumerate().skip(skip) {
                    if predicate(ch) {
                        return Some(CharMatch {
                            ch,
                            pos: Position::new(line, column),
                        });
                    }
                }
                line += 1;
                skip = 0;
            }
        }
        ScanDirection::Backward => {
            let mut line = start.line;
            let mut limit = Some(start.column);
            loop {
                let chars: Vec<char> = doc.line(line)?.chars().collect();
                let end = limit.map_or(chars.len(), |l| l.min(chars.len()));
                for column in (0..end).rev() {
                    if predicate(chars[column]) {
                        return Some(CharMatch {
                            ch: chars[column],
                            pos: Position::new(line, column + 1),
                        });
                    }
                }
                line = line.checked_sub(1)?;
                limit = None;
            }
        }
    }
}

/// Which delimiters a selection expansion looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelimiterKind {
    /// `()`, `[]`, `{}`.
    Brackets,
    /// `'`, `"`, `` ` ``.
    Quotes,
    /// Either of the above.
    QuotesOrBrackets,
}

impl DelimiterKind {
    /// Delimiter table for this kind.
    pub fn pairs(self) -> MatchingPairs {
        match self {
            Self::Brackets => MatchingPairs::brackets(),
            Self::Quotes => MatchingPairs::quotes(),
            Self::QuotesOrBrackets => MatchingPairs::quotes_and_brackets(),
        }
    }
}

/// Content between the nearest enclosing delimiter pair around `selection`.
///
/// Balanced bracket pairs met on the way are skipped and closers without a matching opener
/// are ignored. Returns `None` when either side runs off the document.
pub fn enclosing_range(
    doc: &dyn Document,
    selection: &Selection,
    pairs: &MatchingPairs,
) -> Option<Selection> {
    let bounds = selection.boundaries();

    let mut pending_openers: Vec<char> = Vec::new();
    let open = scan_for_character(doc, bounds.from, ScanDirection::Backward, |ch| {
        if let Some(opener) = pairs.opening_for_closer(ch) {
            pending_openers.push(opener);
            return false;
        }
        if !pairs.is_opening(ch) {
            return false;
        }
        if pairs.is_symmetric(ch) {
            return pending_openers.is_empty();
        }
        // Closers of another kind met after this opener are stray and do not hide it.
        match pending_openers.iter().rposition(|&o| o == ch) {
            Some(i) => {
                pending_openers.truncate(i);
                false
            }
            None => true,
        }
    })?;

    let close_ch = pairs.closing_for(open.ch)?;
    let nests = close_ch != open.ch;
    let mut depth = 0usize;
    let close = scan_for_character(doc, bounds.to, ScanDirection::Forward, |ch| {
        if nests && ch == open.ch {
            depth += 1;
            return false;
        }
        if ch != close_ch {
            return false;
        }
        if depth == 0 {
            return true;
        }
        depth -= 1;
        false
    })?;

    Some(Selection::new(open.pos, close.pos))
}
