//! Occurrence search for the selection commands.
//!
//! Queries are always literal: the text is escaped and compiled into a regex. All offsets are
//! **character offsets** (not byte offsets) into the document text, and matches are half-open
//! ranges. Whole-word matching is checked after the regex match with a Unicode-aware notion of
//! a word character, since `\b` in most engines stops at ASCII.

use crate::error::Result;
use crate::host::Document;
use crate::position::{Position, Selection};
use crate::text::word_range_at;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// A match expressed as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) | Err(idx) => idx,
        }
    }

    fn char_at(&self, text: &str, char_offset: usize) -> Option<char> {
        if char_offset >= self.char_count() {
            return None;
        }
        let start = self.char_to_byte[char_offset];
        let end = self.char_to_byte[char_offset + 1];
        text.get(start..end)?.chars().next()
    }
}

fn compile_literal(query: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(&regex::escape(query))
        .multi_line(true)
        .build()?)
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_whole_word(text: &str, index: &CharIndex, m: SearchMatch) -> bool {
    let before = m
        .start
        .checked_sub(1)
        .and_then(|prev| index.char_at(text, prev));
    let after = index.char_at(text, m.end);

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Find every non-overlapping occurrence of `query` in `text`.
///
/// With `search_within_words == false` only occurrences bounded by non-word characters (or the
/// text edges) are returned.
pub fn find_all_matches(
    text: &str,
    query: &str,
    search_within_words: bool,
) -> Result<Vec<SearchMatch>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_literal(query)?;
    let index = CharIndex::new(text);

    let mut matches = Vec::new();
    let mut start_byte = 0;
    while let Some(m) = re.find_at(text, start_byte) {
        let candidate = SearchMatch {
            start: index.byte_to_char(m.start()),
            end: index.byte_to_char(m.end()),
        };
        if candidate.is_empty() {
            break;
        }
        if !search_within_words && !is_whole_word(text, &index, candidate) {
            // A rejected match may hide a valid one starting inside it.
            start_byte = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        start_byte = m.end();
        matches.push(candidate);
    }

    debug!(query, matches = matches.len(), search_within_words, "searched document");
    Ok(matches)
}

/// Search text derived from the current selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchText {
    /// Text to look for (may be empty).
    pub text: String,
    /// Every selection holds this same text.
    pub single: bool,
}

/// Derive the search text from `selections`.
///
/// When the first selection is a cursor and `auto_expand` is set, the word under it is used.
pub fn canonical_search_text(
    doc: &dyn Document,
    selections: &[Selection],
    auto_expand: bool,
) -> SearchText {
    let texts: Vec<String> = selections
        .iter()
        .map(|sel| doc.range_text(sel.from(), sel.to()))
        .collect();
    let single = texts.windows(2).all(|w| w[0] == w[1]);
    let mut text = texts.into_iter().next().unwrap_or_default();

    if text.is_empty()
        && auto_expand
        && let Some(first) = selections.first()
    {
        let from = first.from();
        let line = doc.line(from.line).unwrap_or_default();
        let word = word_range_at(from, &line);
        text = doc.range_text(word.from(), word.to());
    }

    SearchText { text, single }
}

fn match_selection(doc: &dyn Document, m: SearchMatch) -> Selection {
    Selection::new(doc.offset_to_pos(m.start), doc.offset_to_pos(m.end))
}

/// Every occurrence of `query` as a selection, in document order.
pub fn find_all_occurrences(
    doc: &dyn Document,
    query: &str,
    search_within_words: bool,
) -> Result<Vec<Selection>> {
    Ok(find_all_matches(&doc.text(), query, search_within_words)?
        .into_iter()
        .map(|m| match_selection(doc, m))
        .collect())
}

/// First occurrence starting strictly after `after`.
///
/// Without one, wraps to the first occurrence in the document that does not start where one
/// of `existing` starts.
pub fn find_next_match_after(
    doc: &dyn Document,
    query: &str,
    after: Position,
    search_within_words: bool,
    existing: &[Selection],
) -> Result<Option<Selection>> {
    let matches = find_all_matches(&doc.text(), query, search_within_words)?;
    let after_offset = doc.pos_to_offset(after);

    if let Some(m) = matches.iter().find(|m| m.start > after_offset) {
        return Ok(Some(match_selection(doc, *m)));
    }

    let taken: Vec<usize> = existing
        .iter()
        .map(|sel| doc.pos_to_offset(sel.from()))
        .collect();
    Ok(matches
        .iter()
        .find(|m| !taken.contains(&m.start))
        .map(|m| match_selection(doc, *m)))
}
