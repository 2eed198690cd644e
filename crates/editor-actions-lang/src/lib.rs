#![warn(missing_docs)]
//! `editor-actions-lang` - data-driven text tables for `editor-actions`.
//!
//! This crate intentionally stays lightweight and does **not** know anything about documents or
//! selections. It provides small structs that hosts can use to configure the editing actions in
//! a language-aware way: which delimiters count as brackets or quotes, which markers open a list
//! item, and which short words title casing keeps in lowercase.

use serde::{Deserialize, Serialize};

/// A set of opening/closing delimiter pairs used by selection expansion.
///
/// Quote-like pairs use the same character on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPairs {
    /// `(open, close)` pairs.
    pub pairs: Vec<(char, char)>,
}

impl MatchingPairs {
    /// `()`, `[]` and `{}`.
    pub fn brackets() -> Self {
        Self {
            pairs: vec![('(', ')'), ('[', ']'), ('{', '}')],
        }
    }

    /// Single, double and back quotes.
    pub fn quotes() -> Self {
        Self {
            pairs: vec![('\'', '\''), ('"', '"'), ('`', '`')],
        }
    }

    /// Union of [`MatchingPairs::quotes`] and [`MatchingPairs::brackets`].
    pub fn quotes_and_brackets() -> Self {
        let mut pairs = Self::quotes().pairs;
        pairs.extend(Self::brackets().pairs);
        Self { pairs }
    }

    /// Returns `true` if `ch` opens one of the pairs.
    pub fn is_opening(&self, ch: char) -> bool {
        self.pairs.iter().any(|(open, _)| *open == ch)
    }

    /// Returns the closing delimiter for an opening delimiter.
    pub fn closing_for(&self, open: char) -> Option<char> {
        self.pairs
            .iter()
            .find(|(o, _)| *o == open)
            .map(|(_, close)| *close)
    }

    /// Returns the opening delimiter of an asymmetric pair closed by `ch`.
    ///
    /// Quote-like pairs never report an opener here since they cannot nest.
    pub fn opening_for_closer(&self, close: char) -> Option<char> {
        self.pairs
            .iter()
            .find(|(o, c)| *c == close && o != c)
            .map(|(open, _)| *open)
    }

    /// Returns `true` if `ch` is a quote-like (symmetric) delimiter.
    pub fn is_symmetric(&self, ch: char) -> bool {
        self.pairs.iter().any(|(o, c)| *o == ch && *c == ch)
    }
}

/// Markers recognized at the start of a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMarkers {
    /// Single-character bullet markers (e.g. `-`, `*`).
    pub bullets: Vec<char>,
    /// Whether `N.` ordered markers are recognized.
    pub ordered: bool,
}

impl Default for ListMarkers {
    fn default() -> Self {
        Self {
            bullets: vec!['-', '+', '*', '>'],
            ordered: true,
        }
    }
}

impl ListMarkers {
    /// Returns `true` if `ch` is a bullet marker.
    pub fn is_bullet(&self, ch: char) -> bool {
        self.bullets.contains(&ch)
    }
}

/// Words that title casing keeps lowercase unless they lead the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleCaseRules {
    /// Lowercase words, compared case-insensitively.
    pub lowercase_words: Vec<String>,
}

impl Default for TitleCaseRules {
    fn default() -> Self {
        Self {
            lowercase_words: ["the", "a", "an"].iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl TitleCaseRules {
    /// Returns `true` if `word` stays lowercase in a non-leading position.
    pub fn keeps_lowercase(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.lowercase_words.iter().any(|w| *w == lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_brackets_close_and_open() {
        let pairs = MatchingPairs::brackets();
        assert!(pairs.is_opening('['));
        assert_eq!(pairs.closing_for('{'), Some('}'));
        assert_eq!(pairs.opening_for_closer(')'), Some('('));
        assert_eq!(pairs.closing_for('"'), None);
    }

    #[test]
    fn test_quotes_are_symmetric() {
        let pairs = MatchingPairs::quotes_and_brackets();
        assert!(pairs.is_symmetric('`'));
        assert!(!pairs.is_symmetric('('));
        assert_eq!(pairs.opening_for_closer('"'), None);
    }

    #[test]
    fn test_title_case_rules_ignore_case() {
        let rules = TitleCaseRules::default();
        assert!(rules.keeps_lowercase("THE"));
        assert!(!rules.keeps_lowercase("then"));
    }
}
