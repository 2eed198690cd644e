//! Character classes and small string helpers shared by the actions.

use crate::position::{Position, Selection};

/// Letters of any script plus ASCII digits.
pub fn is_letter_or_digit(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_ascii_digit()
}

/// Longest whitespace prefix of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

/// Number of characters in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Characters `start..end` of `text`.
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Word under `pos`, or a collapsed selection at `pos` between two non-word characters.
pub fn word_range_at(pos: Position, line: &str) -> Selection {
    let chars: Vec<char> = line.chars().collect();
    let column = pos.column.min(chars.len());

    let mut start = column;
    while start > 0 && is_letter_or_digit(chars[start - 1]) {
        start -= 1;
    }
    let mut end = column;
    while end < chars.len() && is_letter_or_digit(chars[end]) {
        end += 1;
    }

    Selection::new(Position::new(pos.line, start), Position::new(pos.line, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(leading_whitespace("  \t- item"), "  \t");
        assert_eq!(leading_whitespace("item"), "");
        assert_eq!(leading_whitespace("   "), "   ");
    }

    #[test]
    fn test_word_range_non_latin() {
        let sel = word_range_at(Position::new(0, 8), "café e açúcar");
        assert_eq!(sel.anchor, Position::new(0, 7));
        assert_eq!(sel.head, Position::new(0, 13));
    }

    #[test]
    fn test_word_range_between_punctuation_is_collapsed() {
        let sel = word_range_at(Position::new(0, 2), "a ,. b");
        assert!(sel.is_empty());
        assert_eq!(sel.head, Position::new(0, 2));
    }

    #[test]
    fn test_word_range_at_word_end() {
        let sel = word_range_at(Position::new(0, 5), "lorem ipsum");
        assert_eq!(sel.anchor, Position::new(0, 0));
        assert_eq!(sel.head, Position::new(0, 5));
    }

    #[test]
    fn test_char_slice() {
        assert_eq!(char_slice("açúcar", 1, 4), "çúc");
        assert_eq!(char_len("açúcar"), 6);
    }
}
