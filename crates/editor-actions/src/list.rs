//! List-item prefixes: detection, continuation and renumbering.
//!
//! A list prefix is an optional indentation, one marker (a bullet such as `-` or an ordered
//! marker `N.`), a single space and an optional checkbox `[ ] `. The indentation is not part
//! of the prefix text returned here.

use crate::edit::Edit;
use crate::host::Document;
use crate::position::Position;
use crate::text::{char_len, leading_whitespace};
use editor_actions_lang::ListMarkers;

/// Where the new list item goes relative to the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInsert {
    /// New item above the current one.
    Before,
    /// New item below the current one.
    After,
}

/// Outcome of [`next_list_prefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContinuation {
    /// Continue with this prefix (empty for lines that are not list items).
    Continue(String),
    /// The current item is empty; the list should end instead of growing.
    EndList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bullet(char),
    Ordered(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListPrefix {
    marker: Marker,
    has_checkbox: bool,
    /// Byte length of indentation, marker and its space.
    marker_end: usize,
    /// Byte length of the whole prefix including indentation.
    len: usize,
}

impl ListPrefix {
    fn render(&self, marker: Marker) -> String {
        let mut out = match marker {
            Marker::Bullet(ch) => format!("{ch} "),
            Marker::Ordered(n) => format!("{n}. "),
        };
        if self.has_checkbox {
            out.push_str("[ ] ");
        }
        out
    }
}

fn parse_prefix(line: &str, markers: &ListMarkers) -> Option<ListPrefix> {
    let indent = leading_whitespace(line).len();
    let body = &line[indent..];

    let (marker, marker_len) = match body.chars().next()? {
        ch if markers.is_bullet(ch) => (Marker::Bullet(ch), ch.len_utf8()),
        ch if markers.ordered && ch.is_ascii_digit() => {
            let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if body[digits..].chars().next() != Some('.') {
                return None;
            }
            (Marker::Ordered(body[..digits].parse().ok()?), digits + 1)
        }
        _ => return None,
    };

    let after_marker = body[marker_len..].strip_prefix(' ')?;
    let marker_end = indent + marker_len + 1;

    let box_chars: Vec<char> = after_marker.chars().take(4).collect();
    let has_checkbox = matches!(box_chars.as_slice(), ['[', _, ']', ' ']);
    let len = if has_checkbox {
        marker_end + box_chars.iter().map(|c| c.len_utf8()).sum::<usize>()
    } else {
        marker_end
    };

    Some(ListPrefix {
        marker,
        has_checkbox,
        marker_end,
        len,
    })
}

/// The list prefix at the start of `line` without its indentation, or `""`.
pub fn detect_list_prefix<'a>(line: &'a str, markers: &ListMarkers) -> &'a str {
    match parse_prefix(line, markers) {
        Some(prefix) => &line[leading_whitespace(line).len()..prefix.len],
        None => "",
    }
}

/// Returns `true` for an ordered prefix such as `"3. "`.
pub fn is_ordered_prefix(prefix: &str) -> bool {
    let digits = prefix.trim_start_matches(|c: char| c.is_ascii_digit());
    digits.len() < prefix.len() && digits.starts_with('.')
}

/// Prefix for a new item inserted next to `line`.
///
/// Ordered markers are incremented for [`ListInsert::After`] and kept for
/// [`ListInsert::Before`]. Checkboxes always come back unticked.
pub fn next_list_prefix(line: &str, side: ListInsert, markers: &ListMarkers) -> ListContinuation {
    let Some(prefix) = parse_prefix(line, markers) else {
        return ListContinuation::Continue(String::new());
    };

    if line[prefix.len..].trim().is_empty() {
        return ListContinuation::EndList;
    }

    let marker = match (prefix.marker, side) {
        (Marker::Ordered(n), ListInsert::After) => Marker::Ordered(n.saturating_add(1)),
        (marker, _) => marker,
    };
    ListContinuation::Continue(prefix.render(marker))
}

/// Number of leading characters `joinLines` strips from a line pulled onto the previous one:
/// indentation plus one list or quote marker and its space.
pub fn join_trim_len(line: &str, markers: &ListMarkers) -> usize {
    let end = match parse_prefix(line, markers) {
        Some(prefix) => prefix.marker_end,
        None => leading_whitespace(line).len(),
    };
    char_len(&line[..end])
}

/// Character columns of the number of an ordered marker such as `"  12. "` at the start of
/// `line`.
pub fn ordered_number_span(line: &str) -> Option<(usize, usize)> {
    let indent = leading_whitespace(line);
    let body = &line[indent.len()..];
    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !body[digits..].starts_with('.') {
        return None;
    }
    let start = char_len(indent);
    Some((start, start + digits))
}

/// Edits that bump every ordered marker from `from_line` on, as long as the lines keep the
/// same `indentation`.
///
/// `current` receives the marker's digit range and the number `doc` shows there and returns
/// the number the marker carries at this point of the run.
pub fn renumber_list_from(
    doc: &dyn Document,
    from_line: usize,
    indentation: &str,
    current: impl Fn(Position, Position, u64) -> u64,
) -> Vec<Edit> {
    let mut edits = Vec::new();

    for line in from_line..doc.line_count() {
        let Some(text) = doc.line(line) else {
            break;
        };
        if leading_whitespace(&text) != indentation {
            break;
        }
        let Some((start, end)) = ordered_number_span(&text) else {
            break;
        };
        let digits = &text[indentation.len()..indentation.len() + (end - start)];
        let Ok(number) = digits.parse::<u64>() else {
            break;
        };

        let from = Position::new(line, start);
        let to = Position::new(line, end);
        let number = current(from, to, number);
        edits.push(Edit::replace(from, to, number.saturating_add(1).to_string()));
    }

    edits
}
