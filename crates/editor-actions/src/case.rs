//! Case conversion.

use editor_actions_lang::TitleCaseRules;
use serde::{Deserialize, Serialize};

/// Target case for [`crate::Action::TransformCase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseType {
    /// `LOREM IPSUM`
    Upper,
    /// `lorem ipsum`
    Lower,
    /// `Lorem Ipsum`
    Title,
    /// Cycle upper → lower → title → upper.
    Next,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Capitalize every word, keeping whitespace runs intact.
///
/// Words listed in `rules` are lowercased unless they are the first word.
pub fn to_title_case(text: &str, rules: &TitleCaseRules) -> String {
    let mut out = String::with_capacity(text.len());
    let mut seen_word = false;
    let mut rest = text;

    while !rest.is_empty() {
        let in_space = rest.starts_with(char::is_whitespace);
        let split = rest
            .find(|c: char| c.is_whitespace() != in_space)
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(split);
        rest = tail;

        if in_space {
            out.push_str(token);
        } else if seen_word && rules.keeps_lowercase(token) {
            out.push_str(&token.to_lowercase());
        } else {
            out.push_str(&capitalize(token));
        }
        seen_word |= !in_space;
    }
    out
}

/// Convert `text` to the case that follows its current one.
///
/// Text that is neither fully upper, lower nor title case becomes upper case.
pub fn next_case(text: &str, rules: &TitleCaseRules) -> String {
    let upper = text.to_uppercase();
    let lower = text.to_lowercase();
    if text == upper {
        return lower;
    }
    if text == lower {
        return to_title_case(text, rules);
    }
    if text == to_title_case(text, rules) {
        return upper;
    }
    upper
}

/// Apply `case` to `text`.
pub fn apply_case(text: &str, case: CaseType, rules: &TitleCaseRules) -> String {
    match case {
        CaseType::Upper => text.to_uppercase(),
        CaseType::Lower => text.to_lowercase(),
        CaseType::Title => to_title_case(text, rules),
        CaseType::Next => next_case(text, rules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_case_keeps_articles_lowercase() {
        let rules = TitleCaseRules::default();
        assert_eq!(
            to_title_case(
                "AN EXAMPLE TO TEST THE OBSIDIAN PLUGIN AND A CASE CONVERSION FEATURE",
                &rules
            ),
            "An Example To Test the Obsidian Plugin And a Case Conversion Feature"
        );
    }

    #[test]
    fn test_title_case_preserves_whitespace_runs() {
        let rules = TitleCaseRules::default();
        assert_eq!(to_title_case("  the\tquick\n\nfox ", &rules), "  The\tQuick\n\nFox ");
    }

    #[test]
    fn test_next_case_cycle() {
        let rules = TitleCaseRules::default();
        let upper = next_case("lOrEm iPsUm", &rules);
        assert_eq!(upper, "LOREM IPSUM");
        let lower = next_case(&upper, &rules);
        assert_eq!(lower, "lorem ipsum");
        let title = next_case(&lower, &rules);
        assert_eq!(title, "Lorem Ipsum");
        assert_eq!(next_case(&title, &rules), upper);
    }
}
