//! Operations on the selection list as a whole.

use crate::position::Selection;

/// Sort selections into document order and merge the ones that overlap.
///
/// Selections that merely touch (one starts exactly where the previous ends) stay separate.
/// Exact duplicates are dropped; a merged union is forward.
pub fn normalize_selections(mut selections: Vec<Selection>) -> Vec<Selection> {
    selections.sort_by(|a, b| {
        a.from()
            .cmp(&b.from())
            .then_with(|| a.to().cmp(&b.to()))
            .then_with(|| a.head.cmp(&b.head))
    });

    let mut merged: Vec<Selection> = Vec::with_capacity(selections.len());
    for sel in selections {
        let Some(last) = merged.last_mut() else {
            merged.push(sel);
            continue;
        };

        if sel.from() < last.to() {
            let from = last.from().min(sel.from());
            let to = last.to().max(sel.to());
            *last = Selection::new(from, to);
        } else if sel.from() == last.from() && sel.to() == last.to() {
            continue;
        } else {
            merged.push(sel);
        }
    }
    merged
}

/// Returns `true` if no selection starts before the previous one.
pub fn is_document_ordered(selections: &[Selection]) -> bool {
    selections.windows(2).all(|w| w[0].from() <= w[1].from())
}

/// Keep only the first selection whose head sits on each line.
pub fn first_per_head_line(selections: &[Selection]) -> Vec<Selection> {
    let mut seen_lines: Vec<usize> = Vec::new();
    selections
        .iter()
        .filter(|sel| {
            if seen_lines.contains(&sel.head.line) {
                false
            } else {
                seen_lines.push(sel.head.line);
                true
            }
        })
        .copied()
        .collect()
}

/// Add `sel` to `acc` unless a selection already starts on its line.
///
/// On a collision the existing selection is pulled back to column 0 of that line and `sel`
/// is dropped.
pub fn push_combining_same_line(acc: &mut Vec<Selection>, sel: Selection) {
    let line = sel.from().line;
    let Some(existing) = acc.iter_mut().find(|s| s.from().line == line) else {
        acc.push(sel);
        return;
    };

    if existing.is_empty() {
        existing.anchor.column = 0;
        existing.head.column = 0;
    } else if existing.anchor <= existing.head {
        existing.anchor.column = 0;
    } else {
        existing.head.column = 0;
    }
}
