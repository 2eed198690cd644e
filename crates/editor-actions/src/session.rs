//! Per-editor session state.

/// Tracks whether the current selection was made by the user or by a command.
///
/// "Select word or next occurrence" matches inside words only when the user selected the
/// search text by hand. Every selection change not announced through
/// [`SelectionTracker::mark_programmatic`] counts as manual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTracker {
    manual: bool,
    programmatic_pending: bool,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self {
            manual: true,
            programmatic_pending: false,
        }
    }
}

impl SelectionTracker {
    /// Fresh tracker; the initial selection counts as manual.
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce that the next selection change comes from a command.
    pub fn mark_programmatic(&mut self) {
        self.programmatic_pending = true;
    }

    /// Record that a cursor was expanded to a word by a command.
    pub fn mark_expanded(&mut self) {
        self.manual = false;
    }

    /// Hook for the host's selection-change notification.
    pub fn on_selection_change(&mut self) {
        if !self.programmatic_pending {
            self.manual = true;
        }
        self.programmatic_pending = false;
    }

    /// Returns `true` if the current selection was made by the user.
    pub fn is_manual(&self) -> bool {
        self.manual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programmatic_change_keeps_expanded_state() {
        let mut tracker = SelectionTracker::new();
        assert!(tracker.is_manual());

        tracker.mark_programmatic();
        tracker.mark_expanded();
        tracker.on_selection_change();
        assert!(!tracker.is_manual());

        // The user moves the selection.
        tracker.on_selection_change();
        assert!(tracker.is_manual());
    }
}
