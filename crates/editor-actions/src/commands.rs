//! Command interface layer
//!
//! Provides the command surface a host binding registers: every command has a stable id, can
//! be parsed from JSON, and is executed against a host through [`CommandExecutor`].
//!
//! # Example
//!
//! ```rust
//! use editor_actions::{
//!     Command, CommandExecutor, Document, EditorHost, Position, Selection, TextBuffer,
//! };
//!
//! let buffer = TextBuffer::new("lorem ipsum\ndolor sit\namet")
//!     .with_selections(vec![Selection::cursor(Position::new(1, 0))]);
//! let mut executor = CommandExecutor::new(buffer);
//!
//! executor.execute(Command::JoinLines).unwrap();
//!
//! assert_eq!(executor.host().text(), "lorem ipsum\ndolor sit amet");
//! assert_eq!(
//!     executor.host().selections(),
//!     vec![Selection::cursor(Position::new(1, 9))]
//! );
//! ```

use crate::actions::{
    Action, CursorDirection, HorizontalDirection, LineBoundary, LineTarget, VerticalDirection,
};
use crate::case::CaseType;
use crate::edit::EngineMode;
use crate::engine::apply_across_selections;
use crate::error::Result;
use crate::host::EditorHost;
use crate::multi_cursor::{
    CodeEditor, add_cursors_to_selection_ends, expand_first_to_quotes_or_brackets, go_to_line,
    insert_cursor, select_all_occurrences, select_word_or_next_occurrence,
};
use crate::scan::DelimiterKind;
use crate::session::SelectionTracker;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every command a host can bind.
///
/// Serialized as `{"command": "<id>", ...fields}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// Open a line above each cursor.
    InsertLineAbove,
    /// Open a line below each cursor.
    InsertLineBelow,
    /// Delete the selected lines.
    DeleteLine,
    /// Delete back to the line start.
    DeleteToStartOfLine,
    /// Delete forward to the line end.
    DeleteToEndOfLine,
    /// Join the next line onto the current one.
    JoinLines,
    /// Same as [`Command::CopyLineDown`].
    DuplicateLine,
    /// Copy the selected lines above themselves.
    CopyLineUp,
    /// Copy the selected lines below themselves.
    CopyLineDown,
    /// Expand cursors to words or add the next occurrence.
    SelectWordOrNextOccurrence,
    /// Select every occurrence of the selected text.
    SelectAllOccurrences,
    /// Select whole lines.
    SelectLine,
    /// Expand cursors to words.
    SelectWord,
    /// Split one selection into a cursor per line.
    AddCursorsToSelectionEnds {
        /// Behaviour to emulate.
        #[serde(default)]
        emulate: CodeEditor,
    },
    /// Cursor to the line start.
    GoToLineStart,
    /// Cursor to the line end.
    GoToLineEnd,
    /// Head to the next line.
    GoToNextLine,
    /// Head to the previous line.
    GoToPrevLine,
    /// Cursor to the document start.
    GoToFirstLine,
    /// Cursor to the document end.
    GoToLastLine,
    /// One character forward.
    GoToNextChar,
    /// One character back.
    GoToPrevChar,
    /// One line up.
    MoveCursorUp,
    /// One line down.
    MoveCursorDown,
    /// To the next word end.
    GoToNextWord,
    /// To the previous word start.
    GoToPrevWord,
    /// Upper-case the selection.
    TransformToUppercase,
    /// Lower-case the selection.
    TransformToLowercase,
    /// Title-case the selection.
    TransformToTitlecase,
    /// Cycle upper, lower and title case.
    ToggleCase,
    /// Select inside the surrounding brackets.
    ExpandSelectionToBrackets,
    /// Select inside the surrounding quotes.
    ExpandSelectionToQuotes,
    /// Add a selection inside the quotes or brackets around the first selection.
    ExpandSelectionToQuotesOrBrackets,
    /// Add a cursor above each selection.
    InsertCursorAbove,
    /// Add a cursor below each selection.
    InsertCursorBelow,
    /// Jump to a 1-based line number.
    GoToLine {
        /// Raw user input.
        input: String,
    },
}

impl Command {
    /// Parse a command from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stable command id.
    pub fn id(&self) -> &'static str {
        match self {
            Self::InsertLineAbove => "insertLineAbove",
            Self::InsertLineBelow => "insertLineBelow",
            Self::DeleteLine => "deleteLine",
            Self::DeleteToStartOfLine => "deleteToStartOfLine",
            Self::DeleteToEndOfLine => "deleteToEndOfLine",
            Self::JoinLines => "joinLines",
            Self::DuplicateLine => "duplicateLine",
            Self::CopyLineUp => "copyLineUp",
            Self::CopyLineDown => "copyLineDown",
            Self::SelectWordOrNextOccurrence => "selectWordOrNextOccurrence",
            Self::SelectAllOccurrences => "selectAllOccurrences",
            Self::SelectLine => "selectLine",
            Self::SelectWord => "selectWord",
            Self::AddCursorsToSelectionEnds { .. } => "addCursorsToSelectionEnds",
            Self::GoToLineStart => "goToLineStart",
            Self::GoToLineEnd => "goToLineEnd",
            Self::GoToNextLine => "goToNextLine",
            Self::GoToPrevLine => "goToPrevLine",
            Self::GoToFirstLine => "goToFirstLine",
            Self::GoToLastLine => "goToLastLine",
            Self::GoToNextChar => "goToNextChar",
            Self::GoToPrevChar => "goToPrevChar",
            Self::MoveCursorUp => "moveCursorUp",
            Self::MoveCursorDown => "moveCursorDown",
            Self::GoToNextWord => "goToNextWord",
            Self::GoToPrevWord => "goToPrevWord",
            Self::TransformToUppercase => "transformToUppercase",
            Self::TransformToLowercase => "transformToLowercase",
            Self::TransformToTitlecase => "transformToTitlecase",
            Self::ToggleCase => "toggleCase",
            Self::ExpandSelectionToBrackets => "expandSelectionToBrackets",
            Self::ExpandSelectionToQuotes => "expandSelectionToQuotes",
            Self::ExpandSelectionToQuotesOrBrackets => "expandSelectionToQuotesOrBrackets",
            Self::InsertCursorAbove => "insertCursorAbove",
            Self::InsertCursorBelow => "insertCursorBelow",
            Self::GoToLine { .. } => "goToLine",
        }
    }

    /// The per-selection action behind this command, if it runs through the engine.
    pub fn action(&self) -> Option<Action> {
        let action = match self {
            Self::InsertLineAbove => Action::InsertLineAbove,
            Self::InsertLineBelow => Action::InsertLineBelow,
            Self::DeleteLine => Action::DeleteLines,
            Self::DeleteToStartOfLine => Action::DeleteToLineStart,
            Self::DeleteToEndOfLine => Action::DeleteToLineEnd,
            Self::JoinLines => Action::JoinLines,
            Self::DuplicateLine | Self::CopyLineDown => {
                Action::CopyLine(VerticalDirection::Down)
            }
            Self::CopyLineUp => Action::CopyLine(VerticalDirection::Up),
            Self::SelectLine => Action::SelectLine,
            Self::SelectWord => Action::SelectWord,
            Self::GoToLineStart => Action::GoToLineBoundary(LineBoundary::Start),
            Self::GoToLineEnd => Action::GoToLineBoundary(LineBoundary::End),
            Self::GoToNextLine => Action::NavigateLine(LineTarget::Next),
            Self::GoToPrevLine => Action::NavigateLine(LineTarget::Prev),
            Self::GoToFirstLine => Action::NavigateLine(LineTarget::First),
            Self::GoToLastLine => Action::NavigateLine(LineTarget::Last),
            Self::GoToNextChar => Action::MoveCursor(CursorDirection::Right),
            Self::GoToPrevChar => Action::MoveCursor(CursorDirection::Left),
            Self::MoveCursorUp => Action::MoveCursor(CursorDirection::Up),
            Self::MoveCursorDown => Action::MoveCursor(CursorDirection::Down),
            Self::GoToNextWord => Action::MoveWord(HorizontalDirection::Right),
            Self::GoToPrevWord => Action::MoveWord(HorizontalDirection::Left),
            Self::TransformToUppercase => Action::TransformCase(CaseType::Upper),
            Self::TransformToLowercase => Action::TransformCase(CaseType::Lower),
            Self::TransformToTitlecase => Action::TransformCase(CaseType::Title),
            Self::ToggleCase => Action::TransformCase(CaseType::Next),
            Self::ExpandSelectionToBrackets => Action::ExpandSelection(DelimiterKind::Brackets),
            Self::ExpandSelectionToQuotes => Action::ExpandSelection(DelimiterKind::Quotes),
            Self::SelectWordOrNextOccurrence
            | Self::SelectAllOccurrences
            | Self::AddCursorsToSelectionEnds { .. }
            | Self::ExpandSelectionToQuotesOrBrackets
            | Self::InsertCursorAbove
            | Self::InsertCursorBelow
            | Self::GoToLine { .. } => return None,
        };
        Some(action)
    }
}

/// Command executor
///
/// Owns the host together with the session state the commands share: settings, the engine
/// mode and the selection origin tracker.
#[derive(Debug)]
pub struct CommandExecutor<H: EditorHost> {
    /// Host editor
    host: H,
    /// User settings
    settings: Settings,
    /// Edit sink used for engine runs
    mode: EngineMode,
    /// Manual/programmatic selection origin
    tracker: SelectionTracker,
    /// Command history
    command_history: Vec<Command>,
}

impl<H: EditorHost> CommandExecutor<H> {
    /// Create an executor with default settings and the transaction engine.
    pub fn new(host: H) -> Self {
        Self {
            host,
            settings: Settings::default(),
            mode: EngineMode::default(),
            tracker: SelectionTracker::new(),
            command_history: Vec::new(),
        }
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Choose the edit sink.
    pub fn with_mode(mut self, mode: EngineMode) -> Self {
        self.mode = mode;
        self
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<()> {
        debug!(command = command.id(), mode = ?self.mode, "executing command");
        self.command_history.push(command.clone());

        let result = match command.action() {
            Some(action) => self.run_action(action),
            None => self.run_selection_command(&command),
        };
        self.tracker.on_selection_change();
        result
    }

    /// Execute commands in order, stopping at the first error.
    pub fn execute_batch(&mut self, commands: Vec<Command>) -> Result<()> {
        for command in commands {
            self.execute(command)?;
        }
        Ok(())
    }

    fn run_action(&mut self, action: Action) -> Result<()> {
        let options = action.options(self.mode);
        let mut sink = self.mode.sink();
        apply_across_selections(
            &mut self.host,
            &action,
            &self.settings,
            &options,
            sink.as_mut(),
        )
    }

    fn run_selection_command(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::SelectWordOrNextOccurrence => {
                select_word_or_next_occurrence(&mut self.host, &mut self.tracker)
            }
            Command::SelectAllOccurrences => select_all_occurrences(&mut self.host),
            Command::AddCursorsToSelectionEnds { emulate } => {
                add_cursors_to_selection_ends(&mut self.host, *emulate)
            }
            Command::ExpandSelectionToQuotesOrBrackets => {
                expand_first_to_quotes_or_brackets(&mut self.host);
                Ok(())
            }
            Command::InsertCursorAbove => insert_cursor(&mut self.host, VerticalDirection::Up),
            Command::InsertCursorBelow => insert_cursor(&mut self.host, VerticalDirection::Down),
            Command::GoToLine { input } => {
                if !go_to_line(&mut self.host, input) {
                    debug!(input = %input, "ignored invalid line number");
                }
                Ok(())
            }
            other => match other.action() {
                Some(action) => self.run_action(action),
                None => Ok(()),
            },
        }
    }

    /// Tell the executor the user changed the selection outside of any command.
    pub fn notify_selection_changed(&mut self) {
        self.tracker.on_selection_change();
    }

    /// Get command history
    pub fn get_command_history(&self) -> &[Command] {
        &self.command_history
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Engine mode.
    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    /// Selection origin tracker.
    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    /// Get host reference
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get host mutable reference
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Hand the host back.
    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::host::Document;
    use crate::position::{Position, Selection};

    #[test]
    fn test_command_json_uses_ids() {
        let commands = [
            Command::JoinLines,
            Command::AddCursorsToSelectionEnds {
                emulate: CodeEditor::Sublime,
            },
            Command::GoToLine {
                input: "12".to_string(),
            },
        ];
        for command in commands {
            let value = serde_json::to_value(&command).unwrap();
            assert_eq!(value["command"], command.id());
            let json = serde_json::to_string(&command).unwrap();
            assert_eq!(Command::from_json(&json).unwrap(), command);
        }
    }

    #[test]
    fn test_add_cursors_defaults_to_vscode() {
        let command = Command::from_json(r#"{"command": "addCursorsToSelectionEnds"}"#).unwrap();
        assert_eq!(
            command,
            Command::AddCursorsToSelectionEnds {
                emulate: CodeEditor::VsCode
            }
        );
    }

    #[test]
    fn test_unknown_command_is_config_error() {
        let err = Command::from_json(r#"{"command": "goToNextHeading"}"#).unwrap_err();
        assert!(matches!(err, crate::EditorError::Config(_)));
    }

    #[test]
    fn test_history_records_every_command() {
        let buffer =
            TextBuffer::new("ab").with_selections(vec![Selection::cursor(Position::new(0, 1))]);
        let mut executor = CommandExecutor::new(buffer);
        executor
            .execute_batch(vec![Command::GoToLineEnd, Command::TransformToUppercase])
            .unwrap();
        assert_eq!(executor.get_command_history().len(), 2);
        assert_eq!(executor.host().text(), "AB");
    }
}
