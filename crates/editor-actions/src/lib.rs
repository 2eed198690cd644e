#![warn(missing_docs)]
//! Editor Actions - Multi-Cursor Editing Commands for Host Text Editors
//!
//! # Overview
//!
//! `editor-actions` implements line, case, list and selection commands on top of a small
//! capability interface ([`Document`] + [`EditorHost`]) that a host editor binding supplies.
//! Every per-selection operation is a pure function from a document and one selection to a
//! list of edits and a new selection; the engine applies it across all selections and commits
//! the result as one transaction (one undo step).
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Commands & Session (ids, JSON, tracker)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Whole-list Commands (occurrences, cursors) │
//! ├─────────────────────────────────────────────┤
//! │  Multi-Selection Engine (drift, sinks)      │  ← Transaction / Immediate
//! ├─────────────────────────────────────────────┤
//! │  Single-Selection Actions                   │
//! ├─────────────────────────────────────────────┤
//! │  Text Utilities (positions, lists, case)    │
//! ├─────────────────────────────────────────────┤
//! │  Host Interface (+ in-memory TextBuffer)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_actions::{
//!     Command, CommandExecutor, Document, EditorHost, Position, Selection, TextBuffer,
//! };
//!
//! let buffer = TextBuffer::new("- aaa\n- bbb")
//!     .with_selections(vec![Selection::cursor(Position::new(0, 2))]);
//! let mut executor = CommandExecutor::new(buffer);
//!
//! executor.execute(Command::InsertLineBelow).unwrap();
//!
//! assert_eq!(executor.host().text(), "- aaa\n- \n- bbb");
//! assert_eq!(
//!     executor.host().selections(),
//!     vec![Selection::cursor(Position::new(1, 2))]
//! );
//! ```
//!
//! ## Running an Action Directly
//!
//! ```rust
//! use editor_actions::{
//!     Action, CaseType, Document, EngineMode, Position, Selection, Settings, TextBuffer,
//!     apply_across_selections,
//! };
//!
//! let mut buffer = TextBuffer::new("dolor sit").with_selections(vec![Selection::new(
//!     Position::new(0, 0),
//!     Position::new(0, 9),
//! )]);
//! let action = Action::TransformCase(CaseType::Upper);
//! let mode = EngineMode::Transaction;
//!
//! apply_across_selections(
//!     &mut buffer,
//!     &action,
//!     &Settings::default(),
//!     &action.options(mode),
//!     mode.sink().as_mut(),
//! )
//! .unwrap();
//!
//! assert_eq!(buffer.text(), "DOLOR SIT");
//! ```
//!
//! # Module Description
//!
//! - [`position`] - Positions, selections and line boundaries
//! - [`host`] - Capability interface of the host editor
//! - [`buffer`] - Rope-backed in-memory host with undo
//! - [`edit`] - Edits, transactions and edit sinks
//! - [`engine`] - Multi-selection engine and drift tracking
//! - [`actions`] - Single-selection operations
//! - [`multi_cursor`] - Whole selection list commands
//! - [`search`] - Literal occurrence search
//! - [`scan`] - Character scanning and delimiter matching
//! - [`list`] - List prefixes and renumbering
//! - [`case`] - Case conversion
//! - [`commands`] - Command ids and executor

pub mod actions;
pub mod buffer;
pub mod case;
pub mod commands;
pub mod edit;
pub mod engine;
pub mod error;
pub mod host;
pub mod line_ending;
pub mod list;
pub mod multi_cursor;
pub mod position;
pub mod scan;
pub mod search;
pub mod selection_set;
pub mod session;
pub mod settings;
pub mod text;

pub use actions::{
    Action, CursorDirection, HorizontalDirection, LineBoundary, LineTarget, VerticalDirection,
};
pub use buffer::TextBuffer;
pub use case::{CaseType, apply_case, next_case, to_title_case};
pub use commands::{Command, CommandExecutor};
pub use edit::{Edit, EditSink, EngineMode, ImmediateSink, Transaction, TransactionSink};
pub use editor_actions_lang::{ListMarkers, MatchingPairs, TitleCaseRules};
pub use engine::{
    ActionContext, ActionOutcome, Drift, MultiSelectionOptions, SelectionAction,
    SelectionHandler, apply_across_selections, spread_same_line_selections,
};
pub use error::{EditorError, Result};
pub use host::{Document, EditorHost};
pub use line_ending::LineEnding;
pub use list::{ListContinuation, ListInsert};
pub use multi_cursor::CodeEditor;
pub use position::{Position, Selection, SelectionBoundaries};
pub use scan::{CharMatch, DelimiterKind, ScanDirection, scan_for_character};
pub use search::{SearchMatch, SearchText};
pub use session::SelectionTracker;
pub use settings::Settings;
