use editor_actions::{
    Action, ActionContext, ActionOutcome, Command, CommandExecutor, Document, Edit, EditSink,
    EditorError, EditorHost, EngineMode, MultiSelectionOptions, Position, Result, Selection,
    SelectionHandler, Settings, TextBuffer, Transaction, apply_across_selections,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn caret(line: usize, column: usize) -> Selection {
    Selection::cursor(Position::new(line, column))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionView {
    Normal,
    Reversed,
    Hidden,
}

/// Host wrapper that can misreport its selections or lack a batch scope.
struct ScriptedHost {
    buffer: TextBuffer,
    view: SelectionView,
    batching: bool,
}

impl ScriptedHost {
    fn new(text: &str, selections: Vec<Selection>) -> Self {
        Self {
            buffer: TextBuffer::new(text).with_selections(selections),
            view: SelectionView::Normal,
            batching: true,
        }
    }

    fn with_view(mut self, view: SelectionView) -> Self {
        self.view = view;
        self
    }

    fn without_batching(mut self) -> Self {
        self.batching = false;
        self
    }
}

impl Document for ScriptedHost {
    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn line(&self, line: usize) -> Option<String> {
        self.buffer.line(line)
    }

    fn range_text(&self, from: Position, to: Position) -> String {
        self.buffer.range_text(from, to)
    }

    fn pos_to_offset(&self, pos: Position) -> usize {
        self.buffer.pos_to_offset(pos)
    }

    fn offset_to_pos(&self, offset: usize) -> Position {
        self.buffer.offset_to_pos(offset)
    }

    fn text(&self) -> String {
        self.buffer.text()
    }
}

impl EditorHost for ScriptedHost {
    fn selections(&self) -> Vec<Selection> {
        let mut selections = self.buffer.selections();
        match self.view {
            SelectionView::Normal => selections,
            SelectionView::Reversed => {
                selections.reverse();
                selections
            }
            SelectionView::Hidden => Vec::new(),
        }
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        self.buffer.set_selections(selections);
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) -> Result<()> {
        self.buffer.replace_range(text, from, to)
    }

    fn transaction(&mut self, transaction: Transaction) -> Result<()> {
        self.buffer.transaction(transaction)
    }

    fn begin_batch(&mut self) -> bool {
        self.batching && self.buffer.begin_batch()
    }

    fn end_batch(&mut self) {
        if self.batching {
            self.buffer.end_batch();
        }
    }
}

fn run(host: &mut dyn EditorHost, action: Action, mode: EngineMode) -> Result<()> {
    apply_across_selections(
        host,
        &action,
        &Settings::default(),
        &action.options(mode),
        mode.sink().as_mut(),
    )
}

/// Marks each line with `>` but refuses to touch line 1.
fn mark_line_except_second(
    doc: &dyn Document,
    selection: &Selection,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let line = selection.head.line;
    if line == 1 {
        return Err(EditorError::Host(format!(
            "line {line} of {} is read-only",
            doc.line_count()
        )));
    }
    let edits = vec![Edit::insert(Position::new(line, 0), ">")];
    let moved = ctx.drift.clone().advance(&edits).map_selection(selection);
    Ok(ActionOutcome::edited(edits, moved))
}

fn keep_first(selections: Vec<Selection>) -> Vec<Selection> {
    selections.into_iter().take(1).collect()
}

#[rstest]
#[case(EngineMode::Transaction)]
#[case(EngineMode::Immediate)]
fn test_unordered_selections_are_rejected(#[case] mode: EngineMode) {
    let mut host = ScriptedHost::new("a\nb\nc", vec![caret(0, 0), caret(2, 0)])
        .with_view(SelectionView::Reversed);
    let err = run(&mut host, Action::InsertLineAbove, mode).unwrap_err();
    assert!(matches!(err, EditorError::UnorderedSelections));
    assert_eq!(host.text(), "a\nb\nc");
    assert!(!host.buffer.can_undo());
}

#[rstest]
#[case(EngineMode::Transaction)]
#[case(EngineMode::Immediate)]
fn test_no_selections_is_a_no_op(#[case] mode: EngineMode) {
    let mut host = ScriptedHost::new("a\nb", vec![caret(1, 0)]).with_view(SelectionView::Hidden);
    run(&mut host, Action::DeleteLines, mode).unwrap();
    assert_eq!(host.text(), "a\nb");
    assert_eq!(host.buffer.selections(), vec![caret(1, 0)]);
}

#[test]
fn test_failing_action_leaves_document_untouched_in_transaction_mode() {
    let mut buffer = TextBuffer::new("a\nb\nc").with_selections(vec![caret(0, 0), caret(1, 0)]);
    let mut sink = EngineMode::Transaction.sink();
    let err = apply_across_selections(
        &mut buffer,
        &mark_line_except_second,
        &Settings::default(),
        &MultiSelectionOptions::default(),
        sink.as_mut(),
    )
    .unwrap_err();

    assert!(matches!(err, EditorError::Host(_)));
    assert_eq!(buffer.text(), "a\nb\nc");
    assert_eq!(buffer.selections(), vec![caret(0, 0), caret(1, 0)]);
}

#[test]
fn test_failing_action_in_immediate_mode_keeps_applied_edits_as_one_step() {
    let mut buffer = TextBuffer::new("a\nb\nc").with_selections(vec![caret(0, 0), caret(1, 0)]);
    let mut sink = EngineMode::Immediate.sink();
    let result = apply_across_selections(
        &mut buffer,
        &mark_line_except_second,
        &Settings::default(),
        &MultiSelectionOptions::default(),
        sink.as_mut(),
    );

    assert!(result.is_err());
    assert_eq!(buffer.text(), ">a\nb\nc");
    assert_eq!(buffer.undo_depth(), 1);
    assert!(buffer.undo());
    assert_eq!(buffer.text(), "a\nb\nc");
}

#[test]
fn test_fn_item_as_action() {
    let mut buffer = TextBuffer::new("a\nb\nc").with_selections(vec![caret(0, 1), caret(2, 1)]);
    let mut sink = EngineMode::Transaction.sink();
    apply_across_selections(
        &mut buffer,
        &mark_line_except_second,
        &Settings::default(),
        &MultiSelectionOptions::default(),
        sink.as_mut(),
    )
    .unwrap();
    assert_eq!(buffer.text(), ">a\nb\n>c");
    assert_eq!(buffer.selections(), vec![caret(0, 2), caret(2, 2)]);
}

#[test]
fn test_selection_handler_rewrites_final_selections() {
    let handler: &SelectionHandler = &keep_first;
    let options = MultiSelectionOptions::default().selection_handler(handler);
    let mut buffer = TextBuffer::new("ab\ncd").with_selections(vec![caret(0, 1), caret(1, 1)]);
    let mut sink = EngineMode::Transaction.sink();
    apply_across_selections(
        &mut buffer,
        &Action::SelectWord,
        &Settings::default(),
        &options,
        sink.as_mut(),
    )
    .unwrap();
    assert_eq!(
        buffer.selections(),
        vec![Selection::new(Position::new(0, 0), Position::new(0, 2))]
    );
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
    pending: Vec<Edit>,
}

impl EditSink for RecordingSink {
    fn mode(&self) -> EngineMode {
        EngineMode::Transaction
    }

    fn begin(&mut self, _host: &mut dyn EditorHost) {
        self.events.push("begin".to_string());
    }

    fn push(&mut self, _host: &mut dyn EditorHost, edits: Vec<Edit>) -> Result<()> {
        self.events.push(format!("push {}", edits.len()));
        self.pending.extend(edits);
        Ok(())
    }

    fn commit(&mut self, host: &mut dyn EditorHost, selections: Vec<Selection>) -> Result<()> {
        self.events.push(format!("commit {}", selections.len()));
        host.transaction(Transaction {
            edits: std::mem::take(&mut self.pending),
            selections,
        })
    }

    fn abandon(&mut self, _host: &mut dyn EditorHost) {
        self.events.push("abandon".to_string());
    }
}

#[test]
fn test_custom_sink_sees_one_push_per_target() {
    let mut buffer = TextBuffer::new("a b\nc\nd\ne")
        .with_selections(vec![caret(0, 0), caret(0, 2), caret(2, 0)]);
    let action = Action::JoinLines;
    let mut sink = RecordingSink::default();
    apply_across_selections(
        &mut buffer,
        &action,
        &Settings::default(),
        &action.options(EngineMode::Transaction),
        &mut sink,
    )
    .unwrap();

    assert_eq!(sink.events, vec!["begin", "push 1", "push 1", "commit 2"]);
    assert_eq!(buffer.text(), "a b c\nd e");
    assert_eq!(buffer.selections(), vec![caret(0, 3), caret(1, 1)]);
}

#[test]
fn test_custom_sink_is_abandoned_on_error() {
    let mut buffer = TextBuffer::new("a\nb").with_selections(vec![caret(0, 0), caret(1, 0)]);
    let mut sink = RecordingSink::default();
    let result = apply_across_selections(
        &mut buffer,
        &mark_line_except_second,
        &Settings::default(),
        &MultiSelectionOptions::default(),
        &mut sink,
    );
    assert!(result.is_err());
    assert_eq!(sink.events, vec!["begin", "push 1", "abandon"]);
}

// Undo grouping

#[rstest]
#[case(EngineMode::Transaction)]
#[case(EngineMode::Immediate)]
fn test_multi_cursor_edit_is_one_undo_step(#[case] mode: EngineMode) {
    let start = vec![caret(0, 0), caret(1, 0), caret(2, 0)];
    let mut host = ScriptedHost::new("a\nb\nc", start.clone());
    run(&mut host, Action::InsertLineAbove, mode).unwrap();

    assert_eq!(host.text(), "\na\n\nb\n\nc");
    assert_eq!(host.buffer.selections(), vec![caret(0, 0), caret(2, 0), caret(4, 0)]);
    assert_eq!(host.buffer.undo_depth(), 1);

    assert!(host.buffer.undo());
    assert_eq!(host.text(), "a\nb\nc");
    assert_eq!(host.buffer.selections(), start);

    assert!(host.buffer.redo());
    assert_eq!(host.text(), "\na\n\nb\n\nc");
}

#[test]
fn test_immediate_mode_without_batch_scope_records_every_edit() {
    let start = vec![caret(0, 0), caret(1, 0), caret(2, 0)];
    let mut host = ScriptedHost::new("a\nb\nc", start.clone()).without_batching();
    run(&mut host, Action::InsertLineAbove, EngineMode::Immediate).unwrap();

    assert_eq!(host.text(), "\na\n\nb\n\nc");
    assert_eq!(host.buffer.undo_depth(), 3);

    while host.buffer.undo() {}
    assert_eq!(host.text(), "a\nb\nc");
    assert_eq!(host.buffer.selections(), start);
}

#[test]
fn test_executor_undo_restores_text_after_command_batch() {
    let buffer = TextBuffer::new("lorem ipsum\ndolor sit").with_selections(vec![caret(0, 3)]);
    let mut ex = CommandExecutor::new(buffer);
    ex.execute_batch(vec![Command::CopyLineDown, Command::TransformToUppercase])
        .unwrap();
    assert_eq!(ex.host().text(), "lorem ipsum\nLOREM ipsum\ndolor sit");
    assert_eq!(ex.host().undo_depth(), 2);

    let host = ex.host_mut();
    assert!(host.undo());
    assert!(host.undo());
    assert_eq!(host.text(), "lorem ipsum\ndolor sit");
    assert_eq!(host.selections(), vec![caret(0, 3)]);
}
