use editor_actions::{
    CodeEditor, Command, CommandExecutor, Document, EditorError, EditorHost, EngineMode, Position,
    Selection, Settings, TextBuffer,
};
use pretty_assertions::assert_eq;

fn caret(line: usize, column: usize) -> Selection {
    Selection::cursor(Position::new(line, column))
}

#[test]
fn test_batch_from_json() {
    let json = r#"[
        {"command": "selectLine"},
        {"command": "addCursorsToSelectionEnds", "emulate": "sublime"},
        {"command": "goToLineEnd"},
        {"command": "insertLineBelow"}
    ]"#;
    let commands: Vec<Command> = serde_json::from_str(json).unwrap();
    assert_eq!(
        commands[1],
        Command::AddCursorsToSelectionEnds {
            emulate: CodeEditor::Sublime
        }
    );

    let buffer = TextBuffer::new("- aaa\n- bbb").with_selections(vec![caret(0, 1)]);
    let mut ex = CommandExecutor::new(buffer);
    ex.execute_batch(commands).unwrap();

    assert_eq!(ex.host().text(), "- aaa\n- \n- bbb");
    assert_eq!(ex.host().selections(), vec![caret(1, 2)]);
    let ids: Vec<&str> = ex.get_command_history().iter().map(Command::id).collect();
    assert_eq!(
        ids,
        vec!["selectLine", "addCursorsToSelectionEnds", "goToLineEnd", "insertLineBelow"]
    );
}

#[test]
fn test_go_to_line_from_json() {
    let command = Command::from_json(r#"{"command": "goToLine", "input": "2"}"#).unwrap();
    let buffer = TextBuffer::new("lorem\nipsum");
    let mut ex = CommandExecutor::new(buffer);
    ex.execute(command).unwrap();
    assert_eq!(ex.host().selections(), vec![caret(1, 0)]);
}

#[test]
fn test_command_missing_field_is_config_error() {
    let err = Command::from_json(r#"{"command": "goToLine"}"#).unwrap_err();
    assert!(matches!(err, EditorError::Config(_)));
    assert!(err.to_string().starts_with("invalid configuration"));
}

#[test]
fn test_settings_and_mode_from_json() {
    let settings = Settings::from_json(
        r#"{
            "autoInsertListPrefix": true,
            "listMarkers": {"bullets": ["*"], "ordered": false},
            "futureOption": 3
        }"#,
    )
    .unwrap();
    let mode: EngineMode = serde_json::from_str(r#""immediate""#).unwrap();

    let buffer = TextBuffer::new("* a\n- b\n1. c")
        .with_selections(vec![caret(0, 3), caret(1, 3), caret(2, 4)]);
    let mut ex = CommandExecutor::new(buffer)
        .with_settings(settings)
        .with_mode(mode);
    assert_eq!(ex.mode(), EngineMode::Immediate);
    ex.execute(Command::InsertLineBelow).unwrap();

    assert_eq!(ex.host().text(), "* a\n* \n- b\n\n1. c\n");
    assert_eq!(ex.host().selections(), vec![caret(1, 2), caret(3, 0), caret(5, 0)]);
}
