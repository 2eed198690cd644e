//! Both edit sinks must produce the same document and selections for cursors on distinct lines.

use editor_actions::{
    Command, CommandExecutor, Document, EditorHost, EngineMode, Position, Selection, TextBuffer,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LINES: &[&str] = &[
    "lorem ipsum",
    "  dolor sit amet",
    "- item",
    "- [ ] task",
    "- ",
    "",
    "straße ok",
    "\tconsectetur",
    "> quoted text",
];

const COMMANDS: &[Command] = &[
    Command::InsertLineAbove,
    Command::InsertLineBelow,
    Command::CopyLineUp,
    Command::CopyLineDown,
    Command::TransformToUppercase,
    Command::DeleteToEndOfLine,
    Command::DeleteToStartOfLine,
    Command::GoToNextWord,
    Command::SelectLine,
];

fn random_document(rng: &mut StdRng) -> (String, Vec<Selection>) {
    let line_count = rng.gen_range(2..12);
    let lines: Vec<&str> = (0..line_count)
        .map(|_| LINES[rng.gen_range(0..LINES.len())])
        .collect();

    let mut selections = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if rng.gen_bool(0.4) {
            let column = rng.gen_range(0..=line.chars().count());
            selections.push(Selection::cursor(Position::new(index, column)));
        }
    }
    if selections.is_empty() {
        selections.push(Selection::cursor(Position::new(0, 0)));
    }
    (lines.join("\n"), selections)
}

fn run(text: &str, selections: &[Selection], mode: EngineMode, command: Command) -> TextBuffer {
    let buffer = TextBuffer::new(text).with_selections(selections.to_vec());
    let mut ex = CommandExecutor::new(buffer).with_mode(mode);
    ex.execute(command).unwrap();
    ex.into_host()
}

#[test]
fn test_transaction_and_immediate_modes_agree() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..200 {
        let (text, selections) = random_document(&mut rng);
        let command = COMMANDS[rng.gen_range(0..COMMANDS.len())].clone();

        let transaction = run(&text, &selections, EngineMode::Transaction, command.clone());
        let immediate = run(&text, &selections, EngineMode::Immediate, command.clone());

        let context = format!("round {round}: {} on {text:?} with {selections:?}", command.id());
        assert_eq!(transaction.text(), immediate.text(), "{context}");
        assert_eq!(transaction.selections(), immediate.selections(), "{context}");
        assert!(transaction.undo_depth() <= 1, "{context}");
        assert_eq!(transaction.undo_depth(), immediate.undo_depth(), "{context}");
    }
}
