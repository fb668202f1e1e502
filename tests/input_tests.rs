use hexquill::editor::command::{Action, Command};
use hexquill::editor::mode::EditorMode;
use hexquill::editor::snapshot::WindowState;
use hexquill::input::{Dispatch, InputHandler};
use termion::event::Key;

fn press(handler: &mut InputHandler, keys: &str) -> Vec<Dispatch> {
    keys.chars()
        .map(|c| handler.handle_key(Key::Char(c)))
        .filter(|dispatch| *dispatch != Dispatch::None)
        .collect()
}

fn state(pending: bool) -> WindowState {
    WindowState {
        name: "test".to_string(),
        width: 16,
        offset: 0,
        cursor: 0,
        bytes: vec![0; 16],
        size: 16,
        length: 16,
        pending,
        pending_byte: 0,
        visual_start: None,
        edited_ranges: Vec::new(),
        focus_text: false,
    }
}

#[test]
fn test_count_prefix() {
    let mut handler = InputHandler::new();
    assert_eq!(
        press(&mut handler, "12l"),
        vec![Dispatch::Command(
            Command::normal(Action::CursorRight).with_count(12)
        )]
    );
}

#[test]
fn test_zero_goes_to_row_head() {
    let mut handler = InputHandler::new();
    assert_eq!(
        press(&mut handler, "0"),
        vec![Dispatch::Command(Command::normal(Action::CursorHead))]
    );
}

#[test]
fn test_two_key_sequences() {
    let mut handler = InputHandler::new();
    assert_eq!(handler.handle_key(Key::Char('g')), Dispatch::None);
    assert_eq!(
        handler.handle_key(Key::Char('g')),
        Dispatch::Command(Command::normal(Action::PageTop))
    );
    assert_eq!(press(&mut handler, "ZQ"), vec![Dispatch::Quit]);
    assert_eq!(press(&mut handler, "ZZ"), vec![Dispatch::SaveAndQuit]);
}

#[test]
fn test_window_quit_keys() {
    let mut handler = InputHandler::new();
    handler.handle_key(Key::Ctrl('w'));
    assert_eq!(handler.handle_key(Key::Char('q')), Dispatch::Quit);
}

#[test]
fn test_jump_keys() {
    let mut handler = InputHandler::new();
    assert_eq!(
        handler.handle_key(Key::Ctrl(']')),
        Dispatch::Command(Command::normal(Action::JumpTo))
    );
    assert_eq!(
        handler.handle_key(Key::Ctrl('t')),
        Dispatch::Command(Command::normal(Action::JumpBack))
    );
}

#[test]
fn test_unbound_key_is_ignored() {
    let mut handler = InputHandler::new();
    assert!(press(&mut handler, "q").is_empty());
    assert_eq!(handler.mode(), EditorMode::Normal);
}

#[test]
fn test_insert_mode_sends_runes() {
    let mut handler = InputHandler::new();
    assert_eq!(
        press(&mut handler, "i"),
        vec![Dispatch::Command(Command::normal(Action::StartInsert))]
    );
    assert_eq!(handler.mode(), EditorMode::Insert);

    assert_eq!(
        press(&mut handler, "3f"),
        vec![
            Dispatch::Command(Command::new(Action::Rune('3'), EditorMode::Insert)),
            Dispatch::Command(Command::new(Action::Rune('f'), EditorMode::Insert)),
        ]
    );

    assert_eq!(
        handler.handle_key(Key::Esc),
        Dispatch::Command(Command::new(Action::ExitInsert, EditorMode::Insert))
    );
    assert_eq!(handler.mode(), EditorMode::Normal);
}

#[test]
fn test_insert_mode_navigation_keys() {
    let mut handler = InputHandler::new();
    press(&mut handler, "A");
    assert_eq!(
        handler.handle_key(Key::Left),
        Dispatch::Command(Command::new(Action::CursorLeft, EditorMode::Insert))
    );
    assert_eq!(
        handler.handle_key(Key::Backspace),
        Dispatch::Command(Command::new(Action::Backspace, EditorMode::Insert))
    );
    assert_eq!(
        handler.handle_key(Key::Delete),
        Dispatch::Command(Command::new(Action::Delete, EditorMode::Insert))
    );
}

#[test]
fn test_single_byte_replace_returns_to_normal() {
    let mut handler = InputHandler::new();
    press(&mut handler, "r");
    assert_eq!(handler.mode(), EditorMode::Replace);

    press(&mut handler, "a");
    handler.after_command(&state(true));
    assert_eq!(handler.mode(), EditorMode::Replace);

    press(&mut handler, "b");
    handler.after_command(&state(false));
    assert_eq!(handler.mode(), EditorMode::Normal);
}

#[test]
fn test_replace_mode_stays_until_escape() {
    let mut handler = InputHandler::new();
    press(&mut handler, "R");
    for c in "abcd".chars() {
        handler.handle_key(Key::Char(c));
        handler.after_command(&state(c == 'a' || c == 'c'));
    }
    assert_eq!(handler.mode(), EditorMode::Replace);

    handler.handle_key(Key::Esc);
    assert_eq!(handler.mode(), EditorMode::Normal);
}

#[test]
fn test_visual_mode_keys() {
    let mut handler = InputHandler::new();
    press(&mut handler, "v");
    assert_eq!(handler.mode(), EditorMode::Visual);

    assert_eq!(
        press(&mut handler, "2wo"),
        vec![
            Dispatch::Command(Command::new(Action::CursorNext, EditorMode::Visual).with_count(2)),
            Dispatch::Command(Command::new(Action::SwitchVisualEnd, EditorMode::Visual)),
        ]
    );

    assert_eq!(
        press(&mut handler, "v"),
        vec![Dispatch::Command(Command::new(
            Action::ExitVisual,
            EditorMode::Visual
        ))]
    );
    assert_eq!(handler.mode(), EditorMode::Normal);
}

#[test]
fn test_search_prompt() {
    let mut handler = InputHandler::new();
    press(&mut handler, "/");
    assert_eq!(handler.mode(), EditorMode::Cmdline);
    assert_eq!(handler.prompt_line().as_deref(), Some("/"));

    press(&mut handler, "abc");
    handler.handle_key(Key::Backspace);
    assert_eq!(handler.prompt_line().as_deref(), Some("/ab"));

    assert_eq!(
        handler.handle_key(Key::Char('\n')),
        Dispatch::Command(Command::normal(Action::Search {
            pattern: "ab".to_string(),
            forward: true,
        }))
    );
    assert_eq!(handler.mode(), EditorMode::Normal);
    assert_eq!(handler.prompt_line(), None);
}

#[test]
fn test_empty_search_repeats_last() {
    let mut handler = InputHandler::new();
    press(&mut handler, "?");
    assert_eq!(handler.prompt_line().as_deref(), Some("?"));
    assert_eq!(
        handler.handle_key(Key::Char('\n')),
        Dispatch::Command(Command::normal(Action::SearchNext))
    );
}

#[test]
fn test_search_prompt_cancel() {
    let mut handler = InputHandler::new();
    press(&mut handler, "/xy");
    assert_eq!(handler.handle_key(Key::Esc), Dispatch::None);
    assert_eq!(handler.mode(), EditorMode::Normal);
    assert_eq!(handler.prompt_line(), None);

    // Backspace on an empty prompt closes it too
    press(&mut handler, "/");
    handler.handle_key(Key::Backspace);
    assert_eq!(handler.mode(), EditorMode::Normal);
}

#[test]
fn test_search_repeat_keys() {
    let mut handler = InputHandler::new();
    assert_eq!(
        press(&mut handler, "nN"),
        vec![
            Dispatch::Command(Command::normal(Action::SearchNext)),
            Dispatch::Command(Command::normal(Action::SearchPrevious)),
        ]
    );
}

#[test]
fn test_search_from_visual_returns_to_visual() {
    let mut handler = InputHandler::new();
    press(&mut handler, "v/a");
    assert_eq!(handler.mode(), EditorMode::Cmdline);

    assert_eq!(
        handler.handle_key(Key::Char('\n')),
        Dispatch::Command(Command::new(
            Action::Search {
                pattern: "a".to_string(),
                forward: true,
            },
            EditorMode::Visual
        ))
    );
    assert_eq!(handler.mode(), EditorMode::Visual);

    assert_eq!(
        handler.handle_key(Key::Esc),
        Dispatch::Command(Command::new(Action::ExitVisual, EditorMode::Visual))
    );
    assert_eq!(handler.mode(), EditorMode::Normal);
}

#[test]
fn test_search_cancel_from_visual_returns_to_visual() {
    let mut handler = InputHandler::new();
    press(&mut handler, "v?x");
    assert_eq!(handler.handle_key(Key::Esc), Dispatch::None);
    assert_eq!(handler.mode(), EditorMode::Visual);
    assert_eq!(handler.prompt_line(), None);
}
