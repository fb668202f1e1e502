//! Key sequence matching with vim-style count prefixes.
//!
//! A [`KeyManager`] holds the bindings for one mode. Keys are fed one at a
//! time with [`KeyManager::press`]; a sequence like `g g` or `Z Z` reports
//! [`KeyPress::Pending`] until it is complete. Managers that accept counts
//! collect leading digits (`12j`), where `0` only extends a count already
//! started so it stays free for "go to row head".

use crate::editor::command::Action;
use crate::editor::mode::EditorMode;
use std::collections::HashMap;

/// What a matched key sequence asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// A command for the window.
    Window(Action),
    Quit,
    SaveAndQuit,
    /// Open the search prompt.
    PromptSearch { forward: bool },
}

/// Result of feeding one key to a [`KeyManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPress {
    /// A full sequence matched. `count` is 0 when no count was typed.
    Matched { action: KeyAction, count: i64 },
    /// More keys are needed.
    Pending,
    /// The keys typed so far match nothing; they have been discarded.
    Unmatched,
}

/// Bindings and in-progress input for one mode.
#[derive(Debug, Clone, Default)]
pub struct KeyManager {
    bindings: Vec<(Vec<String>, KeyAction)>,
    keys: Vec<String>,
    count: Option<i64>,
    accepts_count: bool,
}

impl KeyManager {
    /// Creates an empty manager.
    pub fn new(accepts_count: bool) -> Self {
        Self {
            accepts_count,
            ..Self::default()
        }
    }

    /// Binds a key sequence. A later binding for the same sequence wins.
    pub fn register(&mut self, action: KeyAction, sequence: &[&str]) {
        let sequence: Vec<String> = sequence.iter().map(|key| key.to_string()).collect();
        self.bindings.retain(|(keys, _)| *keys != sequence);
        self.bindings.push((sequence, action));
    }

    /// Shorthand for binding a window action.
    pub fn bind(&mut self, action: Action, sequence: &[&str]) {
        self.register(KeyAction::Window(action), sequence);
    }

    /// Feeds one key.
    pub fn press(&mut self, key: &str) -> KeyPress {
        if self.accepts_count && self.keys.is_empty() {
            if let Some(digit) = single_digit(key) {
                if digit != 0 || self.count.is_some() {
                    let count = self.count.unwrap_or(0);
                    self.count = Some(count.saturating_mul(10).saturating_add(digit));
                    return KeyPress::Pending;
                }
            }
        }

        self.keys.push(key.to_string());
        if let Some((_, action)) = self.bindings.iter().find(|(keys, _)| *keys == self.keys) {
            let action = action.clone();
            let count = self.count.take().unwrap_or(0);
            self.keys.clear();
            return KeyPress::Matched { action, count };
        }
        if self
            .bindings
            .iter()
            .any(|(keys, _)| keys.starts_with(&self.keys))
        {
            return KeyPress::Pending;
        }
        self.reset();
        KeyPress::Unmatched
    }

    /// Drops any partial sequence and count.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.count = None;
    }

    /// Returns true while a sequence or count is partially typed.
    pub fn is_pending(&self) -> bool {
        !self.keys.is_empty() || self.count.is_some()
    }
}

fn single_digit(key: &str) -> Option<i64> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10).map(i64::from),
        _ => None,
    }
}

fn register_navigation(km: &mut KeyManager) {
    km.bind(Action::CursorUp, &["up"]);
    km.bind(Action::CursorDown, &["down"]);
    km.bind(Action::CursorLeft, &["left"]);
    km.bind(Action::CursorRight, &["right"]);
    km.bind(Action::PageUp, &["pgup"]);
    km.bind(Action::PageDown, &["pgdn"]);
    km.bind(Action::PageTop, &["home"]);
    km.bind(Action::PageEnd, &["end"]);
    km.bind(Action::CursorUp, &["k"]);
    km.bind(Action::CursorDown, &["j"]);
    km.bind(Action::CursorLeft, &["h"]);
    km.bind(Action::CursorRight, &["l"]);
    km.bind(Action::CursorPrev, &["b"]);
    km.bind(Action::CursorNext, &["w"]);
    km.bind(Action::CursorHead, &["0"]);
    km.bind(Action::CursorHead, &["^"]);
    km.bind(Action::CursorEnd, &["$"]);
    km.bind(Action::ScrollUp, &["c-y"]);
    km.bind(Action::ScrollDown, &["c-e"]);
    km.bind(Action::PageUp, &["c-b"]);
    km.bind(Action::PageDown, &["c-f"]);
    km.bind(Action::PageUpHalf, &["c-u"]);
    km.bind(Action::PageDownHalf, &["c-d"]);
    km.bind(Action::PageTop, &["g", "g"]);
    km.bind(Action::PageEnd, &["G"]);
    km.bind(Action::JumpTo, &["c-]"]);
    km.bind(Action::JumpBack, &["c-t"]);
    km.register(KeyAction::PromptSearch { forward: true }, &["/"]);
    km.register(KeyAction::PromptSearch { forward: false }, &["?"]);
    km.bind(Action::SearchNext, &["n"]);
    km.bind(Action::SearchPrevious, &["N"]);
}

/// Bindings for Normal mode.
pub fn normal_manager() -> KeyManager {
    let mut km = KeyManager::new(true);
    km.register(KeyAction::Quit, &["Z", "Q"]);
    km.register(KeyAction::SaveAndQuit, &["Z", "Z"]);
    km.register(KeyAction::Quit, &["c-w", "q"]);
    km.register(KeyAction::Quit, &["c-w", "c-q"]);
    km.register(KeyAction::Quit, &["c-w", "c"]);
    register_navigation(&mut km);
    km.bind(Action::DeleteByte, &["x"]);
    km.bind(Action::DeletePrevByte, &["X"]);
    km.bind(Action::Increment, &["c-a"]);
    km.bind(Action::Increment, &["+"]);
    km.bind(Action::Decrement, &["c-x"]);
    km.bind(Action::Decrement, &["-"]);

    km.bind(Action::StartInsert, &["i"]);
    km.bind(Action::StartInsertHead, &["I"]);
    km.bind(Action::StartAppend, &["a"]);
    km.bind(Action::StartAppendEnd, &["A"]);
    km.bind(Action::StartReplaceByte, &["r"]);
    km.bind(Action::StartReplace, &["R"]);
    km.bind(Action::StartVisual, &["v"]);

    km.bind(Action::Undo, &["u"]);
    km.bind(Action::Redo, &["c-r"]);
    km.bind(Action::SwitchFocus, &["tab"]);
    km
}

/// Bindings shared by Insert and Replace mode.
pub fn editing_manager() -> KeyManager {
    let mut km = KeyManager::new(false);
    km.bind(Action::ExitInsert, &["escape"]);
    km.bind(Action::ExitInsert, &["c-c"]);
    km.bind(Action::CursorUp, &["up"]);
    km.bind(Action::CursorDown, &["down"]);
    km.bind(Action::CursorLeft, &["left"]);
    km.bind(Action::CursorRight, &["right"]);
    km.bind(Action::CursorUp, &["c-p"]);
    km.bind(Action::CursorDown, &["c-n"]);
    km.bind(Action::CursorPrev, &["c-b"]);
    km.bind(Action::CursorNext, &["c-f"]);
    km.bind(Action::PageUp, &["pgup"]);
    km.bind(Action::PageDown, &["pgdn"]);
    km.bind(Action::PageTop, &["home"]);
    km.bind(Action::PageEnd, &["end"]);
    km.bind(Action::Backspace, &["backspace"]);
    km.bind(Action::Backspace, &["c-h"]);
    km.bind(Action::Delete, &["delete"]);
    km.bind(Action::SwitchFocus, &["tab"]);
    km
}

/// Bindings for Visual mode: Normal-mode navigation plus selection keys.
pub fn visual_manager() -> KeyManager {
    let mut km = KeyManager::new(true);
    register_navigation(&mut km);
    km.bind(Action::SwitchVisualEnd, &["o"]);
    km.bind(Action::ExitVisual, &["escape"]);
    km.bind(Action::ExitVisual, &["c-c"]);
    km.bind(Action::ExitVisual, &["v"]);
    km
}

/// The default manager for every mode that reads keys through bindings.
///
/// Cmdline mode has no entry; the search prompt reads raw keys.
pub fn default_managers() -> HashMap<EditorMode, KeyManager> {
    let mut managers = HashMap::new();
    managers.insert(EditorMode::Normal, normal_manager());
    managers.insert(EditorMode::Insert, editing_manager());
    managers.insert(EditorMode::Replace, editing_manager());
    managers.insert(EditorMode::Visual, visual_manager());
    managers
}
