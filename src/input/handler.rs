//! Input event handler for reading keys and turning them into commands.

use super::keymap::{default_managers, KeyAction, KeyManager, KeyPress};
use super::keys::{event_key, key_name};
use crate::editor::command::{Action, Command};
use crate::editor::mode::EditorMode;
use crate::editor::snapshot::WindowState;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Stdin};
use termion::event::Key;
use termion::input::{Events, TermRead};
use tracing::trace;

/// Event source for reading terminal events.
///
/// This enum wraps the events iterator to maintain its state across
/// multiple calls, preventing character loss during rapid input (paste).
enum EventSource {
    /// Reading from stdin
    Stdin(Events<Stdin>),
    /// Reading from /dev/tty (when stdin was piped)
    Tty(Events<File>),
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing to send; the key was consumed by a sequence or the prompt.
    None,
    /// Send this command to the window.
    Command(Command),
    Quit,
    SaveAndQuit,
}

/// The search text being typed after `/` or `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchPrompt {
    text: String,
    forward: bool,
    /// Mode the prompt was opened from and returns to.
    origin: EditorMode,
}

/// Reads keys and tracks the editing mode they are interpreted in.
///
/// The handler owns the mode: commands are stamped with the mode that was
/// current when their key arrived, and mode transitions happen as the
/// commands are produced. The one transition it cannot predict, a single-byte
/// replace committing its byte, is picked up from the next snapshot through
/// [`InputHandler::after_command`].
pub struct InputHandler {
    /// Event source iterator (maintains position in input buffer)
    events: EventSource,
    mode: EditorMode,
    managers: HashMap<EditorMode, KeyManager>,
    prompt: Option<SearchPrompt>,
    /// True between `r` and the byte it replaces
    awaiting_replace: bool,
    /// A rune was sent while `awaiting_replace`
    replace_fed: bool,
    /// Nibble state from the most recent snapshot
    last_pending: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new InputHandler that reads from stdin.
    ///
    /// # Example
    ///
    /// ```
    /// use hexquill::input::InputHandler;
    /// use hexquill::editor::mode::EditorMode;
    ///
    /// let handler = InputHandler::new();
    /// assert_eq!(handler.mode(), EditorMode::Normal);
    /// ```
    pub fn new() -> Self {
        Self::with_source(EventSource::Stdin(io::stdin().events()))
    }

    /// Creates a new InputHandler that reads from /dev/tty.
    /// Use this when stdin has been consumed for piped data.
    pub fn new_with_tty() -> Result<Self> {
        let tty_file = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("Failed to open /dev/tty for keyboard input")?;

        Ok(Self::with_source(EventSource::Tty(tty_file.events())))
    }

    fn with_source(events: EventSource) -> Self {
        Self {
            events,
            mode: EditorMode::Normal,
            managers: default_managers(),
            prompt: None,
            awaiting_replace: false,
            replace_fed: false,
            last_pending: false,
        }
    }

    /// Returns the current mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the search prompt as displayed, e.g. `/abc`.
    pub fn prompt_line(&self) -> Option<String> {
        self.prompt.as_ref().map(|prompt| {
            let lead = if prompt.forward { '/' } else { '?' };
            format!("{}{}", lead, prompt.text)
        })
    }

    /// Blocks until the next key. Returns None when input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails
    pub fn next_key(&mut self) -> Result<Option<Key>> {
        loop {
            // Use the stored events iterator to maintain position in the input buffer.
            let event = match &mut self.events {
                EventSource::Stdin(events) => events.next(),
                EventSource::Tty(events) => events.next(),
            };
            match event {
                Some(event) => {
                    if let Some(key) = event_key(event?) {
                        return Ok(Some(key));
                    }
                }
                None => return Ok(None),
            }
        }
    }

    /// Interprets one key in the current mode.
    ///
    /// # Example
    ///
    /// ```
    /// use hexquill::input::{Dispatch, InputHandler};
    /// use hexquill::editor::command::{Action, Command};
    /// use termion::event::Key;
    ///
    /// let mut handler = InputHandler::new();
    /// assert_eq!(handler.handle_key(Key::Char('3')), Dispatch::None);
    /// assert_eq!(
    ///     handler.handle_key(Key::Char('j')),
    ///     Dispatch::Command(Command::normal(Action::CursorDown).with_count(3))
    /// );
    /// ```
    pub fn handle_key(&mut self, key: Key) -> Dispatch {
        if self.mode == EditorMode::Cmdline {
            return self.handle_prompt_key(key);
        }
        let mode = self.mode;
        let Some(name) = key_name(key) else {
            return Dispatch::None;
        };
        let Some(manager) = self.managers.get_mut(&mode) else {
            return Dispatch::None;
        };
        match manager.press(&name) {
            KeyPress::Matched { action, count } => self.resolve(action, mode, count),
            KeyPress::Pending => Dispatch::None,
            KeyPress::Unmatched => match key {
                Key::Char(c) if mode.is_editing() && !c.is_control() => {
                    if self.awaiting_replace {
                        self.replace_fed = true;
                    }
                    Dispatch::Command(Command::new(Action::Rune(c), mode))
                }
                _ => {
                    trace!(key = %name, %mode, "unbound key");
                    Dispatch::None
                }
            },
        }
    }

    /// Syncs mode with the window after a command was applied.
    ///
    /// A single-byte replace leaves Replace mode on its own once the byte is
    /// complete; the handler follows it back to Normal.
    pub fn after_command(&mut self, state: &WindowState) {
        if self.replace_fed
            && self.mode == EditorMode::Replace
            && (state.focus_text || (self.last_pending && !state.pending))
        {
            self.mode = EditorMode::Normal;
            self.awaiting_replace = false;
        }
        self.replace_fed = false;
        self.last_pending = state.pending;
    }

    fn resolve(&mut self, action: KeyAction, mode: EditorMode, count: i64) -> Dispatch {
        match action {
            KeyAction::Quit => Dispatch::Quit,
            KeyAction::SaveAndQuit => Dispatch::SaveAndQuit,
            KeyAction::PromptSearch { forward } => {
                self.prompt = Some(SearchPrompt {
                    text: String::new(),
                    forward,
                    origin: mode,
                });
                self.mode = EditorMode::Cmdline;
                Dispatch::None
            }
            KeyAction::Window(action) => {
                self.transition(&action);
                Dispatch::Command(Command::new(action, mode).with_count(count.max(1)))
            }
        }
    }

    fn transition(&mut self, action: &Action) {
        match action {
            Action::StartInsert
            | Action::StartInsertHead
            | Action::StartAppend
            | Action::StartAppendEnd => self.enter(EditorMode::Insert),
            Action::StartReplaceByte => {
                self.enter(EditorMode::Replace);
                self.awaiting_replace = true;
            }
            Action::StartReplace => self.enter(EditorMode::Replace),
            Action::StartVisual => self.enter(EditorMode::Visual),
            Action::ExitInsert | Action::ExitVisual => {
                self.enter(EditorMode::Normal);
                self.awaiting_replace = false;
            }
            _ => {}
        }
    }

    fn enter(&mut self, mode: EditorMode) {
        if let Some(manager) = self.managers.get_mut(&self.mode) {
            manager.reset();
        }
        self.mode = mode;
    }

    fn handle_prompt_key(&mut self, key: Key) -> Dispatch {
        let Some(prompt) = self.prompt.as_mut() else {
            self.mode = EditorMode::Normal;
            return Dispatch::None;
        };
        match key {
            Key::Esc | Key::Ctrl('c') => self.close_prompt(),
            Key::Char('\n') | Key::Char('\r') | Key::Ctrl('j') | Key::Ctrl('m') => {
                let SearchPrompt {
                    text,
                    forward,
                    origin,
                } = prompt.clone();
                self.close_prompt();
                let action = if text.is_empty() {
                    Action::SearchNext
                } else {
                    Action::Search {
                        pattern: text,
                        forward,
                    }
                };
                return Dispatch::Command(Command::new(action, origin));
            }
            Key::Backspace | Key::Ctrl('h') => {
                if prompt.text.pop().is_none() {
                    self.close_prompt();
                }
            }
            Key::Ctrl('u') => prompt.text.clear(),
            Key::Char(c) if !c.is_control() => prompt.text.push(c),
            _ => {}
        }
        Dispatch::None
    }

    fn close_prompt(&mut self) {
        let origin = self.prompt.take().map(|prompt| prompt.origin);
        self.mode = origin.unwrap_or(EditorMode::Normal);
    }
}
