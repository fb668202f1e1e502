//! Commands consumed by a window's command loop.

use super::mode::EditorMode;
use super::position::Range;

/// What a command asks the window to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorPrev,
    CursorNext,
    CursorHead,
    CursorEnd,
    /// Move to `range.to`, or `range.from` when no end is given.
    CursorGoto(Range),
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PageUpHalf,
    PageDownHalf,
    PageTop,
    PageEnd,
    /// Follow the decimal offset written next to the cursor.
    JumpTo,
    JumpBack,

    DeleteByte,
    DeletePrevByte,
    Increment,
    Decrement,

    StartInsert,
    StartInsertHead,
    StartAppend,
    StartAppendEnd,
    StartReplaceByte,
    StartReplace,
    ExitInsert,
    /// A typed character: a hex digit, or any rune when text has focus.
    Rune(char),
    Backspace,
    /// Delete key while editing: removes the byte under the cursor.
    Delete,

    StartVisual,
    SwitchVisualEnd,
    ExitVisual,

    /// Toggle between hex-digit and text input.
    SwitchFocus,

    Undo,
    Redo,

    Search { pattern: String, forward: bool },
    /// Repeat the last search in its direction.
    SearchNext,
    /// Repeat the last search in the opposite direction.
    SearchPrevious,
}

impl Action {
    /// Returns true for the cursor, scroll and jump commands.
    ///
    /// A navigation command that follows an edit in Insert or Replace mode
    /// closes the edit's undo group.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Action::CursorUp
                | Action::CursorDown
                | Action::CursorLeft
                | Action::CursorRight
                | Action::CursorPrev
                | Action::CursorNext
                | Action::CursorHead
                | Action::CursorEnd
                | Action::CursorGoto(_)
                | Action::ScrollUp
                | Action::ScrollDown
                | Action::PageUp
                | Action::PageDown
                | Action::PageUpHalf
                | Action::PageDownHalf
                | Action::PageTop
                | Action::PageEnd
                | Action::JumpTo
                | Action::JumpBack
        )
    }
}

/// A resolved user command: an action, the mode it was issued in, and a repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    pub mode: EditorMode,
    /// Repeat count. Values below 1 mean 1.
    pub count: i64,
}

impl Command {
    /// Creates a command with a count of 1.
    pub fn new(action: Action, mode: EditorMode) -> Self {
        Self {
            action,
            mode,
            count: 1,
        }
    }

    /// Shorthand for a Normal-mode command.
    pub fn normal(action: Action) -> Self {
        Self::new(action, EditorMode::Normal)
    }

    /// Returns the command with its repeat count replaced.
    pub fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    /// The repeat count, treating non-positive values as 1.
    pub fn effective_count(&self) -> i64 {
        self.count.max(1)
    }
}
