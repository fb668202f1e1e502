//! Editor mode management for modal editing.
//!
//! This module provides the `EditorMode` enum that represents the current editing
//! mode in hexquill. Following vim-style modal editing, the behavior of every
//! command depends on the mode it was issued in.
//!
//! # Modes
//!
//! - **Normal**: The default mode for navigation and byte-level commands
//! - **Insert**: Typed nibbles assemble new bytes inserted at the cursor
//! - **Replace**: Typed nibbles assemble bytes that overwrite the cursor byte
//! - **Visual**: A selection anchored at the cursor follows navigation
//! - **Cmdline**: The `:`/search prompt owns the keyboard
//!
//! # Example
//!
//! ```
//! use hexquill::editor::mode::EditorMode;
//!
//! // Editor starts in Normal mode by default
//! let mode = EditorMode::default();
//! assert_eq!(mode, EditorMode::Normal);
//! assert_eq!(format!("{}", mode), "NORMAL");
//!
//! // Switch to Replace mode
//! let mode = EditorMode::Replace;
//! assert_eq!(format!("{}", mode), "REPLACE");
//! assert!(mode.is_editing());
//! ```

use std::fmt;

/// Represents the current editing mode of the editor.
///
/// The mode is carried by every command so the window can apply mode-specific
/// boundary rules (for example, only the editing modes may move the cursor onto
/// the virtual slot past the end of content). It is displayed in the status
/// bar using the `Display` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// Normal mode for navigation and byte commands.
    #[default]
    Normal,
    /// Insert mode: committed bytes are inserted before the cursor.
    Insert,
    /// Replace mode: committed bytes overwrite the byte at the cursor.
    Replace,
    /// Visual mode for selecting a byte range.
    Visual,
    /// Command-line mode for `:` commands and search prompts.
    Cmdline,
}

impl EditorMode {
    /// Returns true for the modes that assemble bytes from typed nibbles.
    pub fn is_editing(self) -> bool {
        matches!(self, EditorMode::Insert | EditorMode::Replace)
    }
}

impl fmt::Display for EditorMode {
    /// Formats the mode as an uppercase string suitable for display in the status bar.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexquill::editor::mode::EditorMode;
    ///
    /// assert_eq!(format!("{}", EditorMode::Normal), "NORMAL");
    /// assert_eq!(format!("{}", EditorMode::Insert), "INSERT");
    /// assert_eq!(format!("{}", EditorMode::Cmdline), "COMMAND");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMode::Normal => write!(f, "NORMAL"),
            EditorMode::Insert => write!(f, "INSERT"),
            EditorMode::Replace => write!(f, "REPLACE"),
            EditorMode::Visual => write!(f, "VISUAL"),
            EditorMode::Cmdline => write!(f, "COMMAND"),
        }
    }
}
