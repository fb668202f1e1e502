//! UI module for the hexquill terminal interface.
//!
//! This module provides the main UI structure for rendering a window
//! snapshot, including layout management and widget composition.

pub mod hex_view;
pub mod message_area;
pub mod status_line;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::editor::mode::EditorMode;
use crate::editor::snapshot::WindowState;
use crate::theme::{get_builtin_theme, Theme};

/// Rows used by the status line and the message area.
pub const CHROME_ROWS: u16 = 2;

/// Severity of a message shown in the message area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// A message for the message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
        }
    }
}

/// Editor state that lives outside the window: mode, file name, prompt, message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub mode: EditorMode,
    pub filename: Option<String>,
    /// The search prompt line, shown instead of the message while typing.
    pub prompt: Option<String>,
    pub message: Option<Message>,
}

/// Main UI structure that manages the terminal interface rendering.
///
/// The UI is composed of three main areas:
/// - Hex view (top): offset column, hex bytes, ASCII column
/// - Status line (middle): Shows current mode, file info, and cursor position
/// - Message area (bottom): Displays messages and the search prompt
///
/// # Example
///
/// ```
/// use hexquill::ui::UI;
/// use hexquill::theme::get_builtin_theme;
///
/// let theme = get_builtin_theme("default-dark").unwrap();
/// let ui = UI::new(theme, true);
/// assert_eq!(ui.theme_name(), "default-dark");
/// ```
pub struct UI {
    theme: Theme,
    show_ascii: bool,
}

impl UI {
    /// Creates a new UI instance with the specified theme.
    pub fn new(theme: Theme, show_ascii: bool) -> Self {
        Self { theme, show_ascii }
    }

    /// Returns the current theme name.
    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    /// Changes the current theme.
    ///
    /// Returns true if the theme was successfully changed, false if the theme name is invalid.
    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if let Some(new_theme) = get_builtin_theme(theme_name) {
            self.theme = new_theme;
            true
        } else {
            false
        }
    }

    /// Renders the UI to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        state: &WindowState,
        status: &Status,
    ) -> Result<()> {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // Hex view
                    Constraint::Length(1), // Status line
                    Constraint::Length(1), // Message area
                ])
                .split(f.area());

            hex_view::render_hex_view(f, chunks[0], state, &self.theme.colors, self.show_ascii);
            status_line::render_status_line(f, chunks[1], state, status, &self.theme.colors);
            message_area::render_message_area(f, chunks[2], status, &self.theme.colors);
        })?;

        Ok(())
    }
}
