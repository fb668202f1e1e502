//! Status line widget for displaying editor state information.
//!
//! The status line shows:
//! - Current mode (NORMAL, INSERT, REPLACE, VISUAL, COMMAND)
//! - Filename (or "[No Name]" for piped input)
//! - `[text]` while typed characters go to the ASCII column
//! - Cursor offset and length, in hex and decimal
//!
//! Example status line: `NORMAL | data.bin            0x1f/0x400 (31/1024)`

use super::Status;
use crate::editor::snapshot::WindowState;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the status line showing mode, filename, focus and position.
pub fn render_status_line(
    f: &mut Frame,
    area: Rect,
    state: &WindowState,
    status: &Status,
    colors: &ThemeColors,
) {
    let filename = status.filename.as_deref().unwrap_or("[No Name]");
    let mode_and_file = format!("{} | {}", status.mode, filename);
    let focus = if state.focus_text { " [text]" } else { "" };
    let position = format!(
        "{:#x}/{:#x} ({}/{})",
        state.cursor, state.length, state.cursor, state.length
    );

    // Calculate padding to position right-aligned text
    let total_width = area.width as usize;
    let left_len = mode_and_file.len() + focus.len();
    let padding = if left_len + position.len() + 1 < total_width {
        total_width - left_len - position.len()
    } else {
        1
    };

    let default_style = Style::default()
        .fg(colors.status_line_fg)
        .bg(colors.status_line_bg);
    let focus_style = Style::default()
        .fg(colors.warning)
        .bg(colors.status_line_bg);

    let mut spans = vec![Span::styled(mode_and_file, default_style)];
    if !focus.is_empty() {
        spans.push(Span::styled(focus, focus_style));
    }
    spans.push(Span::styled(" ".repeat(padding), default_style));
    spans.push(Span::styled(position, default_style));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
