//! Message area rendering for displaying messages and the search prompt.

use super::{MessageLevel, Status};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the message area at the bottom of the screen.
///
/// Displays:
/// - Search prompt: `/` or `?` with the pattern typed so far
/// - Messages: errors, warnings, info
/// - Empty when no message
pub fn render_message_area(f: &mut Frame, area: Rect, status: &Status, colors: &ThemeColors) {
    let content = if let Some(prompt) = &status.prompt {
        Line::from(vec![Span::styled(
            prompt.as_str(),
            Style::default().fg(colors.info),
        )])
    } else if let Some(message) = &status.message {
        let color = match message.level {
            MessageLevel::Error => colors.error,
            MessageLevel::Warning => colors.warning,
            MessageLevel::Info => colors.info,
        };
        Line::from(vec![Span::styled(
            message.text.as_str(),
            Style::default().fg(color),
        )])
    } else {
        Line::from("")
    };

    let paragraph =
        Paragraph::new(content).style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}
