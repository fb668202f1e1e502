//! Hex view rendering: offset column, hex bytes and the ASCII column.

use crate::editor::snapshot::WindowState;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Columns taken by the offset column and the separators around the byte columns.
pub const FIXED_COLUMNS: u16 = 11;

/// Columns taken by one byte (two hex digits, a space, one ASCII character).
pub const COLUMNS_PER_BYTE: u16 = 4;

/// Returns how many bytes per row fit in `columns`, capped at `preferred`.
///
/// # Example
///
/// ```
/// use hexquill::ui::hex_view::bytes_per_row;
///
/// assert_eq!(bytes_per_row(80, 16), 16);
/// assert_eq!(bytes_per_row(43, 16), 8);
/// assert_eq!(bytes_per_row(5, 16), 1);
/// ```
pub fn bytes_per_row(columns: u16, preferred: usize) -> i64 {
    let fits = columns.saturating_sub(FIXED_COLUMNS) / COLUMNS_PER_BYTE;
    (fits as i64).min(preferred as i64).max(1)
}

/// Renders the visible rows of a window snapshot.
///
/// Highlights:
/// - the cursor, strongly in the focused column and faintly in the other
/// - a pending high nibble in place of the byte under the cursor
/// - the visual selection
/// - bytes edited since the file was opened
pub fn render_hex_view(
    f: &mut Frame,
    area: Rect,
    state: &WindowState,
    colors: &ThemeColors,
    show_ascii: bool,
) {
    let width = state.width.max(1);
    let rows = (state.bytes.len() as i64 + width - 1) / width;
    let visual = state.visual_range();
    let mut lines = Vec::new();

    for row in 0..rows.min(area.height as i64) {
        let start = state.offset + row * width;
        if start > 0 && start >= state.length {
            break;
        }

        let mut spans = vec![Span::styled(
            format!("{:08x}  ", start),
            Style::default().fg(colors.offset),
        )];
        let mut ascii = Vec::with_capacity(width as usize);

        for index in start..start + width {
            let (hex, ch, fg) = cell_text(state, index, colors);
            let mut style = Style::default().fg(fg);
            if state.is_edited(index) {
                style = style.fg(colors.edited).add_modifier(Modifier::BOLD);
            }
            if visual.is_some_and(|(from, to)| (from..=to).contains(&index)) {
                style = style.bg(colors.visual_selection_bg);
            }

            let (hex_style, ascii_style) = if index == state.cursor {
                let focused = style.fg(Color::Black).bg(colors.cursor);
                let shadow = style.bg(colors.cursor_shadow);
                if state.focus_text {
                    (shadow, focused)
                } else {
                    (focused, shadow)
                }
            } else {
                (style, style)
            };

            spans.push(Span::styled(hex, hex_style));
            spans.push(Span::raw(" "));
            ascii.push(Span::styled(ch.to_string(), ascii_style));
        }

        if show_ascii {
            spans.push(Span::raw(" "));
            spans.extend(ascii);
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}

/// The hex text, ASCII character and color shown for one byte index.
fn cell_text(state: &WindowState, index: i64, colors: &ThemeColors) -> (String, char, Color) {
    if index == state.cursor && state.pending {
        return (
            format!("{:x}_", state.pending_byte >> 4),
            ' ',
            colors.edited,
        );
    }
    match state.byte_at(index) {
        Some(byte) => (
            format!("{:02x}", byte),
            printable(byte),
            colors.byte_color(byte),
        ),
        None => ("  ".to_string(), ' ', colors.foreground),
    }
}

fn printable(byte: u8) -> char {
    if (0x20..=0x7e).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn state(bytes: &[u8], width: i64, height: i64) -> WindowState {
        let mut visible = bytes.to_vec();
        visible.resize((width * height) as usize, 0);
        WindowState {
            name: "test".to_string(),
            width,
            offset: 0,
            cursor: 0,
            bytes: visible,
            size: bytes.len(),
            length: bytes.len() as i64,
            pending: false,
            pending_byte: 0,
            visual_start: None,
            edited_ranges: Vec::new(),
            focus_text: false,
        }
    }

    fn rendered(state: &WindowState, show_ascii: bool) -> Vec<String> {
        let backend = TestBackend::new(60, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let colors = ThemeColors::default_dark();
        terminal
            .draw(|f| render_hex_view(f, f.area(), state, &colors, show_ascii))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..4)
            .map(|y| (0..60).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_row_layout() {
        let lines = rendered(&state(b"Hi!\x00\x01", 4, 2), true);
        assert!(lines[0].starts_with("00000000  48 69 21 00  Hi!."));
        assert!(lines[1].starts_with("00000004  01"));
    }

    #[test]
    fn test_rows_past_content_are_blank() {
        let lines = rendered(&state(b"abcd", 4, 3), true);
        assert!(lines[0].starts_with("00000000"));
        assert!(lines[1].trim().is_empty());
    }

    #[test]
    fn test_empty_content_shows_one_row() {
        let lines = rendered(&state(b"", 4, 2), true);
        assert!(lines[0].starts_with("00000000"));
    }

    #[test]
    fn test_pending_nibble_shown_at_cursor() {
        let mut state = state(b"\xab\xcd", 4, 1);
        state.pending = true;
        state.pending_byte = 0x70;
        let lines = rendered(&state, false);
        assert!(lines[0].starts_with("00000000  7_ cd"));
    }

    #[test]
    fn test_cursor_cell_is_highlighted() {
        let state = state(b"\x01\x02", 4, 1);
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let colors = ThemeColors::default_dark();
        terminal
            .draw(|f| render_hex_view(f, f.area(), &state, &colors, true))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(10, 0)].bg, colors.cursor);
        assert_eq!(buffer[(13, 0)].bg, colors.background);
    }
}
