//! Color definitions for hexquill themes.
//!
//! This module defines the [`ThemeColors`] struct which contains all color
//! values used in the hexquill terminal UI. Colors are organized into three
//! categories: byte classes, UI elements, and semantic colors.

use ratatui::style::Color;

/// Defines all colors used in a hexquill theme.
///
/// # Examples
///
/// ```
/// use hexquill::theme::colors::ThemeColors;
///
/// let dark = ThemeColors::default_dark();
/// println!("Background: {:?}", dark.background);
/// ```
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Byte classes
    /// Color for the offset column.
    pub offset: Color,
    /// Color for zero bytes.
    pub zero: Color,
    /// Color for printable ASCII bytes.
    pub printable: Color,
    /// Color for all other bytes.
    pub binary: Color,
    /// Color for bytes changed since the file was opened.
    pub edited: Color,

    // UI colors
    /// Main background color for the editor.
    pub background: Color,
    /// Main foreground/text color for the editor.
    pub foreground: Color,
    /// Background of the byte under the cursor.
    pub cursor: Color,
    /// Background of the cursor cell in the unfocused column.
    pub cursor_shadow: Color,
    /// Background color for the status line.
    pub status_line_bg: Color,
    /// Foreground/text color for the status line.
    pub status_line_fg: Color,

    // Semantic colors
    /// Color for error messages.
    pub error: Color,
    /// Color for warning messages.
    pub warning: Color,
    /// Color for informational messages and prompts.
    pub info: Color,
    /// Background color for visual mode selection.
    pub visual_selection_bg: Color,
}

impl ThemeColors {
    /// Returns the default dark color scheme.
    ///
    /// ANSI colors adapt to the user's terminal color scheme, so the actual RGB
    /// values displayed will depend on their terminal configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexquill::theme::colors::ThemeColors;
    /// use ratatui::style::Color;
    ///
    /// let colors = ThemeColors::default_dark();
    /// assert_eq!(colors.background, Color::Reset);
    /// assert_eq!(colors.status_line_bg, Color::White);
    /// ```
    pub fn default_dark() -> Self {
        Self {
            offset: Color::DarkGray,
            zero: Color::DarkGray,
            printable: Color::Green,
            binary: Color::Gray,
            edited: Color::Yellow,

            background: Color::Reset,
            foreground: Color::Gray,
            cursor: Color::LightBlue,
            cursor_shadow: Color::DarkGray,
            status_line_bg: Color::White,
            status_line_fg: Color::Black,

            error: Color::Red,
            warning: Color::Yellow,
            info: Color::LightBlue,
            visual_selection_bg: Color::DarkGray,
        }
    }

    /// Returns the default light color scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexquill::theme::colors::ThemeColors;
    /// use ratatui::style::Color;
    ///
    /// let colors = ThemeColors::default_light();
    /// assert_eq!(colors.background, Color::Rgb(250, 250, 250));
    /// ```
    pub fn default_light() -> Self {
        Self {
            offset: Color::Rgb(160, 161, 167),
            zero: Color::Rgb(160, 161, 167),
            printable: Color::Rgb(80, 161, 79),
            binary: Color::Rgb(56, 58, 66),
            edited: Color::Rgb(202, 18, 67),

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            cursor: Color::Rgb(82, 139, 255),
            cursor_shadow: Color::Rgb(220, 220, 220),
            status_line_bg: Color::Rgb(238, 238, 238),
            status_line_fg: Color::Rgb(56, 58, 66),

            error: Color::Rgb(202, 18, 67),
            warning: Color::Rgb(152, 104, 1),
            info: Color::Rgb(1, 132, 188),
            visual_selection_bg: Color::Rgb(220, 220, 220),
        }
    }

    /// Returns the Gruvbox Dark color scheme.
    pub fn gruvbox_dark() -> Self {
        Self {
            offset: Color::Rgb(146, 131, 116),
            zero: Color::Rgb(102, 92, 84),
            printable: Color::Rgb(184, 187, 38),
            binary: Color::Rgb(235, 219, 178),
            edited: Color::Rgb(250, 189, 47),

            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            cursor: Color::Rgb(131, 165, 152),
            cursor_shadow: Color::Rgb(80, 73, 69),
            status_line_bg: Color::Rgb(80, 73, 69),
            status_line_fg: Color::Rgb(235, 219, 178),

            error: Color::Rgb(251, 73, 52),
            warning: Color::Rgb(250, 189, 47),
            info: Color::Rgb(131, 165, 152),
            visual_selection_bg: Color::Rgb(80, 73, 69),
        }
    }

    /// Returns the foreground color for a byte value.
    pub fn byte_color(&self, byte: u8) -> Color {
        match byte {
            0 => self.zero,
            0x20..=0x7e => self.printable,
            _ => self.binary,
        }
    }
}
