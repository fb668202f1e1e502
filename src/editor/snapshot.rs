//! Point-in-time view of a window, produced for the renderer.

use std::ops::Range;

/// Everything needed to draw one window, read under the window lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub name: String,
    /// Bytes per row.
    pub width: i64,
    /// Index of the first visible byte.
    pub offset: i64,
    pub cursor: i64,
    /// The visible region, `height * width` bytes long.
    pub bytes: Vec<u8>,
    /// How many of `bytes` were actually read; short at the end of content.
    pub size: usize,
    /// Logical length, including a virtual slot while appending.
    pub length: i64,
    /// True while the high nibble of a byte is waiting for its low nibble.
    pub pending: bool,
    /// The stashed high nibble, already shifted into the upper four bits.
    pub pending_byte: u8,
    pub visual_start: Option<i64>,
    pub edited_ranges: Vec<Range<i64>>,
    pub focus_text: bool,
}

impl WindowState {
    /// The inclusive byte range covered by the visual selection, if any.
    pub fn visual_range(&self) -> Option<(i64, i64)> {
        self.visual_start
            .map(|start| (start.min(self.cursor), start.max(self.cursor)))
    }

    /// Returns true if the byte at `index` holds an unsaved edit.
    pub fn is_edited(&self, index: i64) -> bool {
        self.edited_ranges.iter().any(|range| range.contains(&index))
    }

    /// Returns the visible byte at `index`, if it was read.
    pub fn byte_at(&self, index: i64) -> Option<u8> {
        let relative = index - self.offset;
        if relative < 0 || relative as usize >= self.size {
            return None;
        }
        self.bytes.get(relative as usize).copied()
    }
}
