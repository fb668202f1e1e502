//! The editing core of one window.
//!
//! A [`Window`] owns a content buffer together with everything needed to edit
//! it interactively: the cursor, the viewport, the byte being assembled from
//! typed nibbles, the visual anchor, the jump stack and the undo history.
//!
//! All mutation goes through [`Window::apply`], which runs one [`Command`] and
//! then re-establishes the viewport invariants:
//!
//! - the viewport offset is a multiple of the row width,
//! - the cursor lies inside the viewport (unless the content is empty),
//! - the viewport never scrolls past the last row of content.
//!
//! `apply` also decides whether the command closes an undo group. Concurrent
//! access is handled one level up by [`crate::editor::handle::WindowHandle`],
//! which serializes commands and snapshot reads behind a lock.
//!
//! # Example
//!
//! ```
//! use hexquill::config::WindowOptions;
//! use hexquill::editor::command::{Action, Command};
//! use hexquill::editor::mode::EditorMode;
//! use hexquill::editor::window::Window;
//! use std::io::Cursor;
//!
//! let mut window = Window::new(Cursor::new(vec![0u8; 64]), "zeros", WindowOptions::default()).unwrap();
//! window.set_size(16, 2);
//!
//! window.apply(&Command::normal(Action::PageEnd)).unwrap();
//! assert_eq!(window.cursor(), 48);
//! assert_eq!(window.offset(), 32);
//!
//! window.apply(&Command::normal(Action::StartInsert)).unwrap();
//! for digit in ['f', 'f'] {
//!     window.apply(&Command::new(Action::Rune(digit), EditorMode::Insert)).unwrap();
//! }
//! window.apply(&Command::new(Action::ExitInsert, EditorMode::Insert)).unwrap();
//! assert_eq!(window.length(), 65);
//! ```

use super::command::{Action, Command};
use super::error::WindowError;
use super::history::{Checkpoint, History};
use super::jumplist::JumpStack;
use super::mode::EditorMode;
use super::position::{Anchors, Range};
use super::snapshot::WindowState;
use crate::buffer::{Buffer, Source};
use crate::config::WindowOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::{debug, trace};

/// Bytes per row before the first resize.
pub const DEFAULT_WIDTH: i64 = 16;

/// Editing state of one window over one buffer.
#[derive(Debug)]
pub struct Window {
    buffer: Buffer,
    history: History,
    name: String,
    options: WindowOptions,
    width: i64,
    height: i64,
    offset: i64,
    cursor: i64,
    /// Logical length; one more than the buffer while `extending`.
    length: i64,
    jumps: JumpStack,
    /// The cursor was advanced past the byte it was on when editing began.
    appending: bool,
    /// `length` counts a virtual slot after the last real byte.
    extending: bool,
    pending: bool,
    pending_byte: u8,
    replace_byte: bool,
    visual_start: Option<i64>,
    focus_text: bool,
    change_tick: u64,
    prev_changed: bool,
    /// `change_tick` as of the newest checkpoint.
    checkpoint_tick: u64,
    /// Set when a single-byte replace committed and left Replace mode.
    auto_exited: bool,
    last_search: Option<(String, bool)>,
}

impl Window {
    /// Opens a window over `source` and records the initial checkpoint.
    pub fn new<S: Source + 'static>(
        source: S,
        name: impl Into<String>,
        options: WindowOptions,
    ) -> Result<Self, WindowError> {
        let buffer = Buffer::new(source)?;
        let length = buffer.len();
        let mut history = History::new(options.undo_limit);
        history.push(&buffer, 0, 0);
        Ok(Self {
            buffer,
            history,
            name: name.into(),
            options,
            width: DEFAULT_WIDTH,
            height: 1,
            offset: 0,
            cursor: 0,
            length,
            jumps: JumpStack::new(),
            appending: false,
            extending: false,
            pending: false,
            pending_byte: 0,
            replace_byte: false,
            visual_start: None,
            focus_text: false,
            change_tick: 0,
            prev_changed: false,
            checkpoint_tick: 0,
            auto_exited: false,
            last_search: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Logical length, including the virtual slot while appending.
    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn visual_start(&self) -> Option<i64> {
        self.visual_start
    }

    pub fn focus_text(&self) -> bool {
        self.focus_text
    }

    /// Returns true while a high nibble waits for its low nibble.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns true while `length` includes a virtual trailing slot.
    pub fn is_extending(&self) -> bool {
        self.extending
    }

    /// Number of saved positions on the jump stack.
    pub fn jump_depth(&self) -> usize {
        self.jumps.len()
    }

    /// Number of undo checkpoints currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Position of the current checkpoint in the undo history.
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    /// Resizes the viewport and scrolls it back over the cursor.
    pub fn set_size(&mut self, width: i64, height: i64) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.normalize_viewport();
    }

    /// Runs one command and records an undo checkpoint if it ends an edit.
    ///
    /// Non-fatal errors (I/O, unresolvable positions) abort only this command;
    /// the viewport and history bookkeeping still run. [`WindowError::Internal`]
    /// is returned untouched and means the caller dispatched a command that can
    /// never be valid in its mode.
    pub fn apply(&mut self, command: &Command) -> Result<(), WindowError> {
        let (offset, cursor, tick) = (self.offset, self.cursor, self.change_tick);
        self.auto_exited = false;
        debug!(
            window = %self.name,
            action = ?command.action,
            mode = %command.mode,
            count = command.count,
            "apply command"
        );

        let result = self.dispatch(command);
        if result.as_ref().is_err_and(WindowError::is_fatal) {
            return result;
        }
        self.settle_virtual_slot();
        self.normalize_viewport();

        let changed = tick != self.change_tick;
        if !matches!(command.action, Action::Undo | Action::Redo) {
            let exiting = command.action == Action::ExitInsert || self.auto_exited;
            if (command.mode == EditorMode::Normal && changed)
                || (exiting && self.change_tick != self.checkpoint_tick)
            {
                self.checkpoint(self.offset, self.cursor);
            } else if command.mode != EditorMode::Normal
                && self.prev_changed
                && !changed
                && command.action.is_navigation()
            {
                // Close the edit run where it ended, not where the cursor went.
                self.checkpoint(offset, cursor);
            }
        }
        self.prev_changed = changed;
        result
    }

    fn dispatch(&mut self, command: &Command) -> Result<(), WindowError> {
        let count = command.effective_count();
        let mode = command.mode;
        match &command.action {
            Action::CursorUp => self.cursor_up(count),
            Action::CursorDown => self.cursor_down(count),
            Action::CursorLeft => self.cursor_left(count),
            Action::CursorRight => self.cursor_right(mode, count),
            Action::CursorPrev => self.cursor_prev(count),
            Action::CursorNext => self.cursor_next(mode, count),
            Action::CursorHead => self.cursor_head(),
            Action::CursorEnd => self.cursor_end(count),
            Action::CursorGoto(range) => self.cursor_goto(range)?,
            Action::ScrollUp => self.scroll_up(count),
            Action::ScrollDown => self.scroll_down(count),
            Action::PageUp => self.page_up(self.page_jump()),
            Action::PageDown => self.page_down(self.page_jump()),
            Action::PageUpHalf => self.page_up((self.height / 2).max(1)),
            Action::PageDownHalf => self.page_down((self.height / 2).max(1)),
            Action::PageTop => self.page_top(),
            Action::PageEnd => self.page_end(),
            Action::JumpTo => self.jump_to()?,
            Action::JumpBack => self.jump_back(),

            Action::DeleteByte | Action::Delete => {
                let count = if command.action == Action::Delete { 1 } else { count };
                self.delete_byte(count)
            }
            Action::DeletePrevByte => self.delete_prev_byte(count),
            Action::Increment => self.add_to_byte((count % 256) as u8)?,
            Action::Decrement => self.add_to_byte(((256 - count % 256) % 256) as u8)?,

            Action::StartInsert => self.start_insert(),
            Action::StartInsertHead => {
                self.cursor_head();
                self.start_insert();
            }
            Action::StartAppend => self.start_append(),
            Action::StartAppendEnd => {
                self.cursor_end(1);
                self.start_append();
            }
            Action::StartReplaceByte => self.start_replace(true),
            Action::StartReplace => self.start_replace(false),
            Action::ExitInsert => self.exit_insert(),
            Action::Rune(ch) => self.insert_rune(mode, *ch),
            Action::Backspace => self.backspace(),

            Action::StartVisual => self.visual_start = Some(self.cursor),
            Action::SwitchVisualEnd => self.switch_visual_end()?,
            Action::ExitVisual => self.visual_start = None,

            Action::SwitchFocus => {
                self.focus_text = !self.focus_text;
                self.pending = false;
                self.pending_byte = 0;
            }

            Action::Undo => {
                require_normal(mode, "undo issued outside normal mode")?;
                self.step_history(count, History::undo);
            }
            Action::Redo => {
                require_normal(mode, "redo issued outside normal mode")?;
                self.step_history(count, History::redo);
            }

            Action::Search { pattern, forward } => {
                self.last_search = Some((pattern.clone(), *forward));
                self.search(pattern, *forward)?;
            }
            Action::SearchNext => {
                if let Some((pattern, forward)) = self.last_search.clone() {
                    self.search(&pattern, forward)?;
                }
            }
            Action::SearchPrevious => {
                if let Some((pattern, forward)) = self.last_search.clone() {
                    self.search(&pattern, !forward)?;
                }
            }
        }
        Ok(())
    }

    /// Reads the visible region and the fields the renderer needs.
    pub fn state(&self) -> Result<WindowState, WindowError> {
        let mut bytes = vec![0u8; self.page_size() as usize];
        let size = self.buffer.read_at(&mut bytes, self.offset)?;
        Ok(WindowState {
            name: self.name.clone(),
            width: self.width,
            offset: self.offset,
            cursor: self.cursor,
            bytes,
            size,
            length: self.length,
            pending: self.pending,
            pending_byte: self.pending_byte,
            visual_start: self.visual_start,
            edited_ranges: self.buffer.edited_ranges(),
            focus_text: self.focus_text,
        })
    }

    /// Copies the bytes spanned by `range` (or all content) into `dst`.
    ///
    /// The range is inclusive at both ends and may be given in either order.
    /// A range with only one position copies that single byte.
    pub fn write_to<W: Write + ?Sized>(
        &mut self,
        range: Option<&Range>,
        dst: &mut W,
    ) -> Result<u64, WindowError> {
        let bounds = match range.map(|range| (range.from.or(range.to), range.to.or(range.from))) {
            Some((Some(from), Some(to))) => {
                let anchors = self.anchors();
                Some((from.resolve(&anchors)?, to.resolve(&anchors)?))
            }
            _ => None,
        };
        match bounds {
            None => {
                self.buffer.seek(SeekFrom::Start(0))?;
                Ok(io::copy(&mut self.buffer, dst)?)
            }
            Some((from, to)) => {
                let (from, to) = (from.min(to), from.max(to));
                self.buffer.seek(SeekFrom::Start(from as u64))?;
                let mut span = (&mut self.buffer).take((to - from + 1) as u64);
                Ok(io::copy(&mut span, dst)?)
            }
        }
    }

    fn anchors(&self) -> Anchors {
        Anchors {
            cursor: self.cursor,
            length: self.length,
            visual_start: self.visual_start,
        }
    }

    fn checkpoint(&mut self, offset: i64, cursor: i64) {
        debug!(window = %self.name, offset, cursor, "history checkpoint");
        self.history.push(&self.buffer, offset, cursor);
        self.checkpoint_tick = self.change_tick;
    }

    fn step_history(&mut self, count: i64, step: fn(&mut History) -> Option<Checkpoint>) {
        for _ in 0..count {
            let Some(checkpoint) = step(&mut self.history) else {
                break;
            };
            self.buffer = checkpoint.buffer;
            self.offset = checkpoint.offset;
            self.cursor = checkpoint.cursor;
            self.length = self.buffer.len();
        }
        debug!(window = %self.name, index = self.history.index(), "history step");
    }

    // Viewport arithmetic.

    fn page_size(&self) -> i64 {
        self.height * self.width
    }

    fn last_index(&self) -> i64 {
        self.length.max(1) - 1
    }

    /// Rows needed to show the content; an empty buffer still has one row.
    fn row_count(&self) -> i64 {
        (self.length.max(1) + self.width - 1) / self.width
    }

    fn max_offset(&self) -> i64 {
        ((self.length + self.width - 1) / self.width - self.height).max(0) * self.width
    }

    /// Real bytes in the buffer, excluding the virtual slot.
    fn content_len(&self) -> i64 {
        self.length - i64::from(self.extending)
    }

    fn page_jump(&self) -> i64 {
        ((self.height as f64 * self.options.page_jump_ratio) as i64).max(1)
    }

    fn scroll_up_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor / self.width * self.width;
        }
    }

    fn scroll_down_to_cursor(&mut self) {
        if self.cursor >= self.offset + self.page_size() {
            self.offset = (self.cursor - self.page_size() + self.width) / self.width * self.width;
        }
    }

    fn normalize_viewport(&mut self) {
        self.cursor = self.cursor.min(self.last_index()).max(0);
        self.offset = self.offset.max(0) / self.width * self.width;
        self.scroll_up_to_cursor();
        self.scroll_down_to_cursor();
        let max_offset = self.max_offset();
        if self.offset > max_offset {
            trace!(offset = self.offset, max_offset, "clamping viewport");
            self.offset = max_offset;
        }
    }

    /// Drops the virtual slot once the cursor has moved off it.
    fn settle_virtual_slot(&mut self) {
        if self.appending && self.extending && self.cursor < self.length - 1 {
            self.appending = false;
            self.extending = false;
            self.length -= 1;
        }
    }

    fn open_virtual_slot(&mut self) {
        self.appending = true;
        self.extending = true;
        self.length += 1;
    }

    fn close_virtual_slot(&mut self) {
        if self.extending {
            self.length -= 1;
        }
        self.appending = false;
        self.extending = false;
    }

    fn cursor_up(&mut self, count: i64) {
        self.cursor -= count.min(self.cursor / self.width) * self.width;
        self.scroll_up_to_cursor();
    }

    fn cursor_down(&mut self, count: i64) {
        let last = self.last_index();
        let rows = count.min(last / self.width - self.cursor / self.width);
        self.cursor += (rows * self.width).min(last - self.cursor);
        self.scroll_down_to_cursor();
    }

    fn cursor_left(&mut self, count: i64) {
        self.cursor -= count.min(self.cursor % self.width);
    }

    fn cursor_right(&mut self, mode: EditorMode, count: i64) {
        let to_row_end = self.width - 1 - self.cursor % self.width;
        if !mode.is_editing() {
            self.cursor += count.min(to_row_end).min(self.last_index() - self.cursor);
        } else if !self.extending {
            self.cursor += count.min(to_row_end).min(self.length - self.cursor);
            if self.cursor == self.length {
                self.open_virtual_slot();
            }
        }
    }

    fn cursor_prev(&mut self, count: i64) {
        self.cursor -= count.min(self.cursor);
        self.scroll_up_to_cursor();
    }

    fn cursor_next(&mut self, mode: EditorMode, count: i64) {
        if !mode.is_editing() {
            self.cursor += count.min(self.last_index() - self.cursor);
        } else if !self.extending {
            self.cursor += count.min(self.length - self.cursor);
            if self.cursor == self.length {
                self.open_virtual_slot();
            }
        }
        self.scroll_down_to_cursor();
    }

    fn cursor_head(&mut self) {
        self.cursor -= self.cursor % self.width;
    }

    fn cursor_end(&mut self, count: i64) {
        let rows = count.min(self.row_count());
        self.cursor = ((self.cursor / self.width + rows) * self.width - 1).min(self.last_index());
        self.scroll_down_to_cursor();
    }

    fn cursor_goto(&mut self, range: &Range) -> Result<(), WindowError> {
        let Some(position) = range.to.or(range.from) else {
            return Ok(());
        };
        let target = position.resolve(&self.anchors())?;
        let (width, height) = (self.width, self.height);
        self.cursor = target.min(self.last_index()).max(0);
        if self.cursor < self.offset {
            self.offset = ((self.cursor / width).max(height / 2) - height / 2) * width;
        } else if self.cursor >= self.offset + self.page_size() {
            let last_top_row = self.row_count() - height;
            let row = (self.cursor - self.page_size() + width) / width + height / 2;
            self.offset = row.min(last_top_row) * width;
        }
        Ok(())
    }

    fn scroll_up(&mut self, count: i64) {
        self.offset -= count.min(self.offset / self.width) * self.width;
        if self.cursor >= self.offset + self.page_size() {
            let overshoot = self.cursor - self.offset - self.page_size();
            self.cursor -= (overshoot / self.width + 1) * self.width;
        }
    }

    fn scroll_down(&mut self, count: i64) {
        let last_top_row = (self.row_count() - self.height).max(0);
        self.offset += count.min(last_top_row - self.offset / self.width).max(0) * self.width;
        if self.cursor < self.offset {
            let rows_behind = (self.offset - self.cursor + self.width - 1) / self.width;
            self.cursor += (rows_behind * self.width).min(self.last_index() - self.cursor);
        }
    }

    fn page_up(&mut self, rows: i64) {
        self.offset = (self.offset - rows * self.width).max(0);
        if self.offset == 0 {
            self.cursor = 0;
        } else if self.cursor >= self.offset + self.page_size() {
            self.cursor = self.offset + (self.height - 1) * self.width;
        }
    }

    fn page_down(&mut self, rows: i64) {
        let max_offset = self.max_offset();
        self.offset = (self.offset + rows * self.width).min(max_offset);
        if self.cursor < self.offset {
            self.cursor = self.offset;
        } else if self.offset == max_offset {
            self.cursor = (self.row_count() - 1) * self.width;
        }
    }

    fn page_top(&mut self) {
        self.offset = 0;
        self.cursor = 0;
    }

    fn page_end(&mut self) {
        self.offset = self.max_offset();
        self.cursor = (self.row_count() - 1) * self.width;
    }

    // Jumps.

    fn jump_to(&mut self) -> Result<(), WindowError> {
        let radius = self.options.jump_radius.max(1) as i64;
        let start = (self.cursor - radius).max(0);
        let mut around = vec![0u8; 2 * radius as usize];
        let n = self.buffer.read_at(&mut around, start)?;
        let clipped_end = start + (n as i64) < self.content_len();
        around.truncate(n);

        let center = (self.cursor - start) as usize;
        let Some(target) = find_offset_near(&around, center, start > 0, clipped_end) else {
            return Ok(());
        };
        if target >= self.content_len() {
            return Ok(());
        }
        debug!(from = self.cursor, to = target, "jump to offset");
        self.jumps.push(self.cursor, self.offset);
        self.cursor = target;
        self.offset =
            (target - target % self.width - (self.height / 3).max(0) * self.width).max(0);
        Ok(())
    }

    fn jump_back(&mut self) {
        if let Some(saved) = self.jumps.pop() {
            self.cursor = saved.cursor;
            self.offset = saved.offset;
        }
    }

    // Content edits.

    fn insert(&mut self, offset: i64, byte: u8) {
        self.buffer.insert(offset, byte);
        self.change_tick += 1;
    }

    fn replace(&mut self, offset: i64, byte: u8) {
        self.buffer.replace(offset, byte);
        self.change_tick += 1;
    }

    fn delete(&mut self, offset: i64) {
        self.buffer.delete(offset);
        self.change_tick += 1;
    }

    fn delete_byte(&mut self, count: i64) {
        let available = self.content_len() - self.cursor;
        if available <= 0 {
            return;
        }
        let n = count.min(self.width - self.cursor % self.width).min(available);
        for _ in 0..n {
            self.delete(self.cursor);
            self.length -= 1;
            if self.cursor == self.length && self.cursor > 0 {
                self.cursor -= 1;
            }
        }
    }

    fn delete_prev_byte(&mut self, count: i64) {
        let n = count.min(self.cursor % self.width);
        for _ in 0..n {
            self.delete(self.cursor - 1);
            self.cursor -= 1;
            self.length -= 1;
        }
    }

    /// Adds `delta` to the byte under the cursor with wrapping arithmetic.
    fn add_to_byte(&mut self, delta: u8) -> Result<(), WindowError> {
        if self.cursor >= self.content_len() && self.length > 0 {
            return Ok(());
        }
        let mut byte = [0u8; 1];
        self.buffer.read_at(&mut byte, self.cursor)?;
        self.replace(self.cursor, byte[0].wrapping_add(delta));
        if self.length == 0 {
            self.length = 1;
        }
        Ok(())
    }

    // Edit-mode transitions.

    fn start_insert(&mut self) {
        self.close_virtual_slot();
        self.pending = false;
        if self.cursor == self.length {
            self.open_virtual_slot();
        }
    }

    fn start_append(&mut self) {
        self.close_virtual_slot();
        self.appending = true;
        self.pending = false;
        if self.length > 0 {
            self.cursor += 1;
        }
        if self.cursor == self.length {
            self.extending = true;
            self.length += 1;
        }
        self.scroll_down_to_cursor();
    }

    fn start_replace(&mut self, single_byte: bool) {
        self.replace_byte = single_byte;
        self.close_virtual_slot();
        self.pending = false;
    }

    fn exit_insert(&mut self) {
        self.pending = false;
        self.pending_byte = 0;
        if self.appending {
            if self.extending && self.length > 0 {
                self.length -= 1;
            }
            if self.cursor > 0 {
                self.cursor -= 1;
            }
        }
        self.appending = false;
        self.extending = false;
        self.replace_byte = false;
    }

    fn insert_rune(&mut self, mode: EditorMode, ch: char) {
        if !mode.is_editing() {
            return;
        }
        if self.focus_text {
            let mut encoded = [0u8; 4];
            for &byte in ch.encode_utf8(&mut encoded).as_bytes() {
                for nibble in [byte >> 4, byte & 0x0f] {
                    if self.auto_exited {
                        return;
                    }
                    self.insert_nibble(mode, nibble);
                }
            }
        } else if let Some(digit) = ch.to_digit(16) {
            self.insert_nibble(mode, digit as u8);
        }
    }

    fn insert_nibble(&mut self, mode: EditorMode, nibble: u8) {
        if !self.pending {
            self.pending = true;
            self.pending_byte = nibble << 4;
            return;
        }
        let byte = self.pending_byte | nibble;
        self.pending = false;
        self.pending_byte = 0;
        match mode {
            EditorMode::Insert => {
                self.insert(self.cursor, byte);
                self.cursor += 1;
                self.length += 1;
            }
            EditorMode::Replace => {
                self.replace(self.cursor, byte);
                if self.length == 0 {
                    self.length = 1;
                }
                if self.replace_byte {
                    self.exit_insert();
                    self.auto_exited = true;
                } else {
                    self.cursor += 1;
                    if self.cursor == self.length {
                        self.open_virtual_slot();
                    }
                }
            }
            _ => {}
        }
        self.scroll_down_to_cursor();
    }

    fn backspace(&mut self) {
        if self.pending {
            self.pending = false;
            self.pending_byte = 0;
        } else if self.cursor > 0 {
            self.delete(self.cursor - 1);
            self.cursor -= 1;
            self.length -= 1;
        }
    }

    fn switch_visual_end(&mut self) -> Result<(), WindowError> {
        let start = self
            .visual_start
            .ok_or(WindowError::Internal("visual end swap without a selection"))?;
        self.visual_start = Some(self.cursor);
        self.cursor = start;
        self.scroll_up_to_cursor();
        self.scroll_down_to_cursor();
        Ok(())
    }

    // Search.

    fn search(&mut self, pattern: &str, forward: bool) -> Result<(), WindowError> {
        let target = pattern.as_bytes();
        if target.is_empty() {
            return Ok(());
        }
        let size = (self.page_size() as usize * self.options.search_screens)
            .max(target.len() * self.options.search_pattern_factor);
        if forward {
            let base = self.cursor + 1;
            let mut haystack = vec![0u8; size];
            let n = self.buffer.read_at(&mut haystack, base)?;
            if let Some(index) = haystack[..n].windows(target.len()).position(|w| w == target) {
                self.cursor = base + index as i64;
                self.scroll_down_to_cursor();
            }
        } else {
            let base = (self.cursor - size as i64).max(0);
            let mut haystack = vec![0u8; (self.cursor - base) as usize];
            let n = self.buffer.read_at(&mut haystack, base)?;
            if let Some(index) = haystack[..n].windows(target.len()).rposition(|w| w == target) {
                self.cursor = base + index as i64;
                self.scroll_up_to_cursor();
            }
        }
        Ok(())
    }
}

fn require_normal(mode: EditorMode, message: &'static str) -> Result<(), WindowError> {
    if mode == EditorMode::Normal {
        Ok(())
    } else {
        Err(WindowError::Internal(message))
    }
}

fn is_blank(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | b'\r' | b' ')
}

/// Finds the decimal number at or just after `center`.
///
/// Blank bytes after `center` are skipped. A digit run touching a clipped edge
/// of `bytes` may be cut short, so it is rejected.
fn find_offset_near(
    bytes: &[u8],
    center: usize,
    clipped_start: bool,
    clipped_end: bool,
) -> Option<i64> {
    let mut i = center;
    while i < bytes.len() && is_blank(bytes[i]) {
        i += 1;
    }
    if i >= bytes.len() || !bytes[i].is_ascii_digit() {
        return None;
    }
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == 0 && clipped_start {
        return None;
    }
    let mut j = i;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j == bytes.len() && clipped_end {
        return None;
    }
    std::str::from_utf8(&bytes[i..j]).ok()?.parse().ok()
}
