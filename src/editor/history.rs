//! Undo/redo history as a linear log of checkpoints.
//!
//! Each checkpoint captures the window content together with the viewport
//! offset and cursor, so undoing restores the screen the user was looking at.
//!
//! # Architecture
//!
//! - `Checkpoint`: Captures content, offset and cursor at a point in time
//! - `History`: Ordered checkpoints plus an index marking the current one
//!
//! Pushing after an undo discards the undone checkpoints, so redo only ever
//! replays the most recent line of edits.

use crate::buffer::Buffer;

/// Snapshot of window content and viewport.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub buffer: Buffer,
    pub offset: i64,
    pub cursor: i64,
}

/// Linear undo history for one window.
///
/// ```text
///   push A, push B, push C      [A, B, C]  index 2
///   undo, undo                  [A, B, C]  index 0
///   push D                      [A, D]     index 1
/// ```
#[derive(Debug)]
pub struct History {
    entries: Vec<Checkpoint>,
    index: usize,
    limit: usize,
}

impl History {
    /// Creates an empty history. A `limit` of 0 keeps every checkpoint.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            limit,
        }
    }

    /// Returns the number of checkpoints stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no checkpoint has been pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the index of the current checkpoint.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Records a checkpoint after the current one.
    ///
    /// Any checkpoints after the current index (undone edits) are discarded.
    /// When the limit is exceeded the oldest checkpoint is dropped.
    pub fn push(&mut self, buffer: &Buffer, offset: i64, cursor: i64) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(Checkpoint {
            buffer: buffer.clone(),
            offset,
            cursor,
        });
        if self.limit > 0 && self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
    }

    /// Steps back one checkpoint.
    ///
    /// Returns a copy of the earlier checkpoint, or None if already at the oldest.
    pub fn undo(&mut self) -> Option<Checkpoint> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).cloned()
    }

    /// Steps forward one checkpoint.
    ///
    /// Returns a copy of the later checkpoint, or None if already at the newest.
    pub fn redo(&mut self) -> Option<Checkpoint> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).cloned()
    }
}
