//! Jump stack for returning from offset jumps.

/// A cursor and viewport pair saved before a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedPosition {
    pub cursor: i64,
    pub offset: i64,
}

/// Manages saved positions for Ctrl-]/Ctrl-t navigation.
///
/// Following an offset pushes the position the cursor left; jumping back pops
/// the most recent one. The stack lives as long as its window and is unbounded.
#[derive(Debug, Clone, Default)]
pub struct JumpStack {
    positions: Vec<SavedPosition>,
}

impl JumpStack {
    /// Creates an empty jump stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a position on top of the stack.
    pub fn push(&mut self, cursor: i64, offset: i64) {
        self.positions.push(SavedPosition { cursor, offset });
    }

    /// Removes and returns the most recently saved position.
    pub fn pop(&mut self) -> Option<SavedPosition> {
        self.positions.pop()
    }

    /// Returns the number of saved positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there is nothing to jump back to.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
