//! Byte positions expressed relative to a reference point.
//!
//! Commands that take an address (go to an offset, write a selection) carry
//! [`Position`] values. A position is resolved against the window's current
//! cursor, length and visual anchor; the result is always clamped into the
//! addressable range `0..max(length, 1)`.

use super::error::WindowError;

/// An offset relative to one of the window's reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Absolute byte index.
    Absolute(i64),
    /// Offset from the cursor.
    Relative(i64),
    /// Offset from the last byte (usually zero or negative).
    End(i64),
    /// Offset from the anchor of the visual selection.
    VisualStart(i64),
    /// Offset from the moving end of the visual selection (the cursor).
    VisualEnd(i64),
}

/// A pair of positions, either of which may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub from: Option<Position>,
    pub to: Option<Position>,
}

impl Range {
    /// A range covering the span between two positions.
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// A range naming a single position.
    pub fn at(position: Position) -> Self {
        Self {
            from: Some(position),
            to: None,
        }
    }

    /// The range spanning the current visual selection.
    pub fn visual() -> Self {
        Self::new(Position::VisualStart(0), Position::VisualEnd(0))
    }
}

/// The window values a position is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub cursor: i64,
    pub length: i64,
    pub visual_start: Option<i64>,
}

impl Position {
    /// Resolves the position to a byte index within `0..max(length, 1)`.
    ///
    /// Fails with [`WindowError::NoSelection`] when a visual-relative position
    /// is resolved while no selection is active.
    pub fn resolve(&self, anchors: &Anchors) -> Result<i64, WindowError> {
        let last = anchors.length.max(1) - 1;
        let relative_to = |base: i64, delta: i64| base + delta.min(last - base).max(-base);
        match *self {
            Position::Absolute(offset) => Ok(offset.min(last).max(0)),
            Position::Relative(delta) => Ok(relative_to(anchors.cursor, delta)),
            Position::End(delta) => Ok(last + delta.min(0).max(-last)),
            Position::VisualStart(delta) => anchors
                .visual_start
                .map(|start| relative_to(start, delta))
                .ok_or(WindowError::NoSelection),
            Position::VisualEnd(delta) => anchors
                .visual_start
                .map(|_| relative_to(anchors.cursor, delta))
                .ok_or(WindowError::NoSelection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(cursor: i64, length: i64, visual_start: Option<i64>) -> Anchors {
        Anchors {
            cursor,
            length,
            visual_start,
        }
    }

    #[test]
    fn test_absolute_is_clamped() {
        let a = anchors(0, 10, None);
        assert_eq!(Position::Absolute(4).resolve(&a).unwrap(), 4);
        assert_eq!(Position::Absolute(40).resolve(&a).unwrap(), 9);
        assert_eq!(Position::Absolute(-3).resolve(&a).unwrap(), 0);
    }

    #[test]
    fn test_relative_to_cursor() {
        let a = anchors(5, 10, None);
        assert_eq!(Position::Relative(2).resolve(&a).unwrap(), 7);
        assert_eq!(Position::Relative(-9).resolve(&a).unwrap(), 0);
        assert_eq!(Position::Relative(9).resolve(&a).unwrap(), 9);
    }

    #[test]
    fn test_end_counts_back_from_last_byte() {
        let a = anchors(0, 10, None);
        assert_eq!(Position::End(0).resolve(&a).unwrap(), 9);
        assert_eq!(Position::End(-3).resolve(&a).unwrap(), 6);
        assert_eq!(Position::End(5).resolve(&a).unwrap(), 9);
        assert_eq!(Position::End(-50).resolve(&a).unwrap(), 0);
    }

    #[test]
    fn test_empty_content_resolves_to_zero() {
        let a = anchors(0, 0, None);
        assert_eq!(Position::Absolute(7).resolve(&a).unwrap(), 0);
        assert_eq!(Position::End(0).resolve(&a).unwrap(), 0);
    }

    #[test]
    fn test_visual_positions_need_selection() {
        let a = anchors(6, 10, None);
        assert!(matches!(
            Position::VisualStart(0).resolve(&a),
            Err(WindowError::NoSelection)
        ));
        assert!(matches!(
            Position::VisualEnd(0).resolve(&a),
            Err(WindowError::NoSelection)
        ));

        let a = anchors(6, 10, Some(2));
        assert_eq!(Position::VisualStart(1).resolve(&a).unwrap(), 3);
        assert_eq!(Position::VisualEnd(-1).resolve(&a).unwrap(), 5);
    }
}
