//! Error types for window operations.

use std::io;
use thiserror::Error;

/// Errors raised while applying commands to a window or reading from it.
#[derive(Debug, Error)]
pub enum WindowError {
    /// A visual-relative position was resolved with no active selection.
    #[error("no visual selection found")]
    NoSelection,
    /// The content handle failed for a reason other than end of content.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The command dispatch layer broke an invariant of the window.
    ///
    /// These are bugs in the caller, not user errors. The command loop stops
    /// when it sees one.
    #[error("internal error: {0}")]
    Internal(&'static str),
    /// The window's command loop is no longer running.
    #[error("window is closed")]
    Closed,
}

impl WindowError {
    /// Returns true if the window cannot keep processing commands after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WindowError::Internal(_) | WindowError::Closed)
    }
}
