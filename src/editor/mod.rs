//! Window editing core and its command loop.
//!
//! This module provides the per-window editing machinery: the modal command
//! model, byte positions, undo history, the jump stack, and the thread-backed
//! handle that serializes commands to a window.
//!
//! # Modules
//!
//! - `mode`: Editor mode enumeration
//! - `command`: Actions and the commands that carry them
//! - `position`: Byte positions relative to the cursor, end or selection
//! - `window`: The synchronous editing core
//! - `handle`: Command loop thread and snapshot access
//! - `history`: Undo/redo checkpoints
//! - `jumplist`: Saved positions for offset jumps
//! - `snapshot`: Render-ready window state
//!
//! # Example
//!
//! ```
//! use hexquill::editor::mode::EditorMode;
//!
//! // Editor starts in Normal mode
//! let mode = EditorMode::default();
//! assert_eq!(mode, EditorMode::Normal);
//! ```

pub mod command;
pub mod error;
pub mod handle;
pub mod history;
pub mod jumplist;
pub mod mode;
pub mod position;
pub mod snapshot;
pub mod window;
