//! HexQuill - a terminal-based binary editor with vim-style keybindings.
//!
//! The library holds everything except terminal setup:
//!
//! - `buffer`: Piece-list content over a seekable source
//! - `editor`: Windows, commands, history and the per-window command loop
//! - `input`: Key names, key sequences and mode-aware dispatch
//! - `ui`: Ratatui rendering of a window snapshot
//! - `theme`: Built-in color themes
//! - `file`: Loading sources and saving content
//! - `config`: User configuration
//! - `logging`: File logging setup

pub mod buffer;
pub mod config;
pub mod editor;
pub mod file;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
