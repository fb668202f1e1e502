//! File I/O for binary content.
//!
//! This module opens files or stdin as seekable sources for a window, and
//! saves window content back to files with atomic write operations and
//! optional backups. Gzipped files are decompressed into memory on load and
//! compressed again on save.

pub mod loader;
pub mod saver;
