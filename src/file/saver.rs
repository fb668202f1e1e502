//! Saving window content to files.

use super::loader::is_gzip_path;
use crate::editor::handle::WindowHandle;
use crate::editor::position::Range;
use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Saves the whole content of a window to `path`.
///
/// The write is atomic (writes to a temp file then renames), so the file the
/// window is reading from stays intact until the new content is complete.
/// Optionally creates a `.bak` copy of the previous file first.
///
/// Returns the number of bytes written (before compression for `.gz` paths).
///
/// # Examples
///
/// ```no_run
/// use hexquill::config::WindowOptions;
/// use hexquill::editor::handle::WindowHandle;
/// use hexquill::file::loader::open_source;
/// use hexquill::file::saver::save_window;
/// use std::sync::mpsc;
///
/// let (redraw, _rx) = mpsc::channel();
/// let window = WindowHandle::open(open_source("a.bin").unwrap(), "a.bin", WindowOptions::default(), redraw).unwrap();
/// save_window(&window, "a.bin", true).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the backup, the temp file or the rename fails, or if
/// the window cannot be read.
pub fn save_window<P: AsRef<Path>>(
    window: &WindowHandle,
    path: P,
    create_backup: bool,
) -> Result<u64> {
    save_range(window, None, path, create_backup)
}

/// Saves the bytes spanned by `range` (or everything) to `path`.
pub fn save_range<P: AsRef<Path>>(
    window: &WindowHandle,
    range: Option<&Range>,
    path: P,
    create_backup: bool,
) -> Result<u64> {
    let path = path.as_ref();

    // Create backup if requested and file exists
    if create_backup && path.exists() {
        backup(path)?;
    }

    let written = write_file_atomic(path, is_gzip_path(path), |writer| {
        Ok(window.write_to(range, writer)?)
    })?;
    info!("wrote {} bytes to {:?}", written, path);
    Ok(written)
}

/// Creates a backup of a file by copying it with a .bak extension.
fn backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes a file atomically.
///
/// `fill` streams the content into the temp file, which is then renamed over
/// `path`. The temp file is removed if anything fails before the rename.
fn write_file_atomic<P, F>(path: P, compress: bool, fill: F) -> Result<u64>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<u64>,
{
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    let result: Result<u64> = (|| {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut writer = BufWriter::new(file);
        let written = if compress {
            let mut encoder = GzEncoder::new(&mut writer, Compression::default());
            let written = fill(&mut encoder)?;
            encoder.finish().context("Failed to finish compression")?;
            written
        } else {
            fill(&mut writer)?
        };
        writer.flush().context("Failed to write temp file")?;
        Ok(written)
    })();

    let written = match result {
        Ok(written) => written,
        Err(err) => {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }
    };

    // Atomic rename
    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(written)
}
