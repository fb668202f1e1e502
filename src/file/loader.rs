//! Opening files and stdin as window sources.
//!
//! Plain files are read lazily through the open handle, so opening a large
//! file costs nothing until its bytes are shown. Gzipped files and stdin are
//! read fully into memory.

use crate::buffer::Source;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Cursor, ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Opens `path` as a window source.
///
/// A file that does not exist yet opens as empty content; saving creates it.
///
/// # Examples
///
/// ```no_run
/// use hexquill::file::loader::open_source;
///
/// let source = open_source("firmware.bin").unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened, or if a `.gz`
/// file is not valid gzip.
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn Source>> {
    let path = path.as_ref();
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{:?} does not exist, starting empty", path);
            return Ok(Box::new(Cursor::new(Vec::new())));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to open {}", path.display()));
        }
    };

    if is_gzip_path(path) {
        let content = decompress_gzip(file).context("Failed to decompress gzipped file")?;
        return Ok(Box::new(Cursor::new(content)));
    }
    Ok(Box::new(file))
}

/// Reads all of stdin into memory.
///
/// Gzipped input (detected by its magic bytes) is decompressed.
pub fn read_stdin() -> Result<Cursor<Vec<u8>>> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    from_bytes(buffer)
}

/// Wraps raw bytes as a source, decompressing them if they are gzip data.
pub fn from_bytes(bytes: Vec<u8>) -> Result<Cursor<Vec<u8>>> {
    // Check for gzip magic bytes (0x1f 0x8b)
    if bytes.starts_with(&[0x1f, 0x8b]) {
        let content =
            decompress_gzip(bytes.as_slice()).context("Failed to decompress gzipped stdin")?;
        return Ok(Cursor::new(content));
    }
    Ok(Cursor::new(bytes))
}

/// Returns true if `path` names a gzipped file.
pub fn is_gzip_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

fn decompress_gzip<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(reader);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content)?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzip_path() {
        assert!(is_gzip_path("dump.bin.gz"));
        assert!(!is_gzip_path("dump.bin"));
        assert!(!is_gzip_path("gz"));
    }

    #[test]
    fn test_from_bytes_plain() {
        let cursor = from_bytes(vec![1, 2, 3]).unwrap();
        assert_eq!(cursor.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_from_bytes_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"\x00\xffhex").unwrap();
        let compressed = encoder.finish().unwrap();

        let cursor = from_bytes(compressed).unwrap();
        assert_eq!(cursor.into_inner(), b"\x00\xffhex".to_vec());
    }
}
