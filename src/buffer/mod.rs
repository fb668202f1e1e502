//! Byte content storage for an editor window.
//!
//! A [`Buffer`] presents the bytes of a seekable source plus the edits made on
//! top of it. The source itself is never written: edits live in a list of
//! pieces, where each piece is either a span of the original source or a run
//! of bytes typed by the user.
//!
//! Cloning a buffer is cheap. Clones share the underlying source and copy only
//! the piece list, which is what undo checkpoints rely on.
//!
//! # Example
//!
//! ```
//! use hexquill::buffer::Buffer;
//! use std::io::Cursor;
//!
//! let mut buffer = Buffer::new(Cursor::new(b"abc".to_vec())).unwrap();
//! buffer.insert(1, b'x');
//! buffer.replace(3, b'C');
//! buffer.delete(0);
//!
//! let mut bytes = [0u8; 8];
//! let n = buffer.read_at(&mut bytes, 0).unwrap();
//! assert_eq!(&bytes[..n], b"xbC");
//! assert_eq!(buffer.edited_ranges(), vec![0..1, 2..3]);
//! ```

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Range;
use std::sync::{Arc, Mutex};

/// Anything a buffer can be opened over.
pub trait Source: Read + Seek + Send {}

impl<T: Read + Seek + Send> Source for T {}

/// One contiguous span of buffer content.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    /// `len` bytes of the source starting at `offset`.
    Source { offset: i64, len: i64 },
    /// Bytes entered by the user.
    Edited(Vec<u8>),
}

impl Piece {
    fn len(&self) -> i64 {
        match self {
            Piece::Source { len, .. } => *len,
            Piece::Edited(bytes) => bytes.len() as i64,
        }
    }
}

/// Editable view over a seekable byte source.
#[derive(Clone)]
pub struct Buffer {
    source: Arc<Mutex<Box<dyn Source>>>,
    pieces: Vec<Piece>,
    position: i64,
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("pieces", &self.pieces)
            .field("position", &self.position)
            .finish()
    }
}

impl Buffer {
    /// Opens a buffer over `source`, measuring its length by seeking to the end.
    pub fn new<S: Source + 'static>(mut source: S) -> io::Result<Self> {
        let len = source.seek(SeekFrom::End(0))? as i64;
        source.seek(SeekFrom::Start(0))?;
        let pieces = if len > 0 {
            vec![Piece::Source { offset: 0, len }]
        } else {
            Vec::new()
        };
        Ok(Self {
            source: Arc::new(Mutex::new(Box::new(source))),
            pieces,
            position: 0,
        })
    }

    /// Returns the current content length in bytes.
    pub fn len(&self) -> i64 {
        self.pieces.iter().map(Piece::len).sum()
    }

    /// Returns true if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads bytes starting at `offset` into `buf`.
    ///
    /// Reaching the end of content is not an error: the returned count is
    /// simply shorter than `buf`.
    pub fn read_at(&self, buf: &mut [u8], offset: i64) -> io::Result<usize> {
        if offset < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "negative read offset",
            ));
        }
        let mut written = 0usize;
        let mut start = 0i64;
        for piece in &self.pieces {
            if written == buf.len() {
                break;
            }
            let end = start + piece.len();
            let pos = offset + written as i64;
            if pos < end {
                let inner = pos - start;
                let n = (end - pos).min((buf.len() - written) as i64) as usize;
                let dst = &mut buf[written..written + n];
                match piece {
                    Piece::Source { offset: base, .. } => self.read_source(base + inner, dst)?,
                    Piece::Edited(bytes) => {
                        let inner = inner as usize;
                        dst.copy_from_slice(&bytes[inner..inner + n]);
                    }
                }
                written += n;
            }
            start = end;
        }
        Ok(written)
    }

    fn read_source(&self, offset: i64, dst: &mut [u8]) -> io::Result<()> {
        let mut source = self
            .source
            .lock()
            .map_err(|_| io::Error::other("content source lock poisoned"))?;
        source.seek(SeekFrom::Start(offset as u64))?;
        source.read_exact(dst)
    }

    /// Inserts `byte` before `offset`. Offsets at or past the end append.
    pub fn insert(&mut self, offset: i64, byte: u8) {
        match self.locate(offset) {
            None => self.push_edited(byte),
            Some((index, inner)) => {
                match &mut self.pieces[index] {
                    Piece::Edited(bytes) => bytes.insert(inner as usize, byte),
                    Piece::Source { offset: base, len } => {
                        let (base, len) = (*base, *len);
                        self.pieces.splice(
                            index..=index,
                            [
                                Piece::Source { offset: base, len: inner },
                                Piece::Edited(vec![byte]),
                                Piece::Source { offset: base + inner, len: len - inner },
                            ],
                        );
                    }
                }
                self.normalize();
            }
        }
    }

    /// Overwrites the byte at `offset`. Offsets at or past the end append.
    pub fn replace(&mut self, offset: i64, byte: u8) {
        match self.locate(offset) {
            None => self.push_edited(byte),
            Some((index, inner)) => {
                match &mut self.pieces[index] {
                    Piece::Edited(bytes) => bytes[inner as usize] = byte,
                    Piece::Source { offset: base, len } => {
                        let (base, len) = (*base, *len);
                        self.pieces.splice(
                            index..=index,
                            [
                                Piece::Source { offset: base, len: inner },
                                Piece::Edited(vec![byte]),
                                Piece::Source { offset: base + inner + 1, len: len - inner - 1 },
                            ],
                        );
                    }
                }
                self.normalize();
            }
        }
    }

    /// Removes the byte at `offset`. Out-of-range offsets are ignored.
    pub fn delete(&mut self, offset: i64) {
        let Some((index, inner)) = self.locate(offset) else {
            return;
        };
        match &mut self.pieces[index] {
            Piece::Edited(bytes) => {
                bytes.remove(inner as usize);
            }
            Piece::Source { offset: base, len } => {
                let (base, len) = (*base, *len);
                self.pieces.splice(
                    index..=index,
                    [
                        Piece::Source { offset: base, len: inner },
                        Piece::Source { offset: base + inner + 1, len: len - inner - 1 },
                    ],
                );
            }
        }
        self.normalize();
    }

    /// Returns the ordered, non-overlapping ranges holding user-entered bytes.
    pub fn edited_ranges(&self) -> Vec<Range<i64>> {
        let mut ranges = Vec::new();
        let mut start = 0i64;
        for piece in &self.pieces {
            let end = start + piece.len();
            if matches!(piece, Piece::Edited(_)) {
                ranges.push(start..end);
            }
            start = end;
        }
        ranges
    }

    /// Finds the piece containing `offset` and the offset within it.
    fn locate(&self, offset: i64) -> Option<(usize, i64)> {
        if offset < 0 {
            return None;
        }
        let mut start = 0i64;
        for (index, piece) in self.pieces.iter().enumerate() {
            let end = start + piece.len();
            if offset < end {
                return Some((index, offset - start));
            }
            start = end;
        }
        None
    }

    fn push_edited(&mut self, byte: u8) {
        match self.pieces.last_mut() {
            Some(Piece::Edited(bytes)) => bytes.push(byte),
            _ => self.pieces.push(Piece::Edited(vec![byte])),
        }
    }

    /// Drops empty pieces and merges neighbours of the same kind.
    fn normalize(&mut self) {
        let mut merged: Vec<Piece> = Vec::with_capacity(self.pieces.len());
        for piece in self.pieces.drain(..) {
            if piece.len() == 0 {
                continue;
            }
            if let Some(last) = merged.last_mut() {
                match (last, &piece) {
                    (Piece::Edited(prev), Piece::Edited(bytes)) => {
                        prev.extend_from_slice(bytes);
                        continue;
                    }
                    (
                        Piece::Source { offset: prev_offset, len: prev_len },
                        Piece::Source { offset, len },
                    ) if *prev_offset + *prev_len == *offset => {
                        *prev_len += *len;
                        continue;
                    }
                    _ => {}
                }
            }
            merged.push(piece);
        }
        self.pieces = merged;
    }
}

impl Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.read_at(buf, self.position)?;
        self.position += n as i64;
        Ok(n)
    }
}

impl Seek for Buffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => n as i64,
            SeekFrom::End(delta) => self.len() + delta,
            SeekFrom::Current(delta) => self.position + delta,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of content",
            ));
        }
        self.position = target;
        Ok(target as u64)
    }
}
