//! Positioned source over `Read + Seek`.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::ByteSource;

/// A source over a regular file.
pub type FileSource = SeekSource<File>;

/// A seekable source over any `Read + Seek`.
///
/// Reads seek only when the requested position differs from the current
/// cursor, and keep reading until the buffer is full or the input ends.
#[derive(Debug)]
pub struct SeekSource<R> {
    inner: Option<R>,
    cursor: Option<u64>,
}

impl<R: Read + Seek> SeekSource<R> {
    /// Wraps a reader. Its current cursor is not trusted; the first
    /// positioned read always seeks.
    pub fn new(inner: R) -> Self {
        Self {
            inner: Some(inner),
            cursor: None,
        }
    }

    /// Returns true once [`ByteSource::close`] has released the reader.
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns the wrapped reader, or `None` after close.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }
}

impl SeekSource<File> {
    /// Opens a file for reading.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        File::open(path).map(Self::new)
    }
}

impl<R: Read + Seek> ByteSource for SeekSource<R> {
    fn read(&mut self, buf: &mut [u8], position: Option<u64>) -> io::Result<usize> {
        let inner = self.inner.as_mut().ok_or_else(closed_error)?;

        if let Some(position) = position {
            if self.cursor != Some(position) {
                inner.seek(SeekFrom::Start(position))?;
                self.cursor = Some(position);
            }
        }

        let mut filled = 0;
        while filled < buf.len() {
            match inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.cursor = None;
                    return Err(e);
                }
            }
        }

        self.cursor = self.cursor.map(|cursor| cursor + filled as u64);
        Ok(filled)
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner = None;
        self.cursor = None;
        Ok(())
    }

    fn is_seekable(&self) -> bool {
        true
    }
}

pub(super) fn closed_error() -> io::Error {
    io::Error::other("source is closed")
}
