//! Non-seekable sources: arbitrary streams and standard input.

use std::io::{self, Read, Stdin};

use super::ByteSource;
use super::seek::closed_error;

/// A non-seekable source over any `Read`.
///
/// Positions are ignored; reads consume the stream monotonically. Closing
/// drops the stream.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: Option<R>,
}

impl<R: Read> StreamSource<R> {
    /// Wraps a stream.
    pub fn new(inner: R) -> Self {
        Self { inner: Some(inner) }
    }

    /// Returns true once [`ByteSource::close`] has released the stream.
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn read(&mut self, buf: &mut [u8], _position: Option<u64>) -> io::Result<usize> {
        let inner = self.inner.as_mut().ok_or_else(closed_error)?;
        read_retrying(inner, buf)
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner = None;
        Ok(())
    }

    fn is_seekable(&self) -> bool {
        false
    }
}

/// The process's standard input.
///
/// Never closed: [`ByteSource::close`] leaves the descriptor open for the
/// rest of the process.
#[derive(Debug)]
pub struct StdinSource {
    stdin: Stdin,
}

impl StdinSource {
    /// Creates a source over the process's standard input.
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for StdinSource {
    fn read(&mut self, buf: &mut [u8], _position: Option<u64>) -> io::Result<usize> {
        read_retrying(&mut self.stdin.lock(), buf)
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_seekable(&self) -> bool {
        false
    }
}

fn read_retrying<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
