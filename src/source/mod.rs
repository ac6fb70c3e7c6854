//! Byte sources a [`LineReader`](crate::LineReader) can read from.
//!
//! The reader only talks to the [`ByteSource`] capability. This module ships
//! adapters for the common cases:
//!
//! - [`SeekSource`] / [`FileSource`] - Positioned reads over any `Read + Seek`
//! - [`StreamSource`] - Sequential reads over any `Read`
//! - [`StdinSource`] - Standard input, never closed by the reader
//! - [`FnSource`] - A caller-supplied positioned read function
//!
//! [`Input`] resolves a command-line style argument, where `-` names
//! standard input, into a boxed source.

mod seek;
mod stream;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub use seek::{FileSource, SeekSource};
pub use stream::{StdinSource, StreamSource};

/// The read/close capability behind a line reader.
///
/// Seekable sources are addressed by explicit position and fill the whole
/// buffer unless the input ends, so a short read means end of input.
/// Non-seekable sources ignore positions, may return short reads at any time,
/// and signal end of input with a zero-byte read.
pub trait ByteSource {
    /// Reads into `buf`, starting at `position` when one is given.
    ///
    /// Returns the number of bytes read.
    fn read(&mut self, buf: &mut [u8], position: Option<u64>) -> io::Result<usize>;

    /// Releases the underlying handle. Must be idempotent.
    fn close(&mut self) -> io::Result<()>;

    /// Returns true if the source supports positioned reads.
    fn is_seekable(&self) -> bool;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, buf: &mut [u8], position: Option<u64>) -> io::Result<usize> {
        (**self).read(buf, position)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }
}

/// A source backed by a synchronous positioned read function.
///
/// The function receives the destination buffer and the byte position to read
/// from. Returning fewer bytes than requested signals end of input. Closing is
/// a no-op: whoever owns the function's underlying handle releases it.
///
/// # Example
///
/// ```
/// use chunklines::{LineReader, ReaderConfig, source};
///
/// let data = b"alpha\nbeta\n";
/// let source = source::from_fn(move |buf: &mut [u8], position: u64| {
///     let start = (position as usize).min(data.len());
///     let n = buf.len().min(data.len() - start);
///     buf[..n].copy_from_slice(&data[start..start + n]);
///     Ok(n)
/// });
///
/// let mut reader = LineReader::new(source, ReaderConfig::default())?;
/// assert_eq!(reader.next_line()?.as_deref(), Some(&b"alpha"[..]));
/// # Ok::<(), chunklines::LineError>(())
/// ```
pub struct FnSource<F> {
    read_fn: F,
}

/// Wraps a positioned read function as a [`ByteSource`].
pub fn from_fn<F>(read_fn: F) -> FnSource<F>
where
    F: FnMut(&mut [u8], u64) -> io::Result<usize>,
{
    FnSource { read_fn }
}

impl<F> ByteSource for FnSource<F>
where
    F: FnMut(&mut [u8], u64) -> io::Result<usize>,
{
    fn read(&mut self, buf: &mut [u8], position: Option<u64>) -> io::Result<usize> {
        (self.read_fn)(buf, position.unwrap_or(0))
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_seekable(&self) -> bool {
        true
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

/// Identifier of the reserved standard input argument.
pub const STDIN_ARG: &str = "-";

/// An input named on a command line: a file path or standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input.
    Stdin,

    /// A file on disk.
    Path(PathBuf),
}

impl Input {
    /// Parses an argument, treating `-` as standard input.
    ///
    /// ```
    /// use chunklines::source::Input;
    ///
    /// assert_eq!(Input::parse("-"), Input::Stdin);
    /// assert!(matches!(Input::parse("data.txt"), Input::Path(_)));
    /// ```
    pub fn parse(arg: impl AsRef<Path>) -> Self {
        let arg = arg.as_ref();
        if arg.as_os_str() == STDIN_ARG {
            Input::Stdin
        } else {
            Input::Path(arg.to_path_buf())
        }
    }

    /// Opens the input as a boxed source.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from opening the file.
    pub fn open(&self) -> io::Result<Box<dyn ByteSource>> {
        match self {
            Input::Stdin => Ok(Box::new(StdinSource::new())),
            Input::Path(path) => Ok(Box::new(FileSource::open(path)?)),
        }
    }

    /// Returns true for standard input.
    pub fn is_stdin(&self) -> bool {
        matches!(self, Input::Stdin)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "<stdin>"),
            Input::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
