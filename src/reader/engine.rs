//! Core line reading engine - LineReader.
//!
//! This module implements the chunked read loop and the reader lifecycle:
//!
//! - `next_line()` - Returns the next line, reading more chunks as needed
//! - `reset()` - Rewinds a seekable source to the beginning
//! - `close()` - Releases the source
//! - `is_last()` - Reports whether any further line can be produced
//!
//! # Example
//!
//! ```
//! use chunklines::{LineReader, ReaderConfig};
//! use std::io::Cursor;
//!
//! let data = Cursor::new(b"hello\r\nworld".to_vec());
//! let mut reader = LineReader::from_seekable(data, ReaderConfig::new(4)?)?;
//!
//! assert_eq!(reader.next_line()?.as_deref(), Some(&b"hello"[..]));
//! assert_eq!(reader.next_line()?.as_deref(), Some(&b"world"[..]));
//! assert_eq!(reader.next_line()?, None);
//! assert!(reader.is_closed());
//! # Ok::<(), chunklines::LineError>(())
//! ```

use std::collections::VecDeque;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use bytes::{Bytes, BytesMut};
use log::{debug, trace, warn};

use crate::config::ReaderConfig;
use crate::error::{LineError, Result};
use crate::scan::{ScanState, scan};
use crate::source::{ByteSource, FileSource, Input, SeekSource, StdinSource, StreamSource};

/// A synchronous line reader over a [`ByteSource`].
///
/// `LineReader` requests `chunk_size` bytes at a time from its source and
/// splits them into lines. Lines are returned as [`Bytes`] without their
/// terminator; no encoding is assumed.
///
/// # Lifecycle
///
/// The source is released as soon as the input is exhausted and every
/// buffered line has been handed out, or when [`LineReader::close`] is
/// called. From then on [`LineReader::next_line`] returns `Ok(None)` without
/// touching the source.
///
/// # Memory
///
/// The reader holds at most the longest unterminated run of bytes plus one
/// chunk of over-read.
///
/// # Errors
///
/// An I/O error from the source is returned from the call that triggered the
/// read. The reader is closed afterwards: treat it as exhausted.
#[derive(Debug)]
pub struct LineReader<S> {
    source: S,
    config: ReaderConfig,
    /// Next read offset; `None` for non-seekable sources.
    position: Option<u64>,
    pending: VecDeque<Bytes>,
    scan: ScanState,
    eof: bool,
    closed: bool,
    last: bool,
    /// Close failure from an auto-close that also handed out the final line.
    deferred: Option<LineError>,
}

impl<S: ByteSource> LineReader<S> {
    /// Creates a reader over an open source.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::InvalidConfig`] if the configuration is invalid.
    pub fn new(source: S, config: ReaderConfig) -> Result<Self> {
        config.validate()?;

        let position = source.is_seekable().then_some(0);
        debug!(
            "opened line reader (chunk_size={}, seekable={})",
            config.chunk_size(),
            position.is_some()
        );

        Ok(Self {
            source,
            config,
            position,
            pending: VecDeque::new(),
            scan: ScanState::default(),
            eof: false,
            closed: false,
            last: false,
            deferred: None,
        })
    }

    /// Returns the next line without its terminator, or `None` once the
    /// input is exhausted or the reader is closed.
    ///
    /// An empty `Bytes` is a legitimately empty line, not the end of input.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::Io`] if reading or releasing the source fails.
    /// When releasing fails after the final line was read, that line is
    /// returned first and the error comes from the following call.
    pub fn next_line(&mut self) -> Result<Option<Bytes>> {
        if self.closed {
            return match self.deferred.take() {
                Some(err) => Err(err),
                None => Ok(None),
            };
        }

        while self.pending.is_empty() && !self.eof {
            if let Err(err) = self.fill() {
                self.abort(&err);
                return Err(err);
            }
        }

        let line = self.pending.pop_front();

        if self.eof && self.pending.is_empty() {
            debug!("input exhausted, releasing source");
            if let Err(err) = self.release() {
                match line {
                    Some(_) => self.deferred = Some(err),
                    None => return Err(err),
                }
            }
        }

        Ok(line)
    }

    /// Rewinds to the start of the source and drops all buffered state.
    ///
    /// # Errors
    ///
    /// - [`LineError::Closed`] if the reader was closed, explicitly or by
    ///   running out of input
    /// - [`LineError::Unsupported`] for non-seekable sources such as
    ///   standard input
    pub fn reset(&mut self) -> Result<()> {
        if self.closed {
            return Err(LineError::Closed);
        }
        if self.position.is_none() {
            return Err(LineError::Unsupported { operation: "reset" });
        }

        debug!("resetting line reader");
        self.position = Some(0);
        self.pending.clear();
        self.scan = ScanState::default();
        self.eof = false;
        self.last = false;
        Ok(())
    }

    /// Releases the source. Standard input is never closed.
    ///
    /// Calling `close` more than once is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::Io`] if the source fails to close, including a
    /// failed auto-close not yet reported by [`LineReader::next_line`]. The
    /// reader is closed regardless.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return self.deferred.take().map_or(Ok(()), Err);
        }
        debug!("closing line reader");
        self.release()
    }

    /// Returns true once no further line can be produced.
    ///
    /// This becomes true when the final line is handed out or the reader is
    /// closed. For non-seekable sources the end is only known after a read
    /// returns nothing, so it may flip one call later.
    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Returns true once the source has been released.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the byte offset of the next underlying read, or `None` for
    /// non-seekable sources.
    pub fn position(&self) -> Option<u64> {
        self.position
    }

    /// Returns the configuration used by this reader.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Returns the number of bytes requested per underlying read.
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size()
    }

    /// Returns a reference to the source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Reads chunks until they contain a boundary byte or the input ends,
    /// then scans them into `pending`.
    fn fill(&mut self) -> Result<()> {
        let chunk_size = self.config.chunk_size();
        let terminator = self.config.terminator();
        let mut buf = BytesMut::new();
        let mut reads = 0usize;

        loop {
            let start = buf.len();
            buf.resize(start + chunk_size, 0);
            let n = self.source.read(&mut buf[start..], self.position)?;
            buf.truncate(start + n);
            reads += 1;

            if let Some(position) = self.position.as_mut() {
                *position += n as u64;
            }

            // Seekable sources fill the whole chunk unless the input ends.
            if n == 0 || (n < chunk_size && self.position.is_some()) {
                self.eof = true;
                break;
            }

            if buf[start..].iter().any(|&byte| terminator.is_boundary(byte)) {
                break;
            }
        }

        let data = buf.freeze();
        let scanned = scan(&data, std::mem::take(&mut self.scan), terminator);
        self.scan = scanned.state;
        let found = scanned.lines.len();
        self.pending.extend(scanned.lines);

        if self.eof {
            if let Some(tail) = self.scan.finish() {
                self.pending.push_back(tail);
            }
        }

        trace!(
            "filled {} bytes in {} reads: {} lines, eof={}",
            data.len(),
            reads,
            found,
            self.eof
        );
        Ok(())
    }

    /// Marks the reader closed and releases the source.
    fn release(&mut self) -> Result<()> {
        self.closed = true;
        self.last = true;
        self.eof = true;
        self.pending.clear();
        self.scan = ScanState::default();
        self.source.close()?;
        Ok(())
    }

    /// Closes the reader after a failed read.
    fn abort(&mut self, err: &LineError) {
        debug!("read failed, closing line reader: {}", err);
        if let Err(close_err) = self.release() {
            warn!("failed to release source after read error: {}", close_err);
        }
    }
}

impl LineReader<FileSource> {
    /// Opens a file with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ReaderConfig::default())
    }

    /// Opens a file with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::InvalidConfig`] for an invalid configuration
    /// (checked before the file is opened) or [`LineError::Io`] if the file
    /// cannot be opened.
    pub fn open_with(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Self::new(FileSource::open(path)?, config)
    }

    /// Reads from an already open file, starting at offset 0.
    pub fn from_file(file: File, config: ReaderConfig) -> Result<Self> {
        Self::new(SeekSource::new(file), config)
    }
}

impl<R: Read + Seek> LineReader<SeekSource<R>> {
    /// Reads from any seekable reader, starting at offset 0.
    pub fn from_seekable(reader: R, config: ReaderConfig) -> Result<Self> {
        Self::new(SeekSource::new(reader), config)
    }
}

impl<R: Read> LineReader<StreamSource<R>> {
    /// Reads from a non-seekable stream such as a pipe or socket.
    pub fn from_stream(reader: R, config: ReaderConfig) -> Result<Self> {
        Self::new(StreamSource::new(reader), config)
    }
}

impl LineReader<StdinSource> {
    /// Reads from the process's standard input.
    pub fn stdin(config: ReaderConfig) -> Result<Self> {
        Self::new(StdinSource::new(), config)
    }
}

impl LineReader<Box<dyn ByteSource>> {
    /// Reads from a file path or, for `-`, standard input.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::InvalidConfig`] for an invalid configuration or
    /// [`LineError::Io`] if the file cannot be opened.
    pub fn from_input(input: &Input, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Self::new(input.open()?, config)
    }
}
