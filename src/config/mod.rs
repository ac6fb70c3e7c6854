//! Configuration for line reading behavior.
//!
//! This module provides types to configure how lines are read:
//!
//! - [`ReaderConfig`] - Controls the read chunk size and the terminator policy
//! - [`Terminator`] - Specifies which bytes end a line
//!
//! # Example
//!
//! ```
//! use chunklines::{ReaderConfig, Terminator};
//!
//! // Custom chunk size
//! let config = ReaderConfig::new(4096)?;
//!
//! // Split on a single custom byte
//! let config = ReaderConfig::default()
//!     .with_terminator(Terminator::Byte(b';'));
//!
//! # Ok::<(), chunklines::LineError>(())
//! ```

use crate::error::LineError;

/// Default number of bytes requested per underlying read (1 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Configuration for a [`LineReader`](crate::LineReader).
///
/// # Chunk Size
///
/// The chunk size is the number of bytes requested from the source on each
/// underlying read. It bounds the over-read past the end of a line and must
/// be non-zero. It never changes which lines are produced.
///
/// # Example
///
/// ```
/// use chunklines::ReaderConfig;
///
/// // Use default configuration
/// let config = ReaderConfig::default();
/// assert_eq!(config.chunk_size(), 1024);
///
/// // Builder pattern
/// let config = ReaderConfig::default().with_chunk_size(16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReaderConfig {
    /// Bytes requested per underlying read.
    chunk_size: usize,

    /// Which bytes end a line.
    terminator: Terminator,
}

impl ReaderConfig {
    /// Creates a new configuration with the given chunk size and automatic
    /// line ending detection.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::InvalidConfig`] if `chunk_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use chunklines::ReaderConfig;
    ///
    /// let config = ReaderConfig::new(16)?;
    /// assert_eq!(config.chunk_size(), 16);
    /// assert!(ReaderConfig::new(0).is_err());
    /// # Ok::<(), chunklines::LineError>(())
    /// ```
    pub fn new(chunk_size: usize) -> Result<Self, LineError> {
        if chunk_size == 0 {
            return Err(LineError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        Ok(Self {
            chunk_size,
            terminator: Terminator::default(),
        })
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Readers validate it on
    /// construction, or call [`ReaderConfig::validate`] directly.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the terminator policy.
    ///
    /// # Example
    ///
    /// ```
    /// use chunklines::{ReaderConfig, Terminator};
    ///
    /// let config = ReaderConfig::default().with_terminator(Terminator::Byte(0));
    /// assert_eq!(config.terminator(), Terminator::Byte(0));
    /// ```
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the terminator policy.
    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use chunklines::ReaderConfig;
    ///
    /// let config = ReaderConfig::default().with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), LineError> {
        Self::new(self.chunk_size).map(|_| ())
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            terminator: Terminator::default(),
        }
    }
}

/// Line terminator policy.
///
/// [`Terminator::Auto`] recognizes `\r\n`, `\n` and a bare `\r`, including
/// a `\r\n` pair split across two reads. [`Terminator::Byte`] splits on one
/// fixed byte only; `\r` is then ordinary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Terminator {
    /// Detect LF, CRLF and CR line endings per line.
    #[default]
    Auto,

    /// Split on a single byte value.
    Byte(u8),
}

impl Terminator {
    /// Returns true if `byte` may end a line under this policy.
    #[inline]
    pub(crate) fn is_boundary(self, byte: u8) -> bool {
        match self {
            Terminator::Auto => byte == b'\n' || byte == b'\r',
            Terminator::Byte(b) => byte == b,
        }
    }
}
