//! chunklines
//!
//! Synchronous, chunked line reading for Rust.
//!
//! `chunklines` reads a file, handle or stream a fixed-size chunk at a time
//! and yields its lines as raw bytes, without the terminator. It is designed
//! as a small primitive for:
//!
//! - log and data file processing
//! - line-oriented protocols over pipes
//! - inputs too large to load into memory
//!
//! The crate intentionally:
//! - does NOT decode text (lines are opaque bytes)
//! - does NOT do async I/O
//! - does NOT index or seek to individual lines
//!
//! It only does one thing: **Read bytes → yield lines**
//!
//! Line endings are detected per line: `\n`, `\r\n` and a bare `\r` all end a
//! line, even when a `\r\n` pair is split across two reads. A single custom
//! terminator byte can be configured instead with [`Terminator::Byte`].
//!
//! # Example
//!
//! ```no_run
//! use chunklines::{LineError, LineReader};
//!
//! fn main() -> Result<(), LineError> {
//!     let mut reader = LineReader::open("data.txt")?;
//!
//!     while let Some(line) = reader.next_line()? {
//!         println!("{}", String::from_utf8_lossy(&line));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Standard input
//!
//! ```no_run
//! use chunklines::{LineReader, ReaderConfig};
//! use chunklines::source::Input;
//!
//! # fn main() -> Result<(), chunklines::LineError> {
//! let input = Input::parse("-");
//! for line in LineReader::from_input(&input, ReaderConfig::default())? {
//!     let line = line?;
//!     println!("{} bytes", line.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod reader;
mod scan; // internal boundary scanner

pub mod source;

//
// Public surface
//

pub use config::{DEFAULT_CHUNK_SIZE, ReaderConfig, Terminator};
pub use error::{LineError, Result};
pub use reader::LineReader;
pub use source::ByteSource;
