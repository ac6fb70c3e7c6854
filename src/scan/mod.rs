//! Line boundary scanning.
//!
//! The scanner is a pure function over one freshly read buffer and the state
//! carried over from the previous buffer. It never performs I/O.
//!
//! - [`scan`] - Splits a buffer into complete lines plus the new carry state
//! - [`ScanState`] - Partial line bytes and the split-CRLF flag

mod boundary;

pub(crate) use boundary::{ScanState, scan};
