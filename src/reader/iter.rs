//! `Iterator` adapter for [`LineReader`].
//!
//! Iteration yields `Result<Bytes, LineError>`. An I/O error is yielded once;
//! the reader is closed afterwards, so the iterator then ends.
//!
//! # Example
//!
//! ```
//! use chunklines::{LineReader, ReaderConfig};
//!
//! let reader = LineReader::from_stream(&b"a\nb\n"[..], ReaderConfig::default())?;
//! let lines: Vec<_> = reader.collect::<Result<_, _>>()?;
//! assert_eq!(lines, vec![&b"a"[..], &b"b"[..]]);
//! # Ok::<(), chunklines::LineError>(())
//! ```

use std::iter::FusedIterator;

use bytes::Bytes;

use super::LineReader;
use crate::error::LineError;
use crate::source::ByteSource;

impl<S: ByteSource> Iterator for LineReader<S> {
    type Item = Result<Bytes, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

// Exhaustion and errors both close the reader. Once a closed reader has
// reported any close failure it only ever returns `None`.
impl<S: ByteSource> FusedIterator for LineReader<S> {}
