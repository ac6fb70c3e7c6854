//! Boundary scanner for LF, CRLF, CR and single-byte terminators.

use bytes::{Bytes, BytesMut};

use crate::config::Terminator;

/// State carried from one scanned buffer to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ScanState {
    /// Bytes of a line whose terminator has not been seen yet.
    pub(crate) carry: Option<Bytes>,

    /// The previous buffer ended with a bare `\r`; a leading `\n` in the next
    /// buffer belongs to it.
    pub(crate) trailing_cr: bool,
}

impl ScanState {
    /// Takes the carried bytes as the final line of the input, if any.
    pub(crate) fn finish(&mut self) -> Option<Bytes> {
        self.trailing_cr = false;
        self.carry.take().filter(|carry| !carry.is_empty())
    }
}

/// Result of scanning one buffer.
#[derive(Debug)]
pub(crate) struct Scan {
    /// Complete lines in input order, terminators stripped.
    pub(crate) lines: Vec<Bytes>,

    /// State to pass to the next call.
    pub(crate) state: ScanState,
}

/// Splits `data` into complete lines.
///
/// The carry in `state` is prepended to the first line found. Bytes after the
/// last terminator become the new carry. Lines are zero-copy slices of `data`
/// except the one that absorbs the previous carry.
pub(crate) fn scan(data: &Bytes, state: ScanState, terminator: Terminator) -> Scan {
    let ScanState {
        mut carry,
        mut trailing_cr,
    } = state;
    let mut lines = Vec::new();

    if data.is_empty() {
        return Scan {
            lines,
            state: ScanState { carry, trailing_cr },
        };
    }

    let mut line_start = 0;
    if trailing_cr && data[0] == b'\n' {
        line_start = 1;
    }
    trailing_cr = false;

    while let Some(offset) = data[line_start..]
        .iter()
        .position(|&byte| terminator.is_boundary(byte))
    {
        let end = line_start + offset;
        let mut next = end + 1;

        if terminator == Terminator::Auto && data[end] == b'\r' {
            match data.get(next) {
                Some(b'\n') => next += 1,
                Some(_) => {}
                // Undecided until the next buffer arrives.
                None => trailing_cr = true,
            }
        }

        lines.push(join(carry.take(), data.slice(line_start..end)));
        line_start = next;
    }

    if line_start < data.len() {
        carry = Some(join(carry.take(), data.slice(line_start..)));
    }

    Scan {
        lines,
        state: ScanState { carry, trailing_cr },
    }
}

/// Prepends carried bytes to `part`.
fn join(carry: Option<Bytes>, part: Bytes) -> Bytes {
    match carry {
        Some(head) if !head.is_empty() => {
            let mut joined = BytesMut::with_capacity(head.len() + part.len());
            joined.extend_from_slice(&head);
            joined.extend_from_slice(&part);
            joined.freeze()
        }
        _ => part,
    }
}
