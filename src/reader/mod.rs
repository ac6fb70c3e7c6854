//! Line reading engine.
//!
//! - [`LineReader`] - Chunked line reader with `next_line()`/`reset()`/`close()`

mod engine;
mod iter;

pub use engine::LineReader;
