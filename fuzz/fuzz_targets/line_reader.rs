#![no_main]

use std::io::Cursor;

use chunklines::{LineReader, ReaderConfig};
use libfuzzer_sys::fuzz_target;

fn read_lines(data: &[u8], chunk_size: usize) -> Vec<Vec<u8>> {
    let config = ReaderConfig::new(chunk_size).unwrap();
    LineReader::from_seekable(Cursor::new(data.to_vec()), config)
        .unwrap()
        .map(|line| line.unwrap().to_vec())
        .collect()
}

/// Plain in-memory split with the same LF / CRLF / CR rules.
fn split_in_memory(data: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'\n' => lines.push(std::mem::take(&mut current)),
            b'\r' => {
                lines.push(std::mem::take(&mut current));
                if data.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            byte => current.push(byte),
        }
        i += 1;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fuzz_target!(|data: Vec<u8>| {
    let reference = split_in_memory(&data);

    // Verify: no line carries a terminator byte
    for line in &reference {
        assert!(!line.contains(&b'\n') && !line.contains(&b'\r'));
    }

    // Verify: every chunk size matches the in-memory split
    for chunk_size in [1, 2, 3, 5, 16, 1024, data.len().max(1)] {
        assert_eq!(read_lines(&data, chunk_size), reference);
    }

    // Verify: streams match the in-memory split
    let streamed: Vec<Vec<u8>> = LineReader::from_stream(&data[..], ReaderConfig::new(7).unwrap())
        .unwrap()
        .map(|line| line.unwrap().to_vec())
        .collect();
    assert_eq!(streamed, reference);

    // Verify: only bytes that form terminators are dropped
    let kept: usize = reference.iter().map(|line| line.len()).sum();
    let terminators = data.iter().filter(|&&b| b == b'\n' || b == b'\r').count();
    assert_eq!(kept + terminators, data.len());
});
