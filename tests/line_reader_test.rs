// Integration tests for the LineReader API
// Tests cover: fixture files, chunk-size invariance, line endings, lifecycle, sources

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chunklines::source::{self, Input};
use chunklines::{ByteSource, LineError, LineReader, ReaderConfig, Terminator};
use rstest::rstest;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn with_chunk(chunk_size: usize) -> ReaderConfig {
    ReaderConfig::new(chunk_size).unwrap()
}

fn temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn read_all(path: &Path, config: ReaderConfig) -> Vec<Bytes> {
    LineReader::open_with(path, config)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

/// Straightforward in-memory split with the same LF / CRLF / CR rules.
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

fn mixed_content() -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..200 {
        data.extend_from_slice(format!("line number {}", i).as_bytes());
        data.extend_from_slice(match i % 4 {
            0 => &b"\n"[..],
            1 => &b"\r\n"[..],
            2 => &b"\r"[..],
            _ => &b"\n\n"[..],
        });
        if i % 17 == 0 {
            data.extend_from_slice(b"nul\0inside\0\n");
        }
    }
    data.extend_from_slice(b"unterminated tail");
    data
}

// ============================================================================
// Fixture Files
// ============================================================================

#[test]
fn test_get_all_lines() {
    let mut reader = LineReader::open(fixture("two_lines.txt")).unwrap();

    assert_eq!(reader.next_line().unwrap().as_deref(), Some(&b"hello"[..]));
    assert_eq!(reader.next_line().unwrap().as_deref(), Some(&b"hello2"[..]));
    assert_eq!(reader.next_line().unwrap(), None);
    assert_eq!(reader.next_line().unwrap(), None);
    assert!(reader.is_closed());
    assert!(reader.source().is_closed(), "file handle must be released");
}

#[test]
fn test_file_without_trailing_newline() {
    let mut reader = LineReader::open_with(fixture("bad_end.txt"), with_chunk(16)).unwrap();

    assert_eq!(
        reader.next_line().unwrap().as_deref(),
        Some(&b"google.com"[..])
    );
    assert_eq!(
        reader.next_line().unwrap().as_deref(),
        Some(&b"yahoo.com"[..])
    );
    assert_eq!(reader.next_line().unwrap(), None);
    assert!(reader.source().is_closed());
}

#[test]
fn test_file_without_any_newline() {
    let mut reader = LineReader::open(fixture("no_newline.txt")).unwrap();

    assert_eq!(
        reader.next_line().unwrap().as_deref(),
        Some(&b"no new line"[..])
    );
    assert_eq!(reader.next_line().unwrap(), None);
    assert!(reader.is_closed());
}

#[test]
fn test_empty_file() {
    let mut reader = LineReader::open(fixture("empty.txt")).unwrap();

    assert!(!reader.is_last());
    assert_eq!(reader.next_line().unwrap(), None);
    assert!(reader.is_last());
    assert!(reader.source().is_closed());
}

#[test]
fn test_line_ends_exactly_on_chunk_boundary() {
    // "google.com\nyahoo" is exactly 16 bytes.
    let lines = read_all(&fixture("normal.txt"), with_chunk(16));
    assert_eq!(
        lines,
        vec![&b"google.com"[..], &b"yahoo.com"[..], &b"yandex.ru"[..]]
    );
}

#[test]
fn test_empty_lines_are_preserved() {
    let lines = read_all(&fixture("with_empty_lines.txt"), ReaderConfig::default());
    assert_eq!(
        lines,
        vec![
            &b"hello"[..],
            &b"hello4"[..],
            &b""[..],
            &b"hello2"[..],
            &b"hello3"[..]
        ]
    );
}

#[test]
fn test_crlf_file() {
    let lines = read_all(&fixture("crlf.txt"), ReaderConfig::default());
    assert_eq!(lines, vec![&b"line1"[..], &b"line2"[..]]);
    for line in &lines {
        assert!(!line.contains(&b'\r') && !line.contains(&b'\n'));
    }
}

#[test]
fn test_cr_only_file() {
    let lines = read_all(&fixture("cr.txt"), with_chunk(5));
    assert_eq!(lines, vec![&b"mac1"[..], &b"mac2"[..], &b"mac3"[..]]);
}

// ============================================================================
// Chunk Size Invariance
// ============================================================================

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(16)]
#[case(1024)]
#[case(1 << 20)]
fn test_chunk_size_does_not_change_lines(#[case] chunk_size: usize) {
    let data = mixed_content();
    let file = temp_file(&data);

    let lines = read_all(file.path(), with_chunk(chunk_size));
    let expected = split_in_memory(&data);

    assert_eq!(lines.len(), expected.len(), "chunk_size={}", chunk_size);
    for (i, (line, want)) in lines.iter().zip(&expected).enumerate() {
        assert_eq!(line, &want[..], "line {} differs (chunk_size={})", i, chunk_size);
    }
}

#[test]
fn test_crlf_split_at_every_boundary() {
    let data = b"ab\r\ncd\r\nef\r\n\r\ngh";
    let expected = vec![&b"ab"[..], &b"cd"[..], &b"ef"[..], &b""[..], &b"gh"[..]];
    let file = temp_file(data);

    for chunk_size in 1..=data.len() + 1 {
        let lines = read_all(file.path(), with_chunk(chunk_size));
        assert_eq!(lines, expected, "chunk_size={}", chunk_size);
    }
}

#[test]
fn test_big_lines() {
    let mut data = Vec::new();
    let big = vec![b'{'; 50_000];
    for _ in 0..3 {
        data.extend_from_slice(&big);
        data.push(b'\n');
    }
    let file = temp_file(&data);

    let lines = read_all(file.path(), ReaderConfig::default());
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.len() == 50_000));
}

// ============================================================================
// Byte Content
// ============================================================================

#[test]
fn test_nul_bytes_preserved() {
    let file = temp_file(b"a\0b\n\0\0\n\0");
    let lines = read_all(file.path(), with_chunk(2));
    assert_eq!(lines, vec![&b"a\0b"[..], &b"\0\0"[..], &b"\0"[..]]);
}

#[test]
fn test_non_utf8_bytes_preserved() {
    let file = temp_file(b"\xff\xfe\n\xc3\x28\n");
    let lines = read_all(file.path(), with_chunk(3));
    assert_eq!(lines, vec![&b"\xff\xfe"[..], &b"\xc3\x28"[..]]);
}

#[test]
fn test_custom_terminator_byte() {
    let file = temp_file(b"a\nb;c\r\n;d");
    let config = with_chunk(2).with_terminator(Terminator::Byte(b';'));
    let lines = read_all(file.path(), config);
    assert_eq!(lines, vec![&b"a\nb"[..], &b"c\r\n"[..], &b"d"[..]]);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_exhaustion_is_idempotent() {
    let mut reader = LineReader::open_with(fixture("normal.txt"), with_chunk(4)).unwrap();
    while reader.next_line().unwrap().is_some() {}

    for _ in 0..5 {
        assert_eq!(reader.next_line().unwrap(), None);
    }
    assert!(reader.is_last());
}

#[test]
fn test_reset_and_start_from_beginning() {
    let mut reader = LineReader::open_with(fixture("normal.txt"), with_chunk(16)).unwrap();

    assert_eq!(
        reader.next_line().unwrap().as_deref(),
        Some(&b"google.com"[..])
    );
    assert_eq!(
        reader.next_line().unwrap().as_deref(),
        Some(&b"yahoo.com"[..])
    );

    reader.reset().unwrap();

    let lines: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        lines,
        vec![&b"google.com"[..], &b"yahoo.com"[..], &b"yandex.ru"[..]]
    );
    assert!(reader.source().is_closed());
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(1024)]
fn test_reset_reproduces_full_sequence(#[case] chunk_size: usize) {
    let data = mixed_content();
    let file = temp_file(&data);
    let mut reader = LineReader::open_with(file.path(), with_chunk(chunk_size)).unwrap();

    let mut first = Vec::new();
    for _ in 0..7 {
        first.push(reader.next_line().unwrap().unwrap());
    }
    reader.reset().unwrap();

    let replay: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(&replay[..7], &first[..]);
    assert_eq!(replay.len(), split_in_memory(&data).len());
}

#[test]
fn test_reset_after_exhaustion_fails() {
    let mut reader = LineReader::open(fixture("two_lines.txt")).unwrap();
    while reader.next_line().unwrap().is_some() {}
    assert!(matches!(reader.reset(), Err(LineError::Closed)));
}

#[test]
fn test_manual_close() {
    let mut reader = LineReader::open(fixture("normal.txt")).unwrap();

    assert_eq!(
        reader.next_line().unwrap().as_deref(),
        Some(&b"google.com"[..])
    );
    assert!(!reader.is_last());

    reader.close().unwrap();
    assert!(reader.source().is_closed());
    assert!(reader.is_last());
    assert_eq!(reader.next_line().unwrap(), None);

    reader.close().unwrap();
}

// ============================================================================
// Sources and Construction
// ============================================================================

/// Returns at most `step` bytes per read, like a pipe.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn test_stream_short_reads_do_not_end_input() {
    let data = mixed_content();
    let stream = Trickle {
        data: &data,
        step: 7,
    };
    let reader = LineReader::from_stream(stream, with_chunk(64)).unwrap();
    assert_eq!(reader.position(), None);

    let lines: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(lines.len(), split_in_memory(&data).len());
}

#[test]
fn test_stream_reset_unsupported() {
    let mut reader = LineReader::from_stream(&b"a\nb\n"[..], ReaderConfig::default()).unwrap();
    assert_eq!(reader.next_line().unwrap().as_deref(), Some(&b"a"[..]));
    assert!(matches!(
        reader.reset(),
        Err(LineError::Unsupported { .. })
    ));
    assert_eq!(reader.next_line().unwrap().as_deref(), Some(&b"b"[..]));
}

#[test]
fn test_stdin_input_is_not_resettable() {
    let input = Input::parse("-");
    let mut reader = LineReader::from_input(&input, ReaderConfig::default()).unwrap();

    assert!(!reader.source().is_seekable());
    assert!(matches!(
        reader.reset(),
        Err(LineError::Unsupported { .. })
    ));
    reader.close().unwrap();
    assert!(reader.is_closed());
}

#[test]
fn test_path_input() {
    let input = Input::parse(fixture("crlf.txt"));
    let reader = LineReader::from_input(&input, with_chunk(3)).unwrap();
    let lines: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(lines, vec![&b"line1"[..], &b"line2"[..]]);
}

#[test]
fn test_from_open_file() {
    let file = std::fs::File::open(fixture("two_lines.txt")).unwrap();
    let lines: Vec<_> = LineReader::from_file(file, with_chunk(5))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(lines, vec![&b"hello"[..], &b"hello2"[..]]);
}

#[test]
fn test_read_function_source() {
    let data = b"first\nsecond\r\nthird".to_vec();
    let source = source::from_fn(move |buf: &mut [u8], position: u64| {
        let start = (position as usize).min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        Ok(n)
    });

    let mut reader = LineReader::new(source, with_chunk(4)).unwrap();
    assert_eq!(reader.next_line().unwrap().as_deref(), Some(&b"first"[..]));
    reader.reset().unwrap();

    let lines: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(lines, vec![&b"first"[..], &b"second"[..], &b"third"[..]]);
}

// ============================================================================
// Error Conditions
// ============================================================================

#[test]
fn test_missing_file() {
    let result = LineReader::open(fixture("does_not_exist.txt"));
    assert!(matches!(result, Err(LineError::Io(_))));
}

#[test]
fn test_zero_chunk_size_rejected_before_open() {
    let config = ReaderConfig::default().with_chunk_size(0);
    let result = LineReader::open_with(fixture("does_not_exist.txt"), config);
    assert!(matches!(result, Err(LineError::InvalidConfig { .. })));
}

#[test]
fn test_read_error_propagates_then_reader_is_closed() {
    struct FailingAfterFirst {
        served: bool,
    }

    impl Read for FailingAfterFirst {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.served = true;
            buf[..3].copy_from_slice(b"ok\n");
            Ok(3)
        }
    }

    let stream = FailingAfterFirst { served: false };
    let mut reader = LineReader::from_stream(stream, ReaderConfig::default()).unwrap();

    assert_eq!(reader.next_line().unwrap().as_deref(), Some(&b"ok"[..]));
    let err = reader.next_line().unwrap_err();
    assert!(matches!(err, LineError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    assert!(reader.is_closed());
    assert_eq!(reader.next_line().unwrap(), None);
}
