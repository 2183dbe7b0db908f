//! Tests for turning raw bytes into request lines

use bytes::BytesMut;
use mock_upsd::nut::reader::{LineError, extract_line, read_line};
use tokio_test::io::Builder;

const LIMIT: usize = 4096;

#[tokio::test]
async fn test_read_single_line() {
    let mut stream = Builder::new().read(b"ver\n").build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line.as_deref(), Some("ver"));
    assert!(buf.is_empty());
}

#[tokio::test]
async fn test_line_split_across_every_boundary() {
    let raw = b"  li\rst ups\r\n";

    for split in 1..raw.len() {
        let mut stream = Builder::new()
            .read(&raw[..split])
            .read(&raw[split..])
            .build();
        let mut buf = BytesMut::new();

        let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
        assert_eq!(line.as_deref(), Some("list ups"), "split at {}", split);
    }
}

#[tokio::test]
async fn test_line_arriving_one_byte_at_a_time() {
    let mut builder = Builder::new();
    for byte in b"\r LIST VAR alpha\r\n" {
        builder.read(std::slice::from_ref(byte));
    }
    let mut stream = builder.build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line.as_deref(), Some("LIST VAR alpha"));
}

#[tokio::test]
async fn test_all_leading_spaces_are_stripped() {
    let mut stream = Builder::new().read(b"   ver\n").build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line.as_deref(), Some("ver"));
}

#[tokio::test]
async fn test_carriage_return_inside_line_is_stripped() {
    // CR is dropped anywhere, not only before the line feed
    let mut stream = Builder::new().read(b"li\rst ups\n").build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line.as_deref(), Some("list ups"));
}

#[tokio::test]
async fn test_pipelined_lines_served_from_buffer() {
    // One read carries two requests; the second must not wait for more input
    let mut stream = Builder::new().read(b"ver\nlist ups\n").build();
    let mut buf = BytesMut::new();

    let first = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    let second = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    let third = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();

    assert_eq!(first.as_deref(), Some("ver"));
    assert_eq!(second.as_deref(), Some("list ups"));
    assert_eq!(third, None);
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let mut stream = Builder::new().read(b"\r\n ver\n").build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line.as_deref(), Some("ver"));
}

#[tokio::test]
async fn test_blank_line_then_next_segment() {
    let mut stream = Builder::new().read(b"   \n").read(b"list ups\n").build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line.as_deref(), Some("list ups"));
}

#[tokio::test]
async fn test_only_blank_lines_then_end_of_stream() {
    let mut stream = Builder::new().read(b"\n\r\n  \n").build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line, None);
}

#[tokio::test]
async fn test_end_of_stream() {
    let mut stream = Builder::new().build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line, None);
}

#[tokio::test]
async fn test_end_of_stream_discards_partial_line() {
    let mut stream = Builder::new().read(b"list u").build();
    let mut buf = BytesMut::new();

    let line = read_line(&mut stream, &mut buf, LIMIT).await.unwrap();
    assert_eq!(line, None);
}

#[tokio::test]
async fn test_buffer_full_without_line_feed() {
    let mut stream = Builder::new().read(b"abcdefgh").build();
    let mut buf = BytesMut::new();

    let err = read_line(&mut stream, &mut buf, 8).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LineError>(),
        Some(LineError::TooLong { limit: 8 })
    ));
    assert_eq!(buf.len(), 8);
}

#[tokio::test]
async fn test_buffer_never_reads_past_limit() {
    // Only 4 bytes fit; the rest of the segment stays unread in the stream
    let mut stream = Builder::new().read(b"abcd").read(b"ef\n").build();
    let mut buf = BytesMut::new();

    let err = read_line(&mut stream, &mut buf, 4).await.unwrap_err();
    assert!(err.downcast_ref::<LineError>().is_some());
    assert_eq!(&buf[..], b"abcd");

    // Drain the remaining scripted read so the mock is satisfied
    let mut rest = [0u8; 3];
    tokio::io::AsyncReadExt::read_exact(&mut stream, &mut rest)
        .await
        .unwrap();
    assert_eq!(&rest, b"ef\n");
}

#[tokio::test]
async fn test_stripped_bytes_do_not_count_toward_limit() {
    let mut stream = Builder::new().read(b"\r\r\r\rver\n").build();
    let mut buf = BytesMut::new();

    // The first read is capped at 4 bytes, all CRs; they vanish and reading continues
    let line = read_line(&mut stream, &mut buf, 4).await.unwrap();
    assert_eq!(line.as_deref(), Some("ver"));
}

#[tokio::test]
async fn test_invalid_utf8_is_an_error() {
    let mut stream = Builder::new().read(b"\xff\xfe\n").build();
    let mut buf = BytesMut::new();

    let err = read_line(&mut stream, &mut buf, LIMIT).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LineError>(),
        Some(LineError::Decode(_))
    ));
}

#[test]
fn test_extract_line_needs_line_feed() {
    let mut buf = BytesMut::from(&b"list var alpha"[..]);

    assert!(extract_line(&mut buf).is_none());
    assert_eq!(&buf[..], b"list var alpha");
}

#[test]
fn test_extract_line_strips_spaces_after_previous_line() {
    let mut buf = BytesMut::from(&b"ver\n  logout\n"[..]);

    assert_eq!(extract_line(&mut buf).unwrap(), &b"ver"[..]);
    assert_eq!(extract_line(&mut buf).unwrap(), &b"logout"[..]);
}
