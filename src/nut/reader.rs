use std::fmt;
use std::str::Utf8Error;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug)]
pub enum LineError {
    /// The buffer filled up without a line feed.
    TooLong { limit: usize },
    /// The line bytes are not valid UTF-8.
    Decode(Utf8Error),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::TooLong { limit } => {
                write!(f, "request line exceeds {} bytes", limit)
            }
            LineError::Decode(e) => write!(f, "request line is not valid UTF-8: {}", e),
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LineError::Decode(e) => Some(e),
            LineError::TooLong { .. } => None,
        }
    }
}

/// Pull one complete line out of `buf`, normalizing it in place.
///
/// Spaces at the start of the buffer are dropped one at a time, and every
/// carriage return is dropped wherever it sits, so `"li\rst ups\n"` becomes
/// `"list ups"`. Bytes after the line feed stay in `buf` for the next call.
/// Returns `None` when no line feed has arrived yet; whatever was stripped
/// stays stripped, which keeps the result independent of read boundaries.
pub fn extract_line(buf: &mut BytesMut) -> Option<BytesMut> {
    let mut i = 0;
    while i < buf.len() {
        match buf[i] {
            b' ' if i == 0 => buf.advance(1),
            b'\r' => {
                let len = buf.len();
                buf.copy_within(i + 1.., i);
                buf.truncate(len - 1);
            }
            b'\n' => {
                let line = buf.split_to(i);
                buf.advance(1);
                return Some(line);
            }
            _ => i += 1,
        }
    }
    None
}

/// Read from `stream` until `buf` yields a complete, non-empty line.
///
/// Returns `Ok(None)` once the peer closes the stream. The buffer never
/// grows past `limit` bytes; hitting the limit without a line feed is
/// [`LineError::TooLong`].
pub async fn read_line<S>(
    stream: &mut S,
    buf: &mut BytesMut,
    limit: usize,
) -> anyhow::Result<Option<String>>
where
    S: AsyncRead + Unpin,
{
    loop {
        // Lines already buffered are served before touching the socket
        if let Some(line) = extract_line(buf) {
            // Blank lines get no reply; keep scanning what is buffered
            if line.is_empty() {
                continue;
            }
            let text = std::str::from_utf8(&line).map_err(LineError::Decode)?;
            return Ok(Some(text.to_owned()));
        }

        let remaining = limit.saturating_sub(buf.len());
        if remaining == 0 {
            return Err(LineError::TooLong { limit }.into());
        }

        buf.reserve(remaining);
        let n = (&mut *stream).take(remaining as u64).read_buf(buf).await?;
        if n == 0 {
            return Ok(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_keeps_remainder() {
        let mut buf = BytesMut::from(&b"ver\nlist ups\n"[..]);

        assert_eq!(extract_line(&mut buf).unwrap(), &b"ver"[..]);
        assert_eq!(extract_line(&mut buf).unwrap(), &b"list ups"[..]);
        assert!(extract_line(&mut buf).is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn only_leading_spaces_are_stripped() {
        let mut buf = BytesMut::from(&b"  list  var alpha \n"[..]);

        assert_eq!(extract_line(&mut buf).unwrap(), &b"list  var alpha "[..]);
    }

    #[test]
    fn incomplete_line_is_normalized_in_place() {
        let mut buf = BytesMut::from(&b" \r ve\rr"[..]);

        assert!(extract_line(&mut buf).is_none());
        assert_eq!(&buf[..], b"ver");
    }
}
