//! Incremental decoder for `text/event-stream` bodies.

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Value of the `event:` field, `"message"` when absent.
    pub event: String,
    /// `data:` lines joined with `\n`.
    pub data: String,
}

/// Buffers body chunks and yields complete frames.
///
/// Accepts both `\n` and `\r\n` line endings. Bytes are buffered until a
/// frame is complete, so a `\r\n` or a multi-byte character split across
/// two chunks is joined on the next push. Comment lines and unknown fields
/// are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every frame it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);
        if self.buf.windows(2).any(|w| w == b"\r\n") {
            self.buf = normalize_crlf(&self.buf);
        }

        let mut frames = Vec::new();
        while let Some(pos) = self.buf.windows(2).position(|w| w == b"\n\n") {
            let block: Vec<u8> = self.buf.drain(..pos + 2).collect();
            if let Some(frame) = parse_block(&String::from_utf8_lossy(&block)) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flush a trailing frame that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        let rest = std::mem::take(&mut self.buf);
        parse_block(&String::from_utf8_lossy(&rest))
    }
}

/// Replace every `\r\n` with `\n`. A trailing lone `\r` is kept for the
/// next chunk.
fn normalize_crlf(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();
    while let Some(b) = iter.next() {
        if b == b'\r' && iter.peek() == Some(&b'\n') {
            continue;
        }
        out.push(b);
    }
    out
}

fn parse_block(block: &str) -> Option<SseFrame> {
    let mut event = None;
    let mut data: Option<String> = None;

    for line in block.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = line.split_once(':').unwrap_or((line, ""));
        // Only the single separator space is dropped; text deltas keep
        // their own leading whitespace.
        let value = value.strip_prefix(' ').unwrap_or(value);
        match field {
            "event" => event = Some(value.to_string()),
            "data" => match &mut data {
                Some(d) => {
                    d.push('\n');
                    d.push_str(value);
                }
                None => data = Some(value.to_string()),
            },
            _ => {}
        }
    }

    data.map(|data| SseFrame {
        event: event.unwrap_or_else(|| "message".to_string()),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_across_chunks() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: Hel").is_empty());
        let frames = dec.push(b"lo\n\ndata:  world\n\n");
        assert_eq!(
            frames,
            vec![
                SseFrame {
                    event: "message".into(),
                    data: "Hello".into()
                },
                SseFrame {
                    event: "message".into(),
                    data: " world".into()
                },
            ]
        );
    }

    #[test]
    fn crlf_and_named_events() {
        let mut dec = SseDecoder::new();
        let frames = dec.push(b"event: error\r\ndata: boom\r\n\r\n: keepalive\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "error");
        assert_eq!(frames[0].data, "boom");
    }

    #[test]
    fn multibyte_character_split_across_chunks() {
        let bytes = "data: Sláinte\n\n".as_bytes();
        let split = bytes.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut dec = SseDecoder::new();
        assert!(dec.push(&bytes[..split]).is_empty());
        let frames = dec.push(&bytes[split..]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "Sláinte");
    }

    #[test]
    fn crlf_split_across_chunks() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: one\r").is_empty());
        assert!(dec.push(b"\n\r").is_empty());
        let frames = dec.push(b"\ndata: two\r\n\r\n");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data, "one");
        assert_eq!(frames[1].data, "two");
    }

    #[test]
    fn multiline_data_joins_with_newline() {
        let mut dec = SseDecoder::new();
        let frames = dec.push(b"data: line one\ndata: line two\n\n");
        assert_eq!(frames[0].data, "line one\nline two");
    }

    #[test]
    fn finish_flushes_unterminated_frame() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: tail").is_empty());
        assert_eq!(dec.finish().unwrap().data, "tail");
        assert!(dec.finish().is_none());
    }
}
