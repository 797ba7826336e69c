//! Incremental SSE parser for the streaming response body.
//!
//! SSE events are separated by a blank line; each event carries one or more
//! `data:` lines. HTTP chunk boundaries do not align with event boundaries,
//! so the parser buffers partial input across [`feed`](SseParser::feed)
//! calls.

/// Parses raw response bytes into the `data:` payloads of complete events.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes from the HTTP response. Returns the data payload of
    /// every event completed by this chunk, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut payloads = Vec::new();
        while let Some(boundary) = self.buffer.find("\n\n") {
            let block = self.buffer[..boundary].to_string();
            self.buffer.drain(..boundary + 2);

            let mut data_lines: Vec<&str> = Vec::new();
            for line in block.lines() {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if let Some(value) = line.strip_prefix("data:") {
                    data_lines.push(value.strip_prefix(' ').unwrap_or(value));
                }
                // Other fields (event:, id:, retry:) and comments are ignored
            }

            if !data_lines.is_empty() {
                payloads.push(data_lines.join("\n"));
            }
        }

        payloads
    }
}
