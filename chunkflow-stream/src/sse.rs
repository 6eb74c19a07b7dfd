//! SSE event reader for provider streaming responses.
//!
//! Frames a raw byte stream into discrete [`SseEvent`]s per the
//! line-based text-event protocol:
//!
//! ```text
//! event: content_block_delta
//! data: {"type":"content_block_delta","index":0,...}
//!
//! (blank line terminates the event)
//! ```
//!
//! Partial lines may arrive split across byte chunks; they are
//! buffered until a line terminator is seen. No more than one pending
//! event is ever buffered.

use chunkflow_types::{SseEvent, StreamError};
use futures::{Stream, StreamExt};

/// Parse a raw byte stream into a stream of framed [`SseEvent`]s.
///
/// The returned stream is pull-based and suspends only while awaiting
/// the next byte chunk; dropping it releases the underlying stream.
/// On a transport or UTF-8 error it yields one `Err` and terminates.
/// A pending event left unterminated when the stream ends is yielded
/// anyway — transports may truncate without a final blank line.
pub fn sse_events<S, E>(byte_stream: S) -> impl Stream<Item = Result<SseEvent, StreamError>> + Send
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
        let mut framer = EventFramer::new();
        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut line_buf = String::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(b) => b,
                Err(e) => {
                    yield Err(StreamError::Transport(format!("stream read error: {e}")));
                    return;
                }
            };

            let chunk_str = match std::str::from_utf8(&chunk) {
                Ok(s) => s,
                Err(e) => {
                    yield Err(StreamError::Utf8(e.to_string()));
                    return;
                }
            };

            // Append chunk to the line buffer and process complete lines
            line_buf.push_str(chunk_str);

            while let Some(newline_pos) = line_buf.find('\n') {
                let line = line_buf[..newline_pos].trim_end_matches('\r').to_string();
                line_buf.drain(..=newline_pos);

                if let Some(event) = framer.feed_line(&line) {
                    yield Ok(event);
                }
            }
        }

        // The stream ended without a trailing newline; run the partial
        // line through the framer, then flush any pending event.
        if !line_buf.is_empty() {
            if let Some(event) = framer.feed_line(line_buf.trim_end_matches('\r')) {
                yield Ok(event);
            }
        }
        if let Some(event) = framer.flush() {
            yield Ok(event);
        }
    }
}

/// Framing state for the single pending event.
struct EventFramer {
    /// Pending event name from `event:` lines.
    event: Option<String>,
    /// Pending data; `Some("")` after a bare `data:` line, `None`
    /// before any data line.
    data: Option<String>,
}

impl EventFramer {
    fn new() -> Self {
        Self {
            event: None,
            data: None,
        }
    }

    /// Process one line; returns a completed event on a blank-line boundary.
    fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            // Blank line: dispatch the accumulated event
            return self.flush();
        }

        if let Some(rest) = line.strip_prefix("event:") {
            self.event = Some(strip_leading_space(rest).trim().to_string());
        } else if let Some(rest) = line.strip_prefix("data:") {
            let value = strip_leading_space(rest);
            match &mut self.data {
                Some(buf) => {
                    buf.push('\n');
                    buf.push_str(value);
                }
                None => self.data = Some(value.to_string()),
            }
        }
        // Comment lines (starting with ':') and unknown prefixes are
        // ignored for forward compatibility.

        None
    }

    /// Yield the pending event if any line contributed to it.
    fn flush(&mut self) -> Option<SseEvent> {
        if self.event.is_none() && self.data.is_none() {
            return None;
        }
        Some(SseEvent {
            event: self.event.take(),
            data: self.data.take().unwrap_or_default(),
        })
    }
}

/// Strip at most one leading space after the field colon.
fn strip_leading_space(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}
