//! NDJSON line reader for provider streaming responses.
//!
//! Some backends stream one JSON object per line instead of SSE
//! frames:
//!
//! ```text
//! {"message":{"content":"Hello"},"done":false}
//! {"message":{"content":" world"},"done":false}
//! {"message":{"content":""},"done":true,"done_reason":"stop"}
//! ```
//!
//! The same line-buffer mechanics as the SSE reader apply: partial
//! lines are reassembled across byte chunks, and a trailing
//! unterminated line is yielded when the stream ends.

use chunkflow_types::{SseEvent, StreamError};
use futures::{Stream, StreamExt};

/// Parse a raw byte stream into a stream of complete NDJSON lines.
///
/// Blank lines are skipped. On a transport or UTF-8 error the stream
/// yields one `Err` and terminates.
pub fn ndjson_lines<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, StreamError>> + Send
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
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

            line_buf.push_str(chunk_str);

            while let Some(newline_pos) = line_buf.find('\n') {
                let line = line_buf[..newline_pos].trim_end_matches('\r').to_string();
                line_buf.drain(..=newline_pos);

                if line.trim().is_empty() {
                    continue;
                }
                yield Ok(line);
            }
        }

        // The stream may end without a trailing newline
        let remaining = line_buf.trim().to_string();
        if !remaining.is_empty() {
            yield Ok(remaining);
        }
    }
}

/// Adapt an NDJSON byte stream to the framed-event interface.
///
/// Each line becomes an unnamed [`SseEvent`] whose `data` is the raw
/// line, so the orchestrator consumes either wire format through one
/// seam.
pub fn ndjson_events<S, E>(
    byte_stream: S,
) -> impl Stream<Item = Result<SseEvent, StreamError>> + Send
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    ndjson_lines(byte_stream).map(|line| {
        line.map(|data| SseEvent { event: None, data })
    })
}
