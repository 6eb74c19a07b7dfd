//! Stream orchestrator: drives framed events through a per-provider
//! adapter and emits the canonical chunk stream.
//!
//! The orchestrator owns the node-id counter and the completion flags
//! for the lifetime of exactly one response. State is never shared
//! across responses; each call to [`normalize`] builds an independent
//! pipeline.

use chunkflow_types::{Chunk, SseEvent, StopReason, StreamError};
use futures::{Stream, StreamExt};

use crate::builder::{
    FinishDelta, ToolUseDelta, UsageDelta, build_final_chat_chunk, build_token_usage_chunk,
    build_tool_use_chunks,
};

/// A provider-independent semantic delta extracted from one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamDelta {
    /// Incremental plain-text output.
    Text(String),
    /// A finalized tool call.
    ToolUse(ToolUseDelta),
    /// Token usage reported for this turn.
    Usage(UsageDelta),
    /// Provider-reported stop reason.
    Stop(StopReason),
}

/// Per-provider field extraction seam.
///
/// Implementations decide which semantic deltas each provider event
/// maps to; no provider wire shape leaks past this trait. Extractors
/// may hold per-response state (e.g. buffering partial tool-call
/// input across events) — `extract` takes `&mut self` for that.
pub trait DeltaExtractor {
    /// Whether this provider announces tool calls before their
    /// arguments finish streaming. Governs emission of
    /// `ToolUseStart` nodes.
    fn supports_tool_use_start(&self) -> bool;

    /// Extract zero or more semantic deltas from one framed event.
    ///
    /// Returning an empty vec skips the event (keep-alives, unknown
    /// event types). Returning `Err` aborts the pipeline.
    fn extract(&mut self, event: &SseEvent) -> Result<Vec<StreamDelta>, StreamError>;
}

/// Normalize a framed event stream into the canonical chunk stream.
///
/// Drives the event stream to completion, threading the node-id
/// counter and completion flags through the chunk builders. On clean
/// stream end exactly one terminal chunk bearing a stop reason is
/// yielded. On a transport or extraction error the error is yielded
/// and the pipeline stops without a terminal chunk. Cancellation is
/// dropping the returned stream; no further bytes are pulled.
pub fn normalize<S, X>(
    events: S,
    mut extractor: X,
) -> impl Stream<Item = Result<Chunk, StreamError>> + Send
where
    S: Stream<Item = Result<SseEvent, StreamError>> + Send + 'static,
    X: DeltaExtractor + Send + 'static,
{
    async_stream::stream! {
        let mut events = std::pin::pin!(events);
        let mut node_id: u64 = 0;
        let mut saw_tool_use = false;
        let mut stop_reason: Option<StopReason> = None;
        let mut full_text = String::new();

        while let Some(event_result) = events.next().await {
            let event = match event_result {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let deltas = match extractor.extract(&event) {
                Ok(deltas) => deltas,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            if deltas.is_empty() {
                tracing::debug!(
                    event = event.event.as_deref().unwrap_or(""),
                    "skipping event with no deltas"
                );
                continue;
            }

            for delta in deltas {
                match delta {
                    StreamDelta::Text(text) => {
                        full_text.push_str(&text);
                        yield Ok(Chunk::text(text));
                    }
                    StreamDelta::ToolUse(tool) => {
                        saw_tool_use = true;
                        let (next, chunks) = build_tool_use_chunks(
                            node_id,
                            tool,
                            extractor.supports_tool_use_start(),
                        );
                        node_id = next;
                        for chunk in chunks {
                            yield Ok(chunk);
                        }
                    }
                    StreamDelta::Usage(usage) => {
                        let (next, chunk) = build_token_usage_chunk(node_id, usage);
                        node_id = next;
                        if let Some(chunk) = chunk {
                            yield Ok(chunk);
                        }
                    }
                    StreamDelta::Stop(reason) => {
                        // First explicit reason wins
                        if stop_reason.is_none() {
                            stop_reason = Some(reason);
                        }
                    }
                }
            }
        }

        tracing::debug!(last_node_id = node_id, saw_tool_use, "finalizing response stream");
        let (_, terminal) = build_final_chat_chunk(
            node_id,
            FinishDelta {
                full_text,
                stop_reason,
                saw_tool_use,
            },
        );
        yield Ok(terminal);
    }
}
