#![doc = include_str!("../README.md")]

pub mod builder;
pub mod ndjson;
pub mod orchestrator;
pub mod sse;

pub use builder::{
    FinishDelta, ToolUseDelta, UsageDelta, build_final_chat_chunk, build_token_usage_chunk,
    build_tool_use_chunks,
};
pub use ndjson::{ndjson_events, ndjson_lines};
pub use orchestrator::{DeltaExtractor, StreamDelta, normalize};
pub use sse::sse_events;

// Re-export the canonical types for convenience
pub use chunkflow_types::{Chunk, ResponseNode, SseEvent, StopReason, StreamError};
