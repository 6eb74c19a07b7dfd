//! Node allocator and chunk builders.
//!
//! All builders are pure: the node-id counter is passed in and the
//! advanced counter is returned, so concurrent responses share
//! nothing. The counter convention is "last allocated id" — `0`
//! before any node, first node gets id `1`. Ids are strictly
//! increasing and contiguous within one response.

use chunkflow_types::{Chunk, ResponseNode, StopReason};

/// A finalized tool call extracted from the provider stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolUseDelta {
    /// Provider-assigned tool call identifier (may be empty).
    pub tool_use_id: String,
    /// Name of the requested tool.
    pub tool_name: String,
    /// The complete input JSON accumulated by the adapter.
    pub input_json: String,
    /// MCP server that owns the tool, when routed through MCP.
    pub mcp_server_name: Option<String>,
    /// Tool name on the MCP server, when routed through MCP.
    pub mcp_tool_name: Option<String>,
}

/// Token counters reported by the provider for one turn.
///
/// `None` means "not reported" — distinct from a reported `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageDelta {
    /// Input tokens consumed.
    pub input_tokens: Option<u64>,
    /// Output tokens generated.
    pub output_tokens: Option<u64>,
    /// Tokens read from prompt cache.
    pub cache_read_input_tokens: Option<u64>,
    /// Tokens written to prompt cache.
    pub cache_creation_input_tokens: Option<u64>,
}

/// Completion signals gathered over one response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinishDelta {
    /// All plain text streamed for this response, concatenated.
    pub full_text: String,
    /// Explicit provider-reported stop reason, if one was seen.
    pub stop_reason: Option<StopReason>,
    /// Whether any tool call was emitted for this response.
    pub saw_tool_use: bool,
}

/// Build the chunk(s) for one finalized tool call.
///
/// When `support_tool_use_start` is true a `ToolUseStart` chunk is
/// emitted first (id `n+1`), letting the client render a "tool call
/// starting" placeholder for providers that announce calls before the
/// arguments finish streaming. The finalized `ToolUse` chunk always
/// follows with the next id, so the pair is correlated by emission
/// order and adjacent ids.
///
/// Returns the advanced counter and 1 or 2 chunks in emission order.
#[must_use]
pub fn build_tool_use_chunks(
    node_id: u64,
    delta: ToolUseDelta,
    support_tool_use_start: bool,
) -> (u64, Vec<Chunk>) {
    let mut next = node_id;
    let mut chunks = Vec::with_capacity(2);

    if support_tool_use_start {
        next += 1;
        chunks.push(Chunk::node(ResponseNode::ToolUseStart {
            id: next,
            tool_use_id: delta.tool_use_id.clone(),
            tool_name: delta.tool_name.clone(),
            input_json_so_far: delta.input_json.clone(),
            mcp_server_name: delta.mcp_server_name.clone(),
            mcp_tool_name: delta.mcp_tool_name.clone(),
        }));
    }

    next += 1;
    chunks.push(Chunk::node(ResponseNode::ToolUse {
        id: next,
        tool_use_id: delta.tool_use_id,
        tool_name: delta.tool_name,
        input_json: delta.input_json,
        mcp_server_name: delta.mcp_server_name,
        mcp_tool_name: delta.mcp_tool_name,
    }));

    (next, chunks)
}

/// Build a token-usage chunk, or nothing when no usage was reported.
///
/// Usage reporting is optional per provider/turn: when both required
/// counters are `None` the counter is returned unchanged and no chunk
/// is fabricated. Reported values pass through verbatim, including
/// `0`.
#[must_use]
pub fn build_token_usage_chunk(node_id: u64, usage: UsageDelta) -> (u64, Option<Chunk>) {
    if usage.input_tokens.is_none() && usage.output_tokens.is_none() {
        return (node_id, None);
    }

    let next = node_id + 1;
    let chunk = Chunk::node(ResponseNode::TokenUsage {
        id: next,
        input_tokens: usage.input_tokens,
        output_tokens: usage.output_tokens,
        cache_read_input_tokens: usage.cache_read_input_tokens,
        cache_creation_input_tokens: usage.cache_creation_input_tokens,
    });
    (next, Some(chunk))
}

/// Build the single terminal chunk for a response.
///
/// Stop reason priority: an explicit provider-reported reason wins
/// verbatim; otherwise `ToolUseRequested` when a tool call was seen;
/// otherwise `EndTurn`.
///
/// A tool-use completion is already fully represented by the tool-use
/// node chunks, so no node is emitted and the counter is unchanged.
/// A plain-text completion gets one `MainTextFinished` node (id
/// `n+1`) carrying the full assembled text.
///
/// Precondition: called exactly once per response; the caller must not
/// invoke any builder for that response afterward.
#[must_use]
pub fn build_final_chat_chunk(node_id: u64, fin: FinishDelta) -> (u64, Chunk) {
    let stop_reason = match fin.stop_reason {
        Some(reason) => reason,
        None if fin.saw_tool_use => StopReason::ToolUseRequested,
        None => StopReason::EndTurn,
    };

    if fin.saw_tool_use {
        let chunk = Chunk {
            stop_reason: Some(stop_reason),
            ..Chunk::default()
        };
        return (node_id, chunk);
    }

    let next = node_id + 1;
    let chunk = Chunk {
        text: String::new(),
        nodes: vec![ResponseNode::MainTextFinished {
            id: next,
            content: fin.full_text,
        }],
        stop_reason: Some(stop_reason),
    };
    (next, chunk)
}
