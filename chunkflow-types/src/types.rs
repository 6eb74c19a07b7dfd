//! Canonical types for the normalized chunk stream.
//!
//! These are the internal lingua franca — not provider wire types.
//! Provider adapters convert into these; the client consumes them.

use serde::{Deserialize, Serialize};

/// One framed event from a line-based text-event (SSE) stream.
///
/// Created by the event reader per event boundary, consumed
/// immediately by the orchestrator, not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SseEvent {
    /// Event name from `event:` lines. Absent when the stream never
    /// named this event.
    pub event: Option<String>,
    /// Payload joined from all `data:` lines of this event with `\n`.
    pub data: String,
}

/// Why a response stream ended.
///
/// Reasons the core does not model are passed through verbatim as
/// [`StopReason::Other`] rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StopReason {
    /// The model produced a final response.
    EndTurn,
    /// Hit the output token limit.
    MaxTokens,
    /// The model requested one or more tool invocations.
    ToolUseRequested,
    /// A provider-reported reason this core does not interpret.
    Other(String),
}

impl StopReason {
    /// The wire form of this reason.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EndTurn => "end_turn",
            Self::MaxTokens => "max_tokens",
            Self::ToolUseRequested => "tool_use_requested",
            Self::Other(reason) => reason,
        }
    }
}

impl From<String> for StopReason {
    fn from(s: String) -> Self {
        match s.as_str() {
            "end_turn" => Self::EndTurn,
            "max_tokens" => Self::MaxTokens,
            "tool_use_requested" => Self::ToolUseRequested,
            _ => Self::Other(s),
        }
    }
}

impl From<StopReason> for String {
    fn from(reason: StopReason) -> Self {
        reason.as_str().to_string()
    }
}

/// A typed, id-tagged structured event embedded in a chunk.
///
/// Every node carries a strictly increasing `id`, unique within one
/// response stream. Ids are never reused or reordered; a `ToolUse`
/// node's id is exactly one greater than its paired `ToolUseStart`
/// when both are emitted for the same call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseNode {
    /// A tool call has been announced; its arguments may still be
    /// streaming. Only emitted for providers that announce calls
    /// before the arguments finish.
    ToolUseStart {
        /// Node id.
        id: u64,
        /// Provider-assigned tool call identifier (may be empty).
        tool_use_id: String,
        /// Name of the requested tool.
        tool_name: String,
        /// The input JSON accumulated so far (may be partial).
        input_json_so_far: String,
        /// MCP server that owns the tool, when routed through MCP.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mcp_server_name: Option<String>,
        /// Tool name on the MCP server, when routed through MCP.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mcp_tool_name: Option<String>,
    },
    /// A finalized tool call with its complete input.
    ToolUse {
        /// Node id.
        id: u64,
        /// Provider-assigned tool call identifier (may be empty).
        tool_use_id: String,
        /// Name of the requested tool.
        tool_name: String,
        /// The complete input JSON for the call.
        input_json: String,
        /// MCP server that owns the tool, when routed through MCP.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mcp_server_name: Option<String>,
        /// Tool name on the MCP server, when routed through MCP.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mcp_tool_name: Option<String>,
    },
    /// Token usage reported by the provider for this turn.
    ///
    /// Counters are passed through verbatim, including `0`. `None`
    /// means the provider did not report that counter — never a
    /// placeholder zero.
    TokenUsage {
        /// Node id.
        id: u64,
        /// Input tokens consumed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input_tokens: Option<u64>,
        /// Output tokens generated.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output_tokens: Option<u64>,
        /// Tokens read from prompt cache, if supported.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cache_read_input_tokens: Option<u64>,
        /// Tokens written to prompt cache, if supported.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cache_creation_input_tokens: Option<u64>,
    },
    /// Marks the complete main text of a plain-text completion.
    MainTextFinished {
        /// Node id.
        id: u64,
        /// The full assembled response text.
        content: String,
    },
}

impl ResponseNode {
    /// The node's id within its response stream.
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::ToolUseStart { id, .. }
            | Self::ToolUse { id, .. }
            | Self::TokenUsage { id, .. }
            | Self::MainTextFinished { id, .. } => *id,
        }
    }
}

/// One unit of the canonical outbound stream.
///
/// Exactly one chunk per response carries a `stop_reason`; it is the
/// last chunk of the stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chunk {
    /// Incremental plain-text output (may be empty).
    #[serde(default)]
    pub text: String,
    /// Structured nodes carried by this chunk, in emission order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<ResponseNode>,
    /// Terminal stop reason; present only on the final chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

impl Chunk {
    /// A chunk carrying only incremental text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A chunk carrying a single structured node and no text.
    #[must_use]
    pub fn node(node: ResponseNode) -> Self {
        Self {
            nodes: vec![node],
            ..Self::default()
        }
    }

    /// Whether this chunk terminates the response stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.stop_reason.is_some()
    }
}
