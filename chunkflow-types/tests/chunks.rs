//! Serde shape tests for the canonical chunk types.

use chunkflow_types::*;
use serde_json::json;

#[test]
fn tool_use_node_tagged_shape() {
    let node = ResponseNode::ToolUse {
        id: 2,
        tool_use_id: "toolu_01".into(),
        tool_name: "search".into(),
        input_json: r#"{"q":"rust"}"#.into(),
        mcp_server_name: None,
        mcp_tool_name: None,
    };
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["type"], "tool_use");
    assert_eq!(value["id"], 2);
    assert_eq!(value["tool_name"], "search");
    // Absent MCP routing must not serialize as null fields
    assert!(value.get("mcp_server_name").is_none());

    let back: ResponseNode = serde_json::from_value(value).unwrap();
    assert_eq!(back, node);
}

#[test]
fn tool_use_start_carries_partial_input() {
    let node = ResponseNode::ToolUseStart {
        id: 1,
        tool_use_id: String::new(),
        tool_name: "bash".into(),
        input_json_so_far: r#"{"comm"#.into(),
        mcp_server_name: Some("files".into()),
        mcp_tool_name: Some("read".into()),
    };
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["type"], "tool_use_start");
    assert_eq!(value["input_json_so_far"], r#"{"comm"#);
    assert_eq!(value["mcp_server_name"], "files");

    let back: ResponseNode = serde_json::from_value(value).unwrap();
    assert_eq!(back, node);
}

#[test]
fn token_usage_omits_unreported_counters() {
    let node = ResponseNode::TokenUsage {
        id: 3,
        input_tokens: Some(0),
        output_tokens: Some(42),
        cache_read_input_tokens: None,
        cache_creation_input_tokens: None,
    };
    let value = serde_json::to_value(&node).unwrap();
    // Zero is a real reported value and must survive
    assert_eq!(value["input_tokens"], 0);
    assert_eq!(value["output_tokens"], 42);
    assert!(value.get("cache_read_input_tokens").is_none());
}

#[test]
fn stop_reason_serializes_as_plain_string() {
    assert_eq!(
        serde_json::to_value(StopReason::EndTurn).unwrap(),
        json!("end_turn")
    );
    assert_eq!(
        serde_json::to_value(StopReason::Other("refusal".into())).unwrap(),
        json!("refusal")
    );

    let back: StopReason = serde_json::from_value(json!("refusal")).unwrap();
    assert_eq!(back, StopReason::Other("refusal".into()));
}

#[test]
fn chunk_omits_empty_nodes_and_absent_stop() {
    let chunk = Chunk::text("hello");
    let value = serde_json::to_value(&chunk).unwrap();
    assert_eq!(value, json!({"text": "hello"}));

    let terminal = Chunk {
        text: String::new(),
        nodes: vec![],
        stop_reason: Some(StopReason::MaxTokens),
    };
    let value = serde_json::to_value(&terminal).unwrap();
    assert_eq!(value["stop_reason"], "max_tokens");
}

#[test]
fn chunk_roundtrip_with_nodes() {
    let chunk = Chunk {
        text: String::new(),
        nodes: vec![ResponseNode::MainTextFinished {
            id: 1,
            content: "final".into(),
        }],
        stop_reason: Some(StopReason::EndTurn),
    };
    let value = serde_json::to_value(&chunk).unwrap();
    let back: Chunk = serde_json::from_value(value).unwrap();
    assert_eq!(back, chunk);
    assert!(back.is_terminal());
}
