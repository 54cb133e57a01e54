//! Message framing for newline-delimited JSON.

use serde_json::Value;

use crate::types::{JsonRpcMessage, McpError, McpResult};

/// Parse a single line of text as a JSON-RPC message.
pub fn parse_message(line: &str) -> McpResult<JsonRpcMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(McpError::ParseError("Empty message".to_string()));
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| McpError::ParseError(e.to_string()))?;
    decode_message(value)
}

/// Classify well-formed JSON as a JSON-RPC message.
///
/// Anything carrying an `id` is a request or a response; a bad `id` is an
/// invalid request, never a notification.
pub fn decode_message(value: Value) -> McpResult<JsonRpcMessage> {
    let Some(object) = value.as_object() else {
        return Err(McpError::InvalidRequest(
            "Message must be a JSON object".to_string(),
        ));
    };

    let invalid = |e: serde_json::Error| McpError::InvalidRequest(e.to_string());
    match (object.contains_key("method"), object.contains_key("id")) {
        (true, true) => serde_json::from_value(value)
            .map(JsonRpcMessage::Request)
            .map_err(invalid),
        (true, false) => serde_json::from_value(value)
            .map(JsonRpcMessage::Notification)
            .map_err(invalid),
        (false, _) => serde_json::from_value(value).map_err(invalid),
    }
}

/// Serialize a value to a JSON line (with trailing newline).
pub fn frame_message(value: &serde_json::Value) -> McpResult<String> {
    let mut json = serde_json::to_string(value).map_err(McpError::Json)?;
    json.push('\n');
    Ok(json)
}
