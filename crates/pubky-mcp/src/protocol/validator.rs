//! JSON-RPC message validation and tool argument checks.

use serde_json::Value;

use crate::types::{JsonRpcRequest, McpError, McpResult, JSONRPC_VERSION};

/// Validate that a JSON-RPC request is well-formed.
pub fn validate_request(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(McpError::InvalidRequest(
            "Method name must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Check tool arguments against the subset of JSON Schema our tools declare:
/// object type, `required`, per-property `type`, `enum` and `minimum`.
pub fn validate_arguments(schema: &Value, args: &Value) -> McpResult<()> {
    let Some(object) = args.as_object() else {
        return Err(McpError::Validation(
            "Arguments must be a JSON object".to_string(),
        ));
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            match object.get(name) {
                None | Some(Value::Null) => {
                    return Err(McpError::Validation(format!(
                        "Missing required argument '{name}'"
                    )));
                }
                Some(_) => {}
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (name, value) in object {
        // Undeclared arguments are tolerated; tools ignore what they do not read.
        let Some(spec) = properties.get(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        if let Some(expected) = spec.get("type").and_then(Value::as_str) {
            if !matches_type(expected, value) {
                return Err(McpError::Validation(format!(
                    "Argument '{name}' must be of type {expected}"
                )));
            }
        }

        if let Some(allowed) = spec.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                let options: Vec<String> = allowed.iter().map(Value::to_string).collect();
                return Err(McpError::Validation(format!(
                    "Argument '{name}' must be one of: {}",
                    options.join(", ")
                )));
            }
        }

        if let (Some(minimum), Some(actual)) =
            (spec.get("minimum").and_then(Value::as_f64), value.as_f64())
        {
            if actual < minimum {
                return Err(McpError::Validation(format!(
                    "Argument '{name}' must be >= {minimum}"
                )));
            }
        }
    }

    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    }
}
