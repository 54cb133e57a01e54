//! Tool `validate_homeserver_path`: Lint a path before writing it to a homeserver.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::registry::{ToolContext, ToolHandler};

/// Public, user-writable prefix on every homeserver.
const PUBLIC_PREFIX: &str = "/pub/";

#[derive(Debug, Deserialize)]
struct PathParams {
    path: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "validate_homeserver_path".to_string(),
        description: Some(
            "Check that a homeserver path is writable and follows the /pub/<app>/... convention"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "e.g. /pub/pubky.app/posts/0033SSE3B1FQ0" }
            },
            "required": ["path"]
        }),
    }
}

pub struct ValidateHomeserverPath;

#[async_trait]
impl ToolHandler for ValidateHomeserverPath {
    async fn execute(&self, args: Value, _ctx: &ToolContext) -> McpResult<ToolCallResult> {
        let params: PathParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let (errors, warnings) = lint(&params.path);

        Ok(ToolCallResult::json(&json!({
            "path": params.path,
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
        })))
    }
}

fn lint(path: &str) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !path.starts_with(PUBLIC_PREFIX) {
        errors.push(format!("path must start with {PUBLIC_PREFIX}"));
    }
    if path.contains("//") {
        errors.push("path must not contain empty segments".to_string());
    }
    if path.split('/').any(|s| s == ".." || s == ".") {
        errors.push("path must not contain . or .. segments".to_string());
    }
    if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        errors.push("path must not contain whitespace or control characters".to_string());
    }

    let app = path
        .strip_prefix(PUBLIC_PREFIX)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or("");
    if errors.is_empty() && app.is_empty() {
        warnings.push("no application namespace, expected /pub/<app>/...".to_string());
    } else if !app.is_empty() && !app.contains('.') {
        warnings.push(format!(
            "application namespace '{app}' is not domain-like, e.g. pubky.app"
        ));
    }
    if path.ends_with('/') {
        warnings.push("trailing slash addresses a directory, not a file".to_string());
    }

    (errors, warnings)
}
