//! Tool `search_docs`: Case-insensitive text search across bundled documents.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::registry::{ToolContext, ToolHandler};

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
    #[serde(default)]
    project: Option<String>,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_max_results() -> usize {
    10
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "search_docs".to_string(),
        description: Some("Search bundled Pubky documentation for a phrase".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Text to look for (case-insensitive)" },
                "project": { "type": "string", "description": "Restrict to one project root, e.g. core or pkarr" },
                "max_results": { "type": "integer", "minimum": 1, "default": 10 }
            },
            "required": ["query"]
        }),
    }
}

pub struct SearchDocs;

#[async_trait]
impl ToolHandler for SearchDocs {
    async fn execute(&self, args: Value, ctx: &ToolContext) -> McpResult<ToolCallResult> {
        let params: SearchParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let needle = params.query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(McpError::Validation("Query must not be empty".to_string()));
        }

        let mut matches = Vec::new();
        let mut unavailable = Vec::new();

        'docs: for doc in &ctx.docs {
            if params.project.as_deref().is_some_and(|p| p != doc.root) {
                continue;
            }

            let text = match ctx.content.read_to_string(&doc.root, &doc.path).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("Skipping {} during search: {e}", doc.uri);
                    unavailable.push(doc.uri.as_str());
                    continue;
                }
            };

            for (idx, line) in text.lines().enumerate() {
                if line.to_lowercase().contains(&needle) {
                    matches.push(json!({
                        "uri": doc.uri,
                        "line": idx + 1,
                        "text": line.trim(),
                    }));
                    if matches.len() >= params.max_results {
                        break 'docs;
                    }
                }
            }
        }

        Ok(ToolCallResult::json(&json!({
            "query": params.query,
            "total": matches.len(),
            "matches": matches,
            "unavailable": unavailable,
        })))
    }
}
