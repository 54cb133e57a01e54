//! Tool `list_projects`: Bundled projects and whether their content is available.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::registry::{ToolContext, ToolHandler};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_projects".to_string(),
        description: Some(
            "List the bundled Pubky projects, whether their docs are available, and how many resources each exposes"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub struct ListProjects;

#[async_trait]
impl ToolHandler for ListProjects {
    async fn execute(&self, _args: Value, ctx: &ToolContext) -> McpResult<ToolCallResult> {
        let report = &ctx.report;

        let projects: Vec<Value> = report
            .roots
            .iter()
            .map(|root| {
                let resources: Vec<&str> = ctx
                    .docs
                    .iter()
                    .filter(|d| d.root == root.name)
                    .map(|d| d.uri.as_str())
                    .collect();
                json!({
                    "name": root.name,
                    "available": root.readable,
                    "resource_count": resources.len(),
                    "resources": resources,
                })
            })
            .collect();

        Ok(ToolCallResult::json(&json!({
            "total": projects.len(),
            "all_available": report.all_readable(),
            "projects": projects,
        })))
    }
}
