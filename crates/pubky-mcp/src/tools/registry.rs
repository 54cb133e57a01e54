//! Tool registration and dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use pubky_content::{ContentResolver, RootReport};

use crate::protocol::validator::validate_arguments;
use crate::registry::ToolProvider;
use crate::resources::ResourceEntry;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::{
    generate_code_example, list_projects, read_doc_file, search_docs, validate_homeserver_path,
    validate_public_key,
};

/// Read-only collaborators a tool handler may consult.
pub struct ToolContext {
    pub content: Arc<ContentResolver>,
    pub docs: Vec<ResourceEntry>,
    /// Root availability as verified once at startup.
    pub report: RootReport,
}

/// A tool implementation. Handlers must not keep state between invocations.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn execute(&self, args: Value, ctx: &ToolContext) -> McpResult<ToolCallResult>;
}

/// A registered tool: its public descriptor plus the handler behind it.
pub struct Tool {
    pub definition: ToolDefinition,
    pub handler: Arc<dyn ToolHandler>,
}

impl Tool {
    pub fn new(definition: ToolDefinition, handler: impl ToolHandler + 'static) -> Self {
        Self {
            definition,
            handler: Arc::new(handler),
        }
    }
}

pub struct ToolRegistry {
    tools: Vec<Tool>,
    ctx: ToolContext,
}

impl ToolRegistry {
    pub fn new(ctx: ToolContext, tools: Vec<Tool>) -> Self {
        Self { tools, ctx }
    }

    pub fn bundled(
        content: Arc<ContentResolver>,
        docs: Vec<ResourceEntry>,
        report: RootReport,
    ) -> Self {
        Self::new(
            ToolContext {
                content,
                docs,
                report,
            },
            vec![
                Tool::new(list_projects::definition(), list_projects::ListProjects),
                Tool::new(search_docs::definition(), search_docs::SearchDocs),
                Tool::new(read_doc_file::definition(), read_doc_file::ReadDocFile),
                Tool::new(
                    generate_code_example::definition(),
                    generate_code_example::GenerateCodeExample,
                ),
                Tool::new(
                    validate_public_key::definition(),
                    validate_public_key::ValidatePublicKey,
                ),
                Tool::new(
                    validate_homeserver_path::definition(),
                    validate_homeserver_path::ValidateHomeserverPath,
                ),
            ],
        )
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition.clone()).collect()
    }

    /// Run a tool. Every failure mode comes back as an error result, never as `Err`.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let Some(tool) = self.tools.iter().find(|t| t.definition.name == name) else {
            tracing::warn!("Unknown tool requested: {name}");
            return ToolCallResult::error(format!("Unknown tool: {name}"));
        };

        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));
        if let Err(e) = validate_arguments(&tool.definition.input_schema, &args) {
            tracing::debug!("Rejected arguments for {name}: {e}");
            return ToolCallResult::error(e.to_string());
        }

        match tool.handler.execute(args, &self.ctx).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Tool {name} failed: {e}");
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

#[async_trait]
impl ToolProvider for ToolRegistry {
    fn list(&self) -> McpResult<Vec<ToolDefinition>> {
        Ok(self.list_tools())
    }

    async fn call(&self, name: &str, arguments: Value) -> McpResult<ToolCallResult> {
        Ok(self.call_tool(name, Some(arguments)).await)
    }
}
