//! Capability provider seams and the process-wide registry bundle.
//!
//! The dispatcher only sees these traits, so tests can wire fake registries
//! without touching the bundled catalogs.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use pubky_content::{ContentResolver, RootReport};

use crate::prompts::PromptRegistry;
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;
use crate::types::{
    McpResult, PromptDefinition, PromptGetResult, ReadResourceResult, ResourceDefinition,
    ToolCallResult, ToolDefinition,
};

/// Addressable read-only content.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    fn list(&self) -> McpResult<Vec<ResourceDefinition>>;

    async fn read(&self, uri: &str) -> McpResult<ReadResourceResult>;
}

/// Named operations with declared input schemas.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    fn list(&self) -> McpResult<Vec<ToolDefinition>>;

    /// Failures are expected to come back as an error result, not as `Err`.
    async fn call(&self, name: &str, arguments: Value) -> McpResult<ToolCallResult>;
}

/// Named message templates.
#[async_trait]
pub trait PromptProvider: Send + Sync {
    fn list(&self) -> McpResult<Vec<PromptDefinition>>;

    async fn get(&self, name: &str, arguments: Map<String, Value>) -> McpResult<PromptGetResult>;
}

/// The three registries, built once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct Registries {
    pub resources: Arc<dyn ResourceProvider>,
    pub tools: Arc<dyn ToolProvider>,
    pub prompts: Arc<dyn PromptProvider>,
}

impl Registries {
    pub fn new(
        resources: Arc<dyn ResourceProvider>,
        tools: Arc<dyn ToolProvider>,
        prompts: Arc<dyn PromptProvider>,
    ) -> Self {
        Self {
            resources,
            tools,
            prompts,
        }
    }

    /// The bundled Pubky catalogs over one shared resolver.
    ///
    /// `report` is the startup verification of the resolver's roots.
    pub fn bundled(content: Arc<ContentResolver>, report: RootReport) -> Self {
        let resources = Arc::new(ResourceRegistry::bundled(content.clone()));
        let tools = Arc::new(ToolRegistry::bundled(
            content,
            resources.entries().to_vec(),
            report,
        ));
        let prompts = Arc::new(PromptRegistry::bundled());
        Self::new(resources, tools, prompts)
    }
}
