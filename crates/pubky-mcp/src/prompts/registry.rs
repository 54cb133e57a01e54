//! Prompt registration and rendering.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::registry::PromptProvider;
use crate::types::{McpError, McpResult, PromptDefinition, PromptGetResult};

use super::template::PromptTemplate;
use super::{build_app, debug_issue, design_data_model, explain_concept};

pub struct PromptRegistry {
    templates: Vec<PromptTemplate>,
}

impl PromptRegistry {
    pub fn new(templates: Vec<PromptTemplate>) -> Self {
        Self { templates }
    }

    pub fn bundled() -> Self {
        Self::new(vec![
            explain_concept::template(),
            build_app::template(),
            debug_issue::template(),
            design_data_model::template(),
        ])
    }

    pub fn list_prompts(&self) -> Vec<PromptDefinition> {
        self.templates.iter().map(PromptTemplate::definition).collect()
    }

    pub fn get_prompt(&self, name: &str, args: &Map<String, Value>) -> McpResult<PromptGetResult> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| McpError::PromptNotFound(name.to_string()))?
            .render(args)
    }
}

#[async_trait]
impl PromptProvider for PromptRegistry {
    fn list(&self) -> McpResult<Vec<PromptDefinition>> {
        Ok(self.list_prompts())
    }

    async fn get(&self, name: &str, arguments: Map<String, Value>) -> McpResult<PromptGetResult> {
        self.get_prompt(name, &arguments)
    }
}
