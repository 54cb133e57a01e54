//! Resource registration and reads.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;

use pubky_content::{is_textual, Content, ContentResolver};

use crate::registry::ResourceProvider;
use crate::types::{McpError, McpResult, ReadResourceResult, ResourceContent, ResourceDefinition};

use super::catalog::{bundled_entries, ResourceEntry};

/// Static resource catalog backed by a content resolver.
///
/// Listing never touches the disk; reads go through the resolver by uri.
pub struct ResourceRegistry {
    entries: Vec<ResourceEntry>,
    content: Arc<ContentResolver>,
}

impl ResourceRegistry {
    /// Build a registry over an explicit catalog. Later duplicate uris are dropped.
    pub fn new(content: Arc<ContentResolver>, entries: Vec<ResourceEntry>) -> Self {
        let mut unique: Vec<ResourceEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.uri == entry.uri) {
                tracing::warn!("Duplicate resource uri '{}' ignored", entry.uri);
                continue;
            }
            unique.push(entry);
        }
        Self {
            entries: unique,
            content,
        }
    }

    pub fn bundled(content: Arc<ContentResolver>) -> Self {
        Self::new(content, bundled_entries())
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn find(&self, uri: &str) -> Option<&ResourceEntry> {
        self.entries.iter().find(|e| e.uri == uri)
    }

    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        self.entries.iter().map(ResourceEntry::definition).collect()
    }

    pub async fn read_resource(&self, uri: &str) -> McpResult<ReadResourceResult> {
        let entry = self
            .find(uri)
            .ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;

        let content = self.content.read(&entry.root, &entry.path).await?;

        let (text, blob) = match content {
            Content::Text(text) if is_textual(&entry.mime_type) => (Some(text), None),
            Content::Text(text) => (
                None,
                Some(base64::engine::general_purpose::STANDARD.encode(text.as_bytes())),
            ),
            Content::Binary(bytes) => (
                None,
                Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
            ),
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: entry.uri.clone(),
                mime_type: Some(entry.mime_type.clone()),
                text,
                blob,
            }],
        })
    }
}

#[async_trait]
impl ResourceProvider for ResourceRegistry {
    fn list(&self) -> McpResult<Vec<ResourceDefinition>> {
        Ok(self.list_resources())
    }

    async fn read(&self, uri: &str) -> McpResult<ReadResourceResult> {
        self.read_resource(uri).await
    }
}
