//! Tool `read_doc_file`: Read a line range from any file inside a project root.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::registry::{ToolContext, ToolHandler};

#[derive(Debug, Deserialize)]
struct ReadParams {
    project: String,
    path: String,
    #[serde(default = "default_start_line")]
    start_line: usize,
    #[serde(default = "default_max_lines")]
    max_lines: usize,
}

fn default_start_line() -> usize {
    1
}

fn default_max_lines() -> usize {
    200
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "read_doc_file".to_string(),
        description: Some(
            "Read a slice of a file from a bundled project (paths are relative to the project root)"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "project": { "type": "string", "description": "Project root name, e.g. core" },
                "path": { "type": "string", "description": "File path relative to the project root" },
                "start_line": { "type": "integer", "minimum": 1, "default": 1 },
                "max_lines": { "type": "integer", "minimum": 1, "default": 200 }
            },
            "required": ["project", "path"]
        }),
    }
}

pub struct ReadDocFile;

#[async_trait]
impl ToolHandler for ReadDocFile {
    async fn execute(&self, args: Value, ctx: &ToolContext) -> McpResult<ToolCallResult> {
        let params: ReadParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let text = ctx
            .content
            .read_to_string(&params.project, &params.path)
            .await?;

        let total_lines = text.lines().count();
        let start = params.start_line.max(1);
        if total_lines == 0 {
            return Ok(ToolCallResult::text(format!(
                "{}/{} (empty file)",
                params.project, params.path
            )));
        }
        if start > total_lines {
            return Err(McpError::Validation(format!(
                "start_line {start} is beyond end of file ({total_lines} lines)"
            )));
        }
        let slice: Vec<&str> = text
            .lines()
            .skip(start - 1)
            .take(params.max_lines)
            .collect();
        let end = start + slice.len().saturating_sub(1);

        let header = format!(
            "{}/{} (lines {start}-{end} of {total_lines})",
            params.project, params.path
        );
        Ok(ToolCallResult::text(format!("{header}\n\n{}", slice.join("\n"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pubky_content::{ContentResolver, ContentRoot, RootReport};

    use crate::types::ToolContent;

    fn context(dir: &tempfile::TempDir) -> ToolContext {
        let core = dir.path().join("core");
        std::fs::create_dir_all(&core).unwrap();
        std::fs::write(core.join("README.md"), "one\ntwo\nthree\n").unwrap();
        std::fs::write(core.join("EMPTY.md"), "").unwrap();
        ToolContext {
            content: Arc::new(ContentResolver::new([ContentRoot::new("core", core)])),
            docs: Vec::new(),
            report: RootReport::default(),
        }
    }

    fn text(result: &ToolCallResult) -> &str {
        match &result.content[0] {
            ToolContent::Text { text } => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reads_line_range() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReadDocFile
            .execute(
                json!({ "project": "core", "path": "README.md", "start_line": 2, "max_lines": 5 }),
                &context(&dir),
            )
            .await
            .unwrap();
        assert_eq!(text(&result), "core/README.md (lines 2-3 of 3)\n\ntwo\nthree");
    }

    #[tokio::test]
    async fn test_start_past_end_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReadDocFile
            .execute(
                json!({ "project": "core", "path": "README.md", "start_line": 10 }),
                &context(&dir),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::Validation(_)));
        assert!(err.to_string().contains("beyond end of file (3 lines)"));
    }

    #[tokio::test]
    async fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReadDocFile
            .execute(json!({ "project": "core", "path": "EMPTY.md" }), &context(&dir))
            .await
            .unwrap();
        assert_eq!(text(&result), "core/EMPTY.md (empty file)");
    }
}
