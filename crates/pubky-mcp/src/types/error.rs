//! Error types and JSON-RPC error codes for the MCP server.

use pubky_content::ContentError;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// MCP-specific error codes.
pub mod mcp_error_codes {
    pub const RESOURCE_NOT_FOUND: i32 = -32802;
    pub const PROMPT_NOT_FOUND: i32 = -32804;
}

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    /// Tool or prompt arguments rejected before the handler ran.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A tool handler failed while running.
    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to read resource: {0}")]
    ReadResource(Box<McpError>),

    #[error("Failed to get prompt: {0}")]
    GetPrompt(Box<McpError>),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) | McpError::Validation(_) => INVALID_PARAMS,
            McpError::InternalError(_) | McpError::ToolExecution(_) => INTERNAL_ERROR,
            McpError::ResourceNotFound(_) => RESOURCE_NOT_FOUND,
            McpError::PromptNotFound(_) => PROMPT_NOT_FOUND,
            McpError::Content(e) if e.is_not_found() => RESOURCE_NOT_FOUND,
            McpError::Content(ContentError::OutsideRoot { .. }) => INVALID_PARAMS,
            McpError::Content(_) => INTERNAL_ERROR,
            McpError::ReadResource(inner) | McpError::GetPrompt(inner) => inner.code(),
            McpError::Transport(_) | McpError::Io(_) => INTERNAL_ERROR,
            McpError::Json(_) => PARSE_ERROR,
        }
    }

    /// Whether the failure means the addressed item does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code(),
            mcp_error_codes::RESOURCE_NOT_FOUND
                | mcp_error_codes::PROMPT_NOT_FOUND
                | error_codes::METHOD_NOT_FOUND
        )
    }

    pub fn to_error_object(&self) -> JsonRpcErrorObject {
        JsonRpcErrorObject {
            code: self.code(),
            message: self.to_string(),
            data: None,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: self.to_error_object(),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;
