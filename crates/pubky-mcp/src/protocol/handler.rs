//! Main request dispatcher: receives JSON-RPC messages, routes to registries.
//!
//! Capability methods follow three propagation rules:
//! - `*/list` never fails: internal errors are logged and an empty list is returned.
//! - `resources/read` and `prompts/get` fail with a JSON-RPC error.
//! - `tools/call` always succeeds; failures travel as error content.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::registry::Registries;
use crate::types::*;

use super::negotiation::negotiate;
use super::validator::validate_request;

/// The six capability methods.
pub mod methods {
    pub const RESOURCES_LIST: &str = "resources/list";
    pub const RESOURCES_READ: &str = "resources/read";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
    pub const PROMPTS_LIST: &str = "prompts/list";
    pub const PROMPTS_GET: &str = "prompts/get";
}

/// The protocol handler that dispatches incoming JSON-RPC messages.
///
/// Registries are wired at construction, so a handler is serving from the
/// moment it exists. It holds no mutable state and is shared by `Arc`.
pub struct ProtocolHandler {
    registries: Registries,
}

impl ProtocolHandler {
    pub fn new(registries: Registries) -> Self {
        Self { registries }
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(req) => Some(self.handle_request(req).await.to_value()),
            JsonRpcMessage::Notification(notif) => {
                self.handle_notification(notif);
                None
            }
            _ => {
                tracing::warn!("Received unexpected message type from client");
                None
            }
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcReply {
        if let Err(e) = validate_request(&request) {
            return JsonRpcReply::Failure(e.to_json_rpc_error(request.id));
        }

        let id = request.id.clone();
        match self.dispatch_request(&request).await {
            Ok(value) => JsonRpcReply::Success(JsonRpcResponse::new(id, value)),
            Err(e) => {
                tracing::error!("{} failed: {e}", request.method);
                JsonRpcReply::Failure(e.to_json_rpc_error(id))
            }
        }
    }

    async fn dispatch_request(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        let params = request.params.clone();
        match request.method.as_str() {
            "initialize" => self.handle_initialize(params),
            "ping" => Ok(Value::Object(Map::new())),

            methods::RESOURCES_LIST => Ok(self.handle_resources_list()),
            methods::RESOURCES_READ => self.handle_resources_read(params).await,
            methods::TOOLS_LIST => Ok(self.handle_tools_list()),
            methods::TOOLS_CALL => Ok(self.handle_tools_call(params).await),
            methods::PROMPTS_LIST => Ok(self.handle_prompts_list()),
            methods::PROMPTS_GET => self.handle_prompts_get(params).await,

            _ => Err(McpError::MethodNotFound(request.method.clone())),
        }
    }

    fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" | "initialized" => {
                tracing::info!("MCP handshake complete");
            }
            "notifications/cancelled" | "$/cancelRequest" => {
                // Reads and tool calls always run to completion.
                match notification
                    .params
                    .map(serde_json::from_value::<CancelRequestParams>)
                {
                    Some(Ok(cancel)) => tracing::info!(
                        "Client cancelled request {} ({}); it runs to completion",
                        cancel.request_id,
                        cancel.reason.as_deref().unwrap_or("no reason given")
                    ),
                    _ => tracing::info!("Received cancellation notification"),
                }
            }
            _ => {
                tracing::debug!("Unknown notification: {}", notification.method);
            }
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        let init_params: InitializeParams = parse_params(params, "Initialize")?;
        serde_json::to_value(negotiate(&init_params))
            .map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_resources_list(&self) -> Value {
        let resources = self.registries.resources.list().unwrap_or_else(|e| {
            tracing::error!("Error listing resources: {e}");
            Vec::new()
        });
        list_value(
            &ResourceListResult {
                resources,
                next_cursor: None,
            },
            "resources",
        )
    }

    async fn handle_resources_read(&self, params: Option<Value>) -> McpResult<Value> {
        self.read_resource(params)
            .await
            .map_err(|e| McpError::ReadResource(Box::new(e)))
    }

    async fn read_resource(&self, params: Option<Value>) -> McpResult<Value> {
        let read_params: ResourceReadParams = parse_params(params, "Resource read")?;
        let result = self.registries.resources.read(&read_params.uri).await?;
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_list(&self) -> Value {
        let tools = self.registries.tools.list().unwrap_or_else(|e| {
            tracing::error!("Error listing tools: {e}");
            Vec::new()
        });
        list_value(
            &ToolListResult {
                tools,
                next_cursor: None,
            },
            "tools",
        )
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Value {
        let result = match parse_params::<ToolCallParams>(params, "Tool call") {
            Ok(call) => {
                let args = call.arguments.unwrap_or(Value::Object(Map::new()));
                self.registries
                    .tools
                    .call(&call.name, args)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::error!("Error executing tool {}: {e}", call.name);
                        ToolCallResult::error(e.to_string())
                    })
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        };

        serde_json::to_value(&result).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize tool result: {e}");
            serde_json::to_value(ToolCallResult::error("Internal error".to_string()))
                .unwrap_or_default()
        })
    }

    fn handle_prompts_list(&self) -> Value {
        let prompts = self.registries.prompts.list().unwrap_or_else(|e| {
            tracing::error!("Error listing prompts: {e}");
            Vec::new()
        });
        list_value(
            &PromptListResult {
                prompts,
                next_cursor: None,
            },
            "prompts",
        )
    }

    async fn handle_prompts_get(&self, params: Option<Value>) -> McpResult<Value> {
        self.get_prompt(params)
            .await
            .map_err(|e| McpError::GetPrompt(Box::new(e)))
    }

    async fn get_prompt(&self, params: Option<Value>) -> McpResult<Value> {
        let get_params: PromptGetParams = parse_params(params, "Prompt get")?;
        let result = self
            .registries
            .prompts
            .get(&get_params.name, get_params.arguments.unwrap_or_default())
            .await?;
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: Option<Value>,
    what: &str,
) -> McpResult<T> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams(format!("{what} params required")))
}

/// Serialize a list result, degrading to an empty list under `key`.
fn list_value(result: &impl Serialize, key: &str) -> Value {
    serde_json::to_value(result).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize {key} list: {e}");
        let mut empty = Map::new();
        empty.insert(key.to_string(), Value::Array(Vec::new()));
        Value::Object(empty)
    })
}
