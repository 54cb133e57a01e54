//! Stateless HTTP transport: `/mcp` JSON-RPC endpoint, `/health`, and a REST mirror.
//!
//! Every POST to `/mcp` gets its own [`RequestBinding`], so two clients that
//! reuse the same JSON-RPC id can never receive each other's reply. The
//! dispatcher itself is shared.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Json as AxumJson, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::protocol::handler::methods;
use crate::protocol::ProtocolHandler;
use crate::types::{
    error_codes, mcp_error_codes, JsonRpcMessage, JsonRpcReply, JsonRpcRequest, McpError,
    McpResult, RequestId, SERVER_NAME,
};

use crate::config::DEFAULT_PORT;

use super::{framing, Shutdown, Transport};

const SESSION_HEADER: &str = "mcp-session-id";

/// HTTP transport for web-based MCP clients.
pub struct HttpTransport {
    addr: SocketAddr,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_PORT)
    }
}

impl HttpTransport {
    /// Listen on every interface at `port`.
    pub fn new(port: u16) -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn serve(&self, handler: Arc<ProtocolHandler>, mut shutdown: Shutdown) -> McpResult<()> {
        let app = router(handler);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(McpError::Io)?;

        tracing::info!("HTTP transport listening on {}", self.addr);
        tracing::info!("  MCP:    http://localhost:{}/mcp", self.addr.port());
        tracing::info!("  Health: http://localhost:{}/health", self.addr.port());

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        tracing::info!("HTTP transport stopped");
        Ok(())
    }
}

/// Build the axum router around a shared handler.
pub fn router(handler: Arc<ProtocolHandler>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(SESSION_HEADER)])
        .expose_headers([HeaderName::from_static(SESSION_HEADER)]);

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/mcp", post(handle_mcp))
        .route("/api/resources", get(list_resources))
        .route("/api/resources/*uri", get(read_resource))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(call_tool))
        .route("/api/prompts", get(list_prompts))
        .route("/api/prompts/:name", post(get_prompt))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(handler)
}

/// The lifetime of one HTTP exchange on `/mcp`.
struct RequestBinding {
    id: Uuid,
    handler: Arc<ProtocolHandler>,
}

impl RequestBinding {
    fn open(handler: Arc<ProtocolHandler>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(binding = %id, "request binding opened");
        Self { id, handler }
    }

    async fn process(&self, msg: JsonRpcMessage) -> Option<Value> {
        self.handler.handle_message(msg).await
    }
}

impl Drop for RequestBinding {
    fn drop(&mut self) {
        tracing::debug!(binding = %self.id, "request binding closed");
    }
}

async fn handle_mcp(State(handler): State<Arc<ProtocolHandler>>, body: Bytes) -> Response {
    let msg = match serde_json::from_slice::<Value>(&body)
        .map_err(|e| McpError::ParseError(e.to_string()))
        .and_then(framing::decode_message)
    {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Rejected HTTP body: {e}");
            let reply = e.to_json_rpc_error(RequestId::Null);
            return (StatusCode::BAD_REQUEST, AxumJson(reply)).into_response();
        }
    };

    let binding = RequestBinding::open(handler);
    match binding.process(msg).await {
        Some(reply) => AxumJson(reply).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn handle_health() -> AxumJson<Value> {
    AxumJson(json!({
        "status": "ok",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_index() -> AxumJson<Value> {
    AxumJson(json!({
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /health": "Liveness check",
            "POST /mcp": "JSON-RPC 2.0 (MCP)",
            "GET /api/resources": "List resources",
            "GET /api/resources/{uri}": "Read a resource",
            "GET /api/tools": "List tools",
            "POST /api/tools/{name}": "Call a tool with {\"arguments\": {...}}",
            "GET /api/prompts": "List prompts",
            "POST /api/prompts/{name}": "Render a prompt with {\"arguments\": {...}}",
        }
    }))
}

#[derive(Debug, Default, Deserialize)]
struct RestArguments {
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

impl RestArguments {
    fn from_body(body: Option<AxumJson<RestArguments>>) -> Map<String, Value> {
        body.and_then(|AxumJson(b)| b.arguments).unwrap_or_default()
    }
}

async fn list_resources(State(handler): State<Arc<ProtocolHandler>>) -> Response {
    rest_call(&handler, methods::RESOURCES_LIST, None).await
}

async fn read_resource(
    State(handler): State<Arc<ProtocolHandler>>,
    Path(uri): Path<String>,
) -> Response {
    rest_call(&handler, methods::RESOURCES_READ, Some(json!({ "uri": uri }))).await
}

async fn list_tools(State(handler): State<Arc<ProtocolHandler>>) -> Response {
    rest_call(&handler, methods::TOOLS_LIST, None).await
}

async fn call_tool(
    State(handler): State<Arc<ProtocolHandler>>,
    Path(name): Path<String>,
    body: Option<AxumJson<RestArguments>>,
) -> Response {
    let arguments = RestArguments::from_body(body);
    rest_call(
        &handler,
        methods::TOOLS_CALL,
        Some(json!({ "name": name, "arguments": arguments })),
    )
    .await
}

async fn list_prompts(State(handler): State<Arc<ProtocolHandler>>) -> Response {
    rest_call(&handler, methods::PROMPTS_LIST, None).await
}

async fn get_prompt(
    State(handler): State<Arc<ProtocolHandler>>,
    Path(name): Path<String>,
    body: Option<AxumJson<RestArguments>>,
) -> Response {
    let arguments = RestArguments::from_body(body);
    rest_call(
        &handler,
        methods::PROMPTS_GET,
        Some(json!({ "name": name, "arguments": arguments })),
    )
    .await
}

/// Run a method through the dispatcher and project the reply onto HTTP.
async fn rest_call(handler: &ProtocolHandler, method: &str, params: Option<Value>) -> Response {
    let id = RequestId::String(format!("rest-{}", Uuid::new_v4()));
    match handler
        .handle_request(JsonRpcRequest::new(id, method, params))
        .await
    {
        JsonRpcReply::Success(response) => AxumJson(response.result).into_response(),
        JsonRpcReply::Failure(failure) => (
            status_for(failure.error.code),
            AxumJson(json!({ "error": failure.error })),
        )
            .into_response(),
    }
}

fn status_for(code: i32) -> StatusCode {
    match code {
        error_codes::METHOD_NOT_FOUND
        | mcp_error_codes::RESOURCE_NOT_FOUND
        | mcp_error_codes::PROMPT_NOT_FOUND => StatusCode::NOT_FOUND,
        error_codes::PARSE_ERROR | error_codes::INVALID_REQUEST | error_codes::INVALID_PARAMS => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_projection() {
        assert_eq!(status_for(-32802), StatusCode::NOT_FOUND);
        assert_eq!(status_for(-32804), StatusCode::NOT_FOUND);
        assert_eq!(status_for(-32602), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(-32603), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_default_bind_address() {
        let transport = HttpTransport::default();
        assert_eq!(transport.addr().port(), 3000);
        assert!(transport.addr().ip().is_unspecified());
    }
}
