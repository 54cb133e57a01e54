//! HTTP transport integration tests, driven through the router with `oneshot`.

#![cfg(feature = "http")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use pubky_mcp::transport::http::router;
use pubky_mcp::Server;

// ─────────────────────── helpers ───────────────────────

fn bundle() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let core = dir.path().join("data/pubky-core");
    std::fs::create_dir_all(&core).unwrap();
    std::fs::write(core.join("README.md"), "# Pubky Core\n").unwrap();
    dir
}

async fn app(dir: &tempfile::TempDir) -> Router {
    router(Server::open(dir.path().join("data")).await.handler())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// ─────────────────────── /health and / ───────────────────────

#[tokio::test]
async fn test_health() {
    let dir = bundle();
    let (status, body) = call(app(&dir).await, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "pubky-mcp-server");
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let dir = bundle();
    let (status, body) = call(app(&dir).await, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]["POST /mcp"].is_string());
}

// ─────────────────────── /mcp ───────────────────────

#[tokio::test]
async fn test_mcp_request() {
    let dir = bundle();
    let (status, body) = call(
        app(&dir).await,
        post_json(
            "/mcp",
            json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_mcp_notification_accepted_without_body() {
    let dir = bundle();
    let (status, body) = call(
        app(&dir).await,
        post_json(
            "/mcp",
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_mcp_malformed_body() {
    let dir = bundle();
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = call(app(&dir).await, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn test_mcp_unusable_id_is_answered() {
    let dir = bundle();
    let (status, body) = call(
        app(&dir).await,
        post_json("/mcp", json!({ "jsonrpc": "2.0", "id": 1.5, "method": "ping" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32600);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn test_same_id_from_two_clients_is_not_crossed() {
    let dir = bundle();
    let app = app(&dir).await;

    let read = post_json(
        "/mcp",
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "resources/read",
            "params": { "uri": "pubky://core/readme" }
        }),
    );
    let list = post_json(
        "/mcp",
        json!({ "jsonrpc": "2.0", "id": 1, "method": "prompts/list" }),
    );

    let ((_, first), (_, second)) = tokio::join!(call(app.clone(), read), call(app, list));

    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 1);
    assert_eq!(first["result"]["contents"][0]["uri"], "pubky://core/readme");
    assert!(first["result"].get("prompts").is_none());
    assert_eq!(second["result"]["prompts"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_many_concurrent_requests() {
    let dir = bundle();
    let handler = Server::open(dir.path().join("data")).await.handler();

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let app = router(Arc::clone(&handler));
            tokio::spawn(async move {
                call(
                    app,
                    post_json("/mcp", json!({ "jsonrpc": "2.0", "id": i, "method": "ping" })),
                )
                .await
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], i as i64);
    }
}

// ─────────────────────── REST mirror ───────────────────────

#[tokio::test]
async fn test_rest_read_resource() {
    let dir = bundle();
    let (status, body) = call(
        app(&dir).await,
        get("/api/resources/pubky%3A%2F%2Fcore%2Freadme"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contents"][0]["text"], "# Pubky Core\n");
}

#[tokio::test]
async fn test_rest_missing_resource_is_404() {
    let dir = bundle();
    let (status, body) = call(app(&dir).await, get("/api/resources/pubky%3A%2F%2Fnope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], -32802);
}

#[tokio::test]
async fn test_rest_tool_call() {
    let dir = bundle();
    let (status, body) = call(
        app(&dir).await,
        post_json(
            "/api/tools/validate_homeserver_path",
            json!({ "arguments": { "path": "/pub/example.com/posts/1.json" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("isError").is_none());
}

#[tokio::test]
async fn test_rest_prompt_missing_argument_is_400() {
    let dir = bundle();
    let (status, body) = call(
        app(&dir).await,
        post_json("/api/prompts/explain_concept", json!({ "arguments": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to get prompt"));
}

#[tokio::test]
async fn test_rest_lists() {
    let dir = bundle();
    let app = app(&dir).await;
    let (_, tools) = call(app.clone(), get("/api/tools")).await;
    let (_, prompts) = call(app.clone(), get("/api/prompts")).await;
    let (_, resources) = call(app, get("/api/resources")).await;
    assert_eq!(tools["tools"].as_array().unwrap().len(), 6);
    assert_eq!(prompts["prompts"].as_array().unwrap().len(), 4);
    assert!(!resources["resources"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_preflight() {
    let dir = bundle();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/mcp")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app(&dir).await.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
