//! Tool `generate_code_example`: Starter snippets for common Pubky client operations.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::registry::{ToolContext, ToolHandler};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Operation {
    Signup,
    Signin,
    Put,
    Get,
    List,
    Delete,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Language {
    #[default]
    Javascript,
    Rust,
}

#[derive(Debug, Deserialize)]
struct ExampleParams {
    operation: Operation,
    #[serde(default)]
    language: Language,
    #[serde(default = "default_path")]
    path: String,
}

fn default_path() -> String {
    "/pub/example.com/hello.json".to_string()
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "generate_code_example".to_string(),
        description: Some(
            "Generate a starter code example for a Pubky client operation".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["signup", "signin", "put", "get", "list", "delete"]
                },
                "language": {
                    "type": "string",
                    "enum": ["javascript", "rust"],
                    "default": "javascript"
                },
                "path": {
                    "type": "string",
                    "description": "Homeserver path used by data operations",
                    "default": "/pub/example.com/hello.json"
                }
            },
            "required": ["operation"]
        }),
    }
}

pub struct GenerateCodeExample;

#[async_trait]
impl ToolHandler for GenerateCodeExample {
    async fn execute(&self, args: Value, _ctx: &ToolContext) -> McpResult<ToolCallResult> {
        let params: ExampleParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let (fence, body) = match params.language {
            Language::Javascript => ("javascript", javascript(params.operation, &params.path)),
            Language::Rust => ("rust", rust(params.operation, &params.path)),
        };

        Ok(ToolCallResult::text(format!("```{fence}\n{body}\n```")))
    }
}

fn javascript(op: Operation, path: &str) -> String {
    let setup = "import { Client, Keypair } from \"@synonymdev/pubky\";\n\n\
                 const client = new Client();\n\
                 const keypair = Keypair.random();";
    let url = format!("pubky://${{keypair.publicKey().z32()}}{path}");
    let call = match op {
        Operation::Signup => {
            "const homeserver = PublicKey.from(HOMESERVER_PUBKEY);\n\
             await client.signup(keypair, homeserver);"
                .to_string()
        }
        Operation::Signin => "await client.signin(keypair);".to_string(),
        Operation::Put => format!(
            "await client.fetch(`{url}`, {{\n  method: \"PUT\",\n  body: JSON.stringify({{ hello: \"world\" }}),\n  credentials: \"include\",\n}});"
        ),
        Operation::Get => {
            format!("const response = await client.fetch(`{url}`);\nconst data = await response.json();")
        }
        Operation::List => {
            let dir = parent_dir(path);
            format!("const entries = await client.list(`pubky://${{keypair.publicKey().z32()}}{dir}`);")
        }
        Operation::Delete => format!(
            "await client.fetch(`{url}`, {{ method: \"DELETE\", credentials: \"include\" }});"
        ),
    };
    format!("{setup}\n\n{call}")
}

fn rust(op: Operation, path: &str) -> String {
    let setup = "use pubky::{Client, Keypair};\n\n\
                 let client = Client::builder().build()?;\n\
                 let keypair = Keypair::random();";
    let url = format!("format!(\"pubky://{{}}{path}\", keypair.public_key())");
    let call = match op {
        Operation::Signup => {
            "client.signup(&keypair, &homeserver_pubkey, None).await?;".to_string()
        }
        Operation::Signin => "client.signin(&keypair).await?;".to_string(),
        Operation::Put => format!(
            "let url = {url};\nclient.put(url).body(r#\"{{\"hello\":\"world\"}}\"#).send().await?;"
        ),
        Operation::Get => {
            format!("let url = {url};\nlet body = client.get(url).send().await?.bytes().await?;")
        }
        Operation::List => {
            let dir = parent_dir(path);
            format!(
                "let url = format!(\"pubky://{{}}{dir}\", keypair.public_key());\nlet entries = client.list(&url)?.send().await?;"
            )
        }
        Operation::Delete => format!("let url = {url};\nclient.delete(url).send().await?;"),
    };
    format!("{setup}\n\n{call}")
}

fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx > 0 => &path[..=idx],
        _ => "/pub/",
    }
}
