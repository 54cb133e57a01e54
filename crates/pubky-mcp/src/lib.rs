//! Pubky MCP Server: the Pubky knowledge base for LLM clients over stdio or HTTP.

pub mod config;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{resolve_data_root, resolve_port};
pub use protocol::ProtocolHandler;
pub use registry::Registries;
pub use server::Server;
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{Shutdown, StdioTransport, Transport};
