//! Transport layer for MCP communication.

use std::sync::Arc;

use async_trait::async_trait;

use crate::protocol::ProtocolHandler;
use crate::types::McpResult;

pub mod framing;
#[cfg(feature = "http")]
pub mod http;
pub mod shutdown;
pub mod stdio;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use shutdown::{Shutdown, ShutdownTrigger};
pub use stdio::StdioTransport;

/// A way of moving JSON-RPC messages between clients and one shared handler.
///
/// Transports never interpret methods; everything they receive is passed to
/// the handler and everything it returns is written back unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    /// Serve until the peer goes away or `shutdown` fires.
    async fn serve(&self, handler: Arc<ProtocolHandler>, shutdown: Shutdown) -> McpResult<()>;
}
