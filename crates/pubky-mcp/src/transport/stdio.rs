//! Stdio transport: reads JSON-RPC from stdin, writes to stdout.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::ProtocolHandler;
use crate::types::{McpError, McpResult, RequestId};

use super::{framing, Shutdown, Transport};

/// Stdio transport for desktop MCP clients. One client per process.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }

    /// Run the transport loop over arbitrary line streams.
    ///
    /// Stops at end of input or when `shutdown` fires, flushing `writer`
    /// either way. Malformed lines are answered with a parse error and the
    /// loop keeps going.
    pub async fn run_with<R, W>(
        &self,
        handler: &ProtocolHandler,
        mut reader: R,
        mut writer: W,
        mut shutdown: Shutdown,
    ) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let mut line = Vec::new();
        tracing::info!("Stdio transport started");

        loop {
            line.clear();
            let bytes_read = tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    tracing::info!("Shutdown requested, closing stdio transport");
                    break;
                }
                read = reader.read_until(b'\n', &mut line) => read.map_err(McpError::Io)?,
            };

            if bytes_read == 0 {
                tracing::info!("EOF on stdin, shutting down");
                break;
            }

            let reply = match std::str::from_utf8(&line) {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => framing::parse_message(text),
                Err(e) => Err(McpError::ParseError(format!("Invalid UTF-8 in message: {e}"))),
            };

            let reply = match reply {
                Ok(msg) => handler.handle_message(msg).await,
                Err(e) => {
                    tracing::warn!("Rejected message: {e}");
                    Some(parse_failure(&e))
                }
            };

            if let Some(reply) = reply {
                let framed = framing::frame_message(&reply)?;
                writer
                    .write_all(framed.as_bytes())
                    .await
                    .map_err(McpError::Io)?;
                writer.flush().await.map_err(McpError::Io)?;
            }
        }

        writer.flush().await.map_err(McpError::Io)?;
        Ok(())
    }
}

#[async_trait]
impl Transport for StdioTransport {
    fn name(&self) -> &'static str {
        "stdio"
    }

    async fn serve(&self, handler: Arc<ProtocolHandler>, shutdown: Shutdown) -> McpResult<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.run_with(&handler, reader, writer, shutdown).await
    }
}

fn parse_failure(error: &McpError) -> Value {
    let reply = error.to_json_rpc_error(RequestId::Null);
    serde_json::to_value(reply).unwrap_or(Value::Null)
}
