//! MCP capability negotiation during initialization.
//!
//! The server keeps no per-client session, so negotiation is a pure answer:
//! the same result goes to every client regardless of transport.

use crate::types::{InitializeParams, InitializeResult, MCP_VERSION};

pub fn negotiate(params: &InitializeParams) -> InitializeResult {
    if params.protocol_version != MCP_VERSION {
        tracing::warn!(
            "Client requested protocol version {}, server supports {}. Proceeding with server version.",
            params.protocol_version,
            MCP_VERSION
        );
    }

    tracing::info!(
        "Initialized with client: {} v{}",
        params.client_info.name,
        params.client_info.version
    );

    InitializeResult::default_result()
}
