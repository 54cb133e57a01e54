//! Startup wiring: one resolver, one set of registries, one dispatcher.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pubky_content::{bundled_roots, ContentResolver, RootReport};

use crate::protocol::ProtocolHandler;
use crate::registry::Registries;
use crate::transport::{Shutdown, Transport};
use crate::types::McpResult;

/// A fully wired server, ready to be attached to a transport.
pub struct Server {
    data_root: PathBuf,
    handler: Arc<ProtocolHandler>,
    report: RootReport,
}

impl Server {
    /// Wire the bundled catalogs over `data_root` and verify the roots.
    ///
    /// Missing content is logged but never fatal; the server keeps serving
    /// and individual reads fail instead.
    pub async fn open(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        let content = Arc::new(ContentResolver::new(bundled_roots(&data_root)));
        let report = content.verify().await;

        if report.all_readable() {
            tracing::info!("Bundled resources found in {}", data_root.display());
        } else {
            tracing::warn!(
                "Bundled resources incomplete under {}: missing {}",
                data_root.display(),
                report
                    .unreadable()
                    .map(|r| r.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let registries = Registries::bundled(content, report.clone());
        let handler = Arc::new(ProtocolHandler::new(registries));
        Self {
            data_root,
            handler,
            report,
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn handler(&self) -> Arc<ProtocolHandler> {
        self.handler.clone()
    }

    pub fn report(&self) -> &RootReport {
        &self.report
    }

    pub async fn run(&self, transport: &dyn Transport, shutdown: Shutdown) -> McpResult<()> {
        tracing::info!("Serving over {}", transport.name());
        transport.serve(self.handler(), shutdown).await
    }
}
