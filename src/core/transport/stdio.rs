//! STDIO transport implementation.
//!
//! stdout carries protocol messages only; all logging goes to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve `server` on stdin/stdout until the client disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            "{} v{} running on stdio ({} tools)",
            server.name(),
            server.version(),
            server.list_tools().len()
        );

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = session
            .waiting()
            .await
            .map_err(|e| TransportError::session(e.to_string()))?;

        info!("STDIO session closed: {:?}", reason);
        Ok(())
    }
}
