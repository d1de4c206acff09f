//! MCP Server implementation and lifecycle management.
//!
//! The server handler owns the API query service and routes tool calls to it.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built in `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::domains::swagger::{ApiQueryService, DocumentStore, source_from_config};
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Answers the module, endpoint and type queries.
    query_service: Arc<ApiQueryService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// The API document is not fetched here; the first tool call loads it.
    pub fn new(config: Config) -> Self {
        let store = DocumentStore::new(source_from_config(&config.swagger));
        info!("Swagger document source: {}", store.location());
        Self::with_store(config, store)
    }

    /// Create a server around an existing document store.
    pub fn with_store(config: Config, store: DocumentStore) -> Self {
        let config = Arc::new(config);
        let query_service = Arc::new(ApiQueryService::new(Arc::new(store)));

        Self {
            tool_router: build_tool_router::<Self>(query_service.clone()),
            config,
            query_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the query service backing the tools.
    pub fn query_service(&self) -> &Arc<ApiQueryService> {
        &self.query_service
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let registry = ToolRegistry::new(self.query_service.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Explores a Swagger / OpenAPI document. Call getModules to list the modules, \
                 getApis with a module name to list its endpoints, then getApi with a path \
                 and method to get the fully resolved request and response types."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
