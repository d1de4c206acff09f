//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of available tools and their metadata
//! - HTTP dispatch for tool calls (when the http feature is enabled)

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{GetApiTool, GetApisTool, GetModulesTool};
use crate::domains::swagger::ApiQueryService;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    service: Arc<ApiQueryService>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(service: Arc<ApiQueryService>) -> Self {
        Self { service }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![GetModulesTool::NAME, GetApisTool::NAME, GetApiTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both transports list tools from here.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetModulesTool::to_tool(),
            GetApisTool::to_tool(),
            GetApiTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let service = self.service.clone();
        match name {
            GetModulesTool::NAME => GetModulesTool::http_handler(arguments, service).await,
            GetApisTool::NAME => GetApisTool::http_handler(arguments, service).await,
            GetApiTool::NAME => GetApiTool::http_handler(arguments, service).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
