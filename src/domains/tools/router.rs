//! Tool Router - builds the rmcp ToolRouter for the STDIO transport.
//!
//! Each tool knows how to create its own route; the router only collects them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{GetApiTool, GetApisTool, GetModulesTool};
use crate::domains::swagger::ApiQueryService;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(service: Arc<ApiQueryService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetModulesTool::create_route(service.clone()))
        .with_route(GetApisTool::create_route(service.clone()))
        .with_route(GetApiTool::create_route(service))
}
