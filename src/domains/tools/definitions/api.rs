//! Endpoint type-graph tool definition.
//!
//! Returns the operation together with its request and response schemas,
//! every reference expanded in place.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{json_result, parse_arguments, swagger_error_result};
use crate::domains::swagger::ApiQueryService;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the endpoint type tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetApiParams {
    /// Endpoint path exactly as documented, e.g. /api/channelType/list
    pub path: String,

    /// HTTP method, e.g. GET, POST, PUT, DELETE (case-insensitive)
    pub method: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct GetApiTool;

impl GetApiTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getApi";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the full type information of one endpoint: parameters, request body and response schemas with all references resolved.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(method = %params.method, path = %params.path))]
    pub async fn execute(params: &GetApiParams, service: &ApiQueryService) -> CallToolResult {
        match service
            .get_endpoint_types(&params.path, &params.method)
            .await
        {
            Ok(types) => {
                info!("Resolved types for {} {}", types.method, types.path);
                json_result(&types)
            }
            Err(e) => swagger_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: Arc<ApiQueryService>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GetApiParams = parse_arguments(arguments)?;

        let result = Self::execute(&params, &service).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetApiParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(service: Arc<ApiQueryService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let service = service.clone();
            async move {
                let params: GetApiParams = parse_arguments(serde_json::Value::Object(args))
                    .map_err(McpError::from)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}
