//! Module listing tool definition.
//!
//! Lists the tags of the API document, each tag being one module.

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

/// The module listing takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetModulesParams {}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct GetModulesTool;

impl GetModulesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getModules";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the list of all modules (tags) in the Swagger API, with their descriptions.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(_params: &GetModulesParams, service: &ApiQueryService) -> CallToolResult {
        match service.list_modules().await {
            Ok(modules) => {
                info!("Listed {} modules", modules.len());
                json_result(&modules)
            }
            Err(e) => swagger_error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        _arguments: serde_json::Value,
        service: Arc<ApiQueryService>,
    ) -> Result<serde_json::Value, ToolError> {
        let result = Self::execute(&GetModulesParams::default(), &service).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetModulesParams>(),
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
                let params: GetModulesParams = parse_arguments(serde_json::Value::Object(args))
                    .map_err(McpError::from)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}
