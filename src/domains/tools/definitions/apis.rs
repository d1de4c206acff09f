//! Module endpoint listing tool definition.

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

/// Parameters for the endpoint listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetApisParams {
    /// Module name, as returned by getModules.
    pub module: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Lists every endpoint tagged with a module.
pub struct GetApisTool;

impl GetApisTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getApis";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get all endpoints of a module: path, HTTP method and summary for each.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(module = %params.module))]
    pub async fn execute(params: &GetApisParams, service: &ApiQueryService) -> CallToolResult {
        match service.list_endpoints(&params.module).await {
            Ok(endpoints) => {
                info!(
                    "Listed {} endpoints for module {}",
                    endpoints.len(),
                    params.module
                );
                json_result(&endpoints)
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
        let params: GetApisParams = parse_arguments(arguments)?;

        let result = Self::execute(&params, &service).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetApisParams>(),
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
                let params: GetApisParams = parse_arguments(serde_json::Value::Object(args))
                    .map_err(McpError::from)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::swagger::DocumentStore;
    use crate::domains::tools::definitions::common::result_text;
    use serde_json::{Value, json};

    fn service() -> ApiQueryService {
        let document = serde_json::from_value(json!({
            "tags": [{ "name": "Order" }],
            "paths": {
                "/orders": {
                    "get": { "tags": ["Order"], "summary": "List orders" },
                    "parameters": [{ "name": "tenant", "in": "header" }]
                },
                "/pets": {
                    "get": { "tags": ["Pet"], "summary": "List pets" }
                }
            }
        }))
        .unwrap();
        ApiQueryService::new(Arc::new(DocumentStore::from_document(document)))
    }

    fn params(module: &str) -> GetApisParams {
        GetApisParams {
            module: module.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_apis() {
        let result = GetApisTool::execute(&params("Order"), &service()).await;
        assert!(!result.is_error.unwrap_or(false));

        let endpoints: Value = serde_json::from_str(result_text(&result).unwrap()).unwrap();
        assert_eq!(
            endpoints,
            json!([{ "path": "/orders", "method": "GET", "summary": "List orders" }])
        );
    }

    #[tokio::test]
    async fn test_get_apis_unknown_module_is_empty() {
        let result = GetApisTool::execute(&params("Nope"), &service()).await;
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), Some("[]"));
    }

    #[tokio::test]
    async fn test_get_apis_empty_module() {
        let result = GetApisTool::execute(&params(""), &service()).await;
        assert!(result.is_error.unwrap_or(false));

        let body: Value = serde_json::from_str(result_text(&result).unwrap()).unwrap();
        assert_eq!(body, json!({ "error": "Module name is required" }));
    }

    #[test]
    fn test_input_schema_requires_module() {
        let tool = GetApisTool::to_tool();
        let required = tool.input_schema.get("required").unwrap();
        assert_eq!(required, &json!(["module"]));
    }
}
