//! Result helpers shared by the Swagger tools.

use rmcp::model::{CallToolResult, Content, RawContent};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::warn;

use crate::domains::swagger::SwaggerError;
use crate::domains::tools::ToolError;

/// Deserialize tool arguments into the tool's parameter struct.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Serialize `value` as pretty-printed JSON text content.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Create an error result carrying `{"error": message}`.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(json!({ "error": message }).to_string())])
}

/// Map a query failure to an error result.
pub fn swagger_error_result(err: &SwaggerError) -> CallToolResult {
    error_result(&err.to_string())
}

/// Shape a tool result the way the HTTP transport returns it.
pub fn http_response(result: CallToolResult) -> Value {
    json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}

/// First text block of a result.
pub fn result_text(result: &CallToolResult) -> Option<&str> {
    result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(text) => Some(text.text.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::swagger::SwaggerError;

    #[test]
    fn test_json_result_pretty() {
        let result = json_result(&json!({ "name": "Order" }));
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), Some("{\n  \"name\": \"Order\"\n}"));
    }

    #[test]
    fn test_error_result_shape() {
        let result = swagger_error_result(&SwaggerError::not_found("API not found: GET /x"));
        assert!(result.is_error.unwrap_or(false));
        let body: serde_json::Value = serde_json::from_str(result_text(&result).unwrap()).unwrap();
        assert_eq!(body, json!({ "error": "API not found: GET /x" }));
    }

    #[test]
    fn test_parse_arguments_reports_missing_field() {
        #[derive(Debug, serde::Deserialize)]
        struct Params {
            #[allow(dead_code)]
            module: String,
        }

        let err = parse_arguments::<Params>(json!({})).unwrap_err();
        assert!(err.to_string().contains("module"));
    }

    #[test]
    fn test_http_response() {
        let response = http_response(error_result("boom"));
        assert_eq!(response["isError"], json!(true));
        assert!(response["content"].is_array());
    }
}
