//! Tool-specific error types.

use rmcp::{ErrorData as McpError, model::ErrorCode};
use thiserror::Error;

/// Errors raised while dispatching a tool call, before the tool runs.
///
/// Failures inside a tool are reported as error results, not as `ToolError`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's input schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::NotFound(_) => -32601,
            Self::InvalidArguments(_) => -32602,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::new(ErrorCode(err.code()), err.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ToolError::not_found("x").code(), -32601);
        assert_eq!(ToolError::invalid_arguments("x").code(), -32602);
    }

    #[test]
    fn test_into_mcp_error() {
        let err: McpError = ToolError::invalid_arguments("missing field `module`").into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Invalid arguments: missing field `module`");
    }
}
