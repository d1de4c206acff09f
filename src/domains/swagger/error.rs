//! Swagger domain error types.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while obtaining the API document.
///
/// Cloneable so every caller waiting on one fetch receives the same error.
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    /// No document location was configured.
    #[error(
        "Swagger URL is not configured (set SWAGGER_URL or add swaggerUrl to .swagger-mcp.json)"
    )]
    NotConfigured,

    /// The request could not be sent or the body could not be read.
    #[error("Failed to fetch Swagger doc from {location}: {message}")]
    Request { location: String, message: String },

    /// The server answered with a non-success status.
    #[error("Failed to fetch Swagger doc: {status} {reason}")]
    Status { status: u16, reason: String },

    /// Reading a local document failed.
    #[error("Failed to read Swagger doc {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The body is neither a valid JSON nor YAML document.
    #[error("Failed to parse Swagger doc from {location}: {message}")]
    Parse { location: String, message: String },
}

/// Errors surfaced by the endpoint query operations.
#[derive(Debug, Error)]
pub enum SwaggerError {
    /// A required argument was missing or empty.
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested endpoint does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The document could not be obtained.
    #[error("{context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: DocumentError,
    },
}

impl SwaggerError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(context: impl Into<String>, source: DocumentError) -> Self {
        Self::Upstream {
            context: context.into(),
            source,
        }
    }
}

/// A specialized Result type for swagger queries.
pub type SwaggerResult<T> = std::result::Result<T, SwaggerError>;
