//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised while starting or running a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP listener could not bind its address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake over stdio failed.
    #[error("Failed to start MCP session: {0}")]
    Init(String),

    /// The running MCP session ended abnormally.
    #[error("MCP session terminated: {0}")]
    Session(String),

    /// The HTTP server stopped with an error.
    #[error("HTTP server error: {0}")]
    Http(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
