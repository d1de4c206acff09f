//! Error types and handling for the MCP server.
//!
//! Tool and swagger failures are reported to the client inside tool results,
//! so the only error that ends the server is a transport failure.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failures.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
