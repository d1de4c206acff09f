//! Transport layer for the MCP server.
//!
//! - `stdio` (default feature): the MCP session runs over stdin/stdout, the
//!   way editors and agents launch the server.
//! - `http`: JSON-RPC over POST plus a `/health` check, for running the server
//!   as a shared service.
//!
//! Both hand every request to the same [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
