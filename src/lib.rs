//! Swagger MCP Server Library
//!
//! A Model Context Protocol server that lets clients explore a Swagger 2.0
//! or OpenAPI 3.0 document: list its modules, list the endpoints of a
//! module, and get the fully resolved request and response types of an
//! endpoint.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **swagger**: Document model, document store, reference resolver and queries
//!   - **tools**: MCP tools exposing the queries to clients
//!
//! # Example
//!
//! ```rust,no_run
//! use swagger_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
