//! Domains module containing business logic organized by bounded contexts.
//!
//! - **swagger**: the API document, the schema reference resolver and the
//!   endpoint queries built on it
//! - **tools**: the MCP tools exposing those queries to clients

pub mod swagger;
pub mod tools;
