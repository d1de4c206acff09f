//! Swagger domain module.
//!
//! Everything needed to answer questions about a remote API description
//! (Swagger 2.0 or OpenAPI 3.0):
//!
//! - `document.rs` - Serde model of the document
//! - `reference.rs` - `$ref` / `originalRef` indicators and name normalisation
//! - `resolver.rs` - Recursive, cycle-safe schema reference resolver
//! - `store.rs` - Document sources and the memoizing document store
//! - `query.rs` - Module, endpoint and type-graph queries
//! - `error.rs` - Domain error types

pub mod document;
mod error;
mod query;
pub mod reference;
mod resolver;
mod store;

pub use document::{ApiDocument, Operation, Parameter, Schema};
pub use error::{DocumentError, SwaggerError, SwaggerResult};
pub use query::{ApiQueryService, EndpointSummary, EndpointTypes, ModuleInfo};
pub use reference::{SchemaRef, normalize_ref};
pub use resolver::SchemaResolver;
pub use store::{
    DocumentSource, DocumentStore, FileDocumentSource, HttpDocumentSource, UnconfiguredSource,
    parse_document, source_from_config,
};
