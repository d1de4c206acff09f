//! Endpoint query operations over the API document.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::document::{ApiDocument, Operation, Schema, preferred_schema};
use super::error::{SwaggerError, SwaggerResult};
use super::resolver::SchemaResolver;
use super::store::DocumentStore;

/// A module (tag) of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub description: String,
}

/// One endpoint of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    pub path: String,
    pub method: String,
    pub summary: String,
}

/// The resolved type graph of one endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointTypes {
    pub path: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The operation's `parameters`, exactly as documented.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<Schema>,
    /// The raw operation object.
    pub operation: Value,
}

/// Answers module, endpoint and type-graph queries.
pub struct ApiQueryService {
    store: Arc<DocumentStore>,
}

impl ApiQueryService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    /// List all modules in document order.
    #[instrument(skip(self))]
    pub async fn list_modules(&self) -> SwaggerResult<Vec<ModuleInfo>> {
        let document = self
            .store
            .get()
            .await
            .map_err(|e| SwaggerError::upstream("Failed to get modules", e))?;

        Ok(modules(&document))
    }

    /// List the endpoints tagged with `module`.
    #[instrument(skip(self))]
    pub async fn list_endpoints(&self, module: &str) -> SwaggerResult<Vec<EndpointSummary>> {
        if module.is_empty() {
            return Err(SwaggerError::invalid_argument("Module name is required"));
        }

        let document = self.store.get().await.map_err(|e| {
            SwaggerError::upstream(format!("Failed to get module APIs for \"{module}\""), e)
        })?;

        let endpoints = endpoints(&document, module);
        info!("Found {} endpoint(s) in module {}", endpoints.len(), module);
        Ok(endpoints)
    }

    /// Resolve the parameter, request body and response types of one endpoint.
    #[instrument(skip(self))]
    pub async fn get_endpoint_types(&self, path: &str, method: &str) -> SwaggerResult<EndpointTypes> {
        if path.is_empty() || method.is_empty() {
            return Err(SwaggerError::invalid_argument("Path and method are required"));
        }

        let document = self.store.get().await.map_err(|e| {
            SwaggerError::upstream(
                format!(
                    "Failed to get API types for {} {}",
                    method.to_uppercase(),
                    path
                ),
                e,
            )
        })?;

        endpoint_types(&document, path, method)
    }
}

fn modules(document: &ApiDocument) -> Vec<ModuleInfo> {
    document
        .tags
        .iter()
        .map(|tag| ModuleInfo {
            name: tag.name.clone(),
            description: tag.description.clone().unwrap_or_default(),
        })
        .collect()
}

fn endpoints(document: &ApiDocument, module: &str) -> Vec<EndpointSummary> {
    let mut endpoints = Vec::new();

    for (path, item) in &document.paths {
        for (method, value) in item {
            let Some(operation) = Operation::from_tagged_value(value) else {
                continue;
            };

            if operation.has_tag(module) {
                endpoints.push(EndpointSummary {
                    path: path.clone(),
                    method: method.to_uppercase(),
                    summary: operation.summary.unwrap_or_default(),
                });
            }
        }
    }

    endpoints
}

fn endpoint_types(document: &ApiDocument, path: &str, method: &str) -> SwaggerResult<EndpointTypes> {
    let method_upper = method.to_uppercase();
    let not_found = || SwaggerError::not_found(format!("API not found: {method_upper} {path}"));

    let object = document
        .paths
        .get(path)
        .and_then(|item| {
            item.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(method))
                .map(|(_, value)| value)
        })
        .and_then(Value::as_object)
        .ok_or_else(not_found)?;

    let operation = Operation::from_object(object);

    let resolver = SchemaResolver::new(document);
    let response_type = response_schema(&operation).and_then(|s| resolver.resolve_fragment(s));
    let request_body = request_schema(&operation).and_then(|s| resolver.resolve_fragment(s));

    Ok(EndpointTypes {
        path: path.to_string(),
        method: method_upper,
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        parameters: object.get("parameters").cloned(),
        request_body,
        response_type,
        operation: Value::Object(object.clone()),
    })
}

/// Schema of the `200` response.
fn response_schema(operation: &Operation) -> Option<&Schema> {
    let response = operation.responses.as_ref()?.get("200")?;
    match &response.content {
        Some(content) => preferred_schema(content),
        None => response.schema.as_ref(),
    }
}

/// Schema of the request body: OpenAPI 3.0 `requestBody`, else the Swagger 2.0
/// body parameter.
fn request_schema(operation: &Operation) -> Option<&Schema> {
    match operation
        .request_body
        .as_ref()
        .and_then(|body| body.content.as_ref())
    {
        Some(content) => preferred_schema(content),
        None => operation.body_parameter()?.schema.as_ref(),
    }
}
