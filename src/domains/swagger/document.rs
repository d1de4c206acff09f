//! API description document model.
//!
//! Covers both Swagger 2.0 and OpenAPI 3.0 documents. Only the fields the
//! resolver and query layer act on are typed; everything else is carried in
//! `extra` maps so it round-trips untouched into tool output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::debug;

use super::reference::SchemaRef;

/// Root of a Swagger 2.0 / OpenAPI 3.0 document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiDocument {
    /// Module (tag) declarations, in document order.
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Path string -> path item.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// OpenAPI 3.0 type registry lives under `components.schemas`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    /// Swagger 2.0 type registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, Schema>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<IndexMap<String, Schema>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A path item keeps its raw values: next to the HTTP methods it may hold
/// shared keys such as `parameters` or `servers`.
pub type PathItem = IndexMap<String, Value>;

/// A single HTTP operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,

    /// OpenAPI 3.0 only.
    #[serde(
        rename = "requestBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<RequestBody>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<IndexMap<String, Response>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operation {
    /// Interpret a path item value as an operation.
    ///
    /// Returns `None` for values that are not operations: anything that is
    /// not an object, or an object without a `tags` key.
    pub fn from_tagged_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if !object.contains_key("tags") {
            return None;
        }
        Some(Self::from_object(object))
    }

    /// Read an operation field by field.
    ///
    /// A field of unexpected shape is dropped instead of failing the whole
    /// operation; inside `tags`, `parameters` and `responses` only the bad
    /// entries are dropped.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let tags: Option<Vec<String>> = field::<Vec<Value>>(object, "tags").map(|tags| {
            tags.into_iter()
                .filter_map(|tag| tag.as_str().map(str::to_string))
                .collect()
        });

        let parameters: Option<Vec<Parameter>> =
            field::<Vec<Value>>(object, "parameters").map(|params| {
                params
                    .into_iter()
                    .filter_map(|param| entry::<Parameter>(param, "parameters"))
                    .collect()
            });

        let responses: Option<IndexMap<String, Response>> =
            field::<IndexMap<String, Value>>(object, "responses").map(|responses| {
                responses
                    .into_iter()
                    .filter_map(|(status, response)| {
                        Some((status, entry::<Response>(response, "responses")?))
                    })
                    .collect()
            });

        let extra = object
            .iter()
            .filter(|(key, _)| !OPERATION_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            tags,
            summary: field(object, "summary"),
            description: field(object, "description"),
            parameters,
            request_body: field(object, "requestBody"),
            responses,
            extra,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// The Swagger 2.0 body parameter, if any.
    pub fn body_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .as_ref()?
            .iter()
            .find(|p| p.location.as_deref() == Some("body"))
    }
}

/// Keys of an operation object with a typed field on [`Operation`].
const OPERATION_FIELDS: [&str; 6] = [
    "tags",
    "summary",
    "description",
    "parameters",
    "requestBody",
    "responses",
];

fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    entry(object.get(key)?.clone(), key)
}

fn entry<T: DeserializeOwned>(value: Value, key: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("Ignoring malformed operation `{}`: {}", key, e);
            None
        }
    }
}

/// An operation parameter. Swagger 2.0 body parameters carry an inline schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A response: OpenAPI 3.0 uses `content`, Swagger 2.0 a direct `schema`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Media types tried in order before falling back to the first entry.
const PREFERRED_MEDIA_TYPES: [&str; 2] = ["application/json", "*/*"];

/// Pick the schema of the preferred media type entry.
///
/// `application/json` wins, then `*/*`, then whichever entry comes first.
pub fn preferred_schema(content: &IndexMap<String, MediaType>) -> Option<&Schema> {
    let media = PREFERRED_MEDIA_TYPES
        .iter()
        .find_map(|mt| content.get(*mt))
        .or_else(|| content.values().next())?;
    media.schema.as_ref()
}

/// A schema fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,

    /// OpenAPI 3.0 reference, e.g. `#/components/schemas/User`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Swagger 2.0 (springfox) reference, a bare name or `#/definitions/Name`.
    #[serde(
        rename = "originalRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_ref: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema {
    /// Reference indicators carried by this fragment, in lookup precedence:
    /// `originalRef` before `$ref`.
    pub fn refs(&self) -> impl Iterator<Item = SchemaRef<'_>> {
        self.original_ref
            .as_deref()
            .map(SchemaRef::Swagger)
            .into_iter()
            .chain(self.reference.as_deref().map(SchemaRef::OpenApi))
    }

    pub fn has_ref(&self) -> bool {
        self.original_ref.is_some() || self.reference.is_some()
    }

    /// Merge `resolved` on top of `self`.
    ///
    /// Fields set on `resolved` replace the same fields of `self`; fields only
    /// present on `self` (a description next to a `$ref`, the ref itself)
    /// are kept.
    #[must_use]
    pub fn overlay(mut self, resolved: Schema) -> Schema {
        if resolved.properties.is_some() {
            self.properties = resolved.properties;
        }
        if resolved.items.is_some() {
            self.items = resolved.items;
        }
        if resolved.all_of.is_some() {
            self.all_of = resolved.all_of;
        }
        if resolved.reference.is_some() {
            self.reference = resolved.reference;
        }
        if resolved.original_ref.is_some() {
            self.original_ref = resolved.original_ref;
        }
        self.extra.extend(resolved.extra);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> Schema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_schema_keeps_unmodelled_fields() {
        let input = json!({
            "type": "object",
            "description": "A user",
            "properties": { "id": { "type": "integer", "format": "int64" } },
            "required": ["id"]
        });
        let parsed = schema(input.clone());
        assert_eq!(serde_json::to_value(&parsed).unwrap(), input);
    }

    #[test]
    fn test_refs_precedence() {
        let s = schema(json!({ "$ref": "#/components/schemas/A", "originalRef": "B" }));
        let refs: Vec<_> = s.refs().collect();
        assert_eq!(
            refs,
            vec![
                SchemaRef::Swagger("B"),
                SchemaRef::OpenApi("#/components/schemas/A")
            ]
        );
        assert!(s.has_ref());
        assert!(!schema(json!({ "type": "string" })).has_ref());
    }

    #[test]
    fn test_overlay_resolved_wins() {
        let base = schema(json!({
            "originalRef": "Pet",
            "description": "the pet",
            "type": "string"
        }));
        let resolved = schema(json!({
            "type": "object",
            "properties": { "name": { "type": "string" } }
        }));

        let merged = base.overlay(resolved);
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!({
                "properties": { "name": { "type": "string" } },
                "originalRef": "Pet",
                "description": "the pet",
                "type": "object"
            })
        );
    }

    #[test]
    fn test_operation_requires_tags() {
        assert!(Operation::from_tagged_value(&json!([{ "name": "id" }])).is_none());
        assert!(Operation::from_tagged_value(&json!({ "summary": "x" })).is_none());

        let op = Operation::from_tagged_value(&json!({ "tags": ["m", "n"], "summary": "x" }))
            .unwrap();
        assert!(op.has_tag("m"));
        assert!(op.has_tag("n"));
        assert!(!op.has_tag("o"));
    }

    #[test]
    fn test_operation_drops_only_malformed_fields() {
        let op = Operation::from_tagged_value(&json!({
            "tags": ["m", 7],
            "summary": 42,
            "description": "kept",
            "parameters": { "bad": 1 },
            "responses": {
                "200": { "schema": { "originalRef": "Pet" } },
                "404": "not an object"
            },
            "operationId": "getPet"
        }))
        .unwrap();

        assert_eq!(op.tags, Some(vec!["m".to_string()]));
        assert!(op.summary.is_none());
        assert_eq!(op.description.as_deref(), Some("kept"));
        assert!(op.parameters.is_none());

        let responses = op.responses.unwrap();
        assert_eq!(responses.len(), 1);
        assert!(responses["200"].schema.is_some());
        assert_eq!(op.extra["operationId"], json!("getPet"));
    }

    #[test]
    fn test_operation_keeps_well_formed_parameters() {
        let op = Operation::from_tagged_value(&json!({
            "tags": ["m"],
            "parameters": [
                "junk",
                { "name": "body", "in": "body", "schema": { "$ref": "#/definitions/Pet" } }
            ]
        }))
        .unwrap();
        assert_eq!(op.parameters.as_ref().unwrap().len(), 1);
        assert!(op.body_parameter().is_some());
    }

    #[test]
    fn test_preferred_schema_order() {
        let content: IndexMap<String, MediaType> = serde_json::from_value(json!({
            "text/plain": { "schema": { "type": "string" } },
            "*/*": { "schema": { "type": "integer" } },
            "application/json": { "schema": { "type": "object" } }
        }))
        .unwrap();
        assert_eq!(
            preferred_schema(&content).unwrap().extra["type"],
            json!("object")
        );

        let content: IndexMap<String, MediaType> = serde_json::from_value(json!({
            "text/plain": { "schema": { "type": "string" } },
            "*/*": { "schema": { "type": "integer" } }
        }))
        .unwrap();
        assert_eq!(
            preferred_schema(&content).unwrap().extra["type"],
            json!("integer")
        );

        let content: IndexMap<String, MediaType> = serde_json::from_value(json!({
            "text/plain": { "schema": { "type": "string" } },
            "application/xml": { "schema": { "type": "boolean" } }
        }))
        .unwrap();
        assert_eq!(
            preferred_schema(&content).unwrap().extra["type"],
            json!("string")
        );
    }

    #[test]
    fn test_body_parameter() {
        let op: Operation = serde_json::from_value(json!({
            "tags": ["m"],
            "parameters": [
                { "name": "id", "in": "query", "type": "string" },
                { "name": "body", "in": "body", "schema": { "originalRef": "Pet" } }
            ]
        }))
        .unwrap();
        let body = op.body_parameter().unwrap();
        assert_eq!(body.name.as_deref(), Some("body"));
        assert_eq!(
            body.schema.as_ref().unwrap().original_ref.as_deref(),
            Some("Pet")
        );
    }
}
