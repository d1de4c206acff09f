//! Schema reference resolver.
//!
//! Expands `$ref` (OpenAPI 3.0) and `originalRef` (Swagger 2.0) pointers into
//! full type trees: property types, array item types and `allOf` members are
//! resolved recursively.
//!
//! Cycle detection works on a set of visited type names. Along a single alias
//! chain (`A` is just a pointer to `B`) the set is shared, so `A -> B -> A` is
//! caught. Every sibling branch (each property, the item type, each `allOf`
//! member) gets its own copy, so a type referenced twice from the same parent
//! is resolved twice instead of being mistaken for a cycle.
//!
//! The resolver never fails. Missing definitions and cycles are logged and
//! the affected branch is left unresolved.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::document::{ApiDocument, Schema};
use super::reference::normalize_ref;

type Visited = HashSet<String>;

/// Resolves schema references against one document.
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'a> {
    document: &'a ApiDocument,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(document: &'a ApiDocument) -> Self {
        Self { document }
    }

    /// Resolve a reference string into a fully expanded schema.
    ///
    /// Returns `None` when `reference` is absent, names an unknown type, or
    /// only leads back into itself.
    pub fn resolve(&self, reference: Option<&str>) -> Option<Schema> {
        let reference = reference?;
        self.resolve_in(reference, &mut Visited::new())
    }

    /// Resolve a schema fragment as it appears in an operation.
    ///
    /// A fragment without a reference indicator is returned as is. Otherwise
    /// the indicators are tried in precedence order (`originalRef`, then
    /// `$ref`) and the first one that resolves wins.
    pub fn resolve_fragment(&self, schema: &Schema) -> Option<Schema> {
        if !schema.has_ref() {
            return Some(schema.clone());
        }
        self.resolve_branch(schema, &Visited::new())
    }

    /// Look a type name up in the OpenAPI 3.0 registry, then the Swagger 2.0 one.
    pub fn lookup(&self, name: &str) -> Option<&'a Schema> {
        let document = self.document;
        document
            .components
            .as_ref()
            .and_then(|c| c.schemas.as_ref())
            .and_then(|schemas| schemas.get(name))
            .or_else(|| {
                document
                    .definitions
                    .as_ref()
                    .and_then(|defs| defs.get(name))
            })
    }

    fn resolve_in(&self, reference: &str, visited: &mut Visited) -> Option<Schema> {
        let name = normalize_ref(reference);

        if !visited.insert(name.to_string()) {
            warn!("Circular reference detected: {}", name);
            return None;
        }

        let Some(definition) = self.lookup(name) else {
            warn!("Definition not found: {} (from ref: {})", name, reference);
            return None;
        };

        // Pure aliases adopt the shape of their target.
        for target in definition.refs() {
            if target.name() == name {
                continue;
            }
            debug!("Following alias {} -> {}", name, target.name());
            if let Some(resolved) = self.resolve_in(target.target(), visited) {
                return Some(resolved);
            }
        }

        Some(self.expand(definition.clone(), visited))
    }

    /// Resolve the indicators of `schema` on a private copy of `visited`.
    fn resolve_branch(&self, schema: &Schema, visited: &Visited) -> Option<Schema> {
        schema
            .refs()
            .find_map(|r| self.resolve_in(r.target(), &mut visited.clone()))
    }

    fn expand(&self, mut schema: Schema, visited: &Visited) -> Schema {
        if let Some(properties) = schema.properties.take() {
            let properties = properties
                .into_iter()
                .map(|(key, property)| (key, self.expand_property(property, visited)))
                .collect();
            schema.properties = Some(properties);
        }

        schema = self.expand_items(schema, visited);

        if let Some(members) = schema.all_of.take() {
            let members = members
                .into_iter()
                .map(|member| self.resolve_branch(&member, visited).unwrap_or(member))
                .collect();
            schema.all_of = Some(members);
        }

        schema
    }

    fn expand_property(&self, property: Schema, visited: &Visited) -> Schema {
        match self.resolve_branch(&property, visited) {
            // The referenced type brings its own (already expanded) items.
            Some(resolved) if resolved.items.is_some() => property.overlay(resolved),
            Some(resolved) => self.expand_items(property.overlay(resolved), visited),
            None => self.expand_items(property, visited),
        }
    }

    fn expand_items(&self, mut schema: Schema, visited: &Visited) -> Schema {
        if let Some(items) = schema.items.take() {
            let items = match self.resolve_branch(&items, visited) {
                Some(resolved) => (*items).overlay(resolved),
                None => *items,
            };
            schema.items = Some(Box::new(items));
        }
        schema
    }
}
