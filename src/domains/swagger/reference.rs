//! Reference indicators and name normalisation.

/// OpenAPI 3.0 schema reference prefix.
pub const OPENAPI_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Swagger 2.0 definition reference prefix.
pub const SWAGGER_DEFINITION_PREFIX: &str = "#/definitions/";

/// A reference indicator found on a schema fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRef<'a> {
    /// Swagger 2.0 `originalRef`.
    Swagger(&'a str),
    /// OpenAPI 3.0 `$ref`.
    OpenApi(&'a str),
}

impl<'a> SchemaRef<'a> {
    /// The raw reference string.
    pub fn target(&self) -> &'a str {
        match self {
            Self::Swagger(r) | Self::OpenApi(r) => r,
        }
    }

    /// The referenced type name.
    pub fn name(&self) -> &'a str {
        normalize_ref(self.target())
    }
}

/// Turn a reference string into a type name.
///
/// Strips `#/components/schemas/` or, failing that, `#/definitions/`.
/// Anything else is taken to already be a name. Only one prefix is
/// stripped, so a name that itself starts with a prefix survives intact.
pub fn normalize_ref(reference: &str) -> &str {
    reference
        .strip_prefix(OPENAPI_SCHEMA_PREFIX)
        .or_else(|| reference.strip_prefix(SWAGGER_DEFINITION_PREFIX))
        .unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_known_prefixes() {
        assert_eq!(normalize_ref("#/components/schemas/User"), "User");
        assert_eq!(normalize_ref("#/definitions/Order"), "Order");
        assert_eq!(normalize_ref("ResponseResult«Pet»"), "ResponseResult«Pet»");
        assert_eq!(normalize_ref(""), "");
    }

    #[test]
    fn test_normalize_leaves_other_pointers() {
        assert_eq!(
            normalize_ref("#/components/responses/NotFound"),
            "#/components/responses/NotFound"
        );
        assert_eq!(normalize_ref("other.json#/definitions/A"), "other.json#/definitions/A");
    }

    #[test]
    fn test_normalize_idempotent() {
        for r in [
            "#/components/schemas/User",
            "#/definitions/Order",
            "Plain",
            "#/parameters/limit",
        ] {
            let once = normalize_ref(r);
            assert_eq!(normalize_ref(once), once);
        }
    }

    #[test]
    fn test_normalize_strips_one_prefix_per_call() {
        // Idempotence only holds for names that do not themselves start with a prefix.
        let nested = "#/definitions/#/components/schemas/X";
        assert_eq!(normalize_ref(nested), "#/components/schemas/X");
        assert_eq!(normalize_ref(normalize_ref(nested)), "X");
    }

    #[test]
    fn test_schema_ref_name() {
        assert_eq!(SchemaRef::OpenApi("#/components/schemas/A").name(), "A");
        assert_eq!(SchemaRef::Swagger("#/definitions/B").name(), "B");
        assert_eq!(SchemaRef::Swagger("C").target(), "C");
    }
}
