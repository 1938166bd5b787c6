use std::fmt;

/// The JSON Schema draft a schema document was authored against.
///
/// Changes the semantics of `exclusiveMinimum`/`exclusiveMaximum` (bool
/// paired with `minimum`/`maximum` on draft-04, standalone number on
/// draft-06), whether an integral-valued number counts as `"type": "integer"`,
/// and whether `const`, `contains`, `propertyNames`, `uri-reference`,
/// `uri-template` and `json-pointer` formats are available at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Draft4,
    Draft6,
}

impl Dialect {
    #[must_use]
    pub(crate) fn is_draft6(self) -> bool {
        matches!(self, Dialect::Draft6)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Draft4 => write!(f, "draft-04"),
            Dialect::Draft6 => write!(f, "draft-06"),
        }
    }
}

/// Detect the dialect from a schema's `$schema` keyword, if present.
#[must_use]
pub fn dialect_from_schema(schema: &serde_json::Value) -> Option<Dialect> {
    schema
        .as_object()?
        .get("$schema")?
        .as_str()
        .and_then(dialect_from_url)
}

#[must_use]
pub fn dialect_from_url(url: &str) -> Option<Dialect> {
    match url {
        "http://json-schema.org/draft-04/schema#" => Some(Dialect::Draft4),
        "http://json-schema.org/draft-06/schema#" => Some(Dialect::Draft6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"$schema": "http://json-schema.org/draft-06/schema#"}), Some(Dialect::Draft6))]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-04/schema#"}), Some(Dialect::Draft4))]
    #[test_case(json!({"$schema": "http://example.com/custom/schema#"}), None)]
    #[test_case(json!({"type": "string"}), None)]
    fn detects_dialect_from_schema_keyword(schema: serde_json::Value, expected: Option<Dialect>) {
        assert_eq!(dialect_from_schema(&schema), expected);
    }
}
