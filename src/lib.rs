//! # jsonschema-core
//!
//! An instance-validation core for JSON Schema draft-04 and draft-06. It
//! compiles a schema document into an opaque, read-only `Schema` once, then
//! evaluates instances against it with a single recursive dispatcher.
//!
//! Out of scope: remote `$ref` retrieval, `$id`-based scope tracking, and any
//! draft beyond 04/06 - see `SPEC_FULL.md` for the full boundary.
//!
//! ## Example
//!
//! ```rust
//! use jsonschema_core::{compile, Validator};
//! use serde_json::json;
//!
//! let schema = compile(&json!({"type": "string", "minLength": 3}), None).unwrap();
//! let validator = Validator::default();
//! assert!(validator.is_valid(&schema, &json!("abc")));
//! assert!(!validator.is_valid(&schema, &json!("ab")));
//! ```
#![warn(
    clippy::redundant_closure,
    clippy::needless_borrow,
    clippy::print_stdout,
    missing_debug_implementations
)]
mod compile;
mod dialect;
mod error;
mod formats;
mod helpers;
mod keywords;
mod paths;
mod primitive_type;
mod schema;
mod validator;

pub use compile::compile;
pub use dialect::{dialect_from_schema, dialect_from_url, Dialect};
pub use error::{CompilationError, InvalidArgumentError, ValidationError, ValidationErrorKind};
pub use formats::register_format;
pub use paths::{JsonPointer, PathChunk};
pub use primitive_type::PrimitiveType;
pub use schema::Schema;
pub use validator::{ValidationOptions, Validator};

use serde_json::Value;

/// A shortcut for validating `instance` against `schema` in collect-all
/// mode. The dialect is detected from `$schema`, falling back to draft-06.
///
/// # Panics
///
/// Panics if `schema` does not compile.
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = compile(schema, None).expect("invalid schema");
    Validator::default().is_valid(&compiled, instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn is_valid_detects_dialect_from_schema_keyword() {
        let schema = json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "maximum": 5,
            "exclusiveMaximum": true,
        });
        assert!(is_valid(&schema, &json!(4)));
        assert!(!is_valid(&schema, &json!(5)));
    }

    #[test]
    fn is_valid_defaults_to_draft6_without_a_schema_keyword() {
        let schema = json!({"const": 1});
        assert!(is_valid(&schema, &json!(1)));
        assert!(!is_valid(&schema, &json!(2)));
    }
}
