use crate::{
    error::{ValidationError, ValidationErrorKind},
    paths::{JsonPointer, PathChunk},
    schema::Schema,
};
use serde_json::Value;

pub(crate) fn check(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) {
    let Value::String(s) = instance else {
        return;
    };
    let schema_path = || JsonPointer::parse(schema.path());
    // Length is measured in Unicode codepoints, not bytes or UTF-16 units.
    let length = s.chars().count() as u64;

    if let Some(limit) = schema.max_length() {
        if length > limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("maxLength")),
                ValidationErrorKind::MaxLengthExceeded { limit, length },
            ));
        }
    }
    if let Some(limit) = schema.min_length() {
        if length < limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("minLength")),
                ValidationErrorKind::MinLengthViolated { limit, length },
            ));
        }
    }
    if let Some(pattern) = schema.pattern() {
        if !pattern.is_match(s) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("pattern")),
                ValidationErrorKind::PatternViolated {
                    pattern: pattern.as_str().to_string(),
                    got: s.clone(),
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile::compile, dialect::Dialect};
    use serde_json::json;

    fn errors_for(schema_json: Value, instance: &Value) -> Vec<ValidationError> {
        let schema = compile(&schema_json, Some(Dialect::Draft6)).unwrap();
        let mut errors = Vec::new();
        check(&schema, instance, &JsonPointer::root(), &mut errors);
        errors
    }

    #[test]
    fn length_counts_codepoints_not_bytes() {
        // "héllo" has 5 codepoints but 6 UTF-8 bytes.
        assert!(errors_for(json!({"minLength": 5, "maxLength": 5}), &json!("héllo")).is_empty());
    }

    #[test]
    fn pattern_must_match_somewhere_in_the_string() {
        assert!(errors_for(json!({"pattern": "^a+$"}), &json!("aaa")).is_empty());
        assert_eq!(errors_for(json!({"pattern": "^a+$"}), &json!("aab")).len(), 1);
    }

    #[test]
    fn non_string_instances_are_ignored() {
        assert!(errors_for(json!({"minLength": 5}), &json!(1)).is_empty());
    }
}
