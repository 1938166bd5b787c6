use crate::{
    error::{ValidationError, ValidationErrorKind},
    paths::{JsonPointer, PathChunk},
    schema::Schema,
    validator,
};
use serde_json::Value;

/// `allOf`/`anyOf`/`oneOf`/`not` only need a pass/fail verdict per branch, so
/// each branch runs through a fresh fail-fast evaluation and its error list is
/// discarded - only the composition keyword itself reports a diagnostic.
pub(crate) fn check(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) {
    let schema_path = || JsonPointer::parse(schema.path());

    if let Some(branches) = schema.all_of() {
        if !branches.iter().all(|branch| validator::is_valid(branch, instance)) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("allOf")),
                ValidationErrorKind::AllOfViolated,
            ));
        }
    }
    if let Some(branches) = schema.any_of() {
        if !branches.iter().any(|branch| validator::is_valid(branch, instance)) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("anyOf")),
                ValidationErrorKind::AnyOfViolated,
            ));
        }
    }
    if let Some(branches) = schema.one_of() {
        let matches = branches
            .iter()
            .filter(|branch| validator::is_valid(branch, instance))
            .count();
        if matches != 1 {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("oneOf")),
                ValidationErrorKind::OneOfViolated,
            ));
        }
    }
    if let Some(negated) = schema.not_schema() {
        if validator::is_valid(&negated, instance) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("not")),
                ValidationErrorKind::NotViolated,
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
    fn all_of_requires_every_branch() {
        let schema = json!({"allOf": [{"type": "number"}, {"minimum": 0}]});
        assert!(errors_for(schema.clone(), &json!(5)).is_empty());
        assert_eq!(errors_for(schema, &json!(-5)).len(), 1);
    }

    #[test]
    fn one_of_rejects_when_more_than_one_branch_matches() {
        let schema = json!({"oneOf": [{"type": "number"}, {"minimum": 0}]});
        assert_eq!(errors_for(schema, &json!(5)).len(), 1);
    }

    #[test]
    fn not_rejects_when_the_negated_schema_matches() {
        let schema = json!({"not": {"type": "string"}});
        assert!(errors_for(schema.clone(), &json!(1)).is_empty());
        assert_eq!(errors_for(schema, &json!("x")).len(), 1);
    }
}
