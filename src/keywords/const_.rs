use crate::{
    error::{ValidationError, ValidationErrorKind},
    helpers,
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
    if !schema.has_const() {
        return;
    }
    let expected = schema.const_value();
    if helpers::equal(expected, instance) {
        return;
    }
    errors.push(ValidationError::new(
        instance_path.clone(),
        JsonPointer::parse(schema.path()).push(PathChunk::Keyword("const")),
        ValidationErrorKind::Const {
            expected: expected.clone(),
            got: instance.clone(),
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile::compile, dialect::Dialect};
    use serde_json::json;

    #[test]
    fn const_is_draft6_only_and_compares_numbers_by_value() {
        let schema = compile(&json!({"const": 1}), Some(Dialect::Draft6)).unwrap();
        let mut errors = Vec::new();
        check(&schema, &json!(1.0), &JsonPointer::root(), &mut errors);
        assert!(errors.is_empty());

        let mut errors = Vec::new();
        check(&schema, &json!(2), &JsonPointer::root(), &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn const_is_ignored_on_draft4() {
        let schema = compile(&json!({"const": 1}), Some(Dialect::Draft4)).unwrap();
        let mut errors = Vec::new();
        check(&schema, &json!(2), &JsonPointer::root(), &mut errors);
        assert!(errors.is_empty());
    }
}
