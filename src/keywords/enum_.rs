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
    let Some(options) = schema.enum_values() else {
        return;
    };
    if helpers::contains(options, instance) {
        return;
    }
    errors.push(ValidationError::new(
        instance_path.clone(),
        JsonPointer::parse(schema.path()).push(PathChunk::Keyword("enum")),
        ValidationErrorKind::Enum {
            options: Value::Array(options.to_vec()),
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
    fn enum_rejects_values_outside_the_list() {
        let schema = compile(&json!({"enum": ["a", "b"]}), Some(Dialect::Draft6)).unwrap();
        let mut errors = Vec::new();
        check(&schema, &json!("c"), &JsonPointer::root(), &mut errors);
        assert_eq!(errors.len(), 1);
    }
}
