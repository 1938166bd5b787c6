use crate::{
    error::{ValidationError, ValidationErrorKind},
    paths::{JsonPointer, PathChunk},
    primitive_type::PrimitiveType,
    schema::Schema,
};
use serde_json::Value;

pub(crate) fn check(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) {
    let Some(wanted) = schema.type_list() else {
        return;
    };
    if wanted.iter().any(|t| matches(*t, instance, schema)) {
        return;
    }
    errors.push(ValidationError::new(
        instance_path.clone(),
        JsonPointer::parse(schema.path()).push(PathChunk::Keyword("type")),
        ValidationErrorKind::Type {
            wanted: wanted.to_vec(),
            got: instance.clone(),
        },
    ));
}

/// `PrimitiveType::of` labels every integral-valued number as `Integer`, which
/// is right for dispatch but wrong for matching: `"number"` must still accept
/// `5`, and on draft-06 `"integer"` must accept `5.0`.
fn matches(wanted: PrimitiveType, instance: &Value, schema: &Schema) -> bool {
    match wanted {
        PrimitiveType::Number => matches!(instance, Value::Number(_)),
        PrimitiveType::Integer => match instance {
            Value::Number(n) if n.is_i64() || n.is_u64() => true,
            Value::Number(n) if schema.version().is_draft6() => {
                n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            _ => false,
        },
        other => PrimitiveType::of(instance) == other,
    }
}
