use crate::{
    error::{ValidationError, ValidationErrorKind},
    helpers,
    paths::{JsonPointer, PathChunk},
    schema::Schema,
    validator,
};
use serde_json::Value;

pub(crate) fn check(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    fail_fast: bool,
    errors: &mut Vec<ValidationError>,
) {
    let Value::Array(items) = instance else {
        return;
    };
    let schema_path = || JsonPointer::parse(schema.path());

    if check_items(schema, items, instance_path, fail_fast, errors) && fail_fast {
        return;
    }

    if let Some(limit) = schema.max_items() {
        if items.len() as u64 > limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("maxItems")),
                ValidationErrorKind::MaxItemsExceeded {
                    limit,
                    len: items.len(),
                },
            ));
        }
    }
    if let Some(limit) = schema.min_items() {
        if (items.len() as u64) < limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("minItems")),
                ValidationErrorKind::MinItemsViolated {
                    limit,
                    len: items.len(),
                },
            ));
        }
    }

    if schema.unique_items() {
        'outer: for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if helpers::equal(&items[i], &items[j]) {
                    errors.push(ValidationError::new(
                        instance_path.clone(),
                        schema_path().push(PathChunk::Keyword("uniqueItems")),
                        ValidationErrorKind::UniqueItemsViolated {
                            instance: instance.clone(),
                            i,
                            j,
                        },
                    ));
                    break 'outer;
                }
            }
        }
    }

    if let Some(contains_schema) = schema.contains() {
        let matched = items
            .iter()
            .enumerate()
            .find(|(_, item)| validator::is_valid(&contains_schema, item))
            .map(|(i, _)| i);
        let kind = match matched {
            Some(index) => ValidationErrorKind::ContainsMatch { index },
            None => ValidationErrorKind::ContainsViolated,
        };
        errors.push(ValidationError::new(
            instance_path.clone(),
            schema_path().push(PathChunk::Keyword("contains")),
            kind,
        ));
    }
}

/// Walks `items`/`additionalItems`, recursing into the evaluator for each
/// element. Returns `true` if a non-annotation error was recorded, so the
/// caller can short-circuit under fail-fast.
fn check_items(
    schema: &Schema,
    items: &[Value],
    instance_path: &JsonPointer,
    fail_fast: bool,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if let Some(single) = schema.items() {
        for (i, item) in items.iter().enumerate() {
            let child_path = instance_path.push(i);
            let mut sub = validator::evaluate(&single, item, &child_path, fail_fast);
            let tripped = fail_fast && sub.iter().any(|e| !e.is_annotation());
            errors.append(&mut sub);
            if tripped {
                return true;
            }
        }
        return false;
    }

    let Some(list) = schema.items_list() else {
        return false;
    };
    for (i, item) in items.iter().enumerate() {
        if let Some(item_schema) = list.get(i) {
            let child_path = instance_path.push(i);
            let mut sub = validator::evaluate(item_schema, item, &child_path, fail_fast);
            let tripped = fail_fast && sub.iter().any(|e| !e.is_annotation());
            errors.append(&mut sub);
            if tripped {
                return true;
            }
            continue;
        }
        let child_path = instance_path.push(i);
        match (schema.additional_items_bool(), schema.additional_items_schema()) {
            (Some(false), _) => {
                errors.push(ValidationError::new(
                    child_path,
                    JsonPointer::parse(schema.path()).push(PathChunk::Keyword("additionalItems")),
                    ValidationErrorKind::AdditionalItemsFalse { limit: list.len() },
                ));
                if fail_fast {
                    return true;
                }
            }
            (_, Some(extra)) => {
                let mut sub = validator::evaluate(&extra, item, &child_path, fail_fast);
                let tripped = fail_fast && sub.iter().any(|e| !e.is_annotation());
                errors.append(&mut sub);
                if tripped {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile::compile, dialect::Dialect};
    use serde_json::json;

    fn errors_for(schema_json: Value, instance: &Value) -> Vec<ValidationError> {
        let schema = compile(&schema_json, Some(Dialect::Draft6)).unwrap();
        let mut errors = Vec::new();
        check(&schema, instance, &JsonPointer::root(), false, &mut errors);
        errors
    }

    #[test]
    fn contains_annotates_the_first_matching_index() {
        let schema = json!({"contains": {"type": "number", "minimum": 3}});
        let errors = errors_for(schema, &json!([1, 2, 3, 4]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_annotation());
        assert_eq!(errors[0].to_string(), "# (root): matchedIndex:2");
    }

    #[test]
    fn contains_fails_when_nothing_matches() {
        let schema = json!({"contains": {"const": 9}});
        let errors = errors_for(schema, &json!([1, 2, 3]));
        assert_eq!(errors.len(), 1);
        assert!(!errors[0].is_annotation());
    }

    #[test]
    fn unique_items_reports_the_first_duplicate_pair() {
        let errors = errors_for(json!({"uniqueItems": true}), &json!([1, 2, 1.0]));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn additional_items_false_rejects_extras_past_the_tuple() {
        let schema = json!({"items": [{"type": "string"}], "additionalItems": false});
        assert!(errors_for(schema.clone(), &json!(["a"])).is_empty());
        assert_eq!(errors_for(schema, &json!(["a", "b"])).len(), 1);
    }
}
