use crate::{
    error::{ValidationError, ValidationErrorKind},
    paths::{JsonPointer, PathChunk},
    schema::Schema,
    validator,
};
use serde_json::Value;
use std::collections::HashSet;

pub(crate) fn check(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    fail_fast: bool,
    errors: &mut Vec<ValidationError>,
) {
    let Value::Object(map) = instance else {
        return;
    };
    let schema_path = || JsonPointer::parse(schema.path());

    if schema.min_properties() > 0 && (map.len() as u64) < schema.min_properties() {
        errors.push(ValidationError::new(
            instance_path.clone(),
            schema_path().push(PathChunk::Keyword("minProperties")),
            ValidationErrorKind::MinPropertiesViolated {
                limit: schema.min_properties(),
                len: map.len(),
            },
        ));
    }
    if let Some(limit) = schema.max_properties() {
        if map.len() as u64 > limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("maxProperties")),
                ValidationErrorKind::MaxPropertiesViolated {
                    limit,
                    len: map.len(),
                },
            ));
        }
    }

    if let Some(required) = schema.required_properties() {
        for property in required {
            if !map.contains_key(property) {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("required")),
                    ValidationErrorKind::RequiredPropMissing {
                        property: property.clone(),
                        instance: instance.clone(),
                    },
                ));
                if fail_fast {
                    return;
                }
            }
        }
    }

    // `propertyNames` validates every key unconditionally; its outcome never
    // gates validation of the corresponding values below, even under
    // fail-fast - it is recorded purely as its own set of diagnostics.
    if let Some(names_schema) = schema.property_names_schema() {
        for key in map.keys() {
            let child_path = instance_path.push(key.as_str());
            let mut sub = validator::evaluate(&names_schema, &Value::String(key.clone()), &child_path, fail_fast);
            errors.append(&mut sub);
        }
    }

    let mut covered: HashSet<&str> = HashSet::new();

    if let Some(properties) = schema.properties() {
        for (key, sub_schema) in properties {
            if let Some(value) = map.get(key) {
                covered.insert(key);
                let child_path = instance_path.push(key);
                let mut sub = validator::evaluate(&sub_schema, value, &child_path, fail_fast);
                let tripped = fail_fast && sub.iter().any(|e| !e.is_annotation());
                errors.append(&mut sub);
                if tripped {
                    return;
                }
            }
        }
    }
    if let Some(pattern_properties) = schema.pattern_properties() {
        for (key, value) in map {
            for (re, sub_schema) in &pattern_properties {
                if re.is_match(key) {
                    covered.insert(key);
                    let child_path = instance_path.push(key.as_str());
                    let mut sub = validator::evaluate(sub_schema, value, &child_path, fail_fast);
                    let tripped = fail_fast && sub.iter().any(|e| !e.is_annotation());
                    errors.append(&mut sub);
                    if tripped {
                        return;
                    }
                }
            }
        }
    }
    match (schema.additional_properties_bool(), schema.additional_properties_schema()) {
        (Some(false), _) => {
            for key in map.keys() {
                if !covered.contains(key.as_str()) {
                    errors.push(ValidationError::new(
                        instance_path.push(key.as_str()),
                        schema_path().push(PathChunk::Keyword("additionalProperties")),
                        ValidationErrorKind::UnallowedAdditionalProperty {
                            property: key.clone(),
                        },
                    ));
                    if fail_fast {
                        return;
                    }
                }
            }
        }
        (_, Some(extra_schema)) => {
            for (key, value) in map {
                if !covered.contains(key.as_str()) {
                    let child_path = instance_path.push(key.as_str());
                    let mut sub = validator::evaluate(&extra_schema, value, &child_path, fail_fast);
                    let tripped = fail_fast && sub.iter().any(|e| !e.is_annotation());
                    errors.append(&mut sub);
                    if tripped {
                        return;
                    }
                }
            }
        }
        _ => {}
    }

    if let Some(deps) = schema.property_dependencies() {
        for (property, required) in deps {
            if map.contains_key(property) {
                if required.iter().any(|r| !map.contains_key(r.as_str())) {
                    errors.push(ValidationError::new(
                        instance_path.clone(),
                        schema_path().push(PathChunk::Keyword("dependencies")),
                        ValidationErrorKind::PropertyDependencyMissing {
                            property: property.clone(),
                            required: required.clone(),
                        },
                    ));
                    if fail_fast {
                        return;
                    }
                }
            }
        }
    }
    if let Some(deps) = schema.schema_dependencies() {
        for (property, dep_schema) in deps {
            if map.contains_key(property) && !validator::is_valid(&dep_schema, instance) {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("dependencies")),
                    ValidationErrorKind::SchemaDependencyViolated {
                        property: property.to_string(),
                    },
                ));
                if fail_fast {
                    return;
                }
            }
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
        check(&schema, instance, &JsonPointer::root(), false, &mut errors);
        errors
    }

    #[test]
    fn required_reports_every_missing_property_in_collect_mode() {
        let schema = json!({"required": ["a", "b"]});
        assert_eq!(errors_for(schema, &json!({})).len(), 2);
    }

    #[test]
    fn additional_properties_false_rejects_uncovered_keys() {
        let schema = json!({"properties": {"a": {}}, "additionalProperties": false});
        assert!(errors_for(schema.clone(), &json!({"a": 1})).is_empty());
        assert_eq!(errors_for(schema, &json!({"a": 1, "b": 2})).len(), 1);
    }

    #[test]
    fn property_names_validates_keys_but_never_blocks_value_validation() {
        let schema = json!({
            "propertyNames": {"pattern": "^[a-z]+$"},
            "properties": {"A": {"type": "string"}},
        });
        let errors = errors_for(schema, &json!({"A": 1}));
        // Two independent failures: the key "A" fails propertyNames, and the
        // value 1 still gets checked against properties/A's "type": "string".
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn schema_dependency_runs_the_dependent_schema_against_the_whole_object() {
        let schema = json!({
            "dependencies": {"credit_card": {"required": ["billing_address"]}},
        });
        assert!(errors_for(schema.clone(), &json!({"credit_card": 1, "billing_address": "x"})).is_empty());
        assert!(!errors_for(schema, &json!({"credit_card": 1})).is_empty());
    }
}
