use crate::{
    error::{ValidationError, ValidationErrorKind},
    paths::{JsonPointer, PathChunk},
    schema::Schema,
};
use serde_json::Value;
use std::f64::EPSILON;

pub(crate) fn check(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) {
    let Some(n) = instance.as_f64() else {
        return;
    };
    let schema_path = || JsonPointer::parse(schema.path());

    if schema.version().is_draft6() {
        // draft-06: `exclusiveMaximum`/`exclusiveMinimum` are standalone
        // numbers that take precedence over `maximum`/`minimum`, not a
        // conjunction with them.
        if let Some(limit) = schema.exclusive_maximum_value() {
            if n >= limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("exclusiveMaximum")),
                    ValidationErrorKind::ExclusiveMaximumExceeded { limit, got: n },
                ));
            }
        } else if let Some(limit) = schema.maximum() {
            if n > limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("maximum")),
                    ValidationErrorKind::MaximumExceeded { limit, got: n },
                ));
            }
        }
        if let Some(limit) = schema.exclusive_minimum_value() {
            if n <= limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("exclusiveMinimum")),
                    ValidationErrorKind::ExclusiveMinimumViolated { limit, got: n },
                ));
            }
        } else if let Some(limit) = schema.minimum() {
            if n < limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("minimum")),
                    ValidationErrorKind::MinimumViolated { limit, got: n },
                ));
            }
        }
    } else {
        // draft-04: `exclusiveMaximum`/`exclusiveMinimum` are booleans that
        // only change the comparison `maximum`/`minimum` use.
        if let Some(limit) = schema.maximum() {
            let exclusive = schema.exclusive_maximum_flag().unwrap_or(false);
            let violated = if exclusive { n >= limit } else { n > limit };
            if violated {
                let kind = if exclusive {
                    ValidationErrorKind::ExclusiveMaximumExceeded { limit, got: n }
                } else {
                    ValidationErrorKind::MaximumExceeded { limit, got: n }
                };
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("maximum")),
                    kind,
                ));
            }
        }
        if let Some(limit) = schema.minimum() {
            let exclusive = schema.exclusive_minimum_flag().unwrap_or(false);
            let violated = if exclusive { n <= limit } else { n < limit };
            if violated {
                let kind = if exclusive {
                    ValidationErrorKind::ExclusiveMinimumViolated { limit, got: n }
                } else {
                    ValidationErrorKind::MinimumViolated { limit, got: n }
                };
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path().push(PathChunk::Keyword("minimum")),
                    kind,
                ));
            }
        }
    }

    if let Some(multiple_of) = schema.multiple_of() {
        if !is_multiple_of(n, multiple_of) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("multipleOf")),
                ValidationErrorKind::MultipleOfViolated {
                    value: n,
                    multiple_of,
                },
            ));
        }
    }
}

/// Whole-valued divisors compare by an exact remainder; a fractional divisor
/// (or dividend) instead checks the remainder lands within an epsilon of an
/// integer, since `n / multiple_of` is rarely exact in floating point.
fn is_multiple_of(n: f64, multiple_of: f64) -> bool {
    if n.fract() == 0.0 && multiple_of.fract() == 0.0 {
        n % multiple_of == 0.0
    } else {
        let remainder = (n / multiple_of) % 1.0;
        remainder < EPSILON && remainder < (1.0 - EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile::compile, dialect::Dialect};
    use serde_json::json;

    fn errors_for(schema_json: Value, dialect: Dialect, instance: &Value) -> Vec<ValidationError> {
        let schema = compile(&schema_json, Some(dialect)).unwrap();
        let mut errors = Vec::new();
        check(&schema, instance, &JsonPointer::root(), &mut errors);
        errors
    }

    #[test]
    fn draft4_exclusive_maximum_is_a_flag_paired_with_maximum() {
        let schema = json!({"maximum": 5, "exclusiveMaximum": true});
        assert!(!errors_for(schema.clone(), Dialect::Draft4, &json!(5)).is_empty());
        assert!(errors_for(schema, Dialect::Draft4, &json!(4.9)).is_empty());
    }

    #[test]
    fn draft6_exclusive_maximum_takes_precedence_over_maximum() {
        let schema = json!({"maximum": 10, "exclusiveMaximum": 5});
        // 7 is under `maximum` but violates the standalone `exclusiveMaximum`,
        // which wins on draft-06.
        assert!(!errors_for(schema, Dialect::Draft6, &json!(7)).is_empty());
    }

    #[test]
    fn multiple_of_accepts_whole_number_ratio() {
        let schema = json!({"multipleOf": 0.1});
        assert!(errors_for(schema.clone(), Dialect::Draft6, &json!(3.0)).is_empty());
        assert!(!errors_for(schema, Dialect::Draft6, &json!(3.05)).is_empty());
    }

    #[test]
    fn non_numeric_instances_are_ignored() {
        let schema = json!({"maximum": 1});
        assert!(errors_for(schema, Dialect::Draft6, &json!("not a number")).is_empty());
    }
}
