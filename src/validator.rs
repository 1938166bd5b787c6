//! The recursive evaluator: walks a compiled `Schema` and an instance in
//! lock step, in the fixed keyword order laid out here, accumulating
//! `ValidationError`s. There is deliberately one dispatcher, not one
//! `Validate` implementation per keyword family - every family lives in
//! `keywords::*` as a plain function over the same `(schema, instance,
//! instance_path, errors)` shape.
use crate::{
    error::{InvalidArgumentError, ValidationError, ValidationErrorKind},
    keywords,
    paths::JsonPointer,
    schema::Schema,
};
use serde_json::Value;

/// Controls whether `Validator::validate` stops at the first failing
/// keyword or collects every diagnostic it can find.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    pub fail_fast: bool,
    /// Gates `Validator::validate_json`: when set, a raw JSON-text instance is
    /// parsed into a native value before validation; when unset, the text is
    /// validated as a literal string instance instead.
    pub parse_json: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            fail_fast: false,
            parse_json: false,
        }
    }
}

/// Stateful only in the sense that it owns a fixed set of options; each
/// `validate` call gets its own error list, per the single-threaded,
/// synchronous contract of the evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    #[must_use]
    pub fn new(options: ValidationOptions) -> Self {
        Validator { options }
    }

    /// Validate `instance` against `schema`, returning every diagnostic
    /// (subject to `fail_fast`). `matchedIndex:` annotations from `contains`
    /// are included but never counted as failures by `is_valid`-style callers.
    #[must_use]
    pub fn validate(&self, schema: &Schema, instance: &Value) -> Vec<ValidationError> {
        evaluate(schema, instance, &JsonPointer::root(), self.options.fail_fast)
    }

    /// `true` if `instance` has no non-annotation errors against `schema`.
    #[must_use]
    pub fn is_valid(&self, schema: &Schema, instance: &Value) -> bool {
        is_valid(schema, instance)
    }

    /// The `parseJson` convenience: when `options.parse_json` is set,
    /// `instance_json` is parsed as JSON before validation and a parse
    /// failure is surfaced as an `InvalidArgumentError` rather than folded
    /// into the diagnostic list; when unset, the raw text is validated as a
    /// literal string instance.
    pub fn validate_json(
        &self,
        schema: &Schema,
        instance_json: &str,
    ) -> Result<Vec<ValidationError>, InvalidArgumentError> {
        let instance = if self.options.parse_json {
            serde_json::from_str(instance_json).map_err(|e| InvalidArgumentError {
                message: e.to_string(),
            })?
        } else {
            Value::String(instance_json.to_string())
        };
        Ok(self.validate(schema, &instance))
    }
}

/// Fresh fail-fast check with its error list discarded, used both by
/// `Validator::is_valid` and by `allOf`/`anyOf`/`oneOf`/`not`/`contains` to
/// get a pass/fail verdict on a branch without surfacing its diagnostics.
pub(crate) fn is_valid(schema: &Schema, instance: &Value) -> bool {
    evaluate(schema, instance, &JsonPointer::root(), true)
        .iter()
        .all(ValidationError::is_annotation)
}

/// The single recursive dispatcher. Keyword families run in a fixed order;
/// under fail-fast, evaluation stops as soon as a family has produced a
/// non-annotation error.
pub(crate) fn evaluate(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    fail_fast: bool,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(allowed) = schema.schema_bool() {
        if !allowed {
            errors.push(ValidationError::new(
                instance_path.clone(),
                instance_path.clone(),
                ValidationErrorKind::FalseSchema,
            ));
        }
        return errors;
    }

    if let Some(reference) = schema.reference() {
        let key = schema.end_path(reference);
        if let Some(target) = schema.resolve(&key) {
            return evaluate(&target, instance, instance_path, fail_fast);
        }
        // Compilation guarantees every `$ref` resolves; an unresolved
        // reference here would already have failed `compile`.
        return errors;
    }

    macro_rules! stop_if_failed {
        () => {
            if fail_fast && errors.iter().any(|e: &ValidationError| !e.is_annotation()) {
                return errors;
            }
        };
    }

    keywords::type_::check(schema, instance, instance_path, &mut errors);
    stop_if_failed!();
    keywords::const_::check(schema, instance, instance_path, &mut errors);
    stop_if_failed!();
    keywords::enum_::check(schema, instance, instance_path, &mut errors);
    stop_if_failed!();
    keywords::array_::check(schema, instance, instance_path, fail_fast, &mut errors);
    stop_if_failed!();
    keywords::string_::check(schema, instance, instance_path, &mut errors);
    stop_if_failed!();
    keywords::numeric::check(schema, instance, instance_path, &mut errors);
    stop_if_failed!();
    keywords::composition::check(schema, instance, instance_path, &mut errors);
    stop_if_failed!();
    keywords::format_::check(schema, instance, instance_path, &mut errors);
    stop_if_failed!();
    keywords::object_::check(schema, instance, instance_path, fail_fast, &mut errors);

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile::compile, dialect::Dialect};
    use serde_json::json;

    #[test]
    fn boolean_true_schema_accepts_everything() {
        let schema = compile(&json!(true), Some(Dialect::Draft6)).unwrap();
        let validator = Validator::default();
        assert!(validator.validate(&schema, &json!(42)).is_empty());
    }

    #[test]
    fn boolean_false_schema_rejects_everything() {
        let schema = compile(&json!(false), Some(Dialect::Draft6)).unwrap();
        let validator = Validator::default();
        assert_eq!(validator.validate(&schema, &json!(null)).len(), 1);
    }

    #[test]
    fn fail_fast_stops_at_the_first_failing_keyword_family() {
        let schema = compile(
            &json!({"type": "string", "minLength": 10}),
            Some(Dialect::Draft6),
        )
        .unwrap();
        let validator = Validator::new(ValidationOptions {
            fail_fast: true,
            parse_json: false,
        });
        // Fails both `type` and (if reached) `minLength` under collect-all;
        // fail-fast must report only the first.
        let errors = validator.validate(&schema, &json!(5));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn collect_all_reports_every_object_level_failure_scenario_f() {
        let schema = compile(
            &json!({
                "type": "object",
                "required": ["a"],
                "properties": {"a": {"type": "integer"}},
                "additionalProperties": false,
            }),
            Some(Dialect::Draft6),
        )
        .unwrap();
        let validator = Validator::default();

        let errors = validator.validate(&schema, &json!({"a": 1, "b": 2}));
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("unallowed additional property b")));

        let errors = validator.validate(&schema, &json!({"a": "x"}));
        assert!(errors.iter().any(|e| e.instance_path.to_string() == "/a"));
    }

    #[test]
    fn validate_json_parses_the_instance_when_parse_json_is_set() {
        let schema = compile(&json!({"type": "integer"}), Some(Dialect::Draft6)).unwrap();
        let validator = Validator::new(ValidationOptions {
            fail_fast: false,
            parse_json: true,
        });
        assert!(validator.validate_json(&schema, "5").unwrap().is_empty());
        assert!(!validator.validate_json(&schema, "\"5\"").unwrap().is_empty());
    }

    #[test]
    fn validate_json_signals_invalid_argument_on_unparsable_text() {
        let schema = compile(&json!(true), Some(Dialect::Draft6)).unwrap();
        let validator = Validator::new(ValidationOptions {
            fail_fast: false,
            parse_json: true,
        });
        assert!(validator.validate_json(&schema, "{not json").is_err());
    }

    #[test]
    fn validate_json_treats_text_as_a_literal_string_when_parse_json_is_unset() {
        let schema = compile(&json!({"type": "string"}), Some(Dialect::Draft6)).unwrap();
        let validator = Validator::default();
        assert!(validator.validate_json(&schema, "5").unwrap().is_empty());
    }

    #[test]
    fn ref_to_a_definitions_entry_resolves_and_validates() {
        let schema = compile(
            &json!({
                "definitions": {"pos": {"type": "integer", "minimum": 0}},
                "properties": {"age": {"$ref": "#/definitions/pos"}},
            }),
            Some(Dialect::Draft6),
        )
        .unwrap();
        let validator = Validator::default();
        assert!(validator.validate(&schema, &json!({"age": 30})).is_empty());
        assert!(!validator.validate(&schema, &json!({"age": -1})).is_empty());
    }
}
