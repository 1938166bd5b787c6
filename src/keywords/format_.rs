use crate::{
    dialect::Dialect,
    error::{ValidationError, ValidationErrorKind},
    formats,
    paths::{JsonPointer, PathChunk},
    primitive_type::PrimitiveType,
    schema::Schema,
};
use chrono::DateTime;
use serde_json::Value;
use std::cmp::Ordering;

pub(crate) fn check(
    schema: &Schema,
    instance: &Value,
    instance_path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) {
    let schema_path = || JsonPointer::parse(schema.path());

    let Value::String(s) = instance else {
        if let Some(format) = schema.format() {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("format")),
                ValidationErrorKind::FormatAgainstNonString {
                    format: format.to_string(),
                    got: PrimitiveType::of(instance),
                },
            ));
        }
        return;
    };

    if let Some(format) = schema.format() {
        match evaluate(format, s, schema.version()) {
            Outcome::Matched => {}
            Outcome::NotMatched => errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("format")),
                ValidationErrorKind::FormatNotAccepted {
                    format: format.to_string(),
                    got: s.clone(),
                },
            )),
            Outcome::NotSupportedBeforeDraft6 => errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("format")),
                ValidationErrorKind::FormatNotSupportedBeforeDraft6 {
                    format: format.to_string(),
                },
            )),
            Outcome::UnknownFormat => errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword("format")),
                ValidationErrorKind::FormatNotSupported {
                    format: format.to_string(),
                },
            )),
        }
    }

    check_format_range(schema, s, instance_path, errors);
}

enum Outcome {
    Matched,
    NotMatched,
    /// `json-pointer`, `uri-reference` and `uri-template` do not exist before draft-06.
    NotSupportedBeforeDraft6,
    /// Not one of the format tags this core recognizes at all.
    UnknownFormat,
}

/// A format tag the core recognizes but whose predicate is host-supplied.
/// Per spec, a missing predicate behaves as always-false, not as permissive.
fn evaluate(format: &str, value: &str, dialect: Dialect) -> Outcome {
    let matched = |ok: bool| if ok { Outcome::Matched } else { Outcome::NotMatched };
    let host = |tag: &str| matched(formats::host_predicate(tag).map_or(false, |predicate| predicate(value)));
    match format {
        "date" => matched(formats::is_date(value)),
        "date-time" => matched(formats::is_date_time(value)),
        "time" => matched(formats::is_time(value)),
        "ipv4" => matched(formats::is_ipv4(value)),
        "ipv6" => matched(formats::is_ipv6(value)),
        "hostname" => matched(formats::is_hostname(value)),
        "json-pointer" if dialect.is_draft6() => matched(formats::is_json_pointer(value)),
        "json-pointer" => Outcome::NotSupportedBeforeDraft6,
        "uri-reference" | "uri-template" if dialect.is_draft6() => host(format),
        "uri-reference" | "uri-template" => Outcome::NotSupportedBeforeDraft6,
        "uri" | "email" => host(format),
        _ => Outcome::UnknownFormat,
    }
}

/// `formatMinimum`/`Maximum`/`ExclusiveMinimum`/`ExclusiveMaximum` parse the
/// schema literal and the instance as ISO-8601 date-times regardless of what
/// `format` says, and compare by `sign(schema - value)`.
fn check_format_range(
    schema: &Schema,
    value: &str,
    instance_path: &JsonPointer,
    errors: &mut Vec<ValidationError>,
) {
    let schema_path = || JsonPointer::parse(schema.path());
    let checks: [(&str, Option<&str>, fn(Ordering) -> bool); 4] = [
        ("formatMinimum", schema.format_minimum(), |ord| ord == Ordering::Greater),
        ("formatMaximum", schema.format_maximum(), |ord| ord == Ordering::Less),
        ("formatExclusiveMinimum", schema.format_exclusive_minimum(), |ord| {
            ord != Ordering::Less
        }),
        ("formatExclusiveMaximum", schema.format_exclusive_maximum(), |ord| {
            ord != Ordering::Greater
        }),
    ];
    for (keyword, limit, schema_fails) in checks {
        let Some(limit) = limit else {
            continue;
        };
        let (Some(limit_dt), Some(value_dt)) = (parse_iso8601(limit), parse_iso8601(value)) else {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword(keyword)),
                ValidationErrorKind::FormatNotAccepted {
                    format: "date-time".to_string(),
                    got: value.to_string(),
                },
            ));
            continue;
        };
        if schema_fails(limit_dt.cmp(&value_dt)) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path().push(PathChunk::Keyword(keyword)),
                ValidationErrorKind::FormatNotAccepted {
                    format: keyword.to_string(),
                    got: value.to_string(),
                },
            ));
        }
    }
}

/// Accepts strict RFC3339 as well as an offset-less `date-time`, treating the
/// latter as UTC - `formatMinimum` et al. are commonly written without an
/// explicit offset.
fn parse_iso8601(value: &str) -> Option<DateTime<chrono::FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    let naive = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    let utc = chrono::FixedOffset::east_opt(0).unwrap();
    Some(chrono::TimeZone::from_utc_datetime(&utc, &naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use serde_json::json;

    fn errors_for(schema_json: Value, dialect: Dialect, instance: &Value) -> Vec<ValidationError> {
        let schema = compile(&schema_json, Some(dialect)).unwrap();
        let mut errors = Vec::new();
        check(&schema, instance, &JsonPointer::root(), &mut errors);
        errors
    }

    #[test]
    fn date_format_accepts_calendar_dates_only() {
        let schema = json!({"format": "date"});
        assert!(errors_for(schema.clone(), Dialect::Draft6, &json!("2022-07-01")).is_empty());
        assert_eq!(errors_for(schema, Dialect::Draft6, &json!("2022-07-01T23:59:59Z")).len(), 1);
    }

    #[test]
    fn time_format_accepts_bare_time_of_day() {
        let schema = json!({"format": "time"});
        assert!(errors_for(schema.clone(), Dialect::Draft6, &json!("23:59:59")).is_empty());
        assert_eq!(errors_for(schema, Dialect::Draft6, &json!("2022-07-01")).len(), 1);
    }

    #[test]
    fn json_pointer_format_is_gated_to_draft6() {
        let schema = json!({"format": "json-pointer"});
        assert!(errors_for(schema.clone(), Dialect::Draft6, &json!("/a/b")).is_empty());
        assert_eq!(errors_for(schema, Dialect::Draft4, &json!("/a/b")).len(), 1);
    }

    #[test]
    fn unregistered_host_format_behaves_as_always_false() {
        let schema = json!({"format": "uri"});
        let errors = errors_for(schema, Dialect::Draft6, &json!("anything"));
        assert_eq!(errors.len(), 1);
        assert!(!errors[0].is_annotation());
    }

    #[test]
    fn unknown_format_tag_is_reported_as_unsupported() {
        let schema = json!({"format": "not-a-real-format"});
        let errors = errors_for(schema, Dialect::Draft6, &json!("whatever"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("not supported as format"));
    }

    #[test]
    fn format_against_non_string_instance_is_reported() {
        let schema = json!({"format": "date"});
        let errors = errors_for(schema, Dialect::Draft6, &json!(42));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("not a string"));
    }

    #[test]
    fn format_minimum_and_exclusive_maximum_bound_a_date_time_range() {
        let schema = json!({
            "format": "date-time",
            "formatMinimum": "2022-07-02T00:00:00",
            "formatExclusiveMaximum": "2022-09-01T00:00:00",
        });
        assert!(errors_for(schema.clone(), Dialect::Draft6, &json!("2022-07-02T00:00:00")).is_empty());
        assert!(errors_for(schema.clone(), Dialect::Draft6, &json!("2022-08-31T00:00:00")).is_empty());
        assert!(!errors_for(schema, Dialect::Draft6, &json!("2022-09-01T00:00:00")).is_empty());
    }
}
