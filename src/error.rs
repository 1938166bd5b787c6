//! Error types: schema-load failures (`CompilationError`) and validation
//! diagnostics (`ValidationError`), mirroring the split used throughout the
//! teacher crate's `error.rs`.
use crate::{paths::JsonPointer, primitive_type::PrimitiveType};
use serde_json::Value;
use std::{error, fmt};

/// Raised when a schema document cannot be turned into a `Schema` at all -
/// a malformed document, or a `$ref` that does not resolve within it.
///
/// This is distinct from `ValidationError`: it is a hard failure about the
/// *schema*, never about an instance being validated.
#[derive(Debug, PartialEq, Eq)]
pub enum CompilationError {
    /// The schema document is not a JSON object or a JSON boolean.
    NotASchema { path: String },
    /// A `$ref` string is not a supported same-document JSON Pointer fragment.
    UnresolvableReference { reference: String, path: String },
    /// A keyword had a value of the wrong shape for its definition, e.g.
    /// `"required": "foo"` instead of `"required": ["foo"]`.
    MalformedKeyword { keyword: &'static str, path: String },
}

impl fmt::Display for CompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilationError::NotASchema { path } => {
                write!(f, "{}: not a valid schema (must be an object or boolean)", path)
            }
            CompilationError::UnresolvableReference { reference, path } => {
                write!(f, "{}: $ref '{}' does not resolve within the document", path, reference)
            }
            CompilationError::MalformedKeyword { keyword, path } => {
                write!(f, "{}: malformed '{}' keyword", path, keyword)
            }
        }
    }
}

impl error::Error for CompilationError {}

/// Raised by `Validator::validate_json` when the `parseJson` convenience is
/// asked to parse a string instance that is not valid JSON. Distinct from
/// both `CompilationError` (the schema, not the instance, is at fault) and
/// `ValidationError` (the instance parsed fine but did not conform).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgumentError {
    pub message: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid argument: {}", self.message)
    }
}

impl error::Error for InvalidArgumentError {}

/// A single validation diagnostic.
///
/// Stringifies as `"<instance_path or '# (root)'>: <message>"`, per the
/// contract callers pattern-match keyword prefixes against (see
/// `ValidationErrorKind`'s `Display` impl below).
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub instance_path: JsonPointer,
    pub schema_path: JsonPointer,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub(crate) fn new(
        instance_path: JsonPointer,
        schema_path: JsonPointer,
        kind: ValidationErrorKind,
    ) -> Self {
        ValidationError {
            instance_path,
            schema_path,
            kind,
        }
    }

    /// `true` for the non-failing `contains` match annotation - it is carried
    /// on the error channel but must never flip the overall validity outcome
    /// nor trigger a fail-fast abort.
    #[must_use]
    pub fn is_annotation(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::ContainsMatch { .. })
    }

    /// Fully rendered message, without the instance path prefix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "# (root): {}", self.kind)
        } else {
            write!(f, "{}: {}", self.instance_path, self.kind)
        }
    }
}

impl error::Error for ValidationError {}

/// The body of a `ValidationError`. Variant names double as the message
/// prefixes tooling is allowed to pattern-match on (`spec` §7/§8): the
/// `Display` impl below always starts each rendered message with the literal
/// text named in the variant's doc comment.
#[derive(Debug, Clone)]
pub enum ValidationErrorKind {
    /// A `false` boolean schema rejects every instance unconditionally.
    FalseSchema,
    Type {
        wanted: Vec<PrimitiveType>,
        got: Value,
    },
    Const {
        expected: Value,
        got: Value,
    },
    Enum {
        options: Value,
        got: Value,
    },
    MaximumExceeded {
        limit: f64,
        got: f64,
    },
    MinimumViolated {
        limit: f64,
        got: f64,
    },
    ExclusiveMaximumExceeded {
        limit: f64,
        got: f64,
    },
    ExclusiveMinimumViolated {
        limit: f64,
        got: f64,
    },
    MultipleOfViolated {
        value: f64,
        multiple_of: f64,
    },
    MaxLengthExceeded {
        limit: u64,
        length: u64,
    },
    MinLengthViolated {
        limit: u64,
        length: u64,
    },
    PatternViolated {
        pattern: String,
        got: String,
    },
    MaxItemsExceeded {
        limit: u64,
        len: usize,
    },
    MinItemsViolated {
        limit: u64,
        len: usize,
    },
    UniqueItemsViolated {
        instance: Value,
        i: usize,
        j: usize,
    },
    AdditionalItemsFalse {
        limit: usize,
    },
    ContainsViolated,
    /// Non-failing annotation: at least one array element matched `contains`.
    ContainsMatch {
        index: usize,
    },
    MinPropertiesViolated {
        limit: u64,
        len: usize,
    },
    MaxPropertiesViolated {
        limit: u64,
        len: usize,
    },
    RequiredPropMissing {
        property: String,
        instance: Value,
    },
    UnallowedAdditionalProperty {
        property: String,
    },
    PropertyDependencyMissing {
        property: String,
        required: Vec<String>,
    },
    SchemaDependencyViolated {
        property: String,
    },
    AllOfViolated,
    AnyOfViolated,
    OneOfViolated,
    NotViolated,
    FormatNotAccepted {
        format: String,
        got: String,
    },
    FormatNotSupported {
        format: String,
    },
    FormatNotSupportedBeforeDraft6 {
        format: String,
    },
    /// Emitted when a format keyword is applied to a non-string instance.
    FormatAgainstNonString {
        format: String,
        got: PrimitiveType,
    },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::FalseSchema => write!(f, "false schema rejects all instances"),
            ValidationErrorKind::Type { wanted, got } => write!(
                f,
                "type: wanted [{}] got {}",
                wanted
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                got
            ),
            ValidationErrorKind::Const { expected, got } => {
                write!(f, "const violated: {} != {}", got, expected)
            }
            ValidationErrorKind::Enum { options, got } => {
                write!(f, "enum violated: {} not in {}", got, options)
            }
            ValidationErrorKind::MaximumExceeded { limit, got } => {
                write!(f, "maximum exceeded: {} > {}", got, limit)
            }
            ValidationErrorKind::MinimumViolated { limit, got } => {
                write!(f, "minimum violated: {} < {}", got, limit)
            }
            ValidationErrorKind::ExclusiveMaximumExceeded { limit, got } => {
                write!(f, "exclusiveMaximum exceeded: {} >= {}", got, limit)
            }
            ValidationErrorKind::ExclusiveMinimumViolated { limit, got } => {
                write!(f, "exclusiveMinimum violated: {} <= {}", got, limit)
            }
            ValidationErrorKind::MultipleOfViolated { value, multiple_of } => {
                write!(f, "multipleOf violated ({} % {})", value, multiple_of)
            }
            ValidationErrorKind::MaxLengthExceeded { limit, length } => {
                write!(f, "maxLength exceeded: {} > {}", length, limit)
            }
            ValidationErrorKind::MinLengthViolated { limit, length } => {
                write!(f, "minLength violated: {} < {}", length, limit)
            }
            ValidationErrorKind::PatternViolated { pattern, got } => {
                write!(f, "pattern violated: '{}' does not match /{}/", got, pattern)
            }
            ValidationErrorKind::MaxItemsExceeded { limit, len } => {
                write!(f, "maxItems exceeded: {} > {}", len, limit)
            }
            ValidationErrorKind::MinItemsViolated { limit, len } => {
                write!(f, "minItems violated: {} < {}", len, limit)
            }
            ValidationErrorKind::UniqueItemsViolated { instance, i, j } => {
                write!(f, "uniqueItems violated: {} [{}]==[{}]", instance, i, j)
            }
            ValidationErrorKind::AdditionalItemsFalse { limit } => {
                write!(f, "additionalItems false: only {} item(s) allowed", limit)
            }
            ValidationErrorKind::ContainsViolated => write!(f, "contains violated"),
            ValidationErrorKind::ContainsMatch { index } => write!(f, "matchedIndex:{}", index),
            ValidationErrorKind::MinPropertiesViolated { limit, len } => {
                write!(f, "minProperties violated: {} < {}", len, limit)
            }
            ValidationErrorKind::MaxPropertiesViolated { limit, len } => {
                write!(f, "maxProperties violated: {} > {}", len, limit)
            }
            ValidationErrorKind::RequiredPropMissing { property, instance } => write!(
                f,
                "required prop missing: {} from {}",
                property, instance
            ),
            ValidationErrorKind::UnallowedAdditionalProperty { property } => {
                write!(f, "unallowed additional property {}", property)
            }
            ValidationErrorKind::PropertyDependencyMissing { property, required } => write!(
                f,
                "prop {} => [{}] required",
                property,
                required.join(", ")
            ),
            ValidationErrorKind::SchemaDependencyViolated { property } => {
                write!(f, "prop {} violated schema dependency", property)
            }
            ValidationErrorKind::AllOfViolated => write!(f, "allOf violated"),
            ValidationErrorKind::AnyOfViolated => write!(f, "anyOf violated"),
            ValidationErrorKind::OneOfViolated => write!(f, "oneOf violated"),
            ValidationErrorKind::NotViolated => write!(f, "not violated"),
            ValidationErrorKind::FormatNotAccepted { format, got } => {
                write!(f, "\"{}\" format not accepted: {}", format, got)
            }
            ValidationErrorKind::FormatNotSupported { format } => {
                write!(f, "{} not supported as format", format)
            }
            ValidationErrorKind::FormatNotSupportedBeforeDraft6 { format } => {
                write!(f, "{} not supported as format before draft6", format)
            }
            ValidationErrorKind::FormatAgainstNonString { format, got } => write!(
                f,
                "{} not supported as format: instance is {}, not a string",
                format, got
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_renders_as_hash() {
        let err = ValidationError::new(
            JsonPointer::root(),
            JsonPointer::root(),
            ValidationErrorKind::AllOfViolated,
        );
        assert_eq!(err.to_string(), "# (root): allOf violated");
    }

    #[test]
    fn invalid_argument_error_displays_its_message() {
        let err = InvalidArgumentError {
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(err.to_string(), "invalid argument: expected value at line 1 column 1");
    }

    #[test]
    fn contains_match_is_annotation_only() {
        let err = ValidationError::new(
            JsonPointer::root(),
            JsonPointer::root(),
            ValidationErrorKind::ContainsMatch { index: 0 },
        );
        assert!(err.is_annotation());
        assert_eq!(err.to_string(), "# (root): matchedIndex:0");
    }
}
