use std::fmt;

/// The runtime shape of a JSON value, used for `type` checks and error messages.
///
/// Kept as an enum rather than matching on `&str` everywhere so that the `type`
/// keyword validator (the hottest check in the evaluator) never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl PrimitiveType {
    pub(crate) fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "array" => Some(PrimitiveType::Array),
            "boolean" => Some(PrimitiveType::Boolean),
            "integer" => Some(PrimitiveType::Integer),
            "null" => Some(PrimitiveType::Null),
            "number" => Some(PrimitiveType::Number),
            "object" => Some(PrimitiveType::Object),
            "string" => Some(PrimitiveType::String),
            _ => None,
        }
    }

    /// Shape of a `serde_json::Value`, ignoring the integer/number distinction -
    /// that one needs the dialect, so it is handled separately in `keywords::type_`.
    pub(crate) fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PrimitiveType::Null,
            serde_json::Value::Bool(_) => PrimitiveType::Boolean,
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => PrimitiveType::Integer,
            serde_json::Value::Number(_) => PrimitiveType::Number,
            serde_json::Value::String(_) => PrimitiveType::String,
            serde_json::Value::Array(_) => PrimitiveType::Array,
            serde_json::Value::Object(_) => PrimitiveType::Object,
        }
    }
}
