//! Shared value-comparison logic used by `const`, `enum` and `uniqueItems`.
use num_cmp::NumCmp;
use serde_json::Value;

macro_rules! num_cmp {
    ($left:expr, $right:expr) => {
        if let Some(b) = $right.as_u64() {
            NumCmp::num_eq($left, b)
        } else if let Some(b) = $right.as_i64() {
            NumCmp::num_eq($left, b)
        } else {
            NumCmp::num_eq($left, $right.as_f64().expect("always valid"))
        }
    };
}

/// JSON equality per the glossary: numbers compare by value (`1` == `1.0`),
/// strings by codepoint sequence, arrays elementwise in order, objects as
/// unordered key sets with recursive equality of values. Numeric comparison
/// goes through `num_cmp` rather than `as_f64` on both sides, so a `u64`/`i64`
/// outside `f64`'s exact integer range still compares correctly against a
/// float. Mirrors the teacher crate's `helpers::equal`, extended to recurse
/// into arrays and objects instead of falling back to derived `PartialEq`.
pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            if let Some(a) = left.as_u64() {
                num_cmp!(a, right)
            } else if let Some(a) = left.as_i64() {
                num_cmp!(a, right)
            } else {
                num_cmp!(left.as_f64().expect("always valid"), right)
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(left, right)| equal(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, left_value)| {
                    right.get(key).is_some_and(|right_value| equal(left_value, right_value))
                })
        }
        (left, right) => left == right,
    }
}

/// `true` if `value` deep-equals any element of `options`, per `equal`.
/// Used for `enum` and for the pairwise pass behind `uniqueItems`.
pub(crate) fn contains(options: &[Value], value: &Value) -> bool {
    options.iter().any(|option| equal(option, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_by_value() {
        assert!(equal(&json!(1), &json!(1.0)));
        assert!(!equal(&json!(1), &json!(2)));
    }

    #[test]
    fn objects_compare_as_unordered_key_sets() {
        assert!(equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1.0})));
        assert!(!equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn arrays_compare_elementwise_in_order() {
        assert!(equal(&json!([1, "x", true]), &json!([1.0, "x", true])));
        assert!(!equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn contains_uses_deep_equality() {
        let options = vec![json!(1), json!("a"), json!({"k": 1.0})];
        assert!(contains(&options, &json!({"k": 1})));
        assert!(!contains(&options, &json!({"k": 2})));
    }
}
