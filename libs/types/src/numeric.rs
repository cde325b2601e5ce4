//! Lenient numeric coercion for loosely-typed upstream JSON
//!
//! Upstream payloads encode numbers either as native JSON numbers or as
//! decimal strings. Both forms are accepted; anything that does not yield a
//! finite `f64` is rejected.

use serde_json::Value;

/// Coerce a JSON value into a finite `f64`.
///
/// - Numbers are taken as-is.
/// - Strings are trimmed and parsed; an empty string parses as `0`.
/// - Every other kind (null, bool, array, object) yields `None`.
///
/// NaN and infinities are rejected regardless of encoding.
pub fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_decimal_str(s)?,
        _ => return None,
    };
    finite(parsed)
}

/// Parse a decimal string, treating blank input as zero.
pub fn parse_decimal_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

/// Keep `value` only if it is finite.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_numbers() {
        assert_eq!(lenient_f64(&json!(42)), Some(42.0));
        assert_eq!(lenient_f64(&json!(-50)), Some(-50.0));
        assert_eq!(lenient_f64(&json!(1.25)), Some(1.25));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(lenient_f64(&json!("100.5")), Some(100.5));
        assert_eq!(lenient_f64(&json!("  -7 ")), Some(-7.0));
        assert_eq!(lenient_f64(&json!("1e3")), Some(1000.0));
        assert_eq!(lenient_f64(&json!("")), Some(0.0));
    }

    #[test]
    fn test_rejects_non_finite_and_garbage() {
        assert_eq!(lenient_f64(&json!("abc")), None);
        assert_eq!(lenient_f64(&json!("NaN")), None);
        assert_eq!(lenient_f64(&json!("Infinity")), None);
        assert_eq!(lenient_f64(&json!("-inf")), None);
    }

    #[test]
    fn test_rejects_other_kinds() {
        assert_eq!(lenient_f64(&Value::Null), None);
        assert_eq!(lenient_f64(&json!(true)), None);
        assert_eq!(lenient_f64(&json!([1])), None);
        assert_eq!(lenient_f64(&json!({"v": 1})), None);
    }
}
