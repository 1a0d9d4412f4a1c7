//! Reusable field filters
//!
//! Filters transform raw form values before validation. Form submissions only
//! ever carry strings, so coercion into numbers happens here.

use anyhow::Result;
use serde_json::{Number, Value};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: coerce a string into a JSON number
///
/// An empty string coerces to `0`, mirroring numeric coercion of blank inputs.
/// Strings that do not parse, or parse to a non-finite value, become `null` so
/// that the validator reports them.
pub fn to_number() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        let Some(s) = value.as_str() else {
            return Ok(value);
        };

        let s = s.trim();
        if s.is_empty() {
            return Ok(Value::from(0));
        }

        Ok(s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        let result = f("name", json!("  hello  ")).expect("should not fail");
        assert_eq!(result, json!("hello"));
    }

    #[test]
    fn test_trim_empty_string() {
        let f = trim();
        let result = f("name", json!("   ")).expect("should not fail");
        assert_eq!(result, json!(""));
    }

    #[test]
    fn test_trim_null_passthrough() {
        let f = trim();
        let result = f("name", json!(null)).expect("should not fail");
        assert_eq!(result, json!(null));
    }

    // === to_number() ===

    #[test]
    fn test_to_number_parses_decimal() {
        let f = to_number();
        let result = f("amount", json!("19.99")).expect("should not fail");
        assert_eq!(result.as_f64(), Some(19.99));
    }

    #[test]
    fn test_to_number_parses_negative() {
        let f = to_number();
        let result = f("amount", json!(" -5 ")).expect("should not fail");
        assert_eq!(result.as_f64(), Some(-5.0));
    }

    #[test]
    fn test_to_number_empty_is_zero() {
        let f = to_number();
        let result = f("amount", json!("")).expect("should not fail");
        assert_eq!(result.as_f64(), Some(0.0));
    }

    #[test]
    fn test_to_number_garbage_is_null() {
        let f = to_number();
        assert_eq!(f("amount", json!("ten")).expect("should not fail"), json!(null));
    }

    #[test]
    fn test_to_number_infinite_is_null() {
        let f = to_number();
        assert_eq!(f("amount", json!("inf")).expect("should not fail"), json!(null));
    }

    #[test]
    fn test_to_number_null_passthrough() {
        let f = to_number();
        assert_eq!(f("amount", json!(null)).expect("should not fail"), json!(null));
    }
}
