//! Reusable field validators
//!
//! Each validator receives the field name and the (already filtered) value and
//! returns the user-facing message on failure. Messages are supplied by the
//! schema so that every rule can carry the wording shown next to the form input.

use serde_json::Value;

/// Validator: field is present and, for strings, not empty
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value {
        Value::Null => Err(message.to_string()),
        Value::String(s) if s.is_empty() => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: a dollar amount that rounds to between one cent and `max_cents`
///
/// Anything that is not a number fails as well; coercion happens in the
/// `to_number` filter beforehand.
pub fn cents_in_range(
    max_cents: i64,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_f64().map(|dollars| (dollars * 100.0).round()) {
        Some(cents) if cents.is_finite() && cents >= 1.0 && cents <= max_cents as f64 => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: value must be one of the allowed strings
pub fn in_list(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(message.to_string()),
    }
}
