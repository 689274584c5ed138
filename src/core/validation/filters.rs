//! Reusable field coercions
//!
//! A coercion turns the raw text of a form field (or its absence) into a JSON
//! value before the validators run. A failed coercion reports one message and
//! the field's validators are skipped.

use serde_json::{Number, Value};

/// Coercion: field must be present, kept as a string
pub fn string(
    message: impl Into<String>,
) -> impl Fn(Option<&str>) -> Result<Value, String> + Send + Sync + Clone {
    let message = message.into();
    move |raw: Option<&str>| match raw {
        Some(s) => Ok(Value::String(s.to_string())),
        None => Err(message.clone()),
    }
}

/// Coercion: decimal text to a finite number
///
/// A missing or blank field reads as `0` and surrounding whitespace is
/// ignored. Anything else must be decimal text (`12`, `12.5`, `1e3`); hex,
/// binary and octal literals are rejected, as are `NaN` and infinities.
pub fn number(
    message: impl Into<String>,
) -> impl Fn(Option<&str>) -> Result<Value, String> + Send + Sync + Clone {
    let message = message.into();
    move |raw: Option<&str>| {
        let text = raw.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Ok(Value::from(0.0));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| message.clone())
    }
}
