//! Reusable field validators
//!
//! Validators run on the coerced value. Each one that fails contributes its
//! message to the field's error list; a validator that does not apply to the
//! value's type lets it through.

use serde_json::Value;

/// Validator: number must be strictly greater than `bound`
pub fn gt(
    bound: f64,
    message: impl Into<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    let message = message.into();
    move |_: &str, value: &Value| match value.as_f64() {
        Some(num) if num <= bound => Err(message.clone()),
        _ => Ok(()),
    }
}

/// Validator: string must be one of the allowed literals
pub fn one_of(
    allowed: &'static [&'static str],
    message: impl Into<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    let message = message.into();
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !allowed.contains(&s) => Err(message.clone()),
        _ => Ok(()),
    }
}

/// Validator: date must match format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            match chrono::NaiveDate::parse_from_str(s, format) {
                Ok(_) => Ok(()),
                Err(_) => Err(format!(
                    "'{}' must be a date formatted as {} (got: {})",
                    field, format, s
                )),
            }
        } else {
            Ok(())
        }
    }
}
