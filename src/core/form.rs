//! Raw form submissions and the state handed back to the form
//!
//! [`FormData`] is what the browser posted, field by field, as text.
//! [`FormState`] is what an action returns when it does not redirect: a
//! per-field error map for re-rendering the form and/or a status message.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name → every message produced for that field, in schema order
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Raw text fields of a submitted form
///
/// Deserializes from `application/x-www-form-urlencoded` bodies (via
/// `axum::Form`). When a field repeats, the first value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct FormData {
    fields: IndexMap<String, String>,
}

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a field unless it is already present
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Raw value of a field, `None` when the form did not carry it
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<FormData> for Vec<(String, String)> {
    fn from(form: FormData) -> Self {
        form.fields.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.insert(name, value);
        }
        form
    }
}

/// Result of an action attempt, as the form sees it
///
/// Serializes to `{ "errors"?: { <field>: [..] }, "message": string | null }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FormState {
    /// State carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    /// State carrying field errors and a summary message
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    /// Messages recorded for one field (empty when none)
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_data_first_value_wins() {
        let form = FormData::new().with("status", "paid").with("status", "pending");
        assert_eq!(form.get("status"), Some("paid"));
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn test_form_data_missing_field_is_none() {
        let form = FormData::new().with("amount", "");
        assert_eq!(form.get("amount"), Some(""));
        assert_eq!(form.get("customerId"), None);
    }

    #[test]
    fn test_form_data_deserializes_from_pairs() {
        let form: FormData =
            serde_json::from_value(json!([["customerId", "c1"], ["amount", "12.5"]])).unwrap();
        assert_eq!(form.get("customerId"), Some("c1"));
        assert_eq!(form.get("amount"), Some("12.5"));
    }

    #[test]
    fn test_form_state_message_only_omits_errors() {
        let state = FormState::message("Deleted Invoice");
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({ "message": "Deleted Invoice" })
        );
    }

    #[test]
    fn test_form_state_errors_keep_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert("customerId".into(), vec!["Please Select A Customer.".into()]);
        errors.insert("amount".into(), vec!["too small".into()]);
        let state = FormState::invalid(errors, "Missing Fields.");

        let json = serde_json::to_string(&state).unwrap();
        let customer = json.find("customerId").unwrap();
        let amount = json.find("amount").unwrap();
        assert!(customer < amount);
        assert_eq!(state.field_errors("amount"), ["too small".to_string()]);
        assert!(state.field_errors("status").is_empty());
    }

    #[test]
    fn test_form_state_null_message() {
        let state = FormState::default();
        assert_eq!(serde_json::to_value(&state).unwrap(), json!({ "message": null }));
    }
}
