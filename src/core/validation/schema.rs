//! Declarative form schemas
//!
//! A [`Schema`] is data: an ordered list of field rules. Validation runs every
//! rule and either yields the coerced values or the complete set of messages,
//! keyed by field. Sub-schemas are derived with [`Schema::omit`] so that
//! several forms can share the same field rules.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::form::{FieldErrors, FormData};

type Coercion = Arc<dyn Fn(Option<&str>) -> Result<Value, String> + Send + Sync>;
type Validator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Rules for a single form field
#[derive(Clone)]
pub struct FieldRule {
    name: String,
    coercion: Coercion,
    validators: Vec<Validator>,
}

impl FieldRule {
    /// Start a rule for `name` with the coercion applied to its raw text
    pub fn new<C>(name: impl Into<String>, coercion: C) -> Self
    where
        C: Fn(Option<&str>) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            coercion: Arc::new(coercion),
            validators: Vec::new(),
        }
    }

    /// Append a validator; validators run in the order they were added
    pub fn check<V>(mut self, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coerce and validate one raw value
    ///
    /// Returns every validator failure, not only the first one.
    pub fn apply(&self, raw: Option<&str>) -> Result<Value, Vec<String>> {
        let value = (self.coercion)(raw).map_err(|message| vec![message])?;

        let messages: Vec<String> = self
            .validators
            .iter()
            .filter_map(|validator| validator(&self.name, &value).err())
            .collect();

        if messages.is_empty() {
            Ok(value)
        } else {
            Err(messages)
        }
    }
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("name", &self.name)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Ordered collection of field rules
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field rule
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Derive a schema without the named fields
    pub fn omit(&self, names: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|rule| !names.contains(&rule.name()))
                .cloned()
                .collect(),
        }
    }

    /// Names of the fields this schema reads, in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldRule::name)
    }

    /// Run every rule against the form
    ///
    /// Fields the schema does not know are ignored.
    pub fn validate(&self, form: &FormData) -> Result<Map<String, Value>, FieldErrors> {
        let mut values = Map::new();
        let mut errors = FieldErrors::new();

        for rule in &self.fields {
            match rule.apply(form.get(rule.name())) {
                Ok(value) => {
                    values.insert(rule.name().to_string(), value);
                }
                Err(messages) => {
                    errors.insert(rule.name().to_string(), messages);
                }
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }

    /// Validate, then deserialize the coerced values into `T`
    ///
    /// A deserialization failure means `T` and the schema disagree; it is
    /// reported under the `_schema` key rather than panicking.
    pub fn parse<T: DeserializeOwned>(&self, form: &FormData) -> Result<T, FieldErrors> {
        let values = self.validate(form)?;
        serde_json::from_value(Value::Object(values)).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert("_schema".to_string(), vec![e.to_string()]);
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{filters, validators};
    use serde::Deserialize;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .field(FieldRule::new("name", filters::string("name is required")))
            .field(
                FieldRule::new("score", filters::number("score must be a number"))
                    .check(validators::gt(0.0, "score must be positive"))
                    .check(validators::gt(10.0, "score must exceed 10")),
            )
    }

    #[test]
    fn test_validate_success_returns_coerced_values() {
        let form = FormData::new().with("name", "a").with("score", "12");
        let values = schema().validate(&form).unwrap();
        assert_eq!(values["name"], json!("a"));
        assert_eq!(values["score"], json!(12.0));
    }

    #[test]
    fn test_validate_collects_every_failed_check() {
        let form = FormData::new().with("name", "a").with("score", "-1");
        let errors = schema().validate(&form).unwrap_err();
        assert_eq!(
            errors["score"],
            vec!["score must be positive", "score must exceed 10"]
        );
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn test_validate_reports_every_field() {
        let errors = schema().validate(&FormData::new()).unwrap_err();
        assert_eq!(errors["name"], vec!["name is required"]);
        assert_eq!(errors["score"].len(), 2);
        let keys: Vec<&String> = errors.keys().collect();
        assert_eq!(keys, ["name", "score"]);
    }

    #[test]
    fn test_failed_coercion_skips_checks() {
        let form = FormData::new().with("name", "a").with("score", "lots");
        let errors = schema().validate(&form).unwrap_err();
        assert_eq!(errors["score"], vec!["score must be a number"]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let form = FormData::new()
            .with("name", "a")
            .with("score", "11")
            .with("admin", "true");
        let values = schema().validate(&form).unwrap();
        assert!(!values.contains_key("admin"));
    }

    #[test]
    fn test_omit_drops_fields() {
        let derived = schema().omit(&["score"]);
        let names: Vec<&str> = derived.field_names().collect();
        assert_eq!(names, ["name"]);
        assert!(derived.validate(&FormData::new().with("name", "a")).is_ok());
    }

    #[derive(Debug, Deserialize)]
    struct Parsed {
        name: String,
        score: f64,
    }

    #[test]
    fn test_parse_into_typed_record() {
        let form = FormData::new().with("name", "a").with("score", "10.5");
        let parsed: Parsed = schema().parse(&form).unwrap();
        assert_eq!(parsed.name, "a");
        assert_eq!(parsed.score, 10.5);
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Mismatched {
        missing: String,
    }

    #[test]
    fn test_parse_type_mismatch_reported_under_schema_key() {
        let form = FormData::new().with("name", "a").with("score", "11");
        let errors = schema().parse::<Mismatched>(&form).unwrap_err();
        assert!(errors.contains_key("_schema"));
    }
}
