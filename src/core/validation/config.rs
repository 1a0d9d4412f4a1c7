//! Declarative form schemas
//!
//! A [`FormSchema`] lists the fields a form is expected to carry. Every field has
//! an ordered list of filters (coercion) followed by an ordered list of
//! validators. Validation never panics and has no side effects: it yields either
//! the coerced record or a [`FieldErrors`] map holding every failing field.

use super::extractor::FormData;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

type Filter = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;
type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Field name → human readable messages, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message to a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for a field (empty slice when the field is valid)
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Default)]
struct FieldRules {
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

/// Validation configuration for one form
pub struct FormSchema {
    /// Entity the form describes, used in logs
    pub entity_type: &'static str,
    fields: IndexMap<&'static str, FieldRules>,
}

impl FormSchema {
    pub fn new(entity_type: &'static str) -> Self {
        Self {
            entity_type,
            fields: IndexMap::new(),
        }
    }

    /// Add a filter to a field; filters run in insertion order
    pub fn add_filter<F>(&mut self, field: &'static str, filter: F)
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .filters
            .push(Box::new(filter));
    }

    /// Add a validator to a field; the first failing validator wins
    pub fn add_validator<V>(&mut self, field: &'static str, validator: V)
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .validators
            .push(Box::new(validator));
    }

    /// Run filters then validators over every declared field
    ///
    /// Undeclared form fields are dropped. Missing fields are seen as `null`.
    pub fn validate_and_filter(&self, form: &FormData) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut output = Map::new();

        for (&field, rules) in &self.fields {
            let mut value = form
                .get(field)
                .map(|s| Value::String(s.to_string()))
                .unwrap_or(Value::Null);

            let mut filtered = true;
            for filter in &rules.filters {
                match filter(field, value) {
                    Ok(v) => value = v,
                    Err(e) => {
                        errors.add(field, e.to_string());
                        value = Value::Null;
                        filtered = false;
                        break;
                    }
                }
            }

            if filtered {
                if let Some(message) = rules
                    .validators
                    .iter()
                    .find_map(|validator| validator(field, &value).err())
                {
                    errors.add(field, message);
                }
            }

            output.insert(field.to_string(), value);
        }

        if errors.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(errors)
        }
    }

    /// Validate and deserialize into the typed record
    pub fn parse<T: DeserializeOwned>(&self, form: &FormData) -> Result<T, FieldErrors> {
        let value = self.validate_and_filter(form)?;
        serde_json::from_value(value).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.add("_form", e.to_string());
            errors
        })
    }
}

impl fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema")
            .field("entity_type", &self.entity_type)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
