/**
 * Request Validator
 *
 * Applies a field -> rules table to a raw JSON object.
 *
 * Within a field, rule classes run in order (presence, type, format,
 * uniqueness). Every rule of a class is checked, and the first class that
 * fails ends the field. Errors from all fields are collected so a client sees
 * every problem in one response.
 *
 * On success the validator returns only the declared fields, with strings
 * trimmed (unless the field is `Verbatim`) and numeric strings turned into
 * numbers.
 */

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::backend::error::BackendError;
use crate::backend::validation::errors::ValidationErrors;
use crate::backend::validation::rules::{
    as_integer, as_number, attribute, is_empty, is_valid_email, number_value, Rule, RuleClass,
};

static NULL: Value = Value::Null;

/// Field constraint table
#[derive(Debug, Clone, Default)]
pub struct Validator {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

/// Outcome of checking one field
enum FieldOutcome {
    /// Field absent and optional
    Skip,
    Valid(Value),
    Invalid(Vec<String>),
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the rules of a field
    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut rules: Vec<Rule> = rules.into_iter().collect();
        rules.sort_by_key(Rule::class);
        self.fields.push((name, rules));
        self
    }

    /// Validate `payload`, returning the normalized declared fields.
    ///
    /// # Errors
    ///
    /// * `BackendError::Validation` with every failing field
    /// * `BackendError::Internal` if a uniqueness query fails
    pub async fn validate(&self, payload: &Map<String, Value>) -> Result<Map<String, Value>, BackendError> {
        let mut errors = ValidationErrors::new();
        let mut normalized = Map::new();

        for (name, rules) in &self.fields {
            match check_field(name, rules, payload.get(*name)).await? {
                FieldOutcome::Skip => {}
                FieldOutcome::Valid(value) => {
                    normalized.insert((*name).to_string(), value);
                }
                FieldOutcome::Invalid(messages) => errors.extend(name, messages),
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            tracing::debug!("Validation failed: {}", errors);
            Err(BackendError::Validation(errors))
        }
    }

    /// Validate `payload` and deserialize the normalized fields into `T`
    pub async fn validate_into<T: DeserializeOwned>(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<T, BackendError> {
        let normalized = self.validate(payload).await?;
        serde_json::from_value(Value::Object(normalized))
            .map_err(|e| BackendError::internal(format!("validated payload did not deserialize: {e}")))
    }
}

async fn check_field(
    name: &str,
    rules: &[Rule],
    value: Option<&Value>,
) -> Result<FieldOutcome, BackendError> {
    let attr = attribute(name);
    let required = rules.iter().any(|rule| matches!(rule, Rule::Required));
    let nullable = rules.iter().any(|rule| matches!(rule, Rule::Nullable));

    // presence
    let value = match value {
        Some(value) if !is_empty(value) => value,
        Some(Value::Null) | None if nullable && !required => {
            return Ok(match value {
                Some(_) => FieldOutcome::Valid(Value::Null),
                None => FieldOutcome::Skip,
            });
        }
        _ if required => {
            return Ok(FieldOutcome::Invalid(vec![format!("The {attr} field is required.")]));
        }
        None => return Ok(FieldOutcome::Skip),
        Some(Value::Null) => &NULL,
        // empty string or array on an optional field
        Some(_) if nullable => return Ok(FieldOutcome::Valid(Value::Null)),
        Some(value) => value,
    };

    let numeric = rules
        .iter()
        .any(|rule| matches!(rule, Rule::Integer | Rule::Numeric));
    let verbatim = rules.iter().any(|rule| matches!(rule, Rule::Verbatim));
    let mut normalized = match value {
        Value::String(s) if !verbatim => Value::String(s.trim().to_string()),
        other => other.clone(),
    };

    for class in [RuleClass::Type, RuleClass::Format, RuleClass::Uniqueness] {
        let mut messages = Vec::new();

        for rule in rules.iter().filter(|rule| rule.class() == class) {
            match rule {
                Rule::String => {
                    if !value.is_string() {
                        messages.push(format!("The {attr} field must be a string."));
                    }
                }
                Rule::Integer => match as_integer(value) {
                    Some(n) => normalized = Value::from(n),
                    None => messages.push(format!("The {attr} field must be an integer.")),
                },
                Rule::Numeric => match as_number(value) {
                    Some(n) if !rules.iter().any(|rule| matches!(rule, Rule::Integer)) => {
                        normalized = number_value(n);
                    }
                    Some(_) => {}
                    None => messages.push(format!("The {attr} field must be a number.")),
                },
                Rule::Min(min) => {
                    if let Some(message) = check_bound(&attr, &normalized, numeric, *min, Bound::Min) {
                        messages.push(message);
                    }
                }
                Rule::Max(max) => {
                    if let Some(message) = check_bound(&attr, &normalized, numeric, *max, Bound::Max) {
                        messages.push(message);
                    }
                }
                Rule::Email => {
                    let valid = normalized.as_str().is_some_and(is_valid_email);
                    if !valid {
                        messages.push(format!("The {attr} field must be a valid email address."));
                    }
                }
                Rule::Unique(check) => {
                    let candidate = match &normalized {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    if check.is_taken(&candidate).await? {
                        messages.push(format!("The {attr} has already been taken."));
                    }
                }
                Rule::Required | Rule::Nullable | Rule::Verbatim => {}
            }
        }

        if !messages.is_empty() {
            return Ok(FieldOutcome::Invalid(messages));
        }
    }

    Ok(FieldOutcome::Valid(normalized))
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

fn check_bound(attr: &str, value: &Value, numeric: bool, limit: f64, bound: Bound) -> Option<String> {
    let (measured, unit) = if numeric {
        (as_number(value)?, "")
    } else {
        match value {
            Value::String(s) => (s.chars().count() as f64, " characters"),
            Value::Array(items) => (items.len() as f64, " items"),
            _ => return None,
        }
    };

    match bound {
        Bound::Min if measured < limit => Some(format!("The {attr} field must be at least {limit}{unit}.")),
        Bound::Max if measured > limit => {
            Some(format!("The {attr} field must not be greater than {limit}{unit}."))
        }
        _ => None,
    }
}
