/**
 * Validation Rules
 *
 * Declarative constraints attached to a request field, and the checks that
 * back them. Rules fall into ordered classes:
 *
 * 1. presence   - `Required`
 * 2. type       - `String`, `Integer`, `Numeric`
 * 3. format     - `Min`, `Max`, `Email`
 * 4. uniqueness - `Unique`
 *
 * `Nullable` and `Verbatim` are modifiers. `Nullable` lets an explicit
 * `null` through without running the other rules; `Verbatim` keeps a string
 * exactly as sent instead of trimming it, so length bounds measure the raw
 * value.
 */

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Number, Value};

use crate::backend::store::StoreError;

/// Existence query behind a `unique` rule
#[async_trait]
pub trait UniqueCheck: Send + Sync {
    /// Whether `value` is already taken in the backing store
    async fn is_taken(&self, value: &str) -> Result<bool, StoreError>;
}

/// A constraint on one request field
#[derive(Clone)]
pub enum Rule {
    /// Field must be present and non-empty
    Required,
    /// Explicit `null` is accepted
    Nullable,
    /// String is kept as sent, surrounding whitespace included
    Verbatim,
    /// Field must be a string
    String,
    /// Field must be an integer (JSON number or numeric string)
    Integer,
    /// Field must be a number (JSON number or numeric string)
    Numeric,
    /// Lower bound: character count for strings, value for numbers
    Min(f64),
    /// Upper bound: character count for strings, value for numbers
    Max(f64),
    /// Field must look like an email address
    Email,
    /// Field value must not already exist in the store
    Unique(Arc<dyn UniqueCheck>),
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::Nullable => f.write_str("Nullable"),
            Self::Verbatim => f.write_str("Verbatim"),
            Self::String => f.write_str("String"),
            Self::Integer => f.write_str("Integer"),
            Self::Numeric => f.write_str("Numeric"),
            Self::Min(n) => write!(f, "Min({n})"),
            Self::Max(n) => write!(f, "Max({n})"),
            Self::Email => f.write_str("Email"),
            Self::Unique(_) => f.write_str("Unique(..)"),
        }
    }
}

/// Evaluation class of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleClass {
    Modifier,
    Presence,
    Type,
    Format,
    Uniqueness,
}

impl Rule {
    pub fn class(&self) -> RuleClass {
        match self {
            Self::Nullable | Self::Verbatim => RuleClass::Modifier,
            Self::Required => RuleClass::Presence,
            Self::String | Self::Integer | Self::Numeric => RuleClass::Type,
            Self::Min(_) | Self::Max(_) | Self::Email => RuleClass::Format,
            Self::Unique(_) => RuleClass::Uniqueness,
        }
    }
}

/// Human form of a field name in messages (`tipo_cozinha` -> `tipo cozinha`)
pub(crate) fn attribute(field: &str) -> String {
    field.replace('_', " ")
}

/// Whether a value counts as missing for `Required`
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Read a value as a number, accepting numeric strings
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Read a value as an integer, accepting integral floats and numeric strings
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Normalized JSON form of a number
pub(crate) fn number_value(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Basic structural email check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}
