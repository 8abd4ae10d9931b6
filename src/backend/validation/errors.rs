/**
 * Validation Errors
 *
 * Field name to ordered list of human-readable messages. Serializes as a
 * plain JSON object so it can be dropped into the `message` member of the
 * validation envelope.
 */

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Collected field errors of one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors consisting of one message on one field
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Append a message to a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// Append several messages to a field, keeping their order
    pub fn extend(&mut self, field: &str, messages: Vec<String>) {
        if !messages.is_empty() {
            self.0.entry(field.to_string()).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
