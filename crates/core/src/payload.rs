//! Payload: the argument and result shape of every command
//!
//! A payload is a flat mapping from string keys to [`Value`]s. Two
//! conditions that look alike on many hosts are kept apart here:
//!
//! | Wire shape | `Payload::get` |
//! |------------|----------------|
//! | key absent | `None` |
//! | key present, null | `Some(&Value::Null)` |
//!
//! Handlers receive payloads by shared reference and never change them;
//! results are always built as a fresh payload.

use std::collections::HashMap;

use crate::value::Value;

/// String-keyed mapping of untyped values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: HashMap<String, Value>,
}

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used when constructing result payloads
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up a key; `None` means the key is absent
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether the key is present (with any value, including null)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the payload has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.entries
    }

    /// Parse a JSON object document
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or its top level is
    /// not an object.
    pub fn from_json_str(text: &str) -> Result<Self, PayloadJsonError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| PayloadJsonError::Parse(e.to_string()))?;
        match Value::from(json) {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(PayloadJsonError::NotAnObject(other.type_name())),
        }
    }

    /// Render as a JSON object document
    pub fn to_json_string(&self) -> String {
        serde_json::Value::from(Value::Object(self.entries.clone())).to_string()
    }
}

impl From<HashMap<String, Value>> for Payload {
    fn from(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl From<Payload> for Value {
    fn from(p: Payload) -> Self {
        Value::Object(p.entries)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Failure to read a payload from JSON text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadJsonError {
    /// The text is not valid JSON
    #[error("invalid JSON: {0}")]
    Parse(String),

    /// The document parsed, but its top level is not an object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}
