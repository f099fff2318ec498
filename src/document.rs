//! Read-only accessors over the generic document tree.
//!
//! The validator never assumes a section has the right shape: anything that is
//! not a map where a map is expected reads as an empty map, and anything that is
//! not a sequence where a sequence is expected reads as an empty slice.

use serde_json::{Map, Value};

/// A view over a map-shaped section of the document.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a>(Option<&'a Map<String, Value>>);

impl<'a> Fields<'a> {
    pub fn of(value: &'a Value) -> Self {
        Fields(value.as_object())
    }

    /// Key presence, regardless of the value stored under it.
    pub fn has(&self, key: &str) -> bool {
        self.0.is_some_and(|map| map.contains_key(key))
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|map| map.get(key))
    }

    /// The value under `key`, only if it is truthy.
    pub fn truthy(&self, key: &str) -> Option<&'a Value> {
        self.get(key).filter(|value| is_truthy(value))
    }
}

/// `null`, `false`, zero and empty strings, sequences and maps are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Render a possibly-absent value for a diagnostic message.
pub fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// The text used to compare node ids and edge endpoints.
pub fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The entries of a sequence, or nothing when the value is not a sequence.
pub fn entries(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        _ => &[],
    }
}
