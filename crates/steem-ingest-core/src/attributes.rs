//! Pruning records down to the fields a table wants.
//!
//! Records reach the pipeline either as JSON objects or as typed structs.
//! [`AttributeSource`] gives both the same read-only view so
//! [`keep_in_dict`] and [`remove_from_dict`] need no knowledge of which one
//! they were given.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AttributeError;

/// A flat view of a record's named fields.
pub trait AttributeSource {
    /// All fields, in the source's natural order.
    fn attributes(&self) -> Vec<(&str, &Value)>;

    /// A single field.
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

impl AttributeSource for Map<String, Value> {
    fn attributes(&self) -> Vec<(&str, &Value)> {
        self.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// A typed struct captured through its `Serialize` impl.
#[derive(Debug, Clone, PartialEq)]
pub struct StructAttributes {
    fields: Map<String, Value>,
}

impl StructAttributes {
    /// Capture `record`. It must serialize to an object.
    pub fn capture<T: Serialize>(record: &T) -> Result<Self, AttributeError> {
        match serde_json::to_value(record)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(AttributeError::NotAnObject),
        }
    }
}

impl AttributeSource for StructAttributes {
    fn attributes(&self) -> Vec<(&str, &Value)> {
        self.fields.attributes()
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Only the fields named in `allowed_keys`.
pub fn keep_in_dict<S: AttributeSource + ?Sized>(
    source: &S,
    allowed_keys: &[&str],
) -> Map<String, Value> {
    source
        .attributes()
        .into_iter()
        .filter(|(key, _)| allowed_keys.contains(key))
        .map(|(key, value)| (key.to_owned(), value.clone()))
        .collect()
}

/// Every field except those named in `remove_keys`.
pub fn remove_from_dict<S: AttributeSource + ?Sized>(
    source: &S,
    remove_keys: &[&str],
) -> Map<String, Value> {
    source
        .attributes()
        .into_iter()
        .filter(|(key, _)| !remove_keys.contains(key))
        .map(|(key, value)| (key.to_owned(), value.clone()))
        .collect()
}
