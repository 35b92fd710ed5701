//! Normalizing metadata fields that arrive in inconsistent encodings.
//!
//! Nodes and clients have written `json_metadata` as a structured object,
//! as JSON text, and as JSON text that was itself JSON encoded a second time.
//! [`normalize_encoding`] maps all of these onto one structured value, or
//! `None` when nothing usable is there.

use serde_json::Value;
use tracing::{debug, error};

use crate::error::EncodingError;

/// Whether a value counts as logically absent.
///
/// `null`, `false`, zero, the empty string, and empty arrays and objects.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Resolve a metadata blob to its structured form.
///
/// - absent values ([`is_falsy`]) give `None`
/// - arrays and objects are returned unchanged
/// - JSON text decoding to an object gives that object
/// - JSON text decoding to a non-empty string is decoded a second time and
///   the result returned whatever its type
/// - JSON text decoding to anything else gives `None` without a diagnostic
///
/// Decoding failures are logged and give `None`.
pub fn normalize_encoding(thing: &Value) -> Option<Value> {
    if is_falsy(thing) {
        debug!("normalize_encoding thing is logically false");
        return None;
    }

    match thing {
        Value::Array(_) | Value::Object(_) => {
            debug!("normalize_encoding thing is already decoded");
            Some(thing.clone())
        }
        Value::String(text) => decode_text(text),
        other => {
            let err = EncodingError::NotText(other.to_string());
            error!(thing = %other, error = %err, "normalize_encoding error");
            None
        }
    }
}

/// [`normalize_encoding`] for text taken straight off the wire.
pub fn normalize_encoding_str(text: &str) -> Option<Value> {
    if text.is_empty() {
        debug!("normalize_encoding thing is logically false");
        return None;
    }
    decode_text(text)
}

fn decode_text(text: &str) -> Option<Value> {
    let mut single = None;
    match decode_stages(text, &mut single) {
        Ok(value) => value,
        Err(err) => {
            error!(
                thing = text,
                single_encoded = ?single,
                error = %err,
                "normalize_encoding error"
            );
            None
        }
    }
}

/// The two-stage decode. `single` keeps the first stage result for the
/// diagnostic when the second stage fails.
fn decode_stages(text: &str, single: &mut Option<Value>) -> Result<Option<Value>, EncodingError> {
    let first: Value = serde_json::from_str(text)?;
    *single = Some(first.clone());

    match first {
        Value::Object(_) => {
            debug!("normalize_encoding thing is single encoded object");
            Ok(Some(first))
        }
        Value::String(inner) if inner.is_empty() => {
            debug!("normalize_encoding thing is single encoded empty string");
            Ok(None)
        }
        Value::String(inner) => {
            let second: Value = serde_json::from_str(&inner)?;
            debug!("normalize_encoding thing is double encoded");
            match second {
                Value::Null => Ok(None),
                value => Ok(Some(value)),
            }
        }
        // Numbers, booleans, arrays and null decoded from text are dropped.
        _ => Ok(None),
    }
}
