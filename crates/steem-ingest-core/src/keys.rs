//! Mining nested metadata for known keys.
//!
//! Post metadata has no fixed schema: `tags` may sit at the top level, under
//! a client specific object, or inside a list of objects. [`find_keys`] walks
//! the whole tree and yields every value stored under a key name.
//!
//! `serde_json::Value` owns its children, so every tree is acyclic and the
//! walk always terminates.

use serde_json::Value;
use tracing::warn;

/// Depth-first, pre-order search for all values stored under `key`.
///
/// For an object holding `key`, its value is yielded before the walk descends
/// into the object's children, so an outer match precedes inner ones. Object
/// values are visited in insertion order.
pub fn find_keys<'a>(node: &'a Value, key: &'a str) -> FindKeys<'a> {
    FindKeys {
        key,
        stack: vec![node],
    }
}

/// Iterator returned by [`find_keys`].
///
/// A clone continues from the current position. Call [`find_keys`] again
/// to start over.
#[derive(Debug, Clone)]
pub struct FindKeys<'a> {
    key: &'a str,
    stack: Vec<&'a Value>,
}

impl<'a> Iterator for FindKeys<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Value::Array(items) => {
                    self.stack.extend(items.iter().rev());
                }
                Value::Object(map) => {
                    self.stack.extend(map.values().rev());
                    if let Some(hit) = map.get(self.key) {
                        return Some(hit);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// One key name or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyNames<'a> {
    One(&'a str),
    Many(Vec<&'a str>),
}

impl<'a> KeyNames<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        let keys: &[&'a str] = match self {
            KeyNames::One(key) => std::slice::from_ref(key),
            KeyNames::Many(keys) => keys,
        };
        keys.iter().copied()
    }
}

impl<'a> From<&'a str> for KeyNames<'a> {
    fn from(key: &'a str) -> Self {
        KeyNames::One(key)
    }
}

impl<'a> From<&'a [&'a str]> for KeyNames<'a> {
    fn from(keys: &'a [&'a str]) -> Self {
        KeyNames::Many(keys.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for KeyNames<'a> {
    fn from(keys: [&'a str; N]) -> Self {
        KeyNames::Many(keys.to_vec())
    }
}

impl<'a> From<&'a [String]> for KeyNames<'a> {
    fn from(keys: &'a [String]) -> Self {
        KeyNames::Many(keys.iter().map(String::as_str).collect())
    }
}

/// Collect the string values stored under `keys` anywhere in `meta`.
///
/// Keys are processed in the given order, hits in [`find_keys`] order.
/// A string hit is kept, a list hit contributes its string elements, and
/// anything else is logged and dropped.
pub fn extract_keys_from_meta<'a>(meta: &Value, keys: impl Into<KeyNames<'a>>) -> Vec<String> {
    let keys = keys.into();
    let mut extracted = Vec::new();

    for key in keys.iter() {
        for item in find_keys(meta, key) {
            match item {
                Value::String(s) => extracted.push(s.clone()),
                Value::Array(items) => {
                    for element in items {
                        match element {
                            Value::String(s) => extracted.push(s.clone()),
                            other => warn!(key, item = %other, "unusual item in meta list"),
                        }
                    }
                }
                other => warn!(key, item = %other, "unusual item in meta"),
            }
        }
    }

    extracted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outer_match_before_inner() {
        let node = json!({"a": {"a": 1, "b": 2}});
        let hits: Vec<&Value> = find_keys(&node, "a").collect();
        assert_eq!(hits, vec![&json!({"a": 1, "b": 2}), &json!(1)]);
    }

    #[test]
    fn test_lists_are_searched() {
        let node = json!([{"k": "x"}, [{"k": "y"}], 3, {"other": {"k": "z"}}]);
        let hits: Vec<&Value> = find_keys(&node, "k").collect();
        assert_eq!(hits, vec![&json!("x"), &json!("y"), &json!("z")]);
    }

    #[test]
    fn test_depth_first_order() {
        let node = json!({
            "first": {"deep": {"k": 1}},
            "k": 0,
            "second": {"k": 2}
        });
        let hits: Vec<&Value> = find_keys(&node, "k").collect();
        assert_eq!(hits, vec![&json!(0), &json!(1), &json!(2)]);
    }

    #[test]
    fn test_scalars_yield_nothing() {
        assert_eq!(find_keys(&json!("a"), "a").count(), 0);
        assert_eq!(find_keys(&Value::Null, "a").count(), 0);
    }

    #[test]
    fn test_fresh_call_restarts() {
        let node = json!({"a": [{"a": "x"}]});
        let first: Vec<_> = find_keys(&node, "a").collect();
        let second: Vec<_> = find_keys(&node, "a").collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_extract_list_is_flattened() {
        let meta = json!({"tags": ["x", "y"]});
        assert_eq!(extract_keys_from_meta(&meta, "tags"), vec!["x", "y"]);
    }

    #[test]
    fn test_extract_multiple_keys_in_order() {
        let meta = json!({
            "users": ["bob"],
            "tags": "life",
            "nested": {"tags": ["steem"], "users": "alice"}
        });
        let extracted = extract_keys_from_meta(&meta, ["tags", "users"]);
        assert_eq!(extracted, vec!["life", "steem", "bob", "alice"]);
    }

    #[test]
    fn test_extract_drops_unusual_items() {
        let meta = json!({"tags": 5, "inner": {"tags": ["ok", 7, null]}});
        assert_eq!(extract_keys_from_meta(&meta, "tags"), vec!["ok"]);
    }

    #[test]
    fn test_extract_from_owned_key_list() {
        let keys = vec!["image".to_string()];
        let meta = json!({"image": ["https://i.imgur.com/a.png"]});
        assert_eq!(
            extract_keys_from_meta(&meta, keys.as_slice()),
            vec!["https://i.imgur.com/a.png"]
        );
    }

    #[test]
    fn test_missing_key() {
        let meta = json!({"tags": ["x"]});
        assert!(extract_keys_from_meta(&meta, "links").is_empty());
    }
}
