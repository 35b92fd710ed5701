//! Helpers for comment and post operations.
//!
//! On chain, a top level post and a reply are both `comment` operations.
//! Their `json_metadata` is free form JSON written by the posting client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::AttributeSource;
use crate::canonical::{canonicalize_url, CanonicalizeOptions};
use crate::encoding::normalize_encoding;
use crate::keys::extract_keys_from_meta;
use crate::types::CanonicalUrl;

/// Path of a comment under its parent: `parent_permlink/author/permlink`.
pub fn build_comment_url(parent_permlink: &str, author: &str, permlink: &str) -> String {
    [parent_permlink, author, permlink].join("/")
}

/// Whether a record is a reply to another post rather than a post.
///
/// Replies created by the reference clients carry a `re-` permlink and a
/// parent author.
pub fn is_comment<S: AttributeSource + ?Sized>(item: &S) -> bool {
    let permlink = item.attribute("permlink").and_then(Value::as_str).unwrap_or("");
    let parent_author = item
        .attribute("parent_author")
        .and_then(Value::as_str)
        .unwrap_or("");
    permlink.starts_with("re-") && !parent_author.is_empty()
}

/// Values mined from a post's `json_metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub tags: Vec<String>,
    pub users: Vec<String>,
    pub links: Vec<CanonicalUrl>,
    pub images: Vec<CanonicalUrl>,
    pub app: Option<String>,
    pub format: Option<String>,
}

/// Decode `json_metadata` in whatever encoding it arrived and mine it.
///
/// Links and images that do not canonicalize are dropped.
pub fn extract_post_metadata(json_metadata: &Value, options: &CanonicalizeOptions) -> PostMetadata {
    let Some(meta) = normalize_encoding(json_metadata) else {
        return PostMetadata::default();
    };

    let urls = |key: &str| -> Vec<CanonicalUrl> {
        extract_keys_from_meta(&meta, key)
            .iter()
            .filter_map(|url| canonicalize_url(url, options))
            .collect()
    };

    PostMetadata {
        tags: extract_keys_from_meta(&meta, "tags"),
        users: extract_keys_from_meta(&meta, "users"),
        links: urls("links"),
        images: urls("image"),
        app: extract_keys_from_meta(&meta, "app").into_iter().next(),
        format: extract_keys_from_meta(&meta, "format").into_iter().next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_build_comment_url() {
        assert_eq!(
            build_comment_url("steem", "alice", "hello-world"),
            "steem/alice/hello-world"
        );
    }

    #[test]
    fn test_is_comment() {
        let reply = record(json!({"permlink": "re-bob-hello-20180101", "parent_author": "bob"}));
        assert!(is_comment(&reply));

        let post = record(json!({"permlink": "hello-world", "parent_author": ""}));
        assert!(!is_comment(&post));

        let orphan = record(json!({"permlink": "re-something", "parent_author": ""}));
        assert!(!is_comment(&orphan));

        assert!(!is_comment(&Map::new()));
    }

    #[test]
    fn test_extract_post_metadata_from_encoded_text() {
        let json_metadata = json!(
            r#"{"tags":["steem","life"],"users":["bob"],"links":["HTTPS://Steemit.com/@bob?b=1&a=2","javascript"],"image":["https://i.imgur.com/x.png#frag"],"app":"steemit/0.1","format":"markdown"}"#
        );
        let meta = extract_post_metadata(&json_metadata, &CanonicalizeOptions::default());

        assert_eq!(meta.tags, vec!["steem", "life"]);
        assert_eq!(meta.users, vec!["bob"]);
        assert_eq!(meta.links.len(), 1);
        assert_eq!(meta.links[0], "https://steemit.com/@bob?a=2&b=1");
        assert_eq!(meta.images[0], "https://i.imgur.com/x.png");
        assert_eq!(meta.app.as_deref(), Some("steemit/0.1"));
        assert_eq!(meta.format.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_extract_post_metadata_keeps_only_network_links() {
        let json_metadata = json!({
            "links": ["javascript:alert(1)", "mailto:a@b.c", "https://busy.org/@bob"],
            "image": ["//i.imgur.com/x.png", "data:image/png;base64,AAAA"]
        });
        let meta = extract_post_metadata(&json_metadata, &CanonicalizeOptions::default());

        assert_eq!(meta.links, vec!["https://busy.org/@bob"]);
        assert_eq!(meta.images, vec!["https://i.imgur.com/x.png"]);
    }

    #[test]
    fn test_extract_post_metadata_absent() {
        let meta = extract_post_metadata(&json!(""), &CanonicalizeOptions::default());
        assert_eq!(meta, PostMetadata::default());
    }
}
