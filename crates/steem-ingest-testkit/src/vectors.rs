//! Golden test vectors for deterministic verification.
//!
//! Block numbers and canonical URLs end up as database keys, so every
//! implementation of the pipeline must agree on them exactly.

use steem_ingest_core::{block_num_from_hash, canonicalize_url, BlockNum, CanonicalizeOptions};

/// A block hash and the block number it encodes.
#[derive(Debug, Clone)]
pub struct HashVector {
    pub name: &'static str,
    pub hash: &'static str,
    /// `None` when the hash must be rejected.
    pub expected: Option<BlockNum>,
}

/// A URL and its canonical form under default options.
#[derive(Debug, Clone)]
pub struct UrlVector {
    pub name: &'static str,
    pub url: &'static str,
    /// `None` when the URL must be rejected.
    pub expected: Option<&'static str>,
}

/// Get all block hash vectors.
pub fn hash_vectors() -> Vec<HashVector> {
    vec![
        HashVector {
            name: "genesis successor",
            hash: "0000000109833ce528d5bbfb3f6225b39ee10086",
            expected: Some(1),
        },
        HashVector {
            name: "mainnet block 20000028",
            hash: "01312d1c7fc8e6b1f57a1b1ab4bb4e5b8d0f9d57",
            expected: Some(20_000_028),
        },
        HashVector {
            name: "uppercase hex",
            hash: "00BC614E",
            expected: Some(12_345_678),
        },
        HashVector {
            name: "largest prefix",
            hash: "ffffffff",
            expected: Some(4_294_967_295),
        },
        HashVector {
            name: "too short",
            hash: "0abc",
            expected: None,
        },
        HashVector {
            name: "non-hex prefix",
            hash: "0000zz0100000000",
            expected: None,
        },
    ]
}

/// Get all URL vectors.
pub fn url_vectors() -> Vec<UrlVector> {
    vec![
        UrlVector {
            name: "uppercase scheme and host, unsorted query",
            url: "HTTP://Example.com/a?b=2&a=1",
            expected: Some("http://example.com/a?a=1&b=2"),
        },
        UrlVector {
            name: "default https port and fragment",
            url: "https://steemit.com:443/@alice/hello#comments",
            expected: Some("https://steemit.com/@alice/hello"),
        },
        UrlVector {
            name: "bare host gets a root path",
            url: "https://busy.org",
            expected: Some("https://busy.org/"),
        },
        UrlVector {
            name: "equal names sorted by value",
            url: "http://example.com/?tag=b&tag=a",
            expected: Some("http://example.com/?tag=a&tag=b"),
        },
        UrlVector {
            name: "surrounding whitespace",
            url: "  https://steemit.com/trending  ",
            expected: Some("https://steemit.com/trending"),
        },
        UrlVector {
            name: "free text",
            url: "not a url",
            expected: None,
        },
        UrlVector {
            name: "relative path",
            url: "/@alice/hello",
            expected: None,
        },
        UrlVector {
            name: "protocol relative image",
            url: "//i.imgur.com/x.png",
            expected: Some("https://i.imgur.com/x.png"),
        },
        UrlVector {
            name: "script link",
            url: "javascript:alert(1)",
            expected: None,
        },
        UrlVector {
            name: "mail link",
            url: "mailto:a@b.c",
            expected: None,
        },
        UrlVector {
            name: "invalid port",
            url: "http://example.com:99999/",
            expected: None,
        },
    ]
}

/// Check every vector, returning `(name, matches, actual)` per vector.
///
/// Call this to verify your implementation matches the reference.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let hashes = hash_vectors().into_iter().map(|v| {
        let actual = block_num_from_hash(v.hash).ok();
        (v.name.to_string(), actual == v.expected, format!("{:?}", actual))
    });

    let options = CanonicalizeOptions::default();
    let urls = url_vectors().into_iter().map(move |v| {
        let actual = canonicalize_url(v.url, &options);
        let matches = actual.as_ref().map(|u| u.as_str()) == v.expected;
        (v.name.to_string(), matches, format!("{:?}", actual))
    });

    hashes.chain(urls).collect()
}
