//! Canonical forms for URLs found in user content.
//!
//! Links and images in post metadata are written by hand and by dozens of
//! clients. Canonicalization makes cosmetically different spellings of the
//! same resource compare equal:
//!
//! - scheme and host lowercased, default ports dropped, dot segments and
//!   percent-encoding normalized (the WHATWG rules of the `url` crate)
//! - query parameters sorted by name, then value
//! - fragment removed unless asked to keep it
//! - protocol relative links (`//host/path`) resolved as `https:`
//!
//! A canonical URL always has a scheme and a network location, so
//! `javascript:` and `mailto:` links are rejected.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::UrlError;
use crate::types::CanonicalUrl;

/// Scheme given to protocol relative links.
const DEFAULT_SCHEME: &str = "https";

/// Which query parameters survive canonicalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFilter {
    /// Keep every parameter.
    #[default]
    All,
    /// Keep only the named parameters.
    Keep(Vec<String>),
    /// Drop the named parameters.
    Drop(Vec<String>),
}

impl QueryFilter {
    fn admits(&self, name: &str) -> bool {
        match self {
            QueryFilter::All => true,
            QueryFilter::Keep(names) => names.iter().any(|n| n == name),
            QueryFilter::Drop(names) => !names.iter().any(|n| n == name),
        }
    }
}

/// Options for [`canonicalize_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizeOptions {
    /// Keep the `#fragment`.
    pub keep_fragments: bool,
    /// Keep parameters with an empty value (`?a=&b=1`).
    pub keep_blank_values: bool,
    /// Parameter selection.
    pub query_filter: QueryFilter,
}

impl Default for CanonicalizeOptions {
    fn default() -> Self {
        Self {
            keep_fragments: false,
            keep_blank_values: true,
            query_filter: QueryFilter::All,
        }
    }
}

/// Canonicalize `url`, or `None` if it is not a usable absolute URL.
///
/// Failures are logged, never returned.
pub fn canonicalize_url(url: &str, options: &CanonicalizeOptions) -> Option<CanonicalUrl> {
    let canonical = match prepare(url, options) {
        Ok(canonical) => canonical,
        Err(error) => {
            warn!(url, %error, "url preparation error");
            return None;
        }
    };

    if canonical.as_str() != url {
        debug!(url, canonical_url = %canonical, "canonical_url changed");
    }

    match check_absolute(canonical) {
        Ok(valid) => Some(valid),
        Err(error) => {
            warn!(url, %error, "bad url encountered");
            None
        }
    }
}

/// Fallible form of [`canonicalize_url`] for callers that want the reason.
pub fn try_canonicalize_url(
    url: &str,
    options: &CanonicalizeOptions,
) -> Result<CanonicalUrl, UrlError> {
    check_absolute(prepare(url, options)?)
}

fn prepare(url: &str, options: &CanonicalizeOptions) -> Result<Url, UrlError> {
    let trimmed = url.trim();
    let mut parsed = if trimmed.starts_with("//") {
        Url::parse(&format!("{}:{}", DEFAULT_SCHEME, trimmed))?
    } else {
        Url::parse(trimmed)?
    };

    if parsed.query().is_some() {
        let mut pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .into_owned()
            .filter(|(_, value)| options.keep_blank_values || !value.is_empty())
            .filter(|(name, _)| options.query_filter.admits(name))
            .collect();
        pairs.sort();

        if pairs.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(&pairs);
        }
    }

    if !options.keep_fragments {
        parsed.set_fragment(None);
    }

    Ok(parsed)
}

fn check_absolute(url: Url) -> Result<CanonicalUrl, UrlError> {
    if url.scheme().is_empty() || url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::NotAbsolute(url.into()));
    }
    Ok(CanonicalUrl::new_unchecked(url.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(url: &str) -> Option<String> {
        canonicalize_url(url, &CanonicalizeOptions::default()).map(CanonicalUrl::into_string)
    }

    #[test]
    fn test_lowercase_scheme_and_sorted_query() {
        assert_eq!(
            canon("HTTP://Example.com/a?b=2&a=1").as_deref(),
            Some("http://example.com/a?a=1&b=2")
        );
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(canon("not a url"), None);
        assert_eq!(canon(""), None);
        assert_eq!(canon("/relative/path"), None);
    }

    #[test]
    fn test_default_port_and_fragment_removed() {
        assert_eq!(
            canon("https://steemit.com:443/trending#top").as_deref(),
            Some("https://steemit.com/trending")
        );
    }

    #[test]
    fn test_keep_fragments() {
        let options = CanonicalizeOptions {
            keep_fragments: true,
            ..Default::default()
        };
        let url = canonicalize_url("https://steemit.com/@bob#comments", &options).unwrap();
        assert_eq!(url, "https://steemit.com/@bob#comments");
    }

    #[test]
    fn test_dot_segments_resolved() {
        assert_eq!(
            canon("http://example.com/a/./b/../c").as_deref(),
            Some("http://example.com/a/c")
        );
    }

    #[test]
    fn test_empty_query_removed() {
        assert_eq!(canon("http://example.com/?").as_deref(), Some("http://example.com/"));
    }

    #[test]
    fn test_blank_values() {
        assert_eq!(
            canon("http://example.com/?b=&a=1").as_deref(),
            Some("http://example.com/?a=1&b=")
        );

        let options = CanonicalizeOptions {
            keep_blank_values: false,
            ..Default::default()
        };
        let url = canonicalize_url("http://example.com/?b=&a=1", &options).unwrap();
        assert_eq!(url, "http://example.com/?a=1");
    }

    #[test]
    fn test_query_filter() {
        let keep = CanonicalizeOptions {
            query_filter: QueryFilter::Keep(vec!["id".into()]),
            ..Default::default()
        };
        let url = canonicalize_url("http://example.com/v?utm_source=x&id=9", &keep).unwrap();
        assert_eq!(url, "http://example.com/v?id=9");

        let drop = CanonicalizeOptions {
            query_filter: QueryFilter::Drop(vec!["utm_source".into()]),
            ..Default::default()
        };
        let url = canonicalize_url("http://example.com/v?utm_source=x&id=9", &drop).unwrap();
        assert_eq!(url, "http://example.com/v?id=9");
    }

    #[test]
    fn test_equal_after_canonicalization() {
        let a = canon("http://EXAMPLE.com:80/x?b=1&a=2#frag");
        let b = canon("http://example.com/x?a=2&b=1");
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_try_canonicalize_reports_reason() {
        let err = try_canonicalize_url("not a url", &CanonicalizeOptions::default()).unwrap_err();
        assert!(matches!(err, UrlError::Parse(_)));
    }

    #[test]
    fn test_urls_without_network_location_rejected() {
        let options = CanonicalizeOptions::default();
        for url in ["javascript:alert(1)", "mailto:a@b.c", "data:text/plain,hi", "file:///etc/passwd"] {
            assert_eq!(canon(url), None, "{url}");
            let err = try_canonicalize_url(url, &options).unwrap_err();
            assert!(matches!(err, UrlError::NotAbsolute(_)), "{url}: {err}");
        }
    }

    #[test]
    fn test_protocol_relative_gets_https() {
        assert_eq!(
            canon("//i.imgur.com/x.png").as_deref(),
            Some("https://i.imgur.com/x.png")
        );
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CanonicalizeOptions =
            serde_json::from_str(r#"{"query_filter": {"drop": ["ref"]}}"#).unwrap();
        assert!(options.keep_blank_values);
        assert!(!options.keep_fragments);
        assert_eq!(options.query_filter, QueryFilter::Drop(vec!["ref".into()]));
    }
}
