//! Error types for steem ingest core.
//!
//! Only [`MalformedHashError`] and [`ChunkError`] reach callers. The others
//! are recovered where they occur and surface as diagnostics.

use thiserror::Error;

/// A block hash that cannot carry a block number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedHashError {
    #[error("block hash too short: need 8 hex characters, got {len}")]
    TooShort { len: usize },

    #[error("block hash prefix is not hex: {prefix:?}")]
    NonHex { prefix: String },
}

/// Invalid batching request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
}

/// Metadata decoding failure.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("value is not JSON text: {0}")]
    NotText(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// URL canonicalization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("url parse error: {0}")]
    Parse(#[from] url::ParseError),

    #[error("url lacks a scheme or network location: {0}")]
    NotAbsolute(String),
}

/// Language classifier failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("no features in text")]
    NoFeatures,

    #[error("classifier failed: {0}")]
    Failed(String),
}

/// Capturing a struct as an attribute source failed.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("value does not serialize to an object")]
    NotAnObject,
}
