//! # Steem Ingest Core
//!
//! Pure normalization primitives for indexing Steem blocks and posts.
//!
//! This crate contains no I/O, no storage, no networking. Every function is
//! a synchronous computation over its arguments; the only side effect is
//! `tracing` diagnostics.
//!
//! ## Modules
//!
//! - [`hash`] - block numbers from block hashes
//! - [`chunk`] - lazy fixed-size batching
//! - [`encoding`] - single/double encoded JSON metadata
//! - [`keys`] - recursive key search in nested JSON
//! - [`canonical`] - URL canonicalization
//! - [`attributes`] - pruning records to a set of fields
//! - [`post`] - comment helpers and metadata mining
//! - [`language`] - language detection policy
//!
//! ## Failure policy
//!
//! Dirty input data never aborts a batch: decoding and URL failures are
//! logged and mapped to `None`. Only caller contract violations, such as a
//! malformed block hash, are returned as errors.

pub mod attributes;
pub mod canonical;
pub mod chunk;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod keys;
pub mod language;
pub mod post;
pub mod types;

pub use attributes::{keep_in_dict, remove_from_dict, AttributeSource, StructAttributes};
pub use canonical::{canonicalize_url, try_canonicalize_url, CanonicalizeOptions, QueryFilter};
pub use chunk::{chunkify, Chunks, DEFAULT_CHUNK_SIZE};
pub use encoding::{is_falsy, normalize_encoding, normalize_encoding_str};
pub use error::{
    AttributeError, ChunkError, ClassifierError, EncodingError, MalformedHashError, UrlError,
};
pub use hash::{block_num_from_hash, block_num_from_previous};
pub use keys::{extract_keys_from_meta, find_keys, FindKeys, KeyNames};
pub use language::{detect_language, LanguageClassifier, MIN_TEXT_LENGTH_FOR_DETECTION};
pub use post::{build_comment_url, extract_post_metadata, is_comment, PostMetadata};
pub use types::{BlockHash, BlockNum, CanonicalUrl};
