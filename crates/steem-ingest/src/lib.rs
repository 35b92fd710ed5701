//! # Steem Ingest
//!
//! The unified API for normalizing Steem blockchain data before it is
//! stored, searched, or analyzed.
//!
//! ## Overview
//!
//! Raw blocks and post metadata are untrusted, partially structured and
//! inconsistently encoded. This crate provides:
//!
//! - **Block summaries**: counts and operation types per block, in batches
//!   and across blocking workers
//! - **Metadata mining**: tags, users, links and images from `json_metadata`
//!   whether it arrives decoded, JSON encoded, or JSON encoded twice
//! - **URL canonicalization**: comparable forms of user supplied links
//!
//! One bad record never aborts a batch of metadata: failures are logged
//! through `tracing` and the record is skipped. Only malformed blocks are
//! reported as errors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use serde_json::json;
//! use steem_ingest::{IngestConfig, Ingestor};
//! use steem_ingest::block::JsonBlockPreparer;
//!
//! async fn example() {
//!     let ingestor = Ingestor::new(JsonBlockPreparer, IngestConfig::default());
//!
//!     let blocks = vec![json!({
//!         "previous": "0000000900000000000000000000000000000000",
//!         "transactions": [{"operations": [["vote", {"voter": "alice"}]]}]
//!     })];
//!
//!     let infos = ingestor.summarize_parallel(blocks).await.unwrap();
//!     println!("{}", infos[0].render_brief());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `steem_ingest::core` - normalization primitives
//! - `steem_ingest::block` - block preparation and summaries

pub mod error;
pub mod ingestor;

// Re-export component crates
pub use steem_ingest_block as block;
pub use steem_ingest_core as core;

// Re-export main types for convenience
pub use error::{IngestError, Result};
pub use ingestor::{CommentDigest, IngestConfig, Ingestor};

// Re-export commonly used types
pub use steem_ingest_block::{BlockError, BlockInfo, BlockPreparer, JsonBlockPreparer, PreparedBlock};
pub use steem_ingest_core::{
    BlockHash, BlockNum, CanonicalUrl, CanonicalizeOptions, LanguageClassifier, PostMetadata,
    QueryFilter,
};
