//! # Steem Ingest Testkit
//!
//! Testing utilities for Steem Ingest.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Block hashes and URLs with their expected normal forms
//! - **Generators**: Proptest strategies for metadata blobs and raw blocks
//! - **Fixtures**: Block builders, sample payloads and log capture
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the values that end up as storage keys:
//!
//! ```rust
//! use steem_ingest_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use steem_ingest_testkit::generators::{raw_block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn block_num_survives(params: BlockParams) {
//!         let raw = raw_block_from_params(&params);
//!         prop_assert_eq!(raw["block_id"].as_str().map(str::len), Some(40));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use serde_json::json;
//! use steem_ingest_testkit::fixtures::{ingestor, BlockBuilder};
//!
//! let raw = BlockBuilder::new(7)
//!     .transaction(vec![("vote", json!({"voter": "alice"}))])
//!     .build();
//! let info = ingestor(100).block_info(&raw).unwrap();
//! assert_eq!(info.block_num, 7);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{block_chain, block_hash, capture_logs, ingestor, BlockBuilder};
pub use generators::{raw_block_from_params, BlockParams, Encoding};
pub use vectors::{hash_vectors, url_vectors, verify_all_vectors, HashVector, UrlVector};
