//! # Steem Ingest Block
//!
//! Block preparation and block summaries.
//!
//! ## Overview
//!
//! Preparation is abstracted behind the [`BlockPreparer`] trait so the
//! summarizer does not care where a block came from or how a storage layer
//! lays it out. [`JsonBlockPreparer`] handles blocks in the node's JSON
//! format.
//!
//! ## Key Types
//!
//! - [`BlockPreparer`] - raw block to [`PreparedBlock`]
//! - [`JsonBlockPreparer`] - preparer for node JSON blocks
//! - [`BlockInfo`] - digest produced by [`block_info`]
//! - [`BlockError`] - everything that can go wrong
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use steem_ingest_block::{block_info, JsonBlockPreparer};
//!
//! let raw = json!({
//!     "previous": "0000000900000000000000000000000000000000",
//!     "transactions": [{"operations": [["vote", {"voter": "alice"}]]}]
//! });
//! let info = block_info(&JsonBlockPreparer, &raw).unwrap();
//! assert_eq!(info.block_num, 10);
//! assert_eq!(info.transactions, vec!["vote"]);
//! ```

pub mod error;
pub mod json;
pub mod summary;
pub mod traits;

pub use error::{BlockError, Result};
pub use json::JsonBlockPreparer;
pub use summary::{block_info, summarize, BlockInfo, TRANSACTIONS_PLACEHOLDER};
pub use traits::{BlockPreparer, Operation, PreparedBlock, PreparedTransaction};
