//! Error types for block preparation and summaries.

use steem_ingest_core::{BlockNum, MalformedHashError};
use thiserror::Error;

/// Errors that can occur while preparing or summarizing a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// The block's `previous` or `block_id` cannot carry a block number.
    #[error("malformed block hash: {0}")]
    MalformedHash(#[from] MalformedHashError),

    /// The raw block is not a JSON object, nor JSON text of one.
    #[error("raw block is not an object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field has the wrong shape.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// `block_id` disagrees with `previous`.
    #[error("block_id addresses block {from_block_id} but previous implies {from_previous}")]
    BlockNumMismatch {
        from_previous: BlockNum,
        from_block_id: BlockNum,
    },

    /// An operation is neither `[type, payload]` nor `{type, value}`.
    #[error("invalid operation {operation} in transaction {transaction}")]
    InvalidOperation { transaction: usize, operation: usize },

    /// A transaction without operations cannot be summarized.
    #[error("transaction {index} has no operations")]
    EmptyTransaction { index: usize },
}

/// Result type for block operations.
pub type Result<T> = std::result::Result<T, BlockError>;
