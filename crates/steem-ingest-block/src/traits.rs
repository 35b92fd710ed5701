//! BlockPreparer trait: the interface to block preparation.
//!
//! Preparation turns a raw block as served by a node into the typed shape
//! the rest of the pipeline reads. The summarizer depends only on this
//! trait, so storage layers can plug in their own table preparation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use steem_ingest_core::BlockNum;

use crate::error::Result;

/// A single operation: its type name and untouched payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Short type name, e.g. `vote` or `comment`.
    pub op_type: String,
    pub payload: Value,
}

impl Operation {
    pub fn new(op_type: impl Into<String>, payload: Value) -> Self {
        Self {
            op_type: op_type.into(),
            payload,
        }
    }
}

/// A transaction with its operations in block order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparedTransaction {
    pub transaction_id: Option<String>,
    pub operations: Vec<Operation>,
}

impl PreparedTransaction {
    /// Type name of the first operation, if any.
    pub fn first_op_type(&self) -> Option<&str> {
        self.operations.first().map(|op| op.op_type.as_str())
    }
}

/// A block ready for summarizing and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedBlock {
    pub block_num: BlockNum,
    pub previous: String,
    pub block_id: Option<String>,
    pub timestamp: Option<String>,
    pub witness: Option<String>,
    pub transactions: Vec<PreparedTransaction>,
}

impl PreparedBlock {
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Total operations across all transactions.
    pub fn operation_count(&self) -> usize {
        self.transactions.iter().map(|tx| tx.operations.len()).sum()
    }

    /// All operations in block order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.transactions.iter().flat_map(|tx| tx.operations.iter())
    }
}

/// Prepares raw blocks.
///
/// Implementations must not panic on malformed input; they return a
/// [`crate::BlockError`] instead. Well-formed blocks must always prepare.
pub trait BlockPreparer: Send + Sync {
    fn prepare(&self, raw: &Value) -> Result<PreparedBlock>;
}

impl<F> BlockPreparer for F
where
    F: Fn(&Value) -> Result<PreparedBlock> + Send + Sync,
{
    fn prepare(&self, raw: &Value) -> Result<PreparedBlock> {
        self(raw)
    }
}
