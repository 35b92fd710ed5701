//! Block summaries: a compact digest of what a block contains.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use steem_ingest_core::BlockNum;

use crate::error::{BlockError, Result};
use crate::traits::{BlockPreparer, PreparedBlock};

/// Placeholder in [`BlockInfo::brief`] for the transaction type list.
pub const TRANSACTIONS_PLACEHOLDER: &str = "{transactions}";

/// Digest of a single block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub block_num: BlockNum,
    pub transaction_count: usize,
    pub operation_count: usize,
    /// Type of the first operation of each transaction, in block order.
    pub transactions: Vec<String>,
    /// One line description. The transaction type list is left as the
    /// literal [`TRANSACTIONS_PLACEHOLDER`]; see [`BlockInfo::render_brief`].
    pub brief: String,
}

impl BlockInfo {
    /// `brief` with the placeholder replaced by the transaction types.
    pub fn render_brief(&self) -> String {
        self.brief
            .replace(TRANSACTIONS_PLACEHOLDER, &self.transactions.join(","))
    }
}

/// Prepare `raw` with `preparer` and summarize it.
pub fn block_info<P: BlockPreparer + ?Sized>(preparer: &P, raw: &Value) -> Result<BlockInfo> {
    let block = preparer.prepare(raw)?;
    summarize(&block)
}

/// Summarize an already prepared block.
///
/// Fails with [`BlockError::EmptyTransaction`] if a transaction carries no
/// operations, since it has no type to report.
pub fn summarize(block: &PreparedBlock) -> Result<BlockInfo> {
    let transactions = block
        .transactions
        .iter()
        .enumerate()
        .map(|(index, tx)| {
            tx.first_op_type()
                .map(str::to_owned)
                .ok_or(BlockError::EmptyTransaction { index })
        })
        .collect::<Result<Vec<_>>>()?;

    let operation_count = block.operation_count();
    let brief = format!(
        "block: {} transaction_types: {} total_operations: {}",
        block.block_num, TRANSACTIONS_PLACEHOLDER, operation_count
    );

    Ok(BlockInfo {
        block_num: block.block_num,
        transaction_count: block.transaction_count(),
        operation_count,
        transactions,
        brief,
    })
}
