//! Preparation of blocks in the node's JSON format.
//!
//! A block from `get_block` looks like:
//!
//! ```json
//! {
//!   "previous": "0131ec1b...",
//!   "timestamp": "2018-02-19T06:24:33",
//!   "witness": "someguy123",
//!   "transactions": [
//!     {"operations": [["vote", {"voter": "alice", ...}]], ...}
//!   ],
//!   "block_id": "0131ec1c...",
//!   "transaction_ids": ["2f8f...", ...]
//! }
//! ```
//!
//! Operations also appear in the tagged form
//! `{"type": "vote_operation", "value": {...}}` served by newer APIs.

use serde_json::{Map, Value};
use steem_ingest_core::{block_num_from_hash, block_num_from_previous, normalize_encoding};
use tracing::debug;

use crate::error::{BlockError, Result};
use crate::traits::{BlockPreparer, Operation, PreparedBlock, PreparedTransaction};

const OPERATION_SUFFIX: &str = "_operation";

/// Prepares node JSON blocks, including blocks stored as JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBlockPreparer;

impl JsonBlockPreparer {
    pub fn new() -> Self {
        Self
    }
}

impl BlockPreparer for JsonBlockPreparer {
    fn prepare(&self, raw: &Value) -> Result<PreparedBlock> {
        let decoded;
        let block = match raw {
            Value::Object(map) => map,
            other => {
                decoded = normalize_encoding(other).ok_or(BlockError::NotAnObject)?;
                decoded.as_object().ok_or(BlockError::NotAnObject)?
            }
        };

        let previous = required_str(block, "previous")?;
        let block_num = block_num_from_previous(previous)?;

        let block_id = optional_str(block, "block_id")?;
        if let Some(id) = block_id {
            let from_block_id = block_num_from_hash(id)?;
            if from_block_id != block_num {
                return Err(BlockError::BlockNumMismatch {
                    from_previous: block_num,
                    from_block_id,
                });
            }
        }

        let raw_transactions = block
            .get("transactions")
            .ok_or(BlockError::MissingField("transactions"))?
            .as_array()
            .ok_or_else(|| invalid("transactions", "expected an array"))?;

        let transaction_ids: &[Value] = match block.get("transaction_ids") {
            Some(Value::Array(ids)) => ids.as_slice(),
            _ => &[],
        };

        let transactions = raw_transactions
            .iter()
            .enumerate()
            .map(|(index, tx)| {
                let transaction_id = transaction_ids
                    .get(index)
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                prepare_transaction(index, tx, transaction_id)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(block_num, transactions = transactions.len(), "prepared block");

        Ok(PreparedBlock {
            block_num,
            previous: previous.to_owned(),
            block_id: block_id.map(str::to_owned),
            timestamp: optional_str(block, "timestamp")?.map(str::to_owned),
            witness: optional_str(block, "witness")?.map(str::to_owned),
            transactions,
        })
    }
}

fn prepare_transaction(
    index: usize,
    tx: &Value,
    transaction_id: Option<String>,
) -> Result<PreparedTransaction> {
    let operations = tx
        .get("operations")
        .ok_or(BlockError::MissingField("operations"))?
        .as_array()
        .ok_or_else(|| invalid("operations", "expected an array"))?;

    let operations = operations
        .iter()
        .enumerate()
        .map(|(op_index, op)| {
            parse_operation(op).ok_or(BlockError::InvalidOperation {
                transaction: index,
                operation: op_index,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PreparedTransaction {
        transaction_id,
        operations,
    })
}

/// Parse `[type, payload]` or `{"type": "<type>_operation", "value": payload}`.
fn parse_operation(op: &Value) -> Option<Operation> {
    match op {
        Value::Array(pair) if pair.len() == 2 => {
            let op_type = pair[0].as_str()?;
            Some(Operation::new(op_type, pair[1].clone()))
        }
        Value::Object(tagged) => {
            let op_type = tagged.get("type")?.as_str()?;
            let op_type = op_type.strip_suffix(OPERATION_SUFFIX).unwrap_or(op_type);
            let payload = tagged.get("value").cloned().unwrap_or(Value::Null);
            Some(Operation::new(op_type, payload))
        }
        _ => None,
    }
}

fn required_str<'a>(block: &'a Map<String, Value>, field: &'static str) -> Result<&'a str> {
    block
        .get(field)
        .ok_or(BlockError::MissingField(field))?
        .as_str()
        .ok_or_else(|| invalid(field, "expected a string"))
}

fn optional_str<'a>(block: &'a Map<String, Value>, field: &'static str) -> Result<Option<&'a str>> {
    match block.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(invalid(field, "expected a string")),
    }
}

fn invalid(field: &'static str, reason: &str) -> BlockError {
    BlockError::InvalidField {
        field,
        reason: reason.to_owned(),
    }
}
