//! Block numbers from content-addressed block hashes.
//!
//! A block id is hex; its first 4 bytes (8 hex digits) are the big-endian
//! block number. The `previous` field of a block therefore addresses the
//! block's own number minus one.

use crate::error::MalformedHashError;
use crate::types::BlockNum;

/// Number of hex digits holding the block number.
pub const BLOCK_NUM_HEX_LEN: usize = 8;

/// Return the block number stored in the first 8 hex digits of `block_hash`.
pub fn block_num_from_hash(block_hash: &str) -> Result<BlockNum, MalformedHashError> {
    let bytes = block_hash.as_bytes();
    if bytes.len() < BLOCK_NUM_HEX_LEN {
        return Err(MalformedHashError::TooShort { len: bytes.len() });
    }

    let mut prefix = [0u8; 4];
    hex::decode_to_slice(&bytes[..BLOCK_NUM_HEX_LEN], &mut prefix).map_err(|_| {
        MalformedHashError::NonHex {
            prefix: String::from_utf8_lossy(&bytes[..BLOCK_NUM_HEX_LEN]).into_owned(),
        }
    })?;

    Ok(u32::from_be_bytes(prefix) as BlockNum)
}

/// Return the number of the block whose `previous` field is `previous_block_hash`.
pub fn block_num_from_previous(previous_block_hash: &str) -> Result<BlockNum, MalformedHashError> {
    Ok(block_num_from_hash(previous_block_hash)? + 1)
}
