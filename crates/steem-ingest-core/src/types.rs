//! Strong type definitions for steem ingest.
//!
//! Identifiers are newtypes so a raw string cannot be passed where a
//! validated one is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MalformedHashError;
use crate::hash::block_num_from_hash;

/// A block number. Wider than the 32-bit hash prefix so the successor of
/// `0xffffffff` is representable.
pub type BlockNum = u64;

/// A hex encoded block hash whose first 4 bytes are the block number.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHash(String);

impl BlockHash {
    /// Wrap a hash, checking that it carries a block number prefix.
    pub fn parse(s: impl Into<String>) -> Result<Self, MalformedHashError> {
        let s = s.into();
        block_num_from_hash(&s)?;
        Ok(Self(s))
    }

    /// The block number encoded in the hash prefix.
    pub fn block_num(&self) -> BlockNum {
        // Checked in `parse`.
        block_num_from_hash(&self.0).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: String = self.0.chars().take(16).collect();
        write!(f, "BlockHash({})", short)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BlockHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for BlockHash {
    type Error = MalformedHashError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// An absolute URL in canonical form.
///
/// Only produced by [`crate::canonical::canonicalize_url`], so two equal values
/// denote the same resource modulo cosmetic differences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub(crate) fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CanonicalUrl {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
