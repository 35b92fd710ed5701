//! Error types for the Ingestor.

use steem_ingest_block::BlockError;
use steem_ingest_core::ChunkError;
use thiserror::Error;

/// Errors that can occur during Ingestor operations.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Block preparation or summary error.
    #[error("block error: {0}")]
    Block(#[from] BlockError),

    /// Invalid batching configuration.
    #[error("chunk error: {0}")]
    Chunk(#[from] ChunkError),

    /// A blocking worker panicked or was cancelled.
    #[error("worker failed: {0}")]
    Worker(String),
}

/// Result type for Ingestor operations.
pub type Result<T> = std::result::Result<T, IngestError>;
