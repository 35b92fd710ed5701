//! The Ingestor: unified API for the steem ingest pipeline.
//!
//! The Ingestor brings together block preparation, summaries, metadata
//! mining and URL canonicalization behind one configured value.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use steem_ingest_block::{block_info, BlockError, BlockInfo, BlockPreparer, PreparedBlock};
use steem_ingest_core::{
    build_comment_url, canonicalize_url, chunkify, detect_language, extract_post_metadata,
    is_comment, remove_from_dict, CanonicalUrl, CanonicalizeOptions, LanguageClassifier,
    PostMetadata, DEFAULT_CHUNK_SIZE,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Fields left out of [`CommentDigest::fields`].
const BULKY_COMMENT_FIELDS: &[&str] = &["body", "json_metadata"];

/// Configuration for the Ingestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Blocks per batch.
    pub chunk_size: usize,
    /// Batches processed concurrently by `summarize_parallel`.
    pub workers: usize,
    /// URL canonicalization options for links and images.
    pub url: CanonicalizeOptions,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: 4,
            url: CanonicalizeOptions::default(),
        }
    }
}

/// What the index keeps about one `comment` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDigest {
    pub author: String,
    pub permlink: String,
    pub parent_author: String,
    pub parent_permlink: String,
    /// `parent_permlink/author/permlink`.
    pub url: String,
    /// A reply rather than a top level post.
    pub is_comment: bool,
    pub language: Option<String>,
    pub metadata: PostMetadata,
    /// Remaining payload fields, without body and metadata.
    pub fields: Map<String, Value>,
}

/// The main Ingestor struct.
///
/// Provides a unified API for:
/// - Summarizing blocks, one at a time or in batches
/// - Mining post metadata
/// - Digesting comment operations
/// - Canonicalizing URLs
pub struct Ingestor<P: BlockPreparer> {
    /// The block preparation backend.
    preparer: Arc<P>,
    /// Configuration.
    config: IngestConfig,
    /// Language classifier for comment bodies.
    classifier: Option<Arc<dyn LanguageClassifier>>,
}

impl<P: BlockPreparer + 'static> Ingestor<P> {
    /// Create a new ingestor.
    pub fn new(preparer: P, config: IngestConfig) -> Self {
        Self {
            preparer: Arc::new(preparer),
            config,
            classifier: None,
        }
    }

    /// Detect the language of comment bodies with `classifier`.
    pub fn with_classifier(mut self, classifier: impl LanguageClassifier + 'static) -> Self {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    pub fn preparer(&self) -> &P {
        &self.preparer
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Block Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Summarize one raw block.
    pub fn block_info(&self, raw: &Value) -> Result<BlockInfo> {
        Ok(block_info(self.preparer.as_ref(), raw)?)
    }

    /// Summarize blocks in input order, batch by batch.
    ///
    /// The first block that fails to summarize aborts the run.
    pub fn summarize<I>(&self, blocks: I) -> Result<Vec<BlockInfo>>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut infos = Vec::new();
        for (batch, chunk) in chunkify(blocks, self.config.chunk_size)?.enumerate() {
            debug!(batch, blocks = chunk.len(), "summarizing batch");
            infos.extend(summarize_chunk(self.preparer.as_ref(), &chunk)?);
        }
        Ok(infos)
    }

    /// Summarize blocks with one blocking worker per batch.
    ///
    /// At most `workers` batches are in flight; results come back in input
    /// order, identical to [`Ingestor::summarize`].
    pub async fn summarize_parallel<I>(&self, blocks: I) -> Result<Vec<BlockInfo>>
    where
        I: IntoIterator<Item = Value>,
    {
        let workers = self.config.workers.max(1);
        let mut in_flight: VecDeque<JoinHandle<std::result::Result<Vec<BlockInfo>, BlockError>>> =
            VecDeque::with_capacity(workers);
        let mut infos = Vec::new();

        for chunk in chunkify(blocks, self.config.chunk_size)? {
            if in_flight.len() == workers {
                if let Some(handle) = in_flight.pop_front() {
                    infos.extend(join_worker(handle).await?);
                }
            }
            let preparer = Arc::clone(&self.preparer);
            in_flight.push_back(tokio::task::spawn_blocking(move || {
                summarize_chunk(preparer.as_ref(), &chunk)
            }));
        }

        while let Some(handle) = in_flight.pop_front() {
            infos.extend(join_worker(handle).await?);
        }
        Ok(infos)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Post Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Mine a post's `json_metadata`, in whatever encoding it arrived.
    pub fn post_metadata(&self, json_metadata: &Value) -> PostMetadata {
        extract_post_metadata(json_metadata, &self.config.url)
    }

    /// Canonicalize a URL with the configured options.
    pub fn canonicalize_url(&self, url: &str) -> Option<CanonicalUrl> {
        canonicalize_url(url, &self.config.url)
    }

    /// Digest the payload of a `comment` operation.
    ///
    /// Payloads that are not objects or lack author/permlink are logged and
    /// skipped.
    pub fn comment_digest(&self, payload: &Value) -> Option<CommentDigest> {
        let Some(fields) = payload.as_object() else {
            warn!(payload = %payload, "comment payload is not an object");
            return None;
        };

        let text = |name: &str| -> String {
            fields
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };

        let author = text("author");
        let permlink = text("permlink");
        if author.is_empty() || permlink.is_empty() {
            warn!(payload = %payload, "comment payload without author or permlink");
            return None;
        }
        let parent_author = text("parent_author");
        let parent_permlink = text("parent_permlink");

        let language = self
            .classifier
            .as_deref()
            .and_then(|classifier| detect_language(classifier, &text("body")));

        Some(CommentDigest {
            url: build_comment_url(&parent_permlink, &author, &permlink),
            is_comment: is_comment(fields),
            language,
            metadata: self.post_metadata(fields.get("json_metadata").unwrap_or(&Value::Null)),
            fields: remove_from_dict(fields, BULKY_COMMENT_FIELDS),
            author,
            permlink,
            parent_author,
            parent_permlink,
        })
    }

    /// Digest every `comment` operation of a prepared block.
    pub fn comment_digests(&self, block: &PreparedBlock) -> Vec<CommentDigest> {
        block
            .operations()
            .filter(|op| op.op_type == "comment")
            .filter_map(|op| self.comment_digest(&op.payload))
            .collect()
    }
}

fn summarize_chunk<P: BlockPreparer + ?Sized>(
    preparer: &P,
    chunk: &[Value],
) -> std::result::Result<Vec<BlockInfo>, BlockError> {
    chunk.iter().map(|raw| block_info(preparer, raw)).collect()
}

async fn join_worker(
    handle: JoinHandle<std::result::Result<Vec<BlockInfo>, BlockError>>,
) -> Result<Vec<BlockInfo>> {
    let infos = handle
        .await
        .map_err(|e| IngestError::Worker(e.to_string()))??;
    Ok(infos)
}
