//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use steem_ingest::{IngestConfig, Ingestor};
use steem_ingest_block::JsonBlockPreparer;
use steem_ingest_core::ClassifierError;

/// Builder for raw node blocks.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    block_num: u32,
    witness: String,
    transactions: Vec<Value>,
}

impl BlockBuilder {
    /// Start a block with the given number. `block_num` must be at least 1.
    pub fn new(block_num: u32) -> Self {
        Self {
            block_num,
            witness: "initminer".into(),
            transactions: Vec::new(),
        }
    }

    pub fn witness(mut self, witness: &str) -> Self {
        self.witness = witness.into();
        self
    }

    /// Add a transaction with `(op_type, payload)` operations.
    pub fn transaction(mut self, operations: Vec<(&str, Value)>) -> Self {
        let operations: Vec<Value> = operations
            .into_iter()
            .map(|(op_type, payload)| json!([op_type, payload]))
            .collect();
        self.transactions.push(json!({ "operations": operations }));
        self
    }

    /// The raw block as a node would serve it.
    pub fn build(self) -> Value {
        json!({
            "previous": block_hash(self.block_num.saturating_sub(1)),
            "timestamp": "2016-03-24T16:05:00",
            "witness": self.witness,
            "transactions": self.transactions,
            "block_id": block_hash(self.block_num),
        })
    }
}

/// A 40 character block hash addressing `block_num`.
pub fn block_hash(block_num: u32) -> String {
    format!("{:08x}{}", block_num, "0".repeat(32))
}

/// `count` consecutive blocks starting at `first`, each with one vote.
pub fn block_chain(first: u32, count: u32) -> Vec<Value> {
    (first..first + count)
        .map(|num| {
            BlockBuilder::new(num)
                .transaction(vec![("vote", json!({"voter": "alice", "weight": 10000}))])
                .build()
        })
        .collect()
}

/// Payload of a reply as found in a `comment` operation.
pub fn reply_payload() -> Value {
    json!({
        "parent_author": "bob",
        "parent_permlink": "hello-world",
        "author": "alice",
        "permlink": "re-bob-hello-world-20180219t062433",
        "title": "",
        "body": "Great post, I learned a lot from this one.",
        "json_metadata": "{\"tags\":[\"steem\"],\"app\":\"steemit/0.1\"}"
    })
}

/// Payload of a top level post whose metadata was JSON encoded twice.
pub fn post_payload() -> Value {
    let metadata = json!({
        "tags": ["photography", "nature"],
        "image": ["https://i.imgur.com/abc.jpg"],
        "links": ["https://Steemit.com/@bob?ref=x#top"],
        "users": ["bob"],
        "app": "busy/2.0",
        "format": "markdown"
    });
    let double_encoded = Value::String(metadata.to_string()).to_string();
    json!({
        "parent_author": "",
        "parent_permlink": "photography",
        "author": "alice",
        "permlink": "sunset",
        "title": "Sunset",
        "body": "Some photos from the beach at sunset last week.",
        "json_metadata": double_encoded
    })
}

/// An ingestor over node JSON blocks with the given batch size.
pub fn ingestor(chunk_size: usize) -> Ingestor<JsonBlockPreparer> {
    let config = IngestConfig {
        chunk_size,
        ..Default::default()
    };
    Ingestor::new(JsonBlockPreparer, config)
}

/// A classifier that calls everything English.
pub fn english(_: &str) -> Result<String, ClassifierError> {
    Ok("en".into())
}

/// Log sink shared with a capturing subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a debug level subscriber and return its result along with
/// everything it logged on this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = sink
        .0
        .lock()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();
    (result, logs)
}
