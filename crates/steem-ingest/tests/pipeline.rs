//! End-to-end checks of the ingest pipeline through the public API.

use proptest::prelude::*;
use serde_json::{json, Value};
use steem_ingest::core::{
    block_num_from_hash, block_num_from_previous, chunkify, extract_keys_from_meta, find_keys,
    normalize_encoding,
};
use steem_ingest::{BlockPreparer, IngestConfig, Ingestor, JsonBlockPreparer};
use steem_ingest_testkit::fixtures::{english, post_payload, reply_payload};
use steem_ingest_testkit::{capture_logs, ingestor, raw_block_from_params, BlockBuilder, BlockParams};

#[test]
fn test_block_num_properties() {
    let hash = "01312d1c7fc8e6b1f57a1b1ab4bb4e5b8d0f9d57";
    assert_eq!(block_num_from_hash(hash).unwrap(), 0x01312d1c);
    assert_eq!(block_num_from_previous(hash).unwrap(), 0x01312d1c + 1);
}

#[test]
fn test_chunk_counts() {
    let chunks: Vec<Vec<u32>> = chunkify(0..10, 4).unwrap().collect();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks.concat(), (0..10).collect::<Vec<_>>());
}

#[test]
fn test_normalize_encoding_examples() {
    assert_eq!(normalize_encoding(&Value::Null), None);
    assert_eq!(normalize_encoding(&json!(r#"{"a":1}"#)), Some(json!({"a": 1})));
    assert_eq!(
        normalize_encoding(&json!(r#""{\"a\":1}""#)),
        Some(json!({"a": 1}))
    );
}

#[test]
fn test_invalid_metadata_is_reported() {
    let (value, logs) = capture_logs(|| normalize_encoding(&json!("not json")));
    assert_eq!(value, None);
    assert!(logs.contains("normalize_encoding error"), "logs: {logs}");
    assert!(logs.contains("not json"), "logs: {logs}");
}

#[test]
fn test_unusual_meta_items_are_reported() {
    let (tags, logs) = capture_logs(|| extract_keys_from_meta(&json!({"tags": 3}), "tags"));
    assert!(tags.is_empty());
    assert!(logs.contains("unusual item in meta"), "logs: {logs}");
}

#[test]
fn test_bad_url_is_reported() {
    let ingestor = Ingestor::new(JsonBlockPreparer, IngestConfig::default());
    let (url, logs) = capture_logs(|| ingestor.canonicalize_url("not a url"));
    assert_eq!(url, None);
    assert!(logs.contains("url preparation error"), "logs: {logs}");

    let url = ingestor.canonicalize_url("HTTP://Example.com/a?b=2&a=1").unwrap();
    assert_eq!(url.as_str(), "http://example.com/a?a=1&b=2");
}

#[test]
fn test_url_without_host_is_reported() {
    let ingestor = ingestor(10);
    for link in ["javascript:alert(1)", "mailto:a@b.c"] {
        let (url, logs) = capture_logs(|| ingestor.canonicalize_url(link));
        assert_eq!(url, None, "{link}");
        assert!(logs.contains("bad url encountered"), "logs: {logs}");
        assert!(!logs.contains("url preparation error"), "logs: {logs}");
    }
}

#[test]
fn test_find_keys_example() {
    let node = json!({"a": {"a": 1, "b": 2}});
    let hits: Vec<Value> = find_keys(&node, "a").cloned().collect();
    assert_eq!(hits, vec![json!({"a": 1, "b": 2}), json!(1)]);
    assert_eq!(
        extract_keys_from_meta(&json!({"tags": ["x", "y"]}), "tags"),
        vec!["x", "y"]
    );
}

#[test]
fn test_block_info_end_to_end() {
    let ingestor = Ingestor::new(JsonBlockPreparer, IngestConfig::default());
    let raw = json!({
        "previous": "0000000400000000000000000000000000000000",
        "timestamp": "2016-03-24T16:00:15",
        "witness": "initminer",
        "transactions": [
            {"operations": [["vote", {}], ["comment", {}]]},
            {"operations": [["transfer", {}]]}
        ]
    });

    let info = ingestor.block_info(&raw).unwrap();
    assert_eq!(info.block_num, 5);
    assert_eq!(info.transaction_count, 2);
    assert_eq!(info.operation_count, 3);
    assert_eq!(info.transactions, vec!["vote", "transfer"]);
    assert_eq!(
        info.brief,
        "block: 5 transaction_types: {transactions} total_operations: 3"
    );
}

#[test]
fn test_reply_digest() {
    let ingestor = ingestor(10).with_classifier(english);
    let digest = ingestor.comment_digest(&reply_payload()).unwrap();

    assert_eq!(digest.url, "hello-world/alice/re-bob-hello-world-20180219t062433");
    assert!(digest.is_comment);
    assert_eq!(digest.language.as_deref(), Some("en"));
    assert_eq!(digest.metadata.tags, vec!["steem"]);
    assert_eq!(digest.metadata.app.as_deref(), Some("steemit/0.1"));
    assert!(!digest.fields.contains_key("body"));
}

#[test]
fn test_post_digest_with_double_encoded_metadata() {
    let digest = ingestor(10).comment_digest(&post_payload()).unwrap();

    assert!(!digest.is_comment);
    assert_eq!(digest.language, None);
    assert_eq!(digest.metadata.tags, vec!["photography", "nature"]);
    assert_eq!(digest.metadata.users, vec!["bob"]);
    assert_eq!(digest.metadata.links, vec!["https://steemit.com/@bob?ref=x"]);
    assert_eq!(digest.metadata.images, vec!["https://i.imgur.com/abc.jpg"]);
    assert_eq!(digest.metadata.format.as_deref(), Some("markdown"));
}

#[test]
fn test_comment_digests_from_built_block() {
    let raw = BlockBuilder::new(20)
        .transaction(vec![("vote", json!({"voter": "bob"})), ("comment", reply_payload())])
        .transaction(vec![("comment", post_payload())])
        .build();

    let ingestor = ingestor(10).with_classifier(english);
    let block = ingestor.preparer().prepare(&raw).unwrap();
    let digests = ingestor.comment_digests(&block);

    let permlinks: Vec<(&str, bool)> = digests
        .iter()
        .map(|d| (d.permlink.as_str(), d.is_comment))
        .collect();
    assert_eq!(
        permlinks,
        vec![("re-bob-hello-world-20180219t062433", true), ("sunset", false)]
    );
}

#[tokio::test]
async fn test_stored_blocks_as_text() {
    // Blocks read back from storage arrive as JSON text.
    let blocks: Vec<Value> = (1u32..=5)
        .map(|n| {
            let raw = json!({
                "previous": format!("{:08x}", n - 1),
                "transactions": [{"operations": [["custom_json", {"id": "follow"}]]}]
            });
            Value::String(raw.to_string())
        })
        .collect();

    let infos = ingestor(2).summarize_parallel(blocks).await.unwrap();

    assert_eq!(infos.len(), 5);
    assert!(infos.iter().all(|i| i.transactions == vec!["custom_json"]));
    assert_eq!(infos[4].block_num, 5);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_parallel_summaries_match_sequential(
        params in prop::collection::vec(any::<BlockParams>(), 0..12),
        chunk_size in 1usize..5,
    ) {
        let blocks: Vec<Value> = params.iter().map(raw_block_from_params).collect();
        let ingestor = ingestor(chunk_size);

        let sequential = ingestor.summarize(blocks.clone()).unwrap();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let parallel = runtime.block_on(ingestor.summarize_parallel(blocks)).unwrap();

        prop_assert_eq!(sequential.len(), params.len());
        prop_assert_eq!(sequential, parallel);
    }
}
