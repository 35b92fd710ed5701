//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Generate a block hash: 40 lowercase hex characters.
pub fn block_hash() -> impl Strategy<Value = String> {
    "[0-9a-f]{40}".prop_map(String::from)
}

/// Generate a short object key from a small alphabet, so keys repeat.
pub fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("tags".to_string()),
        Just("links".to_string()),
        Just("app".to_string()),
        "[a-z]{1,3}",
    ]
}

/// Generate a scalar JSON value.
pub fn json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

/// Generate an arbitrarily nested JSON value.
pub fn json_value() -> impl Strategy<Value = Value> {
    json_scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate a non-empty JSON object.
pub fn json_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec((key(), json_value()), 1..6)
        .prop_map(|entries| entries.into_iter().collect::<Map<_, _>>())
}

/// How a metadata blob was encoded on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Structured,
    Single,
    Double,
}

/// Generate an object together with one of its on-chain encodings.
pub fn meta_blob() -> impl Strategy<Value = (Map<String, Value>, Encoding, Value)> {
    (
        json_object(),
        prop_oneof![
            Just(Encoding::Structured),
            Just(Encoding::Single),
            Just(Encoding::Double),
        ],
    )
        .prop_map(|(object, encoding)| {
            let structured = Value::Object(object.clone());
            let blob = match encoding {
                Encoding::Structured => structured,
                Encoding::Single => Value::String(structured.to_string()),
                Encoding::Double => Value::String(Value::String(structured.to_string()).to_string()),
            };
            (object, encoding, blob)
        })
}

/// Generate an operation type name.
pub fn op_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("vote".to_string()),
        Just("comment".to_string()),
        Just("transfer".to_string()),
        Just("custom_json".to_string()),
        Just("account_update".to_string()),
    ]
}

/// Parameters for generating a raw node block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub block_num: u32,
    /// Operation types per transaction; every transaction has at least one.
    pub transactions: Vec<Vec<String>>,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            1u32..=u32::MAX,
            prop::collection::vec(prop::collection::vec(op_type(), 1..5), 0..8),
        )
            .prop_map(|(block_num, transactions)| BlockParams {
                block_num,
                transactions,
            })
            .boxed()
    }
}

/// Build the raw node block described by `params`.
///
/// Block 0 has no predecessor; its `previous` also addresses block 0, so
/// preparing it fails with a block number mismatch.
pub fn raw_block_from_params(params: &BlockParams) -> Value {
    let transactions: Vec<Value> = params
        .transactions
        .iter()
        .map(|ops| {
            let operations: Vec<Value> = ops.iter().map(|op| json!([op, {}])).collect();
            json!({ "operations": operations })
        })
        .collect();

    json!({
        "previous": format!("{:08x}{}", params.block_num.saturating_sub(1), "0".repeat(32)),
        "block_id": format!("{:08x}{}", params.block_num, "0".repeat(32)),
        "transactions": transactions,
    })
}
