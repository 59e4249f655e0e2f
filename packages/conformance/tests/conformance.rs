//! End-to-end conformance tests for the ZionLayer SDK.
//!
//! Each test spawns an ephemeral in-process development node (real TCP, real
//! HTTP) via [`zionlayer_conformance::spawn_node`] and drives it through the
//! SDK's public API.
//!
//! # Blocks in tests
//!
//! No block producer runs inside `spawn_node`. A submitted transaction sits
//! in the mempool until the test seals a block, either directly with
//! `ChainState::seal_block` or through `BlockProducer::tick`. This keeps
//! nonce and registry assertions deterministic.
//!
//! # Coverage
//!
//! | Test | Call |
//! |------|------|
//! | `chain_id_is_devnet` | `chain.get_chain_id` |
//! | `fresh_wallet_has_zero_balance` | `chain.get_balance` |
//! | `seeded_balance_beyond_u64` | `chain.get_balance` |
//! | `mempool_counts_pending_transactions` | `chain.get_mempool_size` |
//! | `register_agent_and_fetch_record` | `agents.register`, `agents.get` |
//! | `register_twice_in_one_block_is_duplicate` | `agents.register` |
//! | `second_registration_is_dropped_on_apply` | `agents.register` |
//! | `get_unknown_agent_is_rpc_error` | `agents.get` |
//! | `send_message_uses_current_nonce` | `agents.send_message` |
//! | `submit_inference_receipt_is_applied` | `agents.submit_inference_receipt` |
//! | `transfer_moves_balance` | `chain.transfer` |
//! | `unknown_method_is_rpc_error` | `RpcClient::call` |
//! | `missing_params_is_invalid_params` | raw JSON-RPC |
//! | `non_rpc_endpoint_is_status_error` | `RpcClient::call` |
//! | `error_status_wins_over_rpc_error_body` | `RpcClient::call` |
//! | `request_ids_are_clock_seeded_and_sequential` | `RpcClient::call` |
//! | `health_endpoint` | raw HTTP |
//! | `block_producer_tick_applies_pending` | `BlockProducer::tick` |

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use zionlayer::{
    AgentCapability, AgentMessage, AgentWallet, ClientConfig, InferenceReceipt, MessageType,
    SdkError,
};
use zionlayer_conformance::{client_for, spawn_node, spawn_router};
use zionlayer_devnode::BlockProducer;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn capabilities() -> Vec<AgentCapability> {
    vec![
        AgentCapability::new("inference", "1.0"),
        AgentCapability::new("tool-use", "1.0"),
    ]
}

fn metadata() -> BTreeMap<String, String> {
    [("model".to_string(), "claude-3-5-sonnet".to_string())].into()
}

fn assert_tx_hash(hash: &str) {
    assert!(hash.starts_with("0x"), "tx hash should be 0x-prefixed: {hash}");
    assert_eq!(hash.len(), 66, "tx hash should be 32 bytes of hex: {hash}");
}

async fn raw_rpc(url: &str, body: Value) -> Value {
    reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

/// Requests seen by [`recording_node`]: `(content-type, body)`.
type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// Records each request and answers `"0x1"` with the request's id.
async fn recording_node(State(seen): State<Seen>, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body: Value = serde_json::from_slice(&body).unwrap();
    let id = body["id"].clone();
    seen.lock().unwrap().push((content_type, body));
    Json(json!({"jsonrpc": "2.0", "id": id, "result": "0x1"}))
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

// ---------------------------------------------------------------------------
// Chain queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chain_id_is_devnet() {
    let (url, _state) = spawn_node().await;
    let client = client_for(&url);
    assert_eq!(client.chain().get_chain_id().await.unwrap(), "0x1");
}

#[tokio::test]
async fn fresh_wallet_has_zero_balance() {
    let (url, _state) = spawn_node().await;
    let client = client_for(&url);
    let wallet = AgentWallet::generate();

    assert_eq!(client.chain().get_balance(&wallet.address).await.unwrap(), 0);
    let account = client.chain().get_account(&wallet.address).await.unwrap();
    assert_eq!(account.nonce, 0);
}

#[tokio::test]
async fn seeded_balance_beyond_u64() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    let balance = u128::from(u64::MAX) * 1_000;
    state.set_balance("0xrich", balance);

    assert_eq!(client.chain().get_balance("0xrich").await.unwrap(), balance);
}

#[tokio::test]
async fn mempool_counts_pending_transactions() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    assert_eq!(client.chain().get_mempool_size().await.unwrap(), 0);

    for _ in 0..3 {
        let wallet = AgentWallet::generate();
        client
            .agents()
            .register(&wallet, capabilities(), BTreeMap::new())
            .await
            .unwrap();
    }
    assert_eq!(client.chain().get_mempool_size().await.unwrap(), 3);

    state.seal_block(100).unwrap();
    assert_eq!(client.chain().get_mempool_size().await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_agent_and_fetch_record() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    let wallet = AgentWallet::generate();

    let (did, tx_hash) = client
        .agents()
        .register(&wallet, capabilities(), metadata())
        .await
        .unwrap();
    assert_eq!(did.id, format!("did:agc:{}", wallet.address));
    assert_eq!(did.controller, wallet.address);
    assert_eq!(did.public_key, wallet.public_key);
    assert_tx_hash(&tx_hash);

    let block = state.seal_block(100).unwrap();
    assert_eq!(block.applied, vec![tx_hash]);

    let record = client.agents().get(&did.id).await.unwrap();
    assert_eq!(record.did, did);
    assert_eq!(record.registered_at, block.height);
    assert_eq!(record.message_count, 0);
    assert!(record.active);
}

#[tokio::test]
async fn register_twice_in_one_block_is_duplicate() {
    let (url, _state) = spawn_node().await;
    let client = client_for(&url);
    let wallet = AgentWallet::generate();

    client
        .agents()
        .register(&wallet, capabilities(), metadata())
        .await
        .unwrap();
    // Same wallet, same nonce, same payload: the node computes the same hash.
    let err = client
        .agents()
        .register(&wallet, capabilities(), metadata())
        .await
        .unwrap_err();
    match err {
        SdkError::Rpc { code, message } => {
            assert_eq!(code, -32000);
            assert_eq!(message, "duplicate transaction");
        }
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn second_registration_is_dropped_on_apply() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    let wallet = AgentWallet::generate();

    client
        .agents()
        .register(&wallet, capabilities(), metadata())
        .await
        .unwrap();
    state.seal_block(100).unwrap();

    // The nonce has advanced, so the node accepts the submission...
    let (_, second) = client
        .agents()
        .register(&wallet, vec![], BTreeMap::new())
        .await
        .unwrap();
    // ...but refuses to apply it.
    let block = state.seal_block(100).unwrap();
    assert!(block.applied.is_empty());
    assert_eq!(block.dropped[0].0, second);

    let record = client
        .agents()
        .get(&format!("did:agc:{}", wallet.address))
        .await
        .unwrap();
    assert_eq!(record.did.capabilities, capabilities());
}

#[tokio::test]
async fn get_unknown_agent_is_rpc_error() {
    let (url, _state) = spawn_node().await;
    let client = client_for(&url);

    let err = client.agents().get("did:agc:0xnobody").await.unwrap_err();
    assert_eq!(err.rpc_code(), Some(-32000));
    assert!(err.to_string().contains("agent not found"), "got: {err}");
}

#[tokio::test]
async fn send_message_uses_current_nonce() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    let wallet = AgentWallet::generate();

    let (did, _) = client
        .agents()
        .register(&wallet, capabilities(), metadata())
        .await
        .unwrap();
    state.seal_block(100).unwrap();

    let mut msg = AgentMessage::new(
        &did.id,
        "did:agc:0xpeer",
        MessageType::Task,
        json!({"prompt": "summarise block 12"}),
    );
    let tx_hash = client.agents().send_message(&wallet, &mut msg).await.unwrap();
    assert_tx_hash(&tx_hash);
    assert_eq!(msg.nonce, 1, "nonce is taken from the node and left on the message");

    state.seal_block(100).unwrap();
    assert_eq!(state.messages(), vec![msg]);
    assert_eq!(client.agents().get(&did.id).await.unwrap().message_count, 1);
    assert_eq!(client.chain().get_account(&wallet.address).await.unwrap().nonce, 2);
}

#[tokio::test]
async fn submit_inference_receipt_is_applied() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    let wallet = AgentWallet::generate();

    let receipt = InferenceReceipt::new(
        format!("did:agc:{}", wallet.address),
        "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
        "0xinput",
        "0xoutput",
    );
    let tx_hash = client
        .agents()
        .submit_inference_receipt(&wallet, &receipt)
        .await
        .unwrap();
    assert_tx_hash(&tx_hash);

    state.seal_block(100).unwrap();
    assert_eq!(state.receipts(), vec![receipt]);
}

#[tokio::test]
async fn transfer_moves_balance() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    let wallet = AgentWallet::generate();
    state.set_balance(&wallet.address, 1_000);

    client.chain().transfer(&wallet, "0xbob", 250).await.unwrap();
    state.seal_block(100).unwrap();

    assert_eq!(client.chain().get_balance(&wallet.address).await.unwrap(), 750);
    assert_eq!(client.chain().get_balance("0xbob").await.unwrap(), 250);
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_method_is_rpc_error() {
    let (url, _state) = spawn_node().await;
    let client = client_for(&url);

    let err = client.rpc().call("zion_doesNotExist", vec![]).await.unwrap_err();
    assert_eq!(err.rpc_code(), Some(-32601));
}

#[tokio::test]
async fn missing_params_is_invalid_params() {
    let (url, _state) = spawn_node().await;
    let v = raw_rpc(
        &url,
        json!({"jsonrpc": "2.0", "id": 5, "method": "zion_getAgent", "params": []}),
    )
    .await;
    assert_eq!(v["id"], json!(5));
    assert_eq!(v["error"]["code"], json!(-32602));
}

#[tokio::test]
async fn non_rpc_endpoint_is_status_error() {
    let (url, _state) = spawn_node().await;
    let client = zionlayer::AgenticClient::from_config(&ClientConfig::new(format!("{url}/health")))
        .unwrap();

    let err = client.chain().get_chain_id().await.unwrap_err();
    assert!(matches!(err, SdkError::Status(405)), "got {err:?}");
}

#[tokio::test]
async fn error_status_wins_over_rpc_error_body() {
    async fn failing() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32000, "message": "node overloaded"}
            })),
        )
    }
    let url = spawn_router(Router::new().route("/", post(failing))).await;

    let err = client_for(&url).chain().get_chain_id().await.unwrap_err();
    assert!(matches!(err, SdkError::Status(500)), "got {err:?}");
    assert_eq!(err.rpc_code(), None);
}

#[tokio::test]
async fn request_ids_are_clock_seeded_and_sequential() {
    let seen: Seen = Arc::default();
    let url = spawn_router(
        Router::new()
            .route("/", post(recording_node))
            .with_state(Arc::clone(&seen)),
    )
    .await;

    let before = unix_millis();
    let client = client_for(&url);
    let after = unix_millis();
    client.chain().get_chain_id().await.unwrap();
    client
        .rpc()
        .call("zion_getBalance", vec![json!("0xabc")])
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    for (content_type, body) in seen.iter() {
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["jsonrpc"], json!("2.0"));
    }

    let (_, first) = &seen[0];
    let (_, second) = &seen[1];
    assert_eq!(first["method"], json!("zion_chainId"));
    assert_eq!(first["params"], json!([]));
    assert_eq!(second["method"], json!("zion_getBalance"));
    assert_eq!(second["params"], json!(["0xabc"]));

    let first_id = first["id"].as_u64().unwrap();
    let second_id = second["id"].as_u64().unwrap();
    assert!(
        (before..=after).contains(&first_id),
        "id {first_id} not seeded from the clock ({before}..={after})"
    );
    assert_eq!(second_id, first_id + 1);
}

#[tokio::test]
async fn health_endpoint() {
    let (url, _state) = spawn_node().await;
    let v: Value = reqwest::get(format!("{url}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v, json!({"status": "ok"}));
}

// ---------------------------------------------------------------------------
// Block producer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn block_producer_tick_applies_pending() {
    let (url, state) = spawn_node().await;
    let client = client_for(&url);
    let producer = BlockProducer::new(Arc::clone(&state), 100);
    assert_eq!(producer.tick(), 0);

    let wallet = AgentWallet::generate();
    let (did, _) = client
        .agents()
        .register(&wallet, capabilities(), metadata())
        .await
        .unwrap();
    assert_eq!(producer.tick(), 1);
    assert!(client.agents().get(&did.id).await.unwrap().active);
}
