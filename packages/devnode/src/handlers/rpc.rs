//! JSON-RPC endpoint — `POST /`.
//!
//! Parses the envelope, dispatches on `method`, and always answers `200`
//! with a JSON-RPC response body; failures travel in the `error` member.
//!
//! | Method | Params | Result |
//! |--------|--------|--------|
//! | `zion_getBalance` | `[address]` | `{"address","balance","nonce"}` |
//! | `zion_sendTransaction` | `[tx]` | `"0x…"` tx hash |
//! | `zion_getAgent` | `[did]` | agent record |
//! | `zion_getMempoolSize` | — | `{"size": n}` |
//! | `zion_chainId` | — | chain id string |

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use zionlayer_rpc_api::{methods, MempoolSize, RpcRequest, RpcResponse, TransactionRequest};

use crate::error::RpcFailure;

use super::AppState;

/// `POST /` — handle one JSON-RPC request.
pub async fn handle(State(app): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = match serde_json::from_slice::<RpcRequest>(&body) {
        Ok(req) => {
            let id = req.id.clone();
            match dispatch(&app, &req.method, req.params) {
                Ok(result) => RpcResponse::success(id, result),
                Err(failure) => {
                    debug!(method = %req.method, ?failure, "JSON-RPC call rejected");
                    RpcResponse::failure(id, failure.into())
                }
            }
        }
        Err(_) => RpcResponse::failure(Value::Null, RpcFailure::Parse.into()),
    };

    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(response))
}

/// Run `method` against the node state.
pub fn dispatch(app: &AppState, method: &str, params: Value) -> Result<Value, RpcFailure> {
    match method {
        methods::GET_BALANCE => {
            let address: String = first_param(params)?;
            to_result(&app.state.account(&address))
        }
        methods::SEND_TRANSACTION => {
            let tx: TransactionRequest = first_param(params)?;
            let from = tx.from.clone();
            let hash = app.state.submit(tx)?;
            debug!(%from, %hash, "transaction accepted into mempool");
            Ok(Value::String(hash))
        }
        methods::GET_AGENT => {
            let did: String = first_param(params)?;
            to_result(&app.state.agent(&did)?)
        }
        methods::GET_MEMPOOL_SIZE => to_result(&MempoolSize {
            size: app.state.mempool_size() as u64,
        }),
        methods::CHAIN_ID => Ok(Value::String(app.config.chain_id.clone())),
        _ => Err(RpcFailure::MethodNotFound),
    }
}

/// Decode `params` as a non-empty array and return its first element.
fn first_param<T: DeserializeOwned>(params: Value) -> Result<T, RpcFailure> {
    let args: Vec<T> = serde_json::from_value(params).map_err(|_| RpcFailure::InvalidParams)?;
    args.into_iter().next().ok_or(RpcFailure::InvalidParams)
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, RpcFailure> {
    serde_json::to_value(value).map_err(|e| RpcFailure::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, Router};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;
    use zionlayer_agent_core::{AgentDid, AgentWallet};
    use zionlayer_rpc_api::error::codes;

    use crate::{config::DevnodeConfig, router::build_router, state::ChainState};

    fn build_app(state: Arc<ChainState>) -> Router {
        build_router(state, DevnodeConfig::default())
    }

    async fn post(app: Router, body: &str) -> serde_json::Value {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chain_id() {
        let app = build_app(Arc::new(ChainState::default()));
        let v = post(app, r#"{"jsonrpc":"2.0","id":9,"method":"zion_chainId","params":[]}"#).await;
        assert_eq!(v, json!({"jsonrpc": "2.0", "id": 9, "result": "0x1"}));
    }

    #[tokio::test]
    async fn parse_error_has_null_id() {
        let app = build_app(Arc::new(ChainState::default()));
        let v = post(app, "{not json").await;
        assert_eq!(v["error"]["code"], json!(codes::PARSE_ERROR));
        assert_eq!(v["error"]["message"], json!("parse error"));
        assert_eq!(v["id"], json!(null));
    }

    #[tokio::test]
    async fn unknown_method() {
        let app = build_app(Arc::new(ChainState::default()));
        let v = post(app, r#"{"jsonrpc":"2.0","id":1,"method":"eth_blockNumber","params":[]}"#).await;
        assert_eq!(v["error"]["code"], json!(codes::METHOD_NOT_FOUND));
        assert!(v.get("result").is_none());
    }

    #[tokio::test]
    async fn missing_method_is_method_not_found() {
        let app = build_app(Arc::new(ChainState::default()));
        let v = post(app, r#"{"jsonrpc":"2.0","id":4,"params":[]}"#).await;
        assert_eq!(v["error"]["code"], json!(codes::METHOD_NOT_FOUND));
        assert_eq!(v["id"], json!(4));
    }

    #[tokio::test]
    async fn get_balance_requires_address() {
        let app = build_app(Arc::new(ChainState::default()));
        let v = post(app, r#"{"jsonrpc":"2.0","id":1,"method":"zion_getBalance","params":[]}"#).await;
        assert_eq!(v["error"]["code"], json!(codes::INVALID_PARAMS));
    }

    #[tokio::test]
    async fn get_balance_reports_decimal_strings() {
        let state = Arc::new(ChainState::default());
        state.set_balance("0xabc", 1_000_000_000_000_000_000_000);
        let app = build_app(state);
        let v = post(
            app,
            r#"{"jsonrpc":"2.0","id":1,"method":"zion_getBalance","params":["0xabc"]}"#,
        )
        .await;
        assert_eq!(
            v["result"],
            json!({"address": "0xabc", "balance": "1000000000000000000000", "nonce": "0"})
        );
    }

    #[tokio::test]
    async fn send_transaction_then_mempool_size() {
        let state = Arc::new(ChainState::default());
        let wallet = AgentWallet::generate();
        let did = AgentDid::for_wallet(&wallet, vec![], Default::default());
        let tx = zionlayer_rpc_api::TransactionRequest::agent_register(&wallet.address, 0, &did)
            .unwrap();
        let body = json!({"jsonrpc": "2.0", "id": 1, "method": "zion_sendTransaction", "params": [tx]});

        let v = post(build_app(Arc::clone(&state)), &body.to_string()).await;
        assert!(v["result"].as_str().unwrap().starts_with("0x"));

        let v = post(
            build_app(Arc::clone(&state)),
            r#"{"jsonrpc":"2.0","id":2,"method":"zion_getMempoolSize"}"#,
        )
        .await;
        assert_eq!(v["result"], json!({"size": 1}));

        let dup = post(build_app(state), &body.to_string()).await;
        assert_eq!(dup["error"]["code"], json!(codes::SERVER_ERROR));
        assert_eq!(dup["error"]["message"], json!("duplicate transaction"));
    }

    #[tokio::test]
    async fn unknown_agent_is_server_error() {
        let app = build_app(Arc::new(ChainState::default()));
        let v = post(
            app,
            r#"{"jsonrpc":"2.0","id":1,"method":"zion_getAgent","params":["did:agc:0xnone"]}"#,
        )
        .await;
        assert_eq!(v["error"], json!({"code": codes::SERVER_ERROR, "message": "agent not found"}));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_app(Arc::new(ChainState::default()));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v, json!({"status": "ok"}));
    }
}
