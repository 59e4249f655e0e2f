//! JSON-RPC transport and the top-level [`AgenticClient`].
//!
//! [`RpcClient`] does one thing: POST a JSON-RPC 2.0 request to the node and
//! hand back the `result`. [`AgenticClient`] wraps it and lends it to the
//! [`AgentsApi`] and [`ChainApi`] façades, which know the method names and
//! payload shapes.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use zionlayer_rpc_api::{RpcRequest, RpcResponse};

use crate::agents::AgentsApi;
use crate::chain::ChainApi;
use crate::config::ClientConfig;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// RpcClient
// ---------------------------------------------------------------------------

/// HTTP JSON-RPC transport bound to one node endpoint.
///
/// Request ids start at the current Unix time in milliseconds and increase
/// by one per call, so ids are unique within a client and roughly ordered
/// across clients.
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Build a transport from config. Fails only if the TLS backend cannot
    /// be initialised.
    pub fn from_config(config: &ClientConfig) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(config.rpc_url.clone(), http))
    }

    /// Build a transport around a pre-configured `reqwest::Client`.
    pub fn with_http_client(rpc_url: impl Into<String>, http: reqwest::Client) -> Self {
        let seed = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        Self {
            http,
            rpc_url: rpc_url.into(),
            next_id: AtomicU64::new(seed),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Call `method` with positional `params` and return the raw `result`.
    ///
    /// A non-2xx status yields [`SdkError::Status`] whatever the body says.
    /// A response without a `result` yields `Value::Null`. A response with an
    /// `error` member yields [`SdkError::Rpc`] carrying the node's message.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);
        debug!(method, id, url = %self.rpc_url, "sending JSON-RPC request");

        let response = self.http.post(&self.rpc_url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(method, id, status = status.as_u16(), "node returned non-success status");
            return Err(SdkError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let decoded: RpcResponse = serde_json::from_slice(&body)?;
        let result = into_result(decoded);
        if let Err(SdkError::Rpc { code, message }) = &result {
            warn!(method, id, code, message = %message, "JSON-RPC call failed");
        }
        result
    }

    /// Call `method` and decode the `result` into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        let value = self.call(method, params).await?;
        decode_result(method, value)
    }

    /// Like [`call_as`](Self::call_as), but a `null` result decodes as
    /// `T::default()`.
    pub async fn call_or_default<T: DeserializeOwned + Default>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        let value = self.call(method, params).await?;
        if value.is_null() {
            return Ok(T::default());
        }
        decode_result(method, value)
    }
}

/// Split a decoded response into its result or error.
pub(crate) fn into_result(response: RpcResponse) -> Result<Value, SdkError> {
    match response.error {
        Some(e) => Err(e.into()),
        None => Ok(response.result.unwrap_or(Value::Null)),
    }
}

pub(crate) fn decode_result<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::UnexpectedResult {
        method: method.to_string(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// AgenticClient
// ---------------------------------------------------------------------------

/// Entry point of the SDK.
///
/// ```rust,ignore
/// let client = AgenticClient::new("http://localhost:8545")?;
/// let wallet = AgentWallet::generate();
/// let (did, tx_hash) = client
///     .agents()
///     .register(&wallet, vec![AgentCapability::new("inference", "1.0")], Default::default())
///     .await?;
/// ```
#[derive(Debug)]
pub struct AgenticClient {
    rpc: RpcClient,
}

impl AgenticClient {
    /// Client for `rpc_url` with the default timeout.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, SdkError> {
        Self::from_config(&ClientConfig::new(rpc_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, SdkError> {
        Ok(Self {
            rpc: RpcClient::from_config(config)?,
        })
    }

    pub fn from_rpc(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    /// The underlying transport, for methods the façades do not wrap.
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Agent registration, lookup, messaging and inference receipts.
    pub fn agents(&self) -> AgentsApi<'_> {
        AgentsApi::new(&self.rpc)
    }

    /// Balance, mempool and chain-id queries, and transfers.
    pub fn chain(&self) -> ChainApi<'_> {
        ChainApi::new(&self.rpc)
    }
}
