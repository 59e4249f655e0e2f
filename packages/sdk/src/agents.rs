//! Agents façade — registration, lookup, messaging and inference receipts.
//!
//! Every write goes out as a `zion_sendTransaction` whose `data` field is
//! the JSON text of the payload. The sender's nonce is read from
//! `zion_getBalance` immediately before each write; there is no local nonce
//! cache, so two writes racing from the same wallet can pick the same nonce.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::info;
use zionlayer_agent_core::{AgentCapability, AgentDid, AgentMessage, AgentWallet, InferenceReceipt};
use zionlayer_rpc_api::{methods, AccountState, AgentRecord, TransactionRequest};

use crate::client::RpcClient;
use crate::error::SdkError;

/// Borrowed view of an [`RpcClient`] exposing the agent calls.
#[derive(Debug, Clone, Copy)]
pub struct AgentsApi<'a> {
    rpc: &'a RpcClient,
}

impl<'a> AgentsApi<'a> {
    pub fn new(rpc: &'a RpcClient) -> Self {
        Self { rpc }
    }

    /// Register a new agent DID on-chain. Returns the DID and the tx hash.
    pub async fn register(
        &self,
        wallet: &AgentWallet,
        capabilities: Vec<AgentCapability>,
        metadata: BTreeMap<String, String>,
    ) -> Result<(AgentDid, String), SdkError> {
        let did = AgentDid::for_wallet(wallet, capabilities, metadata);
        let nonce = account_nonce(self.rpc, &wallet.address).await?;
        let tx = TransactionRequest::agent_register(&wallet.address, nonce, &did)?;
        let tx_hash = send_transaction(self.rpc, &tx).await?;
        info!(did = %did.id, %tx_hash, "agent registration submitted");
        Ok((did, tx_hash))
    }

    /// Fetch an agent record by DID string.
    pub async fn get(&self, did: &str) -> Result<AgentRecord, SdkError> {
        self.rpc.call_as(methods::GET_AGENT, vec![json!(did)]).await
    }

    /// Send an on-chain agent message. Returns the tx hash.
    ///
    /// `msg.nonce` is overwritten with the sender's current nonce before the
    /// message is encoded, and keeps that value after the call.
    pub async fn send_message(
        &self,
        wallet: &AgentWallet,
        msg: &mut AgentMessage,
    ) -> Result<String, SdkError> {
        msg.nonce = account_nonce(self.rpc, &wallet.address).await?;
        let tx = TransactionRequest::agent_message(&wallet.address, msg.nonce, msg)?;
        send_transaction(self.rpc, &tx).await
    }

    /// Submit an inference receipt for on-chain verification. Returns the tx
    /// hash.
    pub async fn submit_inference_receipt(
        &self,
        wallet: &AgentWallet,
        receipt: &InferenceReceipt,
    ) -> Result<String, SdkError> {
        let nonce = account_nonce(self.rpc, &wallet.address).await?;
        let tx = TransactionRequest::inference_receipt(&wallet.address, nonce, receipt)?;
        send_transaction(self.rpc, &tx).await
    }
}

/// The nonce the next transaction from `address` must carry. A `null`
/// account reads as nonce 0.
pub(crate) async fn account_nonce(rpc: &RpcClient, address: &str) -> Result<u64, SdkError> {
    let account: AccountState = rpc
        .call_or_default(methods::GET_BALANCE, vec![json!(address)])
        .await?;
    Ok(account.nonce)
}

/// Submit `tx` and return the hash string the node assigns it.
pub(crate) async fn send_transaction(
    rpc: &RpcClient,
    tx: &TransactionRequest,
) -> Result<String, SdkError> {
    let result = rpc
        .call(methods::SEND_TRANSACTION, vec![serde_json::to_value(tx)?])
        .await?;
    match result {
        Value::String(hash) => Ok(hash),
        other => Err(SdkError::UnexpectedResult {
            method: methods::SEND_TRANSACTION.to_string(),
            detail: format!("expected a tx hash string, got {other}"),
        }),
    }
}
