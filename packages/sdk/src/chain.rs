//! Chain façade — balance, mempool and chain-id queries, and transfers.

use serde_json::{json, Value};
use zionlayer_agent_core::AgentWallet;
use zionlayer_rpc_api::{methods, AccountState, MempoolSize, TransactionRequest};

use crate::agents::{account_nonce, send_transaction};
use crate::client::RpcClient;
use crate::error::SdkError;

/// Borrowed view of an [`RpcClient`] exposing the chain calls.
#[derive(Debug, Clone, Copy)]
pub struct ChainApi<'a> {
    rpc: &'a RpcClient,
}

impl<'a> ChainApi<'a> {
    pub fn new(rpc: &'a RpcClient) -> Self {
        Self { rpc }
    }

    /// Balance and nonce of `address`. Unknown accounts read as zero.
    pub async fn get_account(&self, address: &str) -> Result<AccountState, SdkError> {
        self.rpc
            .call_or_default(methods::GET_BALANCE, vec![json!(address)])
            .await
    }

    /// Balance of `address` in the smallest $ZIO unit.
    pub async fn get_balance(&self, address: &str) -> Result<u128, SdkError> {
        Ok(self.get_account(address).await?.balance)
    }

    /// Number of transactions waiting in the node's mempool.
    pub async fn get_mempool_size(&self) -> Result<u64, SdkError> {
        let size: MempoolSize = self
            .rpc
            .call_or_default(methods::GET_MEMPOOL_SIZE, vec![])
            .await?;
        Ok(size.size)
    }

    /// The node's chain id, e.g. `"0x1"` on devnet.
    pub async fn get_chain_id(&self) -> Result<String, SdkError> {
        match self.rpc.call(methods::CHAIN_ID, vec![]).await? {
            Value::String(id) => Ok(id),
            other => Err(SdkError::UnexpectedResult {
                method: methods::CHAIN_ID.to_string(),
                detail: format!("expected a chain id string, got {other}"),
            }),
        }
    }

    /// Move `value` from the wallet to `to`. Returns the tx hash.
    pub async fn transfer(
        &self,
        wallet: &AgentWallet,
        to: &str,
        value: u128,
    ) -> Result<String, SdkError> {
        let nonce = account_nonce(self.rpc, &wallet.address).await?;
        let tx = TransactionRequest::transfer(&wallet.address, to, value, nonce);
        send_transaction(self.rpc, &tx).await
    }
}
