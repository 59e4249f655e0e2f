//! Transaction request — the single parameter of `zion_sendTransaction`.
//!
//! The SDK never signs. It fills in the sender, gas, gas price, nonce and a
//! JSON-encoded payload, and the node does the rest.

use serde::{Deserialize, Serialize};
use zionlayer_agent_core::{AgentDid, AgentMessage, InferenceReceipt};

/// Gas price, in the smallest $ZIO unit, attached to every SDK transaction.
pub const DEFAULT_GAS_PRICE: &str = "1000000000";

/// The kind of a transaction, carried as an integer in the `type` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum TxType {
    /// Move $ZIO between accounts.
    Transfer,
    /// Anchor an [`AgentDid`] on-chain.
    AgentRegister,
    /// Deliver an [`AgentMessage`].
    AgentMessage,
    /// Submit an [`InferenceReceipt`] for verification.
    InferenceReceipt,
}

impl TxType {
    /// Gas limit the SDK attaches to this kind of transaction.
    pub fn gas_limit(self) -> u64 {
        match self {
            TxType::Transfer => 21_000,
            TxType::AgentRegister => 200_000,
            TxType::AgentMessage => 50_000,
            TxType::InferenceReceipt => 100_000,
        }
    }
}

impl From<TxType> for u8 {
    fn from(t: TxType) -> u8 {
        match t {
            TxType::Transfer => 0,
            TxType::AgentRegister => 2,
            TxType::AgentMessage => 3,
            TxType::InferenceReceipt => 6,
        }
    }
}

impl TryFrom<u8> for TxType {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(TxType::Transfer),
            2 => Ok(TxType::AgentRegister),
            3 => Ok(TxType::AgentMessage),
            6 => Ok(TxType::InferenceReceipt),
            other => Err(format!("unsupported transaction type {other}")),
        }
    }
}

/// An unsigned transaction as submitted by the SDK.
///
/// # Example
///
/// ```json
/// {
///   "type": 2,
///   "from": "0x3fa1…",
///   "gas": 200000,
///   "gasPrice": "1000000000",
///   "nonce": 0,
///   "data": "{\"id\":\"did:agc:0x3fa1…\",…}"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub tx_type: TxType,

    /// Sender address.
    pub from: String,

    /// Recipient address. Only transfers set it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Amount to move, as a decimal string. Only transfers set it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    pub gas: u64,

    /// Decimal string.
    #[serde(rename = "gasPrice")]
    pub gas_price: String,

    pub nonce: u64,

    /// JSON text of the type-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Signature bytes. The SDK never sets this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

impl TransactionRequest {
    fn with_payload<T: Serialize>(
        tx_type: TxType,
        from: &str,
        nonce: u64,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            tx_type,
            from: from.to_string(),
            to: None,
            value: None,
            gas: tx_type.gas_limit(),
            gas_price: DEFAULT_GAS_PRICE.to_string(),
            nonce,
            data: Some(serde_json::to_string(payload)?),
            sig: None,
        })
    }

    /// Type-2 transaction registering `did`.
    pub fn agent_register(from: &str, nonce: u64, did: &AgentDid) -> Result<Self, serde_json::Error> {
        Self::with_payload(TxType::AgentRegister, from, nonce, did)
    }

    /// Type-3 transaction carrying `msg`.
    pub fn agent_message(
        from: &str,
        nonce: u64,
        msg: &AgentMessage,
    ) -> Result<Self, serde_json::Error> {
        Self::with_payload(TxType::AgentMessage, from, nonce, msg)
    }

    /// Type-6 transaction carrying `receipt`.
    pub fn inference_receipt(
        from: &str,
        nonce: u64,
        receipt: &InferenceReceipt,
    ) -> Result<Self, serde_json::Error> {
        Self::with_payload(TxType::InferenceReceipt, from, nonce, receipt)
    }

    /// Type-0 transaction moving `value` from `from` to `to`.
    pub fn transfer(from: &str, to: &str, value: u128, nonce: u64) -> Self {
        Self {
            tx_type: TxType::Transfer,
            from: from.to_string(),
            to: Some(to.to_string()),
            value: Some(value.to_string()),
            gas: TxType::Transfer.gas_limit(),
            gas_price: DEFAULT_GAS_PRICE.to_string(),
            nonce,
            data: None,
            sig: None,
        }
    }
}
