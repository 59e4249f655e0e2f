//! Data types carried in ZionLayer agent transactions.
//!
//! These are plain data holders: [`AgentCapability`], [`AgentDid`],
//! [`AgentMessage`] and [`InferenceReceipt`]. Each one is JSON-encoded into
//! the `data` field of a transaction, using the field names shown on each
//! type. The node does all validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::did::AgentDidRef;
use crate::wallet::AgentWallet;

/// A named, versioned capability an agent advertises, e.g. `inference@1.0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCapability {
    pub name: String,
    pub version: String,
}

impl AgentCapability {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Parses `name:version`. Used by the CLI's `--capability` flag.
impl std::str::FromStr for AgentCapability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => {
                Ok(Self::new(name, version))
            }
            _ => Err(format!(
                "invalid capability {s:?}: expected format <name>:<version>"
            )),
        }
    }
}

/// A decentralised identifier anchored on-chain for an agent.
///
/// # Example
///
/// ```json
/// {
///   "id": "did:agc:0x3fa1…",
///   "controller": "0x3fa1…",
///   "capabilities": [{ "name": "inference", "version": "1.0" }],
///   "public_key": "02ab…",
///   "metadata": { "model": "claude-3-5-sonnet" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentDid {
    /// `did:agc:<controller address>`.
    pub id: String,

    /// Owner address.
    pub controller: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: Vec<AgentCapability>,

    /// Hex-encoded public key. Nodes echo this back as `publicKey`.
    #[serde(alias = "publicKey", default, deserialize_with = "null_as_default")]
    pub public_key: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: BTreeMap<String, String>,
}

impl AgentDid {
    /// Build the DID a wallet registers: `did:agc:<address>`, controlled by
    /// the wallet's address and advertising the wallet's public key.
    pub fn for_wallet(
        wallet: &AgentWallet,
        capabilities: Vec<AgentCapability>,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: AgentDidRef::for_address(&wallet.address).to_string(),
            controller: wallet.address.clone(),
            capabilities,
            public_key: wallet.public_key.clone(),
            metadata,
        }
    }
}

/// The kind of an [`AgentMessage`].
///
/// Serialises as an upper-case string (e.g. `"TASK"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    /// Ask the recipient to perform work.
    #[default]
    Task,
    /// Return the outcome of a task.
    Result,
    /// Hand a capability to another agent.
    Delegate,
    /// Withdraw a previous delegation.
    Revoke,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Task => write!(f, "TASK"),
            MessageType::Result => write!(f, "RESULT"),
            MessageType::Delegate => write!(f, "DELEGATE"),
            MessageType::Revoke => write!(f, "REVOKE"),
        }
    }
}

/// Case-insensitive; `task` and `TASK` both parse.
impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TASK" => Ok(MessageType::Task),
            "RESULT" => Ok(MessageType::Result),
            "DELEGATE" => Ok(MessageType::Delegate),
            "REVOKE" => Ok(MessageType::Revoke),
            other => Err(format!(
                "unknown message type {other:?}: expected TASK, RESULT, DELEGATE or REVOKE"
            )),
        }
    }
}

/// An on-chain structured message between two agents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentMessage {
    pub from_did: String,
    pub to_did: String,

    #[serde(rename = "type")]
    pub message_type: MessageType,

    /// Arbitrary JSON payload.
    pub payload: serde_json::Value,

    /// Sender's account nonce. Overwritten by
    /// `AgentsApi::send_message` with the nonce fetched from the node.
    #[serde(default)]
    pub nonce: u64,
}

impl AgentMessage {
    pub fn new(
        from_did: impl Into<String>,
        to_did: impl Into<String>,
        message_type: MessageType,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            from_did: from_did.into(),
            to_did: to_did.into(),
            message_type,
            payload,
            nonce: 0,
        }
    }
}

/// A record of one model inference, submitted for on-chain verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InferenceReceipt {
    pub agent_id: String,
    /// IPFS CID of the model.
    pub model_hash: String,
    pub input_hash: String,
    pub output_hash: String,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub prover_sig: String,
}

impl InferenceReceipt {
    /// Build a receipt stamped with the current time and no prover signature.
    pub fn new(
        agent_id: impl Into<String>,
        model_hash: impl Into<String>,
        input_hash: impl Into<String>,
        output_hash: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            model_hash: model_hash.into(),
            input_hash: input_hash.into(),
            output_hash: output_hash.into(),
            timestamp: chrono::Utc::now().timestamp(),
            prover_sig: String::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
