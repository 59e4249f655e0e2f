//! Rust SDK for ZionLayer.
//!
//! A thin client over a node's JSON-RPC endpoint: it builds transaction
//! payloads, posts them, and maps the responses into typed results. Nothing
//! here validates, signs, or orders transactions; the node does all of that.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`RpcClient`] transport and the [`AgenticClient`] entry point |
//! | [`agents`] | [`AgentsApi`]: register, get, send_message, submit_inference_receipt |
//! | [`chain`] | [`ChainApi`]: balances, mempool size, chain id, transfers |
//! | [`config`] | [`ClientConfig`] from environment variables |
//! | [`error`] | [`SdkError`] |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use zionlayer::{AgenticClient, AgentCapability, AgentWallet};
//!
//! let client = AgenticClient::new("http://localhost:8545")?;
//! let wallet = AgentWallet::generate();
//! let (did, tx_hash) = client
//!     .agents()
//!     .register(
//!         &wallet,
//!         vec![AgentCapability::new("inference", "1.0"), AgentCapability::new("tool-use", "1.0")],
//!         [("model".to_string(), "claude-3-5-sonnet".to_string())].into(),
//!     )
//!     .await?;
//! println!("registered {} in {tx_hash}", did.id);
//! ```

pub mod agents;
pub mod chain;
pub mod client;
pub mod config;
pub mod error;

pub use agents::AgentsApi;
pub use chain::ChainApi;
pub use client::{AgenticClient, RpcClient};
pub use config::ClientConfig;
pub use error::SdkError;

pub use zionlayer_agent_core::{
    AgentCapability, AgentDid, AgentDidRef, AgentMessage, AgentWallet, InferenceReceipt,
    MessageType, WalletError,
};
pub use zionlayer_rpc_api::{AccountState, AgentRecord, TxType};
