//! Pure-logic agent primitives for ZionLayer.
//!
//! This crate has **no I/O** — no networking, no filesystem, no async
//! runtime. It defines the data carried in agent transactions and the
//! placeholder wallet that supplies addresses and public keys. The
//! `zionlayer` SDK crate does the JSON-RPC calls.

pub mod did;
pub mod models;
pub mod wallet;

pub use did::{AgentDidRef, DidError, DID_PREFIX};
pub use models::{AgentCapability, AgentDid, AgentMessage, InferenceReceipt, MessageType};
pub use wallet::{AgentWallet, WalletError};
