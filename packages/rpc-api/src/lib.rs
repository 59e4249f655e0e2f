//! Request and response types for the ZionLayer node JSON-RPC API.
//!
//! This crate encodes the wire contract between the `zionlayer` SDK and a
//! node as Rust types. Both the SDK and the development node depend on it,
//! so the two sides cannot drift apart.
//!
//! # Methods covered
//!
//! | Method | Params | Result |
//! |--------|--------|--------|
//! | `zion_sendTransaction` | `[`[`TransactionRequest`]`]` | tx hash string |
//! | `zion_getBalance` | `[address]` | [`AccountState`] |
//! | `zion_getAgent` | `[did]` | [`AgentRecord`] |
//! | `zion_getMempoolSize` | `[]` | [`MempoolSize`] |
//! | `zion_chainId` | `[]` | chain id string |

pub mod account;
pub mod agent;
pub mod envelope;
pub mod error;
pub mod quantity;
pub mod transaction;

pub use account::{AccountState, MempoolSize};
pub use agent::AgentRecord;
pub use envelope::{RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use error::RpcErrorObject;
pub use transaction::{TransactionRequest, TxType, DEFAULT_GAS_PRICE};

/// JSON-RPC method names served by a ZionLayer node.
pub mod methods {
    pub const SEND_TRANSACTION: &str = "zion_sendTransaction";
    pub const GET_BALANCE: &str = "zion_getBalance";
    pub const GET_AGENT: &str = "zion_getAgent";
    pub const GET_MEMPOOL_SIZE: &str = "zion_getMempoolSize";
    pub const CHAIN_ID: &str = "zion_chainId";
}
