//! Agent registry record — result of `zion_getAgent`.

use serde::{Deserialize, Serialize};
use zionlayer_agent_core::AgentDid;

/// On-chain metadata for a registered agent.
///
/// # Example
///
/// ```json
/// {
///   "did": { "id": "did:agc:0x3fa1…", "controller": "0x3fa1…", "capabilities": [], "publicKey": "…", "metadata": {} },
///   "registeredAt": 12,
///   "messageCount": 0,
///   "active": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub did: AgentDid,

    /// Block height at which the registration was applied.
    #[serde(default)]
    pub registered_at: u64,

    /// Messages sent by this agent since registration.
    #[serde(default)]
    pub message_count: u64,

    #[serde(default)]
    pub active: bool,
}
