//! Account and mempool query results.

use serde::{Deserialize, Serialize};

use crate::quantity;

/// Result of `zion_getBalance`.
///
/// ```json
/// { "address": "0x3fa1…", "balance": "1000000000000000000", "nonce": "3" }
/// ```
///
/// Unknown accounts are reported with zero balance and zero nonce rather
/// than an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AccountState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Balance in the smallest $ZIO unit.
    #[serde(
        default,
        deserialize_with = "quantity::deserialize_u128",
        serialize_with = "quantity::serialize_decimal"
    )]
    pub balance: u128,

    /// Number of transactions already applied for this account; the nonce
    /// the next transaction must carry.
    #[serde(
        default,
        deserialize_with = "quantity::deserialize_u64",
        serialize_with = "quantity::serialize_decimal"
    )]
    pub nonce: u64,
}

/// Result of `zion_getMempoolSize`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MempoolSize {
    #[serde(default, deserialize_with = "quantity::deserialize_u64")]
    pub size: u64,
}
