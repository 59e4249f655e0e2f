//! Client configuration, populated from environment variables.

use std::time::Duration;

/// Default node endpoint: a local node on the standard JSON-RPC port.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for an [`AgenticClient`](crate::AgenticClient).
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `ZION_RPC_URL` | `http://localhost:8545` | Node JSON-RPC endpoint |
/// | `ZION_RPC_TIMEOUT_SECS` | `30` | Per-request timeout |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Populate config from environment variables, applying defaults where
    /// absent. An unparsable timeout falls back to the default.
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("ZION_RPC_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            rpc_url: std::env::var("ZION_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.into()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}
