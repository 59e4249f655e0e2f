//! Development node configuration, populated from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

/// Runtime configuration for a development node.
///
/// All fields are populated from environment variables with sensible
/// defaults, so a node can be started with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `ZION_BIND` | `0.0.0.0:8545` | TCP socket address to listen on |
/// | `ZION_CHAIN_ID` | `0x1` | Value returned by `zion_chainId` |
/// | `ZION_BLOCK_INTERVAL_MS` | `1000` | Milliseconds between sealed blocks |
/// | `ZION_BLOCK_TX_LIMIT` | `100` | Maximum transactions applied per block |
/// | `ZION_MAX_POOL_SIZE` | `10000` | Pending transactions before submissions are refused |
#[derive(Debug, Clone)]
pub struct DevnodeConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    pub chain_id: String,

    /// How long the block producer waits between seals.
    pub block_interval: Duration,

    pub block_tx_limit: usize,

    pub max_pool_size: usize,
}

impl DevnodeConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = std::env::var("ZION_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8545".into())
            .parse()
            .expect("ZION_BIND must be a valid socket address (e.g. 0.0.0.0:8545)");

        let block_interval_ms = env_number("ZION_BLOCK_INTERVAL_MS").unwrap_or(1000);

        Self {
            bind_addr,
            chain_id: std::env::var("ZION_CHAIN_ID").unwrap_or_else(|_| "0x1".into()),
            block_interval: Duration::from_millis(block_interval_ms),
            block_tx_limit: env_number("ZION_BLOCK_TX_LIMIT").unwrap_or(100) as usize,
            max_pool_size: env_number("ZION_MAX_POOL_SIZE").unwrap_or(10_000) as usize,
        }
    }
}

impl Default for DevnodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8545)),
            chain_id: "0x1".into(),
            block_interval: Duration::from_millis(1000),
            block_tx_limit: 100,
            max_pool_size: 10_000,
        }
    }
}

fn env_number(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse::<u64>().ok())
}
