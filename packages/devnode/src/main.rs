//! `zion-devnode` — in-memory ZionLayer development node.
//!
//! # Quick start
//!
//! ```sh
//! # Default port 8545, one block per second:
//! zion-devnode
//!
//! # Faster blocks on another port:
//! ZION_BIND=127.0.0.1:9545 ZION_BLOCK_INTERVAL_MS=200 zion-devnode
//! ```
//!
//! # Environment variables
//!
//! See [`DevnodeConfig::from_env`] for the full list.

use std::sync::Arc;

use zionlayer_devnode::{build_router, BlockProducer, ChainState, DevnodeConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "zionlayer_devnode=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = DevnodeConfig::from_env();
    let state = Arc::new(ChainState::new(config.max_pool_size));

    {
        let producer = BlockProducer::new(Arc::clone(&state), config.block_tx_limit);
        let interval = config.block_interval;
        tracing::info!(
            "block producer starting (interval = {}ms, limit = {})",
            interval.as_millis(),
            config.block_tx_limit
        );
        tokio::spawn(async move {
            producer.run(interval).await;
        });
    }

    let app = build_router(state, config.clone());

    tracing::info!(chain_id = %config.chain_id, "listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    axum::serve(listener, app).await.expect("server error");
}
