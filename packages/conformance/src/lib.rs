//! Shared helpers for the ZionLayer conformance test suite.
//!
//! Provides [`spawn_node`] — a function that binds a `TcpListener` on an
//! ephemeral port, wires up an in-process development node, and returns both
//! the RPC URL and a handle to the node's state so tests can seed balances
//! and seal blocks without going through the HTTP layer.

use std::sync::Arc;

use axum::Router;
use zionlayer::{AgenticClient, ClientConfig};
use zionlayer_devnode::{build_router, ChainState, DevnodeConfig};

/// Start an ephemeral in-process node and return `(rpc_url, state)`.
///
/// The node runs in a background `tokio` task bound to an OS-assigned port
/// on `127.0.0.1`. No block producer runs: pending transactions stay in the
/// mempool until the test calls [`ChainState::seal_block`].
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound or the node fails to start.
pub async fn spawn_node() -> (String, Arc<ChainState>) {
    spawn_node_with(DevnodeConfig::default()).await
}

/// Like [`spawn_node`], with explicit config. `bind_addr` is ignored.
pub async fn spawn_node_with(config: DevnodeConfig) -> (String, Arc<ChainState>) {
    let state = Arc::new(ChainState::new(config.max_pool_size));
    let url = spawn_router(build_router(Arc::clone(&state), config)).await;
    (url, state)
}

/// Serve `router` on an ephemeral `127.0.0.1` port and return its base URL.
///
/// Used directly by tests that need a node with non-standard behaviour.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance node error");
    });

    format!("http://{addr}")
}

/// An SDK client pointed at `rpc_url` with a short timeout.
pub fn client_for(rpc_url: &str) -> AgenticClient {
    let mut config = ClientConfig::new(rpc_url);
    config.timeout = std::time::Duration::from_secs(5);
    AgenticClient::from_config(&config).expect("build SDK client")
}
