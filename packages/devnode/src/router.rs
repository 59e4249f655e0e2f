//! Assembles the Axum [`Router`] for the development node.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::DevnodeConfig,
    handlers::{health, rpc, AppState},
    state::ChainState,
};

/// Build the complete application router with shared state.
pub fn build_router(state: Arc<ChainState>, config: DevnodeConfig) -> Router {
    let app_state = AppState { state, config };

    Router::new()
        .route("/", post(rpc::handle))
        .route("/health", get(health::health))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
