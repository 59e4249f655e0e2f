//! HTTP request handlers for the development node.
//!
//! - [`rpc`] — `POST /`, the JSON-RPC endpoint.
//! - [`health`] — `GET /health`.

pub mod health;
pub mod rpc;

use std::sync::Arc;

use crate::{config::DevnodeConfig, state::ChainState};

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub state: Arc<ChainState>,
    pub config: DevnodeConfig,
}
