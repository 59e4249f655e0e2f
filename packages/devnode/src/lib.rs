//! Public surface for the `zionlayer-devnode` crate.
//!
//! Exposes the router builder, state and config types so that external
//! crates (e.g. the conformance test suite) can spin up an in-process node
//! without spawning a subprocess.

pub mod config;
pub mod error;
pub mod handlers;
pub mod producer;
pub mod router;
pub mod state;

pub use config::DevnodeConfig;
pub use producer::BlockProducer;
pub use router::build_router;
pub use state::{ChainState, StateError};
