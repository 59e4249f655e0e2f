//! Background block producer.
//!
//! Every interval, [`BlockProducer`] seals one block from the mempool. Empty
//! intervals produce nothing. Transactions that fail to apply are logged
//! and dropped; they do not stop the loop.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::state::ChainState;

pub struct BlockProducer {
    state: Arc<ChainState>,
    tx_limit: usize,
}

impl BlockProducer {
    pub fn new(state: Arc<ChainState>, tx_limit: usize) -> Self {
        Self { state, tx_limit }
    }

    /// Seal one block now. Returns the number of applied transactions.
    pub fn tick(&self) -> usize {
        let Some(block) = self.state.seal_block(self.tx_limit) else {
            return 0;
        };
        for (hash, reason) in &block.dropped {
            warn!(height = block.height, %hash, %reason, "transaction dropped");
        }
        info!(
            height = block.height,
            txs = block.applied.len(),
            dropped = block.dropped.len(),
            "block sealed"
        );
        block.applied.len()
    }

    /// Run forever, sealing a block every `interval`.
    pub async fn run(self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            self.tick();
        }
    }
}
