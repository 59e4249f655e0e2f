//! In-memory chain state for the development node.
//!
//! All data is held in RAM behind a [`RwLock`] and is lost when the process
//! exits. Submitted transactions wait in the mempool until
//! [`ChainState::seal_block`] pops a batch and applies it.
//!
//! Applying a transaction does only what the SDK's round trips observe:
//! the sender's nonce advances, registrations appear in the agent registry,
//! messages bump the sender's `messageCount`, and transfers move balance.
//! There are no signatures, fees, or consensus.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use sha2::{Digest, Sha256};
use zionlayer_agent_core::{AgentDid, AgentMessage, InferenceReceipt};
use zionlayer_rpc_api::{quantity, AccountState, AgentRecord, TransactionRequest, TxType};

// ---------------------------------------------------------------------------
// StateError
// ---------------------------------------------------------------------------

/// Reasons the node refuses a submission or drops a transaction on apply.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("mempool is full")]
    PoolFull,

    #[error("duplicate transaction")]
    DuplicateTransaction,

    #[error("agent not found")]
    AgentNotFound,

    #[error("agent already registered")]
    AgentAlreadyRegistered,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("balance overflow")]
    BalanceOverflow,

    #[error("invalid transaction payload: {0}")]
    InvalidPayload(String),
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct Account {
    balance: u128,
    nonce: u64,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    agents: HashMap<String, AgentRecord>,
    messages: Vec<AgentMessage>,
    receipts: Vec<InferenceReceipt>,
    /// Pending transactions keyed by hash.
    pool: HashMap<String, TransactionRequest>,
    height: u64,
}

/// Summary of one [`ChainState::seal_block`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlock {
    pub height: u64,
    /// Hashes of transactions that applied cleanly, in apply order.
    pub applied: Vec<String>,
    /// Transactions that were popped but failed to apply.
    pub dropped: Vec<(String, StateError)>,
}

// ---------------------------------------------------------------------------
// ChainState
// ---------------------------------------------------------------------------

/// Thread-safe world state plus mempool.
pub struct ChainState {
    inner: RwLock<Inner>,
    max_pool_size: usize,
}

impl ChainState {
    pub fn new(max_pool_size: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_pool_size,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // --- Accounts ------------------------------------------------------------

    /// Balance and nonce of `address`; unknown addresses read as zero.
    pub fn account(&self, address: &str) -> AccountState {
        let inner = self.read();
        let acc = inner.accounts.get(address).copied().unwrap_or_default();
        AccountState {
            address: Some(address.to_string()),
            balance: acc.balance,
            nonce: acc.nonce,
        }
    }

    /// Overwrite the balance of `address`, creating the account if needed.
    pub fn set_balance(&self, address: &str, balance: u128) {
        let mut inner = self.write();
        inner.accounts.entry(address.to_string()).or_default().balance = balance;
    }

    // --- Agents --------------------------------------------------------------

    pub fn agent(&self, did: &str) -> Result<AgentRecord, StateError> {
        self.read()
            .agents
            .get(did)
            .cloned()
            .ok_or(StateError::AgentNotFound)
    }

    /// Every message applied so far, oldest first.
    pub fn messages(&self) -> Vec<AgentMessage> {
        self.read().messages.clone()
    }

    /// Every inference receipt applied so far, oldest first.
    pub fn receipts(&self) -> Vec<InferenceReceipt> {
        self.read().receipts.clone()
    }

    // --- Mempool -------------------------------------------------------------

    /// Add `tx` to the mempool and return its hash.
    pub fn submit(&self, tx: TransactionRequest) -> Result<String, StateError> {
        let hash = tx_hash(&tx)?;
        let mut inner = self.write();
        if inner.pool.len() >= self.max_pool_size {
            return Err(StateError::PoolFull);
        }
        if inner.pool.contains_key(&hash) {
            return Err(StateError::DuplicateTransaction);
        }
        inner.pool.insert(hash.clone(), tx);
        Ok(hash)
    }

    pub fn mempool_size(&self) -> usize {
        self.read().pool.len()
    }

    /// Current block height; `0` until the first non-empty block is sealed.
    pub fn height(&self) -> u64 {
        self.read().height
    }

    /// Pop up to `limit` pending transactions, highest gas price first, and
    /// apply them as a new block. Returns `None` when the mempool is empty.
    pub fn seal_block(&self, limit: usize) -> Option<SealedBlock> {
        let mut inner = self.write();
        if inner.pool.is_empty() || limit == 0 {
            return None;
        }

        let mut batch: Vec<(String, TransactionRequest)> = inner.pool.drain().collect();
        batch.sort_by(|(ha, a), (hb, b)| {
            gas_price(b)
                .cmp(&gas_price(a))
                .then(a.nonce.cmp(&b.nonce))
                .then(ha.cmp(hb))
        });
        let rest = batch.split_off(limit.min(batch.len()));
        inner.pool.extend(rest);

        inner.height += 1;
        let height = inner.height;
        let mut block = SealedBlock {
            height,
            applied: Vec::new(),
            dropped: Vec::new(),
        };

        for (hash, tx) in batch {
            match apply(&mut inner, &tx, height) {
                Ok(()) => {
                    inner.accounts.entry(tx.from.clone()).or_default().nonce += 1;
                    block.applied.push(hash);
                }
                Err(e) => block.dropped.push((hash, e)),
            }
        }

        Some(block)
    }
}

impl Default for ChainState {
    fn default() -> Self {
        Self::new(10_000)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `0x` + hex SHA-256 of the transaction's JSON with the signature cleared.
pub fn tx_hash(tx: &TransactionRequest) -> Result<String, StateError> {
    let mut unsigned = tx.clone();
    unsigned.sig = None;
    let bytes =
        serde_json::to_vec(&unsigned).map_err(|e| StateError::InvalidPayload(e.to_string()))?;
    Ok(format!("0x{}", hex::encode(Sha256::digest(&bytes))))
}

fn gas_price(tx: &TransactionRequest) -> u128 {
    quantity::parse_u128(&tx.gas_price).unwrap_or(0)
}

fn payload<T: serde::de::DeserializeOwned>(tx: &TransactionRequest) -> Result<T, StateError> {
    let data = tx
        .data
        .as_deref()
        .ok_or_else(|| StateError::InvalidPayload("missing data".into()))?;
    serde_json::from_str(data).map_err(|e| StateError::InvalidPayload(e.to_string()))
}

fn apply(inner: &mut Inner, tx: &TransactionRequest, height: u64) -> Result<(), StateError> {
    match tx.tx_type {
        TxType::Transfer => {
            let to = tx
                .to
                .clone()
                .ok_or_else(|| StateError::InvalidPayload("transfer without recipient".into()))?;
            let value = quantity::parse_u128(tx.value.as_deref().unwrap_or("0"))
                .map_err(StateError::InvalidPayload)?;
            let src_balance = inner.accounts.get(&tx.from).map_or(0, |a| a.balance);
            if src_balance < value {
                return Err(StateError::InsufficientBalance);
            }
            if to == tx.from {
                return Ok(());
            }
            // Both sides are checked before either account is written.
            let dst_balance = inner
                .accounts
                .get(&to)
                .map_or(0, |a| a.balance)
                .checked_add(value)
                .ok_or(StateError::BalanceOverflow)?;
            inner.accounts.entry(tx.from.clone()).or_default().balance = src_balance - value;
            inner.accounts.entry(to).or_default().balance = dst_balance;
        }
        TxType::AgentRegister => {
            let did: AgentDid = payload(tx)?;
            if inner.agents.contains_key(&did.id) {
                return Err(StateError::AgentAlreadyRegistered);
            }
            inner.agents.insert(
                did.id.clone(),
                AgentRecord {
                    did,
                    registered_at: height,
                    message_count: 0,
                    active: true,
                },
            );
        }
        TxType::AgentMessage => {
            let msg: AgentMessage = payload(tx)?;
            if let Some(rec) = inner.agents.get_mut(&msg.from_did) {
                rec.message_count += 1;
            }
            inner.messages.push(msg);
        }
        TxType::InferenceReceipt => {
            let receipt: InferenceReceipt = payload(tx)?;
            inner.receipts.push(receipt);
        }
    }
    Ok(())
}
