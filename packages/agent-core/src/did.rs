//! Agent DID strings — `did:agc:0x…` format.
//!
//! An agent's DID is its wallet address under the `agc` method:
//!
//! ```text
//! did:agc:0x3fa1c0ffee…
//! └─────┘ └──────────┘
//!  method   controller address
//! ```
//!
//! The node keys its agent registry by the full DID string, so the SDK
//! passes DIDs around as plain strings. [`AgentDidRef`] exists for callers
//! that take a DID from user input and want it checked before it goes on
//! the wire.

use thiserror::Error;

/// The `did:agc:` method prefix.
pub const DID_PREFIX: &str = "did:agc:";

/// Errors that can occur when parsing a DID string.
#[derive(Debug, Error, PartialEq)]
pub enum DidError {
    #[error("not an agc DID (expected 'did:agc:' prefix): '{0}'")]
    WrongMethod(String),

    #[error("empty address in DID: '{0}'")]
    EmptyAddress(String),
}

/// A parsed `did:agc:<address>` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentDidRef {
    /// The controller address, e.g. `0x3fa1…`.
    pub address: String,
}

impl AgentDidRef {
    /// The DID for a wallet address.
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    /// Parse a `did:agc:<address>` string.
    pub fn parse(s: &str) -> Result<Self, DidError> {
        let s = s.trim();
        let address = s
            .strip_prefix(DID_PREFIX)
            .ok_or_else(|| DidError::WrongMethod(s.to_string()))?;

        if address.is_empty() {
            return Err(DidError::EmptyAddress(s.to_string()));
        }

        Ok(Self {
            address: address.to_string(),
        })
    }
}

impl std::fmt::Display for AgentDidRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", DID_PREFIX, self.address)
    }
}

impl std::str::FromStr for AgentDidRef {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
