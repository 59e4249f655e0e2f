//! Agent wallet — address, public key and private key as hex strings.
//!
//! This is a **placeholder** wallet. Keys are random hex tokens, not
//! elliptic-curve key pairs, and nothing here signs anything. The node is
//! responsible for every check that matters; the wallet only supplies the
//! `from` address and the public key advertised in an [`AgentDid`].
//!
//! # Typical host lifecycle
//!
//! ```text
//! First run:
//!   wallet = AgentWallet::generate()
//!   key    = wallet.private_key()        // persist this
//!
//! Subsequent runs:
//!   wallet = AgentWallet::from_private_key(&saved_key)?
//!   // same address as before
//! ```
//!
//! [`AgentDid`]: crate::models::AgentDid

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Length of a generated private key, in bytes.
const PRIVATE_KEY_BYTES: usize = 32;

/// Length of a generated public key, in bytes (compressed-point sized).
const PUBLIC_KEY_BYTES: usize = 33;

/// Number of trailing hex characters that form an address.
const ADDRESS_HEX_CHARS: usize = 40;

/// Width a restored public key is zero-padded to.
const PUBLIC_KEY_HEX_CHARS: usize = PUBLIC_KEY_BYTES * 2;

/// Errors from [`AgentWallet::from_private_key`].
#[derive(Debug, Error, PartialEq)]
pub enum WalletError {
    #[error("private key is empty")]
    Empty,

    /// `position` is a character offset into the key after any `0x` prefix.
    #[error("private key has non-hex character {character:?} at position {position}")]
    InvalidHex { position: usize, character: char },
}

/// An agent's wallet.
///
/// `Debug` never prints the private key.
#[derive(Clone, PartialEq, Eq)]
pub struct AgentWallet {
    /// `0x`-prefixed address, e.g. `0x3fa1…`.
    pub address: String,
    /// Hex-encoded public key, no prefix.
    pub public_key: String,
    private_key: String,
}

impl AgentWallet {
    /// Construct from pre-validated parts.
    pub fn new(
        address: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Generate a new random wallet using OS randomness.
    ///
    /// The address is `0x` followed by the last 40 hex characters of the
    /// public key.
    pub fn generate() -> Self {
        let private_key = random_hex(PRIVATE_KEY_BYTES);
        let public_key = random_hex(PUBLIC_KEY_BYTES);
        let address = format!("0x{}", hex_suffix(&public_key, ADDRESS_HEX_CHARS));
        Self {
            address,
            public_key,
            private_key,
        }
    }

    /// Load a wallet from a private key hex string.
    ///
    /// An optional `0x` prefix is stripped. The address is `0x` followed by
    /// the last 40 characters of the key (the whole key if it is shorter), and
    /// the public key is the private key left-padded with `0` to 66
    /// characters.
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, WalletError> {
        let trimmed = private_key_hex.trim();
        let key = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if key.is_empty() {
            return Err(WalletError::Empty);
        }
        if let Some((position, character)) =
            key.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(WalletError::InvalidHex { position, character });
        }

        let address = format!("0x{}", hex_suffix(key, ADDRESS_HEX_CHARS));
        let public_key = format!("{key:0>width$}", width = PUBLIC_KEY_HEX_CHARS);
        Ok(Self {
            address,
            public_key,
            private_key: key.to_string(),
        })
    }

    /// The private key hex. **Keep this secret.** Pass it to
    /// [`from_private_key`](Self::from_private_key) to restore the wallet.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl std::fmt::Debug for AgentWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentWallet")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Last `n` characters of an ASCII hex string.
fn hex_suffix(s: &str, n: usize) -> &str {
    &s[s.len().saturating_sub(n)..]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_shapes() {
        let w = AgentWallet::generate();
        assert_eq!(w.private_key().len(), 64);
        assert_eq!(w.public_key.len(), 66);
        assert_eq!(w.address.len(), 42);
        assert!(w.address.starts_with("0x"));
    }

    #[test]
    fn generate_address_is_public_key_suffix() {
        let w = AgentWallet::generate();
        assert!(w.public_key.ends_with(&w.address[2..]));
    }

    #[test]
    fn generate_is_random() {
        assert_ne!(AgentWallet::generate().address, AgentWallet::generate().address);
    }

    #[test]
    fn from_private_key_derives_address_and_public_key() {
        let key = "11".repeat(32);
        let w = AgentWallet::from_private_key(&key).unwrap();
        assert_eq!(w.address, format!("0x{}", "11".repeat(20)));
        assert_eq!(w.public_key, format!("00{key}"));
        assert_eq!(w.private_key(), key);
    }

    #[test]
    fn from_private_key_is_stable() {
        let key = "ab".repeat(32);
        assert_eq!(
            AgentWallet::from_private_key(&key).unwrap(),
            AgentWallet::from_private_key(&key).unwrap()
        );
    }

    #[test]
    fn from_private_key_short_key_uses_whole_key() {
        let w = AgentWallet::from_private_key("abc").unwrap();
        assert_eq!(w.address, "0xabc");
        assert_eq!(w.public_key.len(), 66);
        assert!(w.public_key.ends_with("abc"));
    }

    #[test]
    fn from_private_key_strips_prefix() {
        let key = "cd".repeat(32);
        let with = AgentWallet::from_private_key(&format!("0x{key}")).unwrap();
        let without = AgentWallet::from_private_key(&key).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn from_private_key_rejects_empty() {
        assert_eq!(AgentWallet::from_private_key("0x"), Err(WalletError::Empty));
    }

    #[test]
    fn from_private_key_rejects_non_hex() {
        assert_eq!(
            AgentWallet::from_private_key("0xabz1"),
            Err(WalletError::InvalidHex {
                position: 2,
                character: 'z'
            })
        );
    }

    #[test]
    fn invalid_key_error_does_not_echo_key() {
        let key = format!("{}z", "ab".repeat(31));
        let err = AgentWallet::from_private_key(&key).unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("abab"), "error leaks key material: {msg}");
        assert!(msg.contains("'z'"));
        assert!(msg.contains("62"));
    }

    #[test]
    fn debug_redacts_private_key() {
        let w = AgentWallet::generate();
        let printed = format!("{w:?}");
        assert!(!printed.contains(w.private_key()));
        assert!(printed.contains("<redacted>"));
    }
}
