//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the EduCred stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `ContentId` where a `TxHash` is expected.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces prevents
//! cross-namespace confusion where a content identifier is handed to a
//! ledger call expecting an address, or vice versa.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Ledger-assigned credential identifier.
///
/// Assigned exactly once at mint time by the credential contract and never
/// reused. Never chosen by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u64);

/// Wallet address on an EVM chain (0x-prefixed, 40 hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EthAddress(String);

/// Opaque content identifier returned by the content store.
///
/// Content-addressed: once recorded on the ledger it is never mutated,
/// because any edit to the underlying content produces a new identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(String);

/// Transaction hash returned by a confirmed ledger write (0x + 64 hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(String);

impl TokenId {
    /// Access the inner integer.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::str::FromStr for TokenId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidTokenId(s.to_string()))
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EthAddress {
    /// Validate and wrap a wallet address string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAddress`] unless the input is `0x`
    /// followed by exactly 40 hex characters.
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if is_valid_eth_address(&s) {
            Ok(Self(s))
        } else {
            Err(CoreError::InvalidAddress(s))
        }
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened display form for logs and status lines: `0x742d…d8b1`.
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl std::fmt::Display for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ContentId {
    /// Wrap a content identifier, rejecting the empty string.
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(CoreError::InvalidContentId)
        } else {
            Ok(Self(s))
        }
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TxHash {
    /// Validate and wrap a transaction hash string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTxHash`] unless the input is `0x`
    /// followed by exactly 64 hex characters.
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        let hex = s.strip_prefix("0x").unwrap_or("");
        if hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(s))
        } else {
            Err(CoreError::InvalidTxHash(s))
        }
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate that a string is a well-formed Ethereum address (0x + 40 hex chars).
pub fn is_valid_eth_address(addr: &str) -> bool {
    addr.len() == 42
        && addr.starts_with("0x")
        && addr[2..].chars().all(|c| c.is_ascii_hexdigit())
}
