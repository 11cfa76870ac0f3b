//! # Error Types — Core Validation Failures
//!
//! Errors raised by the validated constructors in this crate and by the
//! static network registry. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.

use thiserror::Error;

/// Errors from core type construction and network resolution.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The string is not a well-formed Ethereum address (0x + 40 hex chars).
    #[error("invalid wallet address: {0:?}")]
    InvalidAddress(String),

    /// The string does not parse as a positive token identifier.
    #[error("invalid token identifier: {0:?}")]
    InvalidTokenId(String),

    /// The content identifier is empty.
    #[error("content identifier must not be empty")]
    InvalidContentId,

    /// The string is not a well-formed transaction hash (0x + 64 hex chars).
    #[error("invalid transaction hash: {0:?}")]
    InvalidTxHash(String),

    /// The string does not name a known network.
    #[error("unknown network: {0:?}")]
    UnknownNetwork(String),

    /// The network is known but has no deployed credential contract.
    #[error("no credential contract deployed on network {network}")]
    UnsupportedNetwork {
        /// Human-readable network name.
        network: String,
    },
}
