//! Ledger adapter error types.

use educred_core::TokenId;
use thiserror::Error;

/// Errors from ledger calls.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The target network has no configured contract address.
    /// Raised before any network I/O is attempted.
    #[error("no credential contract deployed on network {network}")]
    UnsupportedNetwork { network: String },

    /// A write call failed at submission or confirmation.
    #[error("ledger write failed on {network}: {reason}")]
    WriteFailed { network: String, reason: String },

    /// A read call failed at transport, RPC, or decode level.
    #[error("ledger read failed on {network}: {reason}")]
    ReadFailed { network: String, reason: String },

    /// The identifier does not resolve to an existing credential.
    #[error("credential {token_id} not found on {network}")]
    RecordNotFound { token_id: TokenId, network: String },
}
