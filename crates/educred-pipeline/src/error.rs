//! Pipeline error types.
//!
//! Precondition failures (`WalletNotConnected`, `MissingRequiredInput`) are
//! raised before any adapter call. Adapter failures are carried unchanged;
//! the pipeline layer adds only the stage at which they occurred.

use educred_ledger::LedgerError;
use educred_storage::StorageError;
use thiserror::Error;

use crate::issue::IssueStage;

/// Errors from an issuance run.
#[derive(Debug, Error)]
pub enum IssueError {
    /// No active wallet session. Always checked first.
    #[error("no wallet connected: connect a wallet before issuing")]
    WalletNotConnected,

    /// A required input was absent. Checked before any adapter call.
    #[error("missing required input: {0}")]
    MissingRequiredInput(&'static str),

    /// Content store failure, unchanged from the adapter.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Ledger failure, unchanged from the adapter.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A failed issuance run: the terminal error plus the stage that was in
/// progress when it occurred. Precondition failures carry [`IssueStage::Idle`].
#[derive(Debug, Error)]
#[error("issuance failed while {stage}: {error}")]
pub struct IssueFailure {
    pub stage: IssueStage,
    #[source]
    pub error: IssueError,
}

impl IssueFailure {
    pub(crate) fn at(stage: IssueStage, error: impl Into<IssueError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }
}
