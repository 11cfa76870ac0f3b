//! # Verification Lookup
//!
//! Single read-path call translating a token identifier into a record or a
//! negative outcome. Nothing escapes this boundary as an error: adapter
//! failures become a [`VerificationOutcome::Negative`] carrying a
//! user-facing message. Every call re-queries the ledger; there is no cache.

use educred_core::{CredentialRecord, Network, TokenId};
use educred_ledger::{Ledger, LedgerError};

/// Result of a verification lookup.
#[derive(Debug, Clone)]
pub enum VerificationOutcome {
    /// The ledger holds a record for the identifier. The record's own
    /// `verified` flag is the ledger-side verification state.
    Record(CredentialRecord),
    /// No record, or the lookup itself failed. The message is user-facing
    /// and never empty.
    Negative { message: String },
}

impl VerificationOutcome {
    pub fn is_positive(&self) -> bool {
        matches!(self, VerificationOutcome::Record(_))
    }
}

/// Look up one credential.
pub async fn verify(
    ledger: &dyn Ledger,
    token_id: TokenId,
    network: Network,
) -> VerificationOutcome {
    match ledger.credential(token_id, network).await {
        Ok(record) => VerificationOutcome::Record(record),
        Err(LedgerError::RecordNotFound { .. }) => VerificationOutcome::Negative {
            message: format!("No credential found for token {token_id} on {}", network.name()),
        },
        Err(e) => {
            tracing::warn!(%token_id, network = network.name(), error = %e, "verification lookup failed");
            VerificationOutcome::Negative {
                message: format!("Verification failed: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use educred_ledger::MockLedger;

    #[tokio::test]
    async fn existing_credential_is_positive() {
        let ledger = MockLedger::seeded();
        let outcome = verify(&ledger, TokenId(1), Network::Sepolia).await;
        match outcome {
            VerificationOutcome::Record(record) => {
                assert_eq!(record.institution, "MIT");
                assert!(record.verified);
            }
            VerificationOutcome::Negative { message } => {
                panic!("expected a record, got: {message}")
            }
        }
    }

    #[tokio::test]
    async fn missing_credential_is_negative_with_message() {
        let ledger = MockLedger::seeded();
        let outcome = verify(&ledger, TokenId(999), Network::Sepolia).await;
        match outcome {
            VerificationOutcome::Negative { message } => {
                assert!(!message.is_empty());
                assert!(message.contains("999"));
            }
            VerificationOutcome::Record(_) => panic!("expected a negative outcome"),
        }
    }

    #[tokio::test]
    async fn adapter_failure_is_negative_not_a_panic() {
        let ledger = MockLedger::seeded();
        // Mainnet carries no contract, so the lookup fails inside the adapter.
        let outcome = verify(&ledger, TokenId(1), Network::Mainnet).await;
        match outcome {
            VerificationOutcome::Negative { message } => assert!(!message.is_empty()),
            VerificationOutcome::Record(_) => panic!("expected a negative outcome"),
        }
    }
}
