//! # educred-ledger — Ledger Adapter
//!
//! Wraps the external credential contract behind the [`Ledger`] trait.
//! Two implementations exist, selected by composition:
//!
//! - [`EvmLedger`] — JSON-RPC client for EVM-compatible chains. Transaction
//!   signing is delegated to the RPC endpoint's key management; this crate
//!   never holds private keys. Writes block until the transaction receipt
//!   confirms success.
//! - [`MockLedger`] — in-memory demo ledger seeded with sample credentials.
//!
//! Every call takes an explicit [`educred_core::Network`]. The static
//! registry resolves it to an endpoint/contract pair; an unmapped network
//! fails with [`LedgerError::UnsupportedNetwork`] before any network I/O.

pub mod abi;
pub mod error;
pub mod evm;
pub mod mock;

pub use error::LedgerError;
pub use evm::{EvmLedger, EvmLedgerConfig};
pub use mock::MockLedger;

use async_trait::async_trait;
use educred_core::{ContentId, CredentialRecord, EthAddress, Network, TokenId, TxHash};

/// A mint submission: who receives the credential and what it points at.
#[derive(Debug, Clone)]
pub struct MintRequest {
    /// Wallet the credential is minted to.
    pub recipient: EthAddress,
    /// Issuing institution label.
    pub institution: String,
    /// Course or program label.
    pub course_name: String,
    /// Content identifier of the stored metadata document.
    pub content_id: ContentId,
}

/// Read and write surface of the credential contract.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Mint a credential and suspend until the transaction is confirmed.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnsupportedNetwork`] before any I/O if the network
    /// carries no contract; [`LedgerError::WriteFailed`] on submission,
    /// revert, or confirmation timeout.
    async fn mint(&self, req: &MintRequest, network: Network) -> Result<TxHash, LedgerError>;

    /// Read one credential record.
    ///
    /// # Errors
    ///
    /// [`LedgerError::RecordNotFound`] if the identifier does not resolve
    /// to an existing token.
    async fn credential(
        &self,
        token_id: TokenId,
        network: Network,
    ) -> Result<CredentialRecord, LedgerError>;

    /// Enumerate the token identifiers owned by an address, in the ledger's
    /// index order `0..count`. Order is stable for a given on-chain state
    /// but otherwise unspecified.
    async fn owner_token_ids(
        &self,
        owner: &EthAddress,
        network: Network,
    ) -> Result<Vec<TokenId>, LedgerError>;

    /// Read the metadata URI recorded for a token.
    async fn token_uri(&self, token_id: TokenId, network: Network) -> Result<String, LedgerError>;
}
