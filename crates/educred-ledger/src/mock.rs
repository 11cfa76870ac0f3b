//! In-memory demo ledger.
//!
//! Selected by composition for demo mode, never as a hidden fallback.
//! Seeded with two sample credentials so verification lookups have
//! something to find, and minting assigns fresh token identifiers with
//! deterministic transaction hashes. Honors the same network registry as
//! the real adapter: a network without a deployed contract fails with
//! `UnsupportedNetwork` here too.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use educred_core::{ContentId, CredentialRecord, EthAddress, Network, TokenId, TxHash};
use sha2::{Digest, Sha256};

use crate::error::LedgerError;
use crate::{Ledger, MintRequest};

/// Owner of the seeded sample credentials.
const SAMPLE_OWNER: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

/// Demo ledger holding credentials in memory.
#[derive(Debug)]
pub struct MockLedger {
    records: Mutex<BTreeMap<u64, CredentialRecord>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::seeded()
    }
}

impl MockLedger {
    /// An empty demo ledger.
    pub fn empty() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
        }
    }

    /// A demo ledger seeded with the two reference credentials.
    pub fn seeded() -> Self {
        let ledger = Self::empty();
        let now = Utc::now().timestamp().max(0) as u64;
        let seeds = [
            ("MIT", "Blockchain Fundamentals", "bafybeiexample1"),
            ("Stanford University", "Advanced Cryptography", "bafybeiexample2"),
        ];
        {
            let mut records = ledger
                .records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for (i, (institution, course, cid)) in seeds.iter().enumerate() {
                let (Ok(recipient), Ok(content_id)) =
                    (EthAddress::new(SAMPLE_OWNER), ContentId::new(*cid))
                else {
                    continue;
                };
                let token_id = (i + 1) as u64;
                records.insert(
                    token_id,
                    CredentialRecord {
                        token_id: TokenId(token_id),
                        recipient,
                        institution: institution.to_string(),
                        course_name: course.to_string(),
                        issue_date: now,
                        content_id,
                        verified: true,
                    },
                );
            }
        }
        ledger
    }

    /// Deterministic transaction hash for a demo mint.
    fn demo_tx_hash(token_id: u64, recipient: &EthAddress, content_id: &ContentId) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token_id.to_be_bytes());
        hasher.update(recipient.as_str().as_bytes());
        hasher.update(content_id.as_str().as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{hex}")
    }

    fn check_network(network: Network) -> Result<(), LedgerError> {
        network.deployed_contract().map(|_| ()).map_err(|_| {
            LedgerError::UnsupportedNetwork {
                network: network.name().to_string(),
            }
        })
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn mint(&self, req: &MintRequest, network: Network) -> Result<TxHash, LedgerError> {
        Self::check_network(network)?;

        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let token_id = records.keys().next_back().copied().unwrap_or(0) + 1;
        let hash_str = Self::demo_tx_hash(token_id, &req.recipient, &req.content_id);

        records.insert(
            token_id,
            CredentialRecord {
                token_id: TokenId(token_id),
                recipient: req.recipient.clone(),
                institution: req.institution.clone(),
                course_name: req.course_name.clone(),
                issue_date: Utc::now().timestamp().max(0) as u64,
                content_id: req.content_id.clone(),
                verified: true,
            },
        );

        let hash = TxHash::new(hash_str).map_err(|e| LedgerError::WriteFailed {
            network: network.name().to_string(),
            reason: e.to_string(),
        })?;

        tracing::warn!(
            %hash,
            token_id,
            network = network.name(),
            "demo ledger: mint recorded in memory only"
        );
        Ok(hash)
    }

    async fn credential(
        &self,
        token_id: TokenId,
        network: Network,
    ) -> Result<CredentialRecord, LedgerError> {
        Self::check_network(network)?;
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&token_id.as_u64())
            .cloned()
            .ok_or(LedgerError::RecordNotFound {
                token_id,
                network: network.name().to_string(),
            })
    }

    async fn owner_token_ids(
        &self,
        owner: &EthAddress,
        network: Network,
    ) -> Result<Vec<TokenId>, LedgerError> {
        Self::check_network(network)?;
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .filter(|r| r.recipient.as_str().eq_ignore_ascii_case(owner.as_str()))
            .map(|r| r.token_id)
            .collect())
    }

    async fn token_uri(&self, token_id: TokenId, network: Network) -> Result<String, LedgerError> {
        let record = self.credential(token_id, network).await?;
        Ok(format!("ipfs://{}", record.content_id))
    }
}
