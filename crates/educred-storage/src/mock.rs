//! Deterministic demo store.
//!
//! Stands in for the pinning service when no upload token is available —
//! a policy decision made at composition time, not a fallback hidden
//! inside the real client. Placeholder identifiers are derived from the
//! content itself, so demo runs are reproducible, and every substitution
//! is logged at WARN to keep demo output distinguishable from genuine
//! uploads.

use async_trait::async_trait;
use educred_core::ContentId;
use sha2::{Digest, Sha256};

use crate::error::StorageError;
use crate::ContentStore;

/// Demo content store producing deterministic placeholder identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockStore;

impl MockStore {
    pub fn new() -> Self {
        Self
    }

    /// Placeholder identifier for a (filename, bytes) pair: `bafybei` plus
    /// the first 32 hex chars of `SHA-256(filename || 0x00 || bytes)`.
    /// Shaped like a real CID so downstream URL construction is exercised.
    fn placeholder_cid(bytes: &[u8], filename: &str) -> Result<ContentId, StorageError> {
        let mut hasher = Sha256::new();
        hasher.update(filename.as_bytes());
        hasher.update([0u8]);
        hasher.update(bytes);
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        ContentId::new(format!("bafybei{}", &hex[..32])).map_err(|_| {
            StorageError::BadResponse {
                endpoint: "mock store".into(),
                detail: "empty placeholder identifier".into(),
            }
        })
    }
}

#[async_trait]
impl ContentStore for MockStore {
    async fn store(&self, bytes: &[u8], filename: &str) -> Result<ContentId, StorageError> {
        let cid = Self::placeholder_cid(bytes, filename)?;
        tracing::warn!(
            %cid,
            filename,
            "content store not configured: substituting deterministic placeholder identifier"
        );
        Ok(cid)
    }
}
