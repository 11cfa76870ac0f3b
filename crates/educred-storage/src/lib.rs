//! # educred-storage — Content Store Adapter
//!
//! Wraps the external content-addressed pinning service behind the
//! [`ContentStore`] trait. Two implementations exist and are selected by
//! composition, never by inline fallback:
//!
//! - [`PinningClient`] — the real HTTP client. Requires an upload token;
//!   calling `store` without one fails with
//!   [`StorageError::Unavailable`].
//! - [`MockStore`] — the demo store. Produces deterministic placeholder
//!   content identifiers and logs every substitution at WARN, so demo
//!   output is distinguishable from genuine uploads in telemetry even
//!   though the return type is identical.
//!
//! Gateway URL resolution ([`gateway::resolve`]) is a pure string
//! construction and lives outside both implementations: the retrieval URL
//! for a content identifier is the same no matter which store produced it.

pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod pinning;

pub use config::StorageConfig;
pub use error::StorageError;
pub use mock::MockStore;
pub use pinning::PinningClient;

use async_trait::async_trait;
use educred_core::{ContentId, CredentialMetadata};

/// Write surface of the content store.
///
/// `store` accepts an opaque byte blob plus a filename and returns the
/// content identifier the store assigned. `store_metadata` serializes a
/// metadata document to canonical JSON, wraps it as `metadata.json`, and
/// delegates to `store`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store a file's bytes, returning the assigned content identifier.
    async fn store(&self, bytes: &[u8], filename: &str) -> Result<ContentId, StorageError>;

    /// Serialize a metadata document and store it as `metadata.json`.
    async fn store_metadata(
        &self,
        metadata: &CredentialMetadata,
    ) -> Result<ContentId, StorageError> {
        let bytes = serde_json::to_vec(metadata).map_err(StorageError::Serialization)?;
        self.store(&bytes, "metadata.json").await
    }
}
