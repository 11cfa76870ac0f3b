//! Gateway URL resolution and metadata reads.
//!
//! [`resolve`] is a pure function: fixed gateway prefix plus the content
//! identifier, no I/O, no failure mode. Reads go through [`fetch_metadata`],
//! which issues a GET against the resolved URL.

use educred_core::{ContentId, CredentialMetadata};

use crate::error::StorageError;

/// Fixed public gateway prefix. The retrieval URL for a content identifier
/// is always `{GATEWAY_PREFIX}{cid}`.
pub const GATEWAY_PREFIX: &str = "https://w3s.link/ipfs/";

/// Resolve a content identifier to its retrieval URL.
///
/// Pure and deterministic: the same identifier always yields the identical
/// string, and no network I/O is performed.
pub fn resolve(cid: &ContentId) -> String {
    format!("{GATEWAY_PREFIX}{cid}")
}

/// Fetch and decode a stored metadata document via the public gateway.
///
/// # Errors
///
/// [`StorageError::FetchFailed`] on transport failure, non-success status,
/// or an undecodable body.
pub async fn fetch_metadata(
    http: &reqwest::Client,
    cid: &ContentId,
) -> Result<CredentialMetadata, StorageError> {
    fetch_metadata_at(http, &resolve(cid)).await
}

/// Fetch and decode a metadata document from an explicit URL.
///
/// Split out from [`fetch_metadata`] so callers can target an alternate
/// gateway (and tests a local one).
pub async fn fetch_metadata_at(
    http: &reqwest::Client,
    url: &str,
) -> Result<CredentialMetadata, StorageError> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| StorageError::FetchFailed {
            url: url.to_string(),
            detail: e.to_string(),
        })?;

    if !resp.status().is_success() {
        return Err(StorageError::FetchFailed {
            url: url.to_string(),
            detail: format!("HTTP {}", resp.status()),
        });
    }

    resp.json().await.map_err(|e| StorageError::FetchFailed {
        url: url.to_string(),
        detail: format!("undecodable metadata: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_prefix_plus_cid() {
        let cid = ContentId::new("bafybeiexample1").unwrap();
        assert_eq!(resolve(&cid), "https://w3s.link/ipfs/bafybeiexample1");
    }

    #[test]
    fn resolve_is_deterministic() {
        let cid = ContentId::new("bafybeiexample2").unwrap();
        assert_eq!(resolve(&cid), resolve(&cid));
    }
}
