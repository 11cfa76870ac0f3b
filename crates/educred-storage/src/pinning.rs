//! HTTP client for the pinning service.
//!
//! Calls `POST {api_url}/upload` with the file bytes as the request body,
//! the upload token as a bearer credential, and the filename in the
//! `X-NAME` header. The service answers with the assigned content
//! identifier.

use std::time::Duration;

use async_trait::async_trait;
use educred_core::ContentId;
use serde::Deserialize;

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::ContentStore;

/// Upload response body: `{"cid": "..."}`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    cid: String,
}

/// Client for the pinning service.
#[derive(Debug, Clone)]
pub struct PinningClient {
    http: reqwest::Client,
    config: StorageConfig,
}

impl PinningClient {
    /// Create a client from configuration.
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorageError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    /// Whether an upload token is configured.
    pub fn has_token(&self) -> bool {
        self.config.api_token.is_some()
    }
}

#[async_trait]
impl ContentStore for PinningClient {
    /// Upload a file to the pinning service.
    ///
    /// Calls `POST {api_url}/upload`.
    ///
    /// # Errors
    ///
    /// [`StorageError::Unavailable`] when no upload token is configured —
    /// checked before any network I/O. Transport, status, and body-shape
    /// failures map to the corresponding [`StorageError`] variants.
    async fn store(&self, bytes: &[u8], filename: &str) -> Result<ContentId, StorageError> {
        let endpoint = "POST /upload";

        let token = self
            .config
            .api_token
            .as_ref()
            .ok_or(StorageError::Unavailable)?;

        let url = format!("{}upload", self.config.api_url);
        tracing::debug!(filename, size = bytes.len(), "uploading file to content store");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token.as_str())
            .header("X-NAME", filename)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| StorageError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let upload: UploadResponse =
            resp.json().await.map_err(|e| StorageError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let cid = ContentId::new(upload.cid).map_err(|_| StorageError::BadResponse {
            endpoint: endpoint.into(),
            detail: "empty content identifier".into(),
        })?;

        tracing::info!(%cid, filename, "content stored");
        Ok(cid)
    }
}
