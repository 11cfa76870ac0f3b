//! Content store error types.

use thiserror::Error;

/// Errors from content store calls.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No upload token is configured; the store cannot accept writes.
    #[error("content store unavailable: no upload token configured")]
    Unavailable,

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The pinning service returned a non-2xx status.
    #[error("content store {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// A gateway read for stored content failed.
    #[error("content fetch failed for {url}: {detail}")]
    FetchFailed { url: String, detail: String },

    /// The service answered 2xx but the body was not what the API promises.
    #[error("malformed response from {endpoint}: {detail}")]
    BadResponse { endpoint: String, detail: String },

    /// Metadata serialization failed.
    #[error("metadata serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
