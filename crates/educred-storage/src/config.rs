//! Pinning service configuration.
//!
//! Defaults point at the production pinning API. Override via environment
//! variables or explicit construction for staging and tests.

use url::Url;
use zeroize::Zeroizing;

/// Configuration for the pinning-service client.
///
/// Custom `Debug` implementation redacts the `api_token` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct StorageConfig {
    /// Base URL of the pinning API.
    /// Default: <https://api.web3.storage>
    pub api_url: Url,
    /// Bearer token for uploads. `None` means the store is unavailable
    /// for writes; [`crate::PinningClient::store`] will refuse.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("api_url", &self.api_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `EDUCRED_STORAGE_URL` (default: `https://api.web3.storage`)
    /// - `EDUCRED_STORAGE_TOKEN` (optional; absent means no write access)
    /// - `EDUCRED_STORAGE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: env_url("EDUCRED_STORAGE_URL", "https://api.web3.storage")?,
            api_token: std::env::var("EDUCRED_STORAGE_TOKEN")
                .ok()
                .filter(|t| !t.is_empty())
                .map(Zeroizing::new),
            timeout_secs: std::env::var("EDUCRED_STORAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration pointing at a local mock server (for tests).
    pub fn local_mock(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl("local_mock".into(), e.to_string()))?,
            api_token: Some(Zeroizing::new(token.to_string())),
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = StorageConfig::local_mock("http://127.0.0.1:9000", "test-token").unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.timeout_secs, 5);
        assert!(cfg.api_token.is_some());
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = StorageConfig::local_mock("http://127.0.0.1:9000", "secret").unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("NONEXISTENT_VAR_54321", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }
}
