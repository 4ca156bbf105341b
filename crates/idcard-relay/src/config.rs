//! Image-host client configuration.
//!
//! Defaults point at the ImgBB upload endpoint. The API key has no default
//! and must be supplied by the environment or explicit construction.

use url::Url;

/// Default upload endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for the photo relay.
///
/// Custom `Debug` implementation redacts the `api_key` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct RelayConfig {
    /// Upload endpoint receiving the form-encoded image.
    pub endpoint: Url,
    /// API key sent alongside every upload.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `IDCARD_UPLOAD_ENDPOINT` (default: `https://api.imgbb.com/1/upload`)
    /// - `IDCARD_UPLOAD_API_KEY` (required)
    /// - `IDCARD_UPLOAD_TIMEOUT_SECS` (default: 20)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("IDCARD_UPLOAD_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            endpoint: env_url("IDCARD_UPLOAD_ENDPOINT", DEFAULT_ENDPOINT)?,
            api_key,
            timeout_secs: std::env::var("IDCARD_UPLOAD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(endpoint: &str, api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)
                .map_err(|e| ConfigError::InvalidUrl(endpoint.to_string(), e.to_string()))?,
            api_key: api_key.to_string(),
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
    #[error("IDCARD_UPLOAD_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
