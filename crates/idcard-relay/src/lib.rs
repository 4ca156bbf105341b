//! # idcard-relay -- Photo relay to a third-party image host
//!
//! Takes a photo from the submission form, checks it locally, base64-encodes
//! it, and POSTs it as a form body (`key`, `image`) to the configured upload
//! endpoint. The reply is parsed for a hosted URL.
//!
//! ## Contract
//!
//! [`RelayClient::upload`] returns either the hosted URL or exactly one
//! [`RelayError`]. Local checks (extension allow-list, non-empty content)
//! run first and never touch the network. A single attempt is made; there
//! are no retries.

pub mod config;
pub mod error;
pub mod photo;
pub mod response;

pub use config::{ConfigError, RelayConfig};
pub use error::RelayError;
pub use photo::{is_allowed_filename, PhotoUpload, ALLOWED_EXTENSIONS};
pub use response::parse_upload_response;

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;

/// Client for the image host's upload endpoint.
#[derive(Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: url::Url,
    api_key: String,
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl RelayClient {
    /// Create a new relay client from configuration.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| RelayError::Init { source })?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            api_key: config.api_key,
        })
    }

    /// Upload endpoint this client posts to.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Validate `photo` and relay it to the image host.
    ///
    /// Calls `POST {endpoint}` with form fields `key` and `image` (base64).
    pub async fn upload(&self, photo: &PhotoUpload) -> Result<String, RelayError> {
        if !is_allowed_filename(&photo.filename) {
            return Err(RelayError::UnsupportedFormat {
                filename: photo.filename.clone(),
            });
        }
        if photo.bytes.is_empty() {
            return Err(RelayError::EmptyFile);
        }

        let encoded = B64.encode(&photo.bytes);
        let payload = self
            .post_image(&encoded)
            .await
            .map_err(|source| RelayError::Transport { source })?;

        let url = parse_upload_response(&payload)?;
        tracing::debug!(bytes = photo.bytes.len(), "photo relayed to image host");
        Ok(url)
    }

    async fn post_image(&self, encoded: &str) -> Result<serde_json::Value, reqwest::Error> {
        self.http
            .post(self.endpoint.clone())
            .form(&[("key", self.api_key.as_str()), ("image", encoded)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
