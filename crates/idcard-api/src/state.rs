//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Every field is cheap to clone.

use std::sync::Arc;

use idcard_core::RecordStore;
use idcard_relay::{RelayClient, RelayError};

use crate::config::AppConfig;
use crate::session::SessionStore;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// On-disk entry array.
    pub store: RecordStore,
    /// Client for the image host.
    pub relay: RelayClient,
    /// In-memory browser sessions.
    pub sessions: SessionStore,
    /// Immutable process configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state from configuration. Fails only if the HTTP client cannot
    /// be constructed.
    pub fn try_with_config(config: AppConfig) -> Result<Self, RelayError> {
        let relay = RelayClient::new(config.relay.clone())?;
        Ok(Self {
            store: RecordStore::open(config.store_path.clone()),
            relay,
            sessions: SessionStore::new(),
            config: Arc::new(config),
        })
    }
}
