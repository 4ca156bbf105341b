//! # Application Configuration
//!
//! Built once at process start from the environment and shared read-only
//! through [`AppState`](crate::state::AppState). Secrets have no defaults.

use std::path::PathBuf;

use idcard_relay::RelayConfig;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default store file location.
pub const DEFAULT_STORE_PATH: &str = "data.json";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per event.
    Json,
}

/// Service configuration.
///
/// Custom `Debug` redacts `admin_password`; the nested [`RelayConfig`]
/// redacts its own API key.
#[derive(Clone)]
pub struct AppConfig {
    /// HTTP listening port.
    pub port: u16,
    /// Path of the JSON record store.
    pub store_path: PathBuf,
    /// Shared secret unlocking the admin listing.
    pub admin_password: String,
    /// Image-host relay settings.
    pub relay: RelayConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("store_path", &self.store_path)
            .field("admin_password", &"[REDACTED]")
            .field("relay", &self.relay)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 5000)
    /// - `IDCARD_STORE_PATH` (default: `data.json`)
    /// - `IDCARD_ADMIN_PASSWORD` (required)
    /// - `IDCARD_LOG_FORMAT` (`json` or plain, default plain)
    /// - relay variables, see [`RelayConfig::from_env`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_password = std::env::var("IDCARD_ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .ok_or(ConfigError::MissingAdminPassword)?;

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            store_path: std::env::var_os("IDCARD_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            admin_password,
            relay: RelayConfig::from_env()?,
            log_format: log_format_from_env(),
        })
    }
}

/// Read `IDCARD_LOG_FORMAT` on its own, so logging can start before the
/// rest of the configuration is validated.
pub fn log_format_from_env() -> LogFormat {
    match std::env::var("IDCARD_LOG_FORMAT") {
        Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Plain,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IDCARD_ADMIN_PASSWORD environment variable is required")]
    MissingAdminPassword,
    #[error(transparent)]
    Relay(#[from] idcard_relay::ConfigError),
}
