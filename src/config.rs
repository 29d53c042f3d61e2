use crate::providers::ProviderSettings;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_STORE_PATH: &str = ".locale-scout/settings.json";

/// Runtime settings, read from the environment (and `.env` if present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// File holding the saved API key
    pub store_path: PathBuf,
    pub provider: ProviderSettings,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_path = lookup("LOCALE_SCOUT_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let mut provider = ProviderSettings::default();
        if let Some(base_url) = lookup("LOCALE_SCOUT_API_BASE_URL") {
            provider.base_url = base_url;
        }
        if let Some(raw) = lookup("LOCALE_SCOUT_HTTP_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            provider.timeout = Some(Duration::from_secs(secs));
        }

        let log_level = lookup("LOCALE_SCOUT_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            store_path,
            provider,
            log_level,
        })
    }
}

/// Malformed configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("LOCALE_SCOUT_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{0}'")]
    InvalidTimeout(String),
}
