//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KIOSK_CATALOG_URL` - Base URL of the product catalog API
//!   (default: `https://fakestoreapi.com/`)
//! - `KIOSK_DATA_DIR` - Directory for the durable key/value store
//!   (default: `.kiosk`)
//! - `KIOSK_SIMULATED_LATENCY_MS` - Artificial delay for auth operations,
//!   modeling the remote-call boundary (default: 500)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/";
const DEFAULT_DATA_DIR: &str = ".kiosk";
const DEFAULT_SIMULATED_LATENCY_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Product catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory holding the durable key/value store file
    pub data_dir: PathBuf,
    /// Artificial delay applied to login/register/profile operations
    pub simulated_latency: Duration,
}

/// Product catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service
    pub base_url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed (bad URL, non-numeric latency).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Exists so tests can provide variables without touching the process
    /// environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url =
            lookup("KIOSK_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_CATALOG_URL".into(), e.to_string()))?;

        let data_dir = lookup("KIOSK_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let latency_ms = match lookup("KIOSK_SIMULATED_LATENCY_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("KIOSK_SIMULATED_LATENCY_MS".into(), e.to_string())
            })?,
            None => DEFAULT_SIMULATED_LATENCY_MS,
        };

        Ok(Self {
            catalog: CatalogConfig { base_url },
            data_dir,
            simulated_latency: Duration::from_millis(latency_ms),
        })
    }
}
