//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LULU_API_URL` - REST API base URL (default: `http://localhost:5000/api`)
//! - `LULU_SITE_ORIGIN` - Public site origin for OAuth redirects (default: `http://localhost:3000`)
//! - `LULU_STORAGE_DIR` - Directory for the persisted cart, wishlist and token (default: `.lulu`)
//! - `LULU_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `LULU_CATALOG_CACHE_TTL_SECS` - Category cache lifetime in seconds (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_SITE_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_STORAGE_DIR: &str = ".lulu";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// REST API settings
    pub api: ApiConfig,
    /// Origin the OAuth callback redirects back to
    pub site_origin: Url,
    /// Directory holding persisted client state
    pub storage_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// REST API client settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL endpoint paths are appended to, e.g. `http://host/api`
    pub base_url: Url,
    /// Whole-request timeout
    pub timeout: Duration,
    /// How long category lookups are cached
    pub cache_ttl: Duration,
}

impl ApiConfig {
    /// Settings for `base_url` with default timeout and cache lifetime.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let api = ApiConfig {
            base_url: env.url_or_default("LULU_API_URL", DEFAULT_API_URL)?,
            timeout: env.secs_or_default("LULU_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            cache_ttl: env.secs_or_default("LULU_CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
        };

        Ok(Self {
            api,
            site_origin: env.url_or_default("LULU_SITE_ORIGIN", DEFAULT_SITE_ORIGIN)?,
            storage_dir: PathBuf::from(env.get_or_default("LULU_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
            sentry_dsn: env.get_optional("SENTRY_DSN"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating an empty value as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    fn url_or_default(&self, key: &str, default: &str) -> Result<Url, ConfigError> {
        let value = self.get_or_default(key, default);
        let url = Url::parse(&value)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(url)
    }

    fn secs_or_default(&self, key: &str, default: u64) -> Result<Duration, ConfigError> {
        let Some(value) = self.get_optional(key) else {
            return Ok(Duration::from_secs(default));
        };
        let secs = value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        Ok(Duration::from_secs(secs))
    }
}
