//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the catalog API
//!
//! ## Optional
//! - `CATALOG_API_TOKEN` - Bearer token for the catalog API
//! - `CATALOG_CACHE_TTL_SECS` - Response cache lifetime in seconds (default: 300)
//! - `STOREFRONT_CURRENCY` - ISO 4217 display currency (default: INR)
//! - `CATEGORY_SAMPLE_LIMIT` - Products sampled for the category strip (default: 120)
//! - `CATEGORY_PAGE_LIMIT` - Products shown on a category page (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::str::FromStr;
use std::time::Duration;

use bazaar_core::CurrencyCode;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default number of products sampled to derive categories.
pub const DEFAULT_CATEGORY_SAMPLE_LIMIT: u32 = 120;

/// Default number of products fetched for a category page.
pub const DEFAULT_CATEGORY_PAGE_LIMIT: u32 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Products sampled to build the category strip
    pub category_sample_limit: u32,
    /// Products fetched for a category page
    pub category_page_limit: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// Lifetime of cached list responses
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let currency = get_parsed_or_default("STOREFRONT_CURRENCY", CurrencyCode::default())?;
        let category_sample_limit =
            get_parsed_or_default("CATEGORY_SAMPLE_LIMIT", DEFAULT_CATEGORY_SAMPLE_LIMIT)?;
        let category_page_limit =
            get_parsed_or_default("CATEGORY_PAGE_LIMIT", DEFAULT_CATEGORY_PAGE_LIMIT)?;

        Ok(Self {
            catalog,
            currency,
            category_sample_limit,
            category_page_limit,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("CATALOG_API_URL")?;
        let base_url = parse_base_url("CATALOG_API_URL", &raw_url)?;
        let api_token = get_optional_env("CATALOG_API_TOKEN").map(SecretString::from);
        let cache_ttl = Duration::from_secs(get_parsed_or_default("CATALOG_CACHE_TTL_SECS", 300)?);

        Ok(Self {
            base_url,
            api_token,
            cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional environment variable, falling back to `default`.
fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an absolute http(s) URL that endpoint paths can be appended to.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected an http(s) base URL, got '{value}'"),
        ));
    }
    Ok(url)
}
