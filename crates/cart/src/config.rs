//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `CART_STORAGE_KEY` - Key the cart is persisted under (default: `cart:v1`)
//! - `CART_PERSIST_DELAY_MS` - Debounce delay before writing (default: 1000)
//! - `CART_STORAGE_PATH` - Storage file path (default: `.cart/storage.json`)
//! - `CATALOG_BASE_URL` - Catalog API base URL (default: `https://api.escuelajs.co/api/v1`)
//! - `CATALOG_CACHE_TTL_SECS` - Catalog response cache TTL (default: 300)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::cart::CartOptions;
use crate::persistence::DEFAULT_PERSIST_DELAY;
use crate::storage::DEFAULT_CART_KEY;

const DEFAULT_STORAGE_PATH: &str = ".cart/storage.json";
const DEFAULT_CATALOG_BASE_URL: &str = "https://api.escuelajs.co/api/v1";
const DEFAULT_CATALOG_CACHE_TTL: Duration = Duration::from_secs(300);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Cart storage key and debounce delay
    pub cart: CartOptions,
    /// File the cart storage lives in
    pub storage_path: PathBuf,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
}

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL that endpoint paths are appended to
    pub base_url: Url,
    /// How long fetched products and categories stay cached
    pub cache_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            cache_ttl: DEFAULT_CATALOG_CACHE_TTL,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key = lookup("CART_STORAGE_KEY")
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CART_KEY.to_string());

        let persist_delay = parse_optional::<u64>(&lookup, "CART_PERSIST_DELAY_MS")?
            .map_or(DEFAULT_PERSIST_DELAY, Duration::from_millis);

        let storage_path = lookup("CART_STORAGE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        let base_url = parse_optional::<Url>(&lookup, "CATALOG_BASE_URL")?
            .unwrap_or_else(default_catalog_url);

        let cache_ttl = parse_optional::<u64>(&lookup, "CATALOG_CACHE_TTL_SECS")?
            .map_or(DEFAULT_CATALOG_CACHE_TTL, Duration::from_secs);

        Ok(Self {
            cart: CartOptions {
                storage_key,
                persist_delay,
            },
            storage_path,
            catalog: CatalogConfig {
                base_url,
                cache_ttl,
            },
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

fn default_catalog_url() -> Url {
    Url::parse(DEFAULT_CATALOG_BASE_URL).expect("default catalog URL is valid")
}
