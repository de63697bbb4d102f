//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ERASTO_DATA_DIR` - Directory holding persisted snapshots (default: .erasto)
//! - `ERASTO_CART_KEY` - Storage key of the cart snapshot (default: cart)
//! - `ERASTO_RELATED_LIMIT` - Related products shown per product (default: 3)
//! - `ERASTO_PRICE_CEILING` - Upper bound of the default price filter (default: 100)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::storage::{self, keys};
use crate::catalog::{DEFAULT_PRICE_CEILING, DEFAULT_RELATED_LIMIT};

const DEFAULT_DATA_DIR: &str = ".erasto";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding persisted snapshots
    pub data_dir: PathBuf,
    /// Storage key of the cart snapshot
    pub cart_key: String,
    /// Maximum related products per product page
    pub related_limit: usize,
    /// Upper bound of the default price filter
    pub price_ceiling: Decimal,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: keys::CART.to_string(),
            related_limit: DEFAULT_RELATED_LIMIT,
            price_ceiling: DEFAULT_PRICE_CEILING,
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// the cart key is not a valid storage key.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("ERASTO_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let cart_key = lookup("ERASTO_CART_KEY").unwrap_or(defaults.cart_key);
        storage::validate_key(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("ERASTO_CART_KEY".to_string(), e.to_string()))?;

        let related_limit = parse_or_default(&lookup, "ERASTO_RELATED_LIMIT", defaults.related_limit)?;

        let price_ceiling = parse_or_default(&lookup, "ERASTO_PRICE_CEILING", defaults.price_ceiling)?;
        if price_ceiling.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "ERASTO_PRICE_CEILING".to_string(),
                "must not be negative".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            cart_key,
            related_limit,
            price_ceiling,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, falling back to a default if not.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
