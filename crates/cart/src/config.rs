//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CAFE_CART_FILE` - Storage file path (default: `.cafe/storage.json`)
//! - `CAFE_CART_KEY` - Storage key holding the cart (default: `cart`)

use std::path::PathBuf;

use thiserror::Error;

use crate::store::DEFAULT_STORAGE_KEY;

const DEFAULT_STORAGE_FILE: &str = ".cafe/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Path of the JSON storage file
    pub storage_file: PathBuf,
    /// Key the cart is stored under
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_file: PathBuf::from(DEFAULT_STORAGE_FILE),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
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
    /// Returns `ConfigError` if a variable is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_file = get_non_blank(&lookup, "CAFE_CART_FILE")?
            .map_or(defaults.storage_file, PathBuf::from);
        let storage_key =
            get_non_blank(&lookup, "CAFE_CART_KEY")?.unwrap_or(defaults.storage_key);

        Ok(Self {
            storage_file,
            storage_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, rejecting blank values.
fn get_non_blank(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<String>, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be blank".to_string(),
        )),
        other => Ok(other),
    }
}
