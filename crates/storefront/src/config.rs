//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding `cart.json` and `currentUser.json`
//!   (default: `.pustaka`; `:memory:` keeps state in process memory)
//! - `STOREFRONT_CATALOG` - Catalog URL (`http(s)://...`) or file path
//!   (default: `crates/storefront/data/products.json`)
//! - `STOREFRONT_SHIPPING_FEE` - Flat shipping fee in rupiah (default: 15000)
//! - `STOREFRONT_DEFAULT_ADMIN_ROLE` - Grant the admin role to logged-in users
//!   without one when they open the admin page (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use pustaka_core::Price;
use thiserror::Error;

use crate::catalog::CatalogSource;
use crate::shop::{DEFAULT_SHIPPING_FEE, ShopOptions};
use crate::store::{FileStore, MemoryStore, Store, StoreError};

/// `STOREFRONT_DATA_DIR` value selecting the in-memory store.
pub const MEMORY_DATA_DIR: &str = ":memory:";

const DEFAULT_CATALOG: &str = "crates/storefront/data/products.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where cart and session state are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Memory,
    Directory(PathBuf),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Cart and session storage
    pub data: DataLocation,
    /// Catalog document location
    pub catalog: CatalogSource,
    /// Flat shipping fee added at checkout
    pub shipping_fee: Price,
    /// Grant admin to role-less users on the admin page
    pub default_admin_role: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
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

        let host = parse_env::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env::<u16>("STOREFRONT_PORT", "3000")?;
        let data = parse_data_location(&get_env_or_default("STOREFRONT_DATA_DIR", ".pustaka"));
        let catalog = CatalogSource::parse(&get_env_or_default("STOREFRONT_CATALOG", DEFAULT_CATALOG));
        let shipping_fee = Price::new(parse_env::<u64>(
            "STOREFRONT_SHIPPING_FEE",
            &DEFAULT_SHIPPING_FEE.amount().to_string(),
        )?);
        let default_admin_role = parse_bool(
            "STOREFRONT_DEFAULT_ADMIN_ROLE",
            &get_env_or_default("STOREFRONT_DEFAULT_ADMIN_ROLE", "false"),
        )?;

        Ok(Self {
            host,
            port,
            data,
            catalog,
            shipping_fee,
            default_admin_role,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Open the configured cart and session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open_store(&self) -> Result<Arc<dyn Store>, StoreError> {
        Ok(match &self.data {
            DataLocation::Memory => Arc::new(MemoryStore::new()),
            DataLocation::Directory(dir) => Arc::new(FileStore::open(dir)?),
        })
    }

    /// Shop behaviour derived from this configuration.
    #[must_use]
    pub const fn shop_options(&self) -> ShopOptions {
        ShopOptions {
            shipping_fee: self.shipping_fee,
            default_admin_role: self.default_admin_role,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data: DataLocation::Memory,
            catalog: CatalogSource::parse(DEFAULT_CATALOG),
            shipping_fee: DEFAULT_SHIPPING_FEE,
            default_admin_role: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_data_location(value: &str) -> DataLocation {
    if value == MEMORY_DATA_DIR {
        DataLocation::Memory
    } else {
        DataLocation::Directory(PathBuf::from(value))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("K", "TRUE").unwrap_or(false));
        assert!(parse_bool("K", " on ").unwrap_or(false));
        assert!(!parse_bool("K", "0").unwrap_or(true));
        assert!(matches!(
            parse_bool("K", "maybe"),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "K"
        ));
    }

    #[test]
    fn test_parse_data_location() {
        assert_eq!(parse_data_location(":memory:"), DataLocation::Memory);
        assert_eq!(
            parse_data_location(".pustaka"),
            DataLocation::Directory(PathBuf::from(".pustaka"))
        );
    }

    #[test]
    fn test_open_store_creates_data_dir() {
        let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let dir = tmp.path().join("state");
        let config = StorefrontConfig {
            data: DataLocation::Directory(dir.clone()),
            ..StorefrontConfig::default()
        };
        assert!(config.open_store().is_ok());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_default_matches_shop_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.shop_options(), ShopOptions::default());
        assert_eq!(config.socket_addr().port(), 3000);
    }
}
