//! Integration tests for Pustaka.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pustaka-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart, session and store working together
//! - `http_routes` - The storefront router driven with `oneshot`
//!
//! Both use a catalog path that doesn't exist, so every page sees the
//! built-in fallback catalog.

use std::sync::Arc;

use pustaka_storefront::catalog::CatalogSource;
use pustaka_storefront::config::{DataLocation, StorefrontConfig};
use pustaka_storefront::shop::{Shop, ShopOptions};
use pustaka_storefront::store::{FileStore, Store};
use tempfile::TempDir;

/// Catalog location that always fails to load.
pub const MISSING_CATALOG: &str = "does/not/exist/products.json";

/// A file-backed store in a fresh temporary directory.
///
/// Keep the [`TempDir`] alive for as long as the store is used.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
#[must_use]
pub fn temp_store() -> (TempDir, Arc<dyn Store>) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store: Arc<dyn Store> =
        Arc::new(FileStore::open(dir.path()).expect("failed to open file store"));
    (dir, store)
}

/// Storefront configuration over `dir` with the fallback catalog.
#[must_use]
pub fn test_config(dir: &TempDir) -> StorefrontConfig {
    StorefrontConfig {
        data: DataLocation::Directory(dir.path().to_path_buf()),
        catalog: CatalogSource::File(MISSING_CATALOG.into()),
        ..StorefrontConfig::default()
    }
}

/// Open a shop over `store` with default options.
#[must_use]
pub fn open_shop(store: &Arc<dyn Store>) -> Shop {
    Shop::open(Arc::clone(store), ShopOptions::default())
}
