//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::catalog::CatalogLoader;
use crate::config::StorefrontConfig;
use crate::shop::Shop;
use crate::store::{Store, StoreError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The [`Shop`] sits behind an
/// async mutex: one action or page init runs at a time, including any
/// catalog fetch it makes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogLoader,
    shop: Mutex<Shop>,
}

impl AppState {
    /// Create application state, opening the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StoreError> {
        let store = config.open_store()?;
        Ok(Self::with_store(config, store))
    }

    /// Create application state over an already opened store.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Arc<dyn Store>) -> Self {
        let shop = Shop::open(store, config.shop_options());
        let catalog = CatalogLoader::new(config.catalog.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog loader.
    #[must_use]
    pub fn catalog(&self) -> &CatalogLoader {
        &self.inner.catalog
    }

    /// Wait for exclusive access to the shop.
    pub async fn shop(&self) -> MutexGuard<'_, Shop> {
        self.inner.shop.lock().await
    }
}
