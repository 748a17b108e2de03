//! CLI command implementations.
//!
//! Every command opens the shop over the configured store, runs one action
//! and prints the resulting notice.

pub mod cart;
pub mod catalog;
pub mod session;

use std::path::PathBuf;
use std::sync::Arc;

use pustaka_storefront::actions::{ActionContext, ActionError, ActionKind, ActionRequest, Outcome, dispatch};
use pustaka_storefront::catalog::{Catalog, CatalogLoader};
use pustaka_storefront::config::{ConfigError, DataLocation, StorefrontConfig};
use pustaka_storefront::shop::Shop;
use pustaka_storefront::store::{Store, StoreError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Action failed: {0}")]
    Action(#[from] ActionError),
}

/// Shop state and catalog source shared by all commands.
pub struct Context {
    pub shop: Shop,
    pub catalog: CatalogLoader,
}

impl Context {
    /// Open the shop described by the environment.
    ///
    /// `data_dir` overrides `STOREFRONT_DATA_DIR`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the data
    /// directory cannot be opened.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let mut config = StorefrontConfig::from_env()?;
        if let Some(dir) = data_dir {
            config.data = DataLocation::Directory(dir);
        }
        if config.data == DataLocation::Memory {
            tracing::warn!("In-memory store selected; nothing will outlive this command");
        }
        let store = config.open_store()?;
        Ok(Self::with_store(&config, store))
    }

    /// Open the shop over an already opened store.
    #[must_use]
    pub fn with_store(config: &StorefrontConfig, store: Arc<dyn Store>) -> Self {
        Self {
            shop: Shop::open(store, config.shop_options()),
            catalog: CatalogLoader::new(config.catalog.clone()),
        }
    }

    /// Run one action, loading the catalog only when the action needs it.
    ///
    /// # Errors
    ///
    /// Returns an error if the action cannot persist its changes.
    pub async fn perform(&mut self, kind: ActionKind, request: &ActionRequest) -> Result<Outcome, CliError> {
        let catalog = if kind.needs_catalog() && self.shop.session().is_authenticated() {
            self.catalog.load().await
        } else {
            Catalog::default()
        };

        let outcome = dispatch(
            kind,
            &mut ActionContext {
                shop: &mut self.shop,
                catalog: &catalog,
                request,
            },
        )?;
        Ok(outcome)
    }
}

/// Print the notice an action produced, if any.
#[allow(clippy::print_stdout)]
pub fn report(outcome: &Outcome) {
    if let Some(notice) = &outcome.notice {
        println!("{notice}");
    }
}
