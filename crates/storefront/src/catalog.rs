//! Product catalog loading.
//!
//! The catalog is a static JSON document (an array of products) read either
//! over HTTP or from a file path. [`CatalogLoader::fetch`] reports failures;
//! [`CatalogLoader::load`] substitutes [`Catalog::fallback`] so pages never
//! render an empty shelf because the data file went missing.
//!
//! Each call makes a single attempt. No timeout is configured on the HTTP
//! client and there is no retry.

use std::fmt;
use std::path::PathBuf;

use pustaka_core::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Errors from a single catalog fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS or body transfer failure.
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("catalog request returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a JSON array of products.
    #[error("catalog is not a valid product list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The list of purchasable products for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The fixed two-book catalog used when the real one is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(vec![
            Product {
                id: ProductId::new(1),
                title: "Pemrograman JavaScript".to_string(),
                author: "John Doe".to_string(),
                price: Price::new(120_000),
                stock: 15,
                image: "https://via.placeholder.com/300x400/111154/ffffff?text=JavaScript"
                    .to_string(),
                category: "Pemrograman".to_string(),
            },
            Product {
                id: ProductId::new(2),
                title: "Desain UI/UX Modern".to_string(),
                author: "Jane Smith".to_string(),
                price: Price::new(95_000),
                stock: 8,
                image: "https://via.placeholder.com/300x400/111154/ffffff?text=UI/UX".to_string(),
                category: "Desain".to_string(),
            },
        ])
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched with an HTTP GET.
    Remote(Url),
    /// Read from the local filesystem (relative paths resolve against the
    /// working directory).
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret a configured location: `http://` and `https://` values are
    /// URLs, anything else is a file path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let is_http = location.starts_with("http://") || location.starts_with("https://");
        match Url::parse(location) {
            Ok(url) if is_http => Self::Remote(url),
            _ => Self::File(PathBuf::from(location)),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads the catalog from its configured source.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    source: CatalogSource,
    client: reqwest::Client,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Make one attempt to read and parse the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any transport, status, I/O or parse failure.
    #[instrument(skip(self), fields(source = %self.source))]
    pub async fn fetch(&self) -> Result<Catalog, FetchError> {
        let body = match &self.source {
            CatalogSource::Remote(url) => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status));
                }
                response.bytes().await?.to_vec()
            }
            CatalogSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| FetchError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        let catalog: Catalog = serde_json::from_slice(&body)?;
        debug!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Fetch the catalog, substituting [`Catalog::fallback`] on any failure.
    pub async fn load(&self) -> Catalog {
        match self.fetch().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(source = %self.source, error = %e, "Catalog unavailable, using fallback products");
                Catalog::fallback()
            }
        }
    }
}
