//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product as published in the catalog document.
///
/// Products are read-only from the storefront's perspective. The JSON field
/// names match the catalog file (`id`, `title`, `author`, `price`, `stock`,
/// `image`, `category`). `image` may be omitted and defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub author: String,
    pub price: Price,
    pub stock: u32,
    #[serde(default)]
    pub image: String,
    pub category: String,
}

impl Product {
    /// Whether the catalog reports any units available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
