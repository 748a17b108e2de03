//! Cart engine.
//!
//! Holds the ordered cart lines, enforces stock ceilings and writes the full
//! cart through to the store on every mutation. A mutation only takes effect
//! in memory once the write has succeeded.
//!
//! Lines are unique by product id: adding a product that is already in the
//! cart bumps the existing line instead of appending a second one.

use std::sync::Arc;

use pustaka_core::{CartLine, Price, ProductId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::store::{Store, StoreError, StoreExt, keys};

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product id is not in the catalog (usually a stale page).
    #[error("product {0} not found in catalog")]
    ProductNotFound(ProductId),

    /// The requested quantity is above the available stock.
    #[error("only {stock} unit(s) of product {product_id} in stock")]
    StockExceeded { product_id: ProductId, stock: u32 },

    /// Persisting the cart failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of [`CartEngine::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has the requested quantity.
    Updated,
    /// The quantity was below one, so the line was removed.
    Removed,
    /// There was no line for the product.
    Missing,
}

/// In-memory cart mirrored to [`keys::CART`].
pub struct CartEngine {
    lines: Vec<CartLine>,
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartEngine {
    /// Restore the cart saved in `store`.
    ///
    /// A missing key gives an empty cart. An unreadable or corrupt value is
    /// logged and also gives an empty cart; it is overwritten on the next
    /// mutation.
    pub fn restore(store: Arc<dyn Store>) -> Self {
        let lines = match store.get_json::<Vec<CartLine>>(keys::CART) {
            Ok(lines) => lines.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored cart");
                Vec::new()
            }
        };
        debug!(lines = lines.len(), "Cart restored");
        Self { lines, store }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Stock ceiling applied to quantity updates on an existing line.
    ///
    /// This is the stock captured when the line was created, not a live
    /// catalog value.
    #[must_use]
    pub const fn stock_ceiling(line: &CartLine) -> u32 {
        line.product.stock
    }

    /// Add one unit of `product_id`.
    ///
    /// A new line is appended with quantity 1 whatever the stock says. An
    /// existing line is incremented only while `quantity + 1` stays within the
    /// catalog's current stock for the product.
    ///
    /// # Errors
    ///
    /// - [`CartError::ProductNotFound`] if the catalog has no such product
    /// - [`CartError::StockExceeded`] if the increment would pass the stock
    /// - [`CartError::Store`] if persisting fails
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
    ) -> Result<&CartLine, CartError> {
        let Some(product) = catalog.find(product_id) else {
            return Err(CartError::ProductNotFound(product_id));
        };

        let mut lines = self.lines.clone();
        let index = match lines.iter().position(|l| l.product_id() == product_id) {
            Some(index) => {
                let line = lines
                    .get_mut(index)
                    .ok_or(CartError::ProductNotFound(product_id))?;
                if line.quantity.saturating_add(1) > product.stock {
                    return Err(CartError::StockExceeded {
                        product_id,
                        stock: product.stock,
                    });
                }
                line.quantity += 1;
                index
            }
            None => {
                lines.push(CartLine::new(product.clone()));
                lines.len() - 1
            }
        };

        self.commit(lines)?;
        debug!(%product_id, total_items = self.total_item_count(), "Added to cart");
        self.lines
            .get(index)
            .ok_or(CartError::ProductNotFound(product_id))
    }

    /// Set the quantity of an existing line.
    ///
    /// Quantities below one remove the line. A missing line is a no-op.
    ///
    /// # Errors
    ///
    /// - [`CartError::StockExceeded`] if `new_quantity` is above the line's
    ///   [`stock_ceiling`](Self::stock_ceiling)
    /// - [`CartError::Store`] if persisting fails
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        if new_quantity < 1 {
            self.remove_item(product_id)?;
            return Ok(QuantityChange::Removed);
        }

        let mut lines = self.lines.clone();
        let Some(line) = lines.iter_mut().find(|l| l.product_id() == product_id) else {
            return Ok(QuantityChange::Missing);
        };

        let ceiling = Self::stock_ceiling(line);
        let quantity = match u32::try_from(new_quantity) {
            Ok(q) if q <= ceiling => q,
            _ => {
                return Err(CartError::StockExceeded {
                    product_id,
                    stock: ceiling,
                });
            }
        };

        line.quantity = quantity;
        self.commit(lines)?;
        Ok(QuantityChange::Updated)
    }

    /// Remove the line for `product_id`, if any, and persist.
    ///
    /// Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if persisting fails.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<bool, CartError> {
        let before = self.lines.len();
        let lines: Vec<CartLine> = self
            .lines
            .iter()
            .filter(|l| l.product_id() != product_id)
            .cloned()
            .collect();
        self.commit(lines)?;
        Ok(self.lines.len() != before)
    }

    /// Empty the cart and persist the empty state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if persisting fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new())
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal plus a flat shipping fee.
    #[must_use]
    pub fn total(&self, shipping_fee: Price) -> Price {
        self.subtotal() + shipping_fee
    }

    /// Write `lines` to the store, then adopt them. A failed write leaves
    /// the in-memory cart as it was.
    fn commit(&mut self, lines: Vec<CartLine>) -> Result<(), CartError> {
        self.store.set_json(keys::CART, &lines)?;
        self.lines = lines;
        Ok(())
    }
}
