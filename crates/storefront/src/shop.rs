//! Shop controller.
//!
//! [`Shop`] is the single owner of mutable storefront state: the cart and the
//! session, both backed by the same store. Request handlers and CLI commands
//! borrow it for the duration of one action.

use std::sync::Arc;

use pustaka_core::Price;

use crate::cart::CartEngine;
use crate::session::SessionGate;
use crate::store::Store;

/// Flat shipping fee added to the cart total when nothing is configured.
pub const DEFAULT_SHIPPING_FEE: Price = Price::new(15_000);

/// Behaviour switches for a [`Shop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopOptions {
    /// Flat fee added to the cart subtotal.
    pub shipping_fee: Price,
    /// Give logged-in shoppers without a role the admin role when they open
    /// the admin page.
    pub default_admin_role: bool,
}

impl Default for ShopOptions {
    fn default() -> Self {
        Self {
            shipping_fee: DEFAULT_SHIPPING_FEE,
            default_admin_role: false,
        }
    }
}

/// Cart and session state for one storefront instance.
#[derive(Debug)]
pub struct Shop {
    cart: CartEngine,
    session: SessionGate,
    options: ShopOptions,
}

impl Shop {
    /// Restore cart and session from `store`.
    pub fn open(store: Arc<dyn Store>, options: ShopOptions) -> Self {
        Self {
            cart: CartEngine::restore(Arc::clone(&store)),
            session: SessionGate::restore(store),
            options,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartEngine {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartEngine {
        &mut self.cart
    }

    #[must_use]
    pub const fn session(&self) -> &SessionGate {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionGate {
        &mut self.session
    }

    /// Split borrow used by logout, which needs both halves at once.
    pub const fn parts_mut(&mut self) -> (&mut SessionGate, &mut CartEngine) {
        (&mut self.session, &mut self.cart)
    }

    #[must_use]
    pub const fn options(&self) -> ShopOptions {
        self.options
    }

    /// Cart subtotal plus the configured shipping fee.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total(self.options.shipping_fee)
    }
}
