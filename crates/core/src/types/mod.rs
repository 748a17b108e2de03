//! Core types for Pustaka.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart_line;
pub mod id;
pub mod identity;
pub mod price;
pub mod product;
pub mod session;

pub use cart_line::CartLine;
pub use id::*;
pub use identity::{IdentityError, UserIdentity};
pub use price::Price;
pub use product::Product;
pub use session::{ADMIN_ROLE, SessionUser};
