//! Pustaka Core - Shared domain types.
//!
//! This crate provides the types used across all Pustaka components:
//! - `storefront` - Cart engine, session gate and the HTML storefront
//! - `cli` - Terminal front end over the same local store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, catalog records, cart lines and sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
