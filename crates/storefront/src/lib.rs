//! Pustaka storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Layers
//!
//! - [`store`] - key/value persistence for the cart and session records
//! - [`catalog`] - product catalog loading with a built-in fallback
//! - [`cart`] - cart lines, stock limits and totals
//! - [`session`] - the logged-in shopper and the login gate
//! - [`actions`] - UI actions dispatched by kind
//! - [`views`] and [`pages`] - HTML rendering and per-page init
//! - [`routes`] - the axum front end

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod session;
pub mod shop;
pub mod state;
pub mod store;
pub mod views;
