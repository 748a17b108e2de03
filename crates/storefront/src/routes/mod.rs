//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Pages (bootstrapped from the path, optional ?notice=)
//! GET  /                        - Storefront with product grid
//! GET  /index.html              - Storefront with product grid
//! GET  /cart.html               - Cart page
//! GET  /admin.html              - Admin product table (admin role)
//! GET  /login.html              - Login form
//! GET  /*                       - Storefront without product grid
//!
//! # Actions (form posts, redirect back with a notice)
//! POST /actions/{action}        - add-to-cart, update-quantity, remove-from-cart,
//!                                 checkout, logout, edit-product, update-stock
//! POST /login                   - Store the session record
//!
//! # Fragments
//! GET  /fragments/cart-count    - Cart count badge
//! GET  /fragments/cart-items    - Cart lines and summary
//! GET  /fragments/products      - Product grid
//! GET  /fragments/admin-table   - Admin product table (admin role)
//! ```

pub mod actions;
pub mod auth;
pub mod fragments;
pub mod pages;

use axum::{
    Router, middleware as axum_middleware,
    http::{HeaderValue, header::CACHE_CONTROL},
    routing::{get, post},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the page fragment routes router.
pub fn fragment_routes() -> Router<AppState> {
    Router::new()
        .route("/cart-count", get(fragments::cart_count))
        .route("/cart-items", get(fragments::cart_items))
        .route("/products", get(fragments::products))
        .route("/admin-table", get(fragments::admin_table))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Pages
        .route("/", get(pages::show))
        .route("/index.html", get(pages::show))
        .route("/cart.html", get(pages::show))
        .route("/admin.html", get(pages::show))
        .route("/login.html", get(pages::show))
        // Actions
        .route("/actions/{action}", post(actions::perform))
        .route("/login", post(auth::login))
        // Fragments
        .nest("/fragments", fragment_routes())
        .fallback(pages::show)
}

/// Build the full application with middleware and state.
pub fn app(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
