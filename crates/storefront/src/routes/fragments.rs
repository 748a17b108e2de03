//! HTML fragment handlers for partial page refreshes.

use axum::{extract::State, response::Html};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::views::{render_admin_table, render_cart_count, render_cart_items, render_product_grid};

/// Cart count badge.
pub async fn cart_count(State(state): State<AppState>) -> Result<Html<String>> {
    let shop = state.shop().await;
    Ok(Html(render_cart_count(shop.cart().total_item_count())?))
}

/// Cart lines and summary.
pub async fn cart_items(State(state): State<AppState>) -> Result<Html<String>> {
    let shop = state.shop().await;
    Ok(Html(render_cart_items(&shop)?))
}

/// Product grid.
pub async fn products(State(state): State<AppState>) -> Result<Html<String>> {
    let catalog = state.catalog().load().await;
    Ok(Html(render_product_grid(&catalog)?))
}

/// Admin product table. Hidden from anyone without the admin role.
pub async fn admin_table(State(state): State<AppState>) -> Result<Html<String>> {
    let is_admin = state.shop().await.session().is_admin();
    if !is_admin {
        return Err(AppError::NotFound("admin table".to_string()));
    }
    let catalog = state.catalog().load().await;
    Ok(Html(render_admin_table(&catalog)?))
}
