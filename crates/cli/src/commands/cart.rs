//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! pustaka add 1
//! pustaka update 1 3
//! pustaka remove 1
//! pustaka checkout
//! ```

use pustaka_core::ProductId;
use pustaka_storefront::actions::{ActionKind, ActionRequest};

use super::{CliError, Context, report};

/// Print cart lines followed by subtotal, shipping and total.
#[allow(clippy::print_stdout)]
pub fn show(ctx: &Context) {
    let cart = ctx.shop.cart();
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in cart.lines() {
        println!(
            "{:>4}  {:<32} {:>3} x {:>12} = {:>12}",
            line.product_id().to_string(),
            line.product.title,
            line.quantity,
            line.product.price.display(),
            line.line_total().display()
        );
    }
    println!("Subtotal  {}", cart.subtotal().display());
    println!("Shipping  {}", ctx.shop.options().shipping_fee.display());
    println!("Total     {}", ctx.shop.cart_total().display());
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub async fn add(ctx: &mut Context, product_id: ProductId) -> Result<(), CliError> {
    let outcome = ctx
        .perform(ActionKind::AddToCart, &ActionRequest::for_product(product_id))
        .await?;
    report(&outcome);
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub async fn update(ctx: &mut Context, product_id: ProductId, quantity: i64) -> Result<(), CliError> {
    let request = ActionRequest {
        quantity: Some(quantity),
        ..ActionRequest::for_product(product_id)
    };
    let outcome = ctx.perform(ActionKind::UpdateQuantity, &request).await?;
    report(&outcome);
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub async fn remove(ctx: &mut Context, product_id: ProductId) -> Result<(), CliError> {
    let outcome = ctx
        .perform(ActionKind::RemoveFromCart, &ActionRequest::for_product(product_id))
        .await?;
    report(&outcome);
    Ok(())
}

/// Check out, emptying the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub async fn checkout(ctx: &mut Context) -> Result<(), CliError> {
    let outcome = ctx.perform(ActionKind::Checkout, &ActionRequest::default()).await?;
    report(&outcome);
    Ok(())
}
