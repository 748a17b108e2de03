//! Catalog listing.

use super::Context;

/// Print every product in the catalog.
///
/// Falls back to the built-in catalog when the source can't be read.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context) {
    let catalog = ctx.catalog.load().await;
    for product in catalog.products() {
        println!(
            "{:>4}  {:<32} {:<20} {:>12}  stock {}",
            product.id.to_string(),
            product.title,
            product.author,
            product.price.display(),
            product.stock
        );
    }
}
