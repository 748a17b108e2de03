//! View rendering.
//!
//! Pure functions of storefront state: the view structs below are built from
//! a [`Catalog`] or a [`Shop`] and rendered by askama templates. Full pages
//! are [`WebTemplate`]s; the `render_*` helpers produce the HTML fragments
//! used for partial refreshes.

use askama::Template;
use askama_web::WebTemplate;
use pustaka_core::{CartLine, Product};

use crate::catalog::Catalog;
use crate::shop::Shop;

/// Product display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: String,
    pub stock: u32,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            author: product.author.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            stock: product.stock,
            image: product.image.clone(),
        }
    }
}

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    /// Quantity submitted by the "-" button.
    pub decrement: i64,
    /// Quantity submitted by the "+" button.
    pub increment: i64,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let quantity = i64::from(line.quantity);
        Self {
            id: line.product.id.as_i64(),
            title: line.product.title.clone(),
            author: line.product.author.clone(),
            image: line.product.image.clone(),
            price: line.product.price.display(),
            quantity: line.quantity,
            line_total: line.line_total().display(),
            decrement: quantity - 1,
            increment: quantity + 1,
        }
    }
}

/// Cart totals display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummaryView {
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

/// Header display data shared by every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderView {
    pub cart_count: u64,
    pub user_name: Option<String>,
    pub is_admin: bool,
    pub notice: Option<String>,
}

impl HeaderView {
    #[must_use]
    pub fn from_shop(shop: &Shop, notice: Option<String>) -> Self {
        Self {
            cart_count: shop.cart().total_item_count(),
            user_name: shop
                .session()
                .current()
                .map(|user| user.display_name().to_owned()),
            is_admin: shop.session().is_admin(),
            notice,
        }
    }
}

fn product_views(catalog: &Catalog) -> Vec<ProductView> {
    catalog.products().iter().map(ProductView::from).collect()
}

fn cart_items(shop: &Shop) -> Vec<CartItemView> {
    shop.cart().lines().iter().map(CartItemView::from).collect()
}

fn cart_summary(shop: &Shop) -> Option<CartSummaryView> {
    if shop.cart().is_empty() {
        return None;
    }
    Some(CartSummaryView {
        subtotal: shop.cart().subtotal().display(),
        shipping: shop.options().shipping_fee.display(),
        total: shop.cart_total().display(),
    })
}

// =============================================================================
// Pages
// =============================================================================

/// Storefront (product listing) page.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct StorefrontPage {
    pub header: HeaderView,
    pub products: Vec<ProductView>,
}

impl StorefrontPage {
    /// `catalog` is `None` on paths that don't show the product grid.
    #[must_use]
    pub fn new(shop: &Shop, catalog: Option<&Catalog>, notice: Option<String>) -> Self {
        Self {
            header: HeaderView::from_shop(shop, notice),
            products: catalog.map(product_views).unwrap_or_default(),
        }
    }
}

/// Cart page.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartPage {
    pub header: HeaderView,
    pub items: Vec<CartItemView>,
    pub summary: Option<CartSummaryView>,
}

impl CartPage {
    #[must_use]
    pub fn new(shop: &Shop, notice: Option<String>) -> Self {
        Self {
            header: HeaderView::from_shop(shop, notice),
            items: cart_items(shop),
            summary: cart_summary(shop),
        }
    }
}

/// Admin product table page.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminPage {
    pub header: HeaderView,
    pub rows: Vec<ProductView>,
}

impl AdminPage {
    #[must_use]
    pub fn new(shop: &Shop, catalog: &Catalog, notice: Option<String>) -> Self {
        Self {
            header: HeaderView::from_shop(shop, notice),
            rows: product_views(catalog),
        }
    }
}

/// Login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub header: HeaderView,
}

impl LoginPage {
    #[must_use]
    pub fn new(shop: &Shop, notice: Option<String>) -> Self {
        Self {
            header: HeaderView::from_shop(shop, notice),
        }
    }
}

// =============================================================================
// Fragments
// =============================================================================

#[derive(Template)]
#[template(path = "partials/product_grid.html")]
struct ProductGridFragment {
    products: Vec<ProductView>,
}

#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsFragment {
    items: Vec<CartItemView>,
    summary: Option<CartSummaryView>,
}

#[derive(Template)]
#[template(path = "partials/admin_table.html")]
struct AdminTableFragment {
    rows: Vec<ProductView>,
}

#[derive(Template)]
#[template(path = "partials/cart_count.html")]
struct CartCountFragment {
    count: u64,
}

/// Render the product grid.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_product_grid(catalog: &Catalog) -> askama::Result<String> {
    ProductGridFragment {
        products: product_views(catalog),
    }
    .render()
}

/// Render the cart line list and summary (or the empty-cart message).
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_cart_items(shop: &Shop) -> askama::Result<String> {
    CartItemsFragment {
        items: cart_items(shop),
        summary: cart_summary(shop),
    }
    .render()
}

/// Render the admin product table.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_admin_table(catalog: &Catalog) -> askama::Result<String> {
    AdminTableFragment {
        rows: product_views(catalog),
    }
    .render()
}

/// Render the cart count badge.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_cart_count(count: u64) -> askama::Result<String> {
    CartCountFragment { count }.render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pustaka_core::ProductId;

    use super::*;
    use crate::shop::ShopOptions;
    use crate::store::MemoryStore;

    fn shop() -> Shop {
        Shop::open(Arc::new(MemoryStore::new()), ShopOptions::default())
    }

    #[test]
    fn test_product_grid_lists_every_product() {
        let html = render_product_grid(&Catalog::fallback()).unwrap();
        assert!(html.contains("Pemrograman JavaScript"));
        assert!(html.contains("Desain UI/UX Modern"));
        assert!(html.contains("Rp 120.000"));
        assert!(html.contains("/actions/add-to-cart"));
    }

    #[test]
    fn test_product_grid_escapes_titles() {
        let mut catalog = Catalog::fallback().products().to_vec();
        if let Some(first) = catalog.first_mut() {
            first.title = "<script>alert(1)</script>".to_string();
        }
        let html = render_product_grid(&Catalog::new(catalog)).unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_cart_items_empty_and_filled() {
        let mut shop = shop();
        let html = render_cart_items(&shop).unwrap();
        assert!(html.contains("emptyCart"));
        assert!(!html.contains("cartSummary"));

        shop.cart_mut()
            .add_item(&Catalog::fallback(), ProductId::new(2))
            .unwrap();
        shop.cart_mut()
            .add_item(&Catalog::fallback(), ProductId::new(2))
            .unwrap();
        let html = render_cart_items(&shop).unwrap();
        assert!(html.contains("Rp 190.000"));
        assert!(html.contains("Rp 15.000"));
        assert!(html.contains("Rp 205.000"));
        assert!(!html.contains("emptyCart"));
    }

    #[test]
    fn test_cart_item_view_buttons() {
        let line = CartLine {
            product: Catalog::fallback().products()[0].clone(),
            quantity: 1,
        };
        let view = CartItemView::from(&line);
        assert_eq!(view.decrement, 0);
        assert_eq!(view.increment, 2);
    }

    #[test]
    fn test_admin_table_has_stub_actions() {
        let html = render_admin_table(&Catalog::fallback()).unwrap();
        assert!(html.contains("/actions/edit-product"));
        assert!(html.contains("/actions/update-stock"));
        assert!(html.contains("Jane Smith"));
    }

    #[test]
    fn test_cart_count_hidden_when_zero() {
        assert!(render_cart_count(0).unwrap().contains("hidden"));
        let html = render_cart_count(3).unwrap();
        assert!(html.contains('3'));
        assert!(!html.contains("hidden"));
    }

    #[test]
    fn test_header_shows_login_or_user() {
        let shop = shop();
        let page = StorefrontPage::new(&shop, None, None).render().unwrap();
        assert!(page.contains("loginBtn"));
        assert!(!page.contains("userInfo"));

        let mut shop = shop;
        crate::actions::login(&mut shop, "Siti", None).unwrap();
        let page = StorefrontPage::new(&shop, None, Some("Hello".to_string()))
            .render()
            .unwrap();
        assert!(page.contains("Siti"));
        assert!(page.contains("userInfo"));
        assert!(page.contains("Hello"));
    }
}
