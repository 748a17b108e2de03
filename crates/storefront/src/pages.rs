//! Page bootstrapping.
//!
//! Each request path maps to one [`Page`]. [`bootstrap`] runs that page's
//! init routine, enforcing its precondition, and returns either a view to
//! render or a redirect.
//!
//! ```text
//! *admin.html*   Admin        logged in and role "admin"
//! *cart.html*    Cart
//! *login.html*   Login
//! anything else  Storefront   product grid only on "/", ".../" and *index.html*
//! ```

use tracing::{debug, instrument};

use crate::actions::Notice;
use crate::catalog::CatalogLoader;
use crate::session::GateError;
use crate::shop::Shop;
use crate::views::{AdminPage, CartPage, LoginPage, StorefrontPage};

/// A top-level page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Storefront,
    Cart,
    Admin,
    Login,
}

impl Page {
    /// Identify the page for a request path.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains("admin.html") {
            Self::Admin
        } else if path.contains("cart.html") {
            Self::Cart
        } else if path.contains("login.html") {
            Self::Login
        } else {
            Self::Storefront
        }
    }

    /// Canonical path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Storefront => "/index.html",
            Self::Cart => "/cart.html",
            Self::Admin => "/admin.html",
            Self::Login => "/login.html",
        }
    }

    /// Page path with an optional notice carried in the query string.
    #[must_use]
    pub fn location(self, notice: Option<&Notice>) -> String {
        match notice {
            Some(notice) => format!(
                "{}?notice={}",
                self.path(),
                urlencoding::encode(&notice.to_string())
            ),
            None => self.path().to_owned(),
        }
    }
}

/// Whether the storefront init should load and show products for `path`.
#[must_use]
pub fn shows_products(path: &str) -> bool {
    path.contains("index.html") || path == "/" || path.ends_with('/')
}

/// A rendered page.
pub enum PageView {
    Storefront(StorefrontPage),
    Cart(CartPage),
    Admin(AdminPage),
    Login(LoginPage),
}

/// Result of a page's init routine.
pub enum PageInit {
    Render(PageView),
    Redirect { to: Page, notice: Option<Notice> },
}

/// Run the init routine for the page at `path`.
///
/// `notice` is a message carried over from a previous action.
///
/// # Errors
///
/// Returns [`GateError`] if the admin page fails to persist a granted
/// default role.
#[instrument(skip(shop, loader, notice))]
pub async fn bootstrap(
    path: &str,
    shop: &mut Shop,
    loader: &CatalogLoader,
    notice: Option<String>,
) -> Result<PageInit, GateError> {
    let page = Page::from_path(path);
    debug!(?page, "Initializing page");

    let view = match page {
        Page::Storefront => {
            let catalog = if shows_products(path) {
                Some(loader.load().await)
            } else {
                None
            };
            PageView::Storefront(StorefrontPage::new(shop, catalog.as_ref(), notice))
        }
        Page::Cart => PageView::Cart(CartPage::new(shop, notice)),
        Page::Login => PageView::Login(LoginPage::new(shop, notice)),
        Page::Admin => {
            if !shop.session().is_authenticated() {
                return Ok(PageInit::Redirect {
                    to: Page::Login,
                    notice: None,
                });
            }
            if shop.options().default_admin_role {
                shop.session_mut().grant_default_admin_role()?;
            }
            if !shop.session().is_admin() {
                return Ok(PageInit::Redirect {
                    to: Page::Storefront,
                    notice: Some(Notice::AdminOnly),
                });
            }
            let catalog = loader.load().await;
            PageView::Admin(AdminPage::new(shop, &catalog, notice))
        }
    };

    Ok(PageInit::Render(view))
}
