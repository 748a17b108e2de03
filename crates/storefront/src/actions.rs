//! UI action dispatch.
//!
//! Every interaction the pages offer is an [`ActionKind`] with a stable
//! identifier (`add-to-cart`, `checkout`, ...). [`DISPATCH_TABLE`] maps each
//! identifier to a plain handler function over the shared [`Shop`] state.
//! Handlers never fail for expected conditions: stock limits, missing login
//! and stale product ids become an [`Outcome`] with a [`Notice`] and/or a
//! redirect. Only persistence failures surface as [`ActionError`].
//!
//! ```text
//! add-to-cart        product_id             login required
//! update-quantity    product_id, quantity
//! remove-from-cart   product_id
//! checkout                                  login required
//! logout
//! edit-product       product_id             placeholder, nothing persisted
//! update-stock       product_id, value      placeholder, nothing persisted
//! ```

use std::fmt;
use std::str::FromStr;

use pustaka_core::{IdentityError, ProductId, SessionUser, UserIdentity};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::cart::{CartError, QuantityChange};
use crate::catalog::Catalog;
use crate::pages::Page;
use crate::session::GateError;
use crate::shop::Shop;
use crate::store::StoreError;

/// Errors that abort an action without a user-facing notice.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Session(#[from] GateError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identifier of a UI action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    AddToCart,
    UpdateQuantity,
    RemoveFromCart,
    Checkout,
    Logout,
    EditProduct,
    UpdateStock,
}

impl ActionKind {
    /// Every action, in dispatch table order.
    pub const ALL: [Self; 7] = [
        Self::AddToCart,
        Self::UpdateQuantity,
        Self::RemoveFromCart,
        Self::Checkout,
        Self::Logout,
        Self::EditProduct,
        Self::UpdateStock,
    ];

    /// The identifier used in URLs and forms.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::AddToCart => "add-to-cart",
            Self::UpdateQuantity => "update-quantity",
            Self::RemoveFromCart => "remove-from-cart",
            Self::Checkout => "checkout",
            Self::Logout => "logout",
            Self::EditProduct => "edit-product",
            Self::UpdateStock => "update-stock",
        }
    }

    /// Whether the handler looks products up in the catalog.
    #[must_use]
    pub const fn needs_catalog(self) -> bool {
        matches!(self, Self::AddToCart)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| ActionError::UnknownAction(s.to_owned()))
    }
}

/// The action a login gate was protecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    AddToCart,
    Checkout,
}

/// A user-visible message produced by an action or a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    AddedToCart { title: String },
    StockExceeded,
    LoginRequired(GatedAction),
    CheckoutComplete,
    AdminOnly,
    EditProduct(ProductId),
    StockUpdated { product_id: ProductId, stock: u32 },
    LoginRejected(IdentityError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddedToCart { title } => write!(f, "\u{2713} Added \"{title}\" to your cart"),
            Self::StockExceeded => f.write_str("Not enough stock available"),
            Self::LoginRequired(GatedAction::AddToCart) => {
                f.write_str("Please log in before adding products to your cart")
            }
            Self::LoginRequired(GatedAction::Checkout) => {
                f.write_str("Please log in before checking out")
            }
            Self::CheckoutComplete => {
                f.write_str("Checkout successful! Your order is being processed.")
            }
            Self::AdminOnly => f.write_str("You do not have access to the admin page"),
            Self::EditProduct(id) => write!(f, "Edit product with ID: {id}"),
            Self::StockUpdated { product_id, stock } => {
                write!(f, "Stock for product ID {product_id} updated to {stock}")
            }
            Self::LoginRejected(e) => write!(f, "Login failed: {e}"),
        }
    }
}

/// What the page should do after an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Message to show the shopper.
    pub notice: Option<Notice>,
    /// Page to navigate to. `None` means re-render the current page.
    pub redirect: Option<Page>,
}

impl Outcome {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            notice: None,
            redirect: None,
        }
    }

    #[must_use]
    pub const fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            redirect: None,
        }
    }

    #[must_use]
    pub const fn redirect(page: Page) -> Self {
        Self {
            notice: None,
            redirect: Some(page),
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    #[must_use]
    pub fn with_redirect(mut self, page: Page) -> Self {
        self.redirect = Some(page);
        self
    }
}

/// Arguments submitted with an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRequest {
    pub product_id: Option<ProductId>,
    pub quantity: Option<i64>,
    pub value: Option<String>,
}

impl ActionRequest {
    #[must_use]
    pub fn for_product(product_id: ProductId) -> Self {
        Self {
            product_id: Some(product_id),
            ..Self::default()
        }
    }

    fn product_id(&self) -> Result<ProductId, ActionError> {
        self.product_id.ok_or(ActionError::MissingField("product_id"))
    }

    fn quantity(&self) -> Result<i64, ActionError> {
        self.quantity.ok_or(ActionError::MissingField("quantity"))
    }
}

/// Everything a handler can touch.
pub struct ActionContext<'a> {
    pub shop: &'a mut Shop,
    /// Catalog for id lookups. Empty for actions that don't
    /// [`need`](ActionKind::needs_catalog) it.
    pub catalog: &'a Catalog,
    pub request: &'a ActionRequest,
}

/// Signature shared by all action handlers.
pub type Handler = fn(&mut ActionContext<'_>) -> Result<Outcome, ActionError>;

/// Action identifier to handler mapping.
pub const DISPATCH_TABLE: [(ActionKind, Handler); 7] = [
    (ActionKind::AddToCart, add_to_cart),
    (ActionKind::UpdateQuantity, update_quantity),
    (ActionKind::RemoveFromCart, remove_from_cart),
    (ActionKind::Checkout, checkout),
    (ActionKind::Logout, logout),
    (ActionKind::EditProduct, edit_product),
    (ActionKind::UpdateStock, update_stock),
];

/// Look up the handler registered for `kind`.
#[must_use]
pub fn handler_for(kind: ActionKind) -> Option<Handler> {
    DISPATCH_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, handler)| *handler)
}

/// Run the handler for `kind`.
///
/// # Errors
///
/// Returns [`ActionError`] if a required field is missing or persisting
/// state fails.
#[instrument(skip(ctx), fields(action = %kind))]
pub fn dispatch(kind: ActionKind, ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let handler = handler_for(kind).ok_or_else(|| ActionError::UnknownAction(kind.to_string()))?;
    handler(ctx)
}

/// Log a shopper in from the login form.
///
/// Invalid input is reported as a [`Notice::LoginRejected`] and leaves the
/// shopper on the login page.
///
/// # Errors
///
/// Returns [`ActionError::Session`] if the session cannot be persisted.
pub fn login(shop: &mut Shop, identity: &str, role: Option<String>) -> Result<Outcome, ActionError> {
    match UserIdentity::parse(identity) {
        Ok(identity) => {
            shop.session_mut().login(SessionUser::new(identity, role))?;
            Ok(Outcome::redirect(Page::Storefront))
        }
        Err(e) => Ok(Outcome::notice(Notice::LoginRejected(e)).with_redirect(Page::Login)),
    }
}

fn add_to_cart(ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let product_id = ctx.request.product_id()?;

    let mut outcome = Outcome::none();
    if ctx
        .shop
        .session()
        .require_authentication(|| outcome.redirect = Some(Page::Login))
        .is_err()
    {
        return Ok(outcome.with_notice(Notice::LoginRequired(GatedAction::AddToCart)));
    }

    match ctx.shop.cart_mut().add_item(ctx.catalog, product_id) {
        Ok(line) => Ok(Outcome::notice(Notice::AddedToCart {
            title: line.product.title.clone(),
        })),
        Err(CartError::StockExceeded { .. }) => Ok(Outcome::notice(Notice::StockExceeded)),
        Err(CartError::ProductNotFound(id)) => {
            error!(product_id = %id, "Product not found, ignoring add to cart");
            Ok(Outcome::none())
        }
        Err(e) => Err(e.into()),
    }
}

fn update_quantity(ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let product_id = ctx.request.product_id()?;
    let quantity = ctx.request.quantity()?;

    match ctx.shop.cart_mut().update_quantity(product_id, quantity) {
        Ok(QuantityChange::Updated | QuantityChange::Removed | QuantityChange::Missing) => {
            Ok(Outcome::none())
        }
        Err(CartError::StockExceeded { .. }) => Ok(Outcome::notice(Notice::StockExceeded)),
        Err(e) => Err(e.into()),
    }
}

fn remove_from_cart(ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let product_id = ctx.request.product_id()?;
    ctx.shop.cart_mut().remove_item(product_id)?;
    Ok(Outcome::none())
}

fn checkout(ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let mut outcome = Outcome::none();
    if ctx
        .shop
        .session()
        .require_authentication(|| outcome.redirect = Some(Page::Login))
        .is_err()
    {
        return Ok(outcome.with_notice(Notice::LoginRequired(GatedAction::Checkout)));
    }

    let items = ctx.shop.cart().total_item_count();
    let total = ctx.shop.cart_total();
    ctx.shop.cart_mut().clear()?;
    info!(items, total = %total, "Checkout completed");
    Ok(Outcome::notice(Notice::CheckoutComplete))
}

fn logout(ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let (session, cart) = ctx.shop.parts_mut();
    session.logout(cart)?;
    Ok(Outcome::redirect(Page::Storefront))
}

fn edit_product(ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let product_id = ctx.request.product_id()?;
    Ok(Outcome::notice(Notice::EditProduct(product_id)))
}

fn update_stock(ctx: &mut ActionContext<'_>) -> Result<Outcome, ActionError> {
    let product_id = ctx.request.product_id()?;
    let Some(stock) = ctx
        .request
        .value
        .as_deref()
        .and_then(|v| v.trim().parse::<u32>().ok())
    else {
        return Ok(Outcome::none());
    };

    info!(%product_id, stock, "Stock update requested (not persisted)");
    Ok(Outcome::notice(Notice::StockUpdated { product_id, stock }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pustaka_core::CartLine;

    use super::*;
    use crate::shop::ShopOptions;
    use crate::store::{MemoryStore, Store, StoreExt, keys};

    fn shop() -> (Shop, Arc<dyn Store>) {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        (Shop::open(Arc::clone(&store), ShopOptions::default()), store)
    }

    fn run(shop: &mut Shop, kind: ActionKind, request: &ActionRequest) -> Outcome {
        let catalog = Catalog::fallback();
        let mut ctx = ActionContext {
            shop,
            catalog: &catalog,
            request,
        };
        dispatch(kind, &mut ctx).unwrap()
    }

    #[test]
    fn test_every_kind_has_a_handler_and_round_trips() {
        for kind in ActionKind::ALL {
            assert!(handler_for(kind).is_some(), "{kind} has no handler");
            assert_eq!(kind.id().parse::<ActionKind>().unwrap(), kind);
        }
        assert!(matches!(
            "buy-now".parse::<ActionKind>(),
            Err(ActionError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_unauthenticated_add_redirects_without_mutation() {
        let (mut shop, store) = shop();

        let outcome = run(
            &mut shop,
            ActionKind::AddToCart,
            &ActionRequest::for_product(ProductId::new(1)),
        );

        assert_eq!(outcome.redirect, Some(Page::Login));
        assert_eq!(
            outcome.notice,
            Some(Notice::LoginRequired(GatedAction::AddToCart))
        );
        assert!(shop.cart().is_empty());
        assert_eq!(store.get_raw(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_add_reports_stock_exceeded() {
        let (mut shop, _) = shop();
        login(&mut shop, "budi@toko.id", None).unwrap();
        let request = ActionRequest::for_product(ProductId::new(2));

        for _ in 0..8 {
            let outcome = run(&mut shop, ActionKind::AddToCart, &request);
            assert!(matches!(outcome.notice, Some(Notice::AddedToCart { .. })));
        }
        let outcome = run(&mut shop, ActionKind::AddToCart, &request);
        assert_eq!(outcome.notice, Some(Notice::StockExceeded));
        assert_eq!(shop.cart().total_item_count(), 8);
    }

    #[test]
    fn test_add_unknown_product_is_silent() {
        let (mut shop, _) = shop();
        login(&mut shop, "Budi", None).unwrap();

        let outcome = run(
            &mut shop,
            ActionKind::AddToCart,
            &ActionRequest::for_product(ProductId::new(77)),
        );
        assert_eq!(outcome, Outcome::none());
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_update_quantity_above_stock_shows_notice() {
        let (mut shop, _) = shop();
        login(&mut shop, "Budi", None).unwrap();
        run(
            &mut shop,
            ActionKind::AddToCart,
            &ActionRequest::for_product(ProductId::new(2)),
        );

        let request = ActionRequest {
            product_id: Some(ProductId::new(2)),
            quantity: Some(9),
            value: None,
        };
        let outcome = run(&mut shop, ActionKind::UpdateQuantity, &request);
        assert_eq!(outcome.notice, Some(Notice::StockExceeded));

        let request = ActionRequest {
            quantity: Some(0),
            ..request
        };
        run(&mut shop, ActionKind::UpdateQuantity, &request);
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_missing_fields_are_errors() {
        let (mut shop, _) = shop();
        let catalog = Catalog::fallback();
        let request = ActionRequest::for_product(ProductId::new(1));
        let mut ctx = ActionContext {
            shop: &mut shop,
            catalog: &catalog,
            request: &request,
        };
        assert!(matches!(
            dispatch(ActionKind::UpdateQuantity, &mut ctx),
            Err(ActionError::MissingField("quantity"))
        ));
    }

    #[test]
    fn test_checkout_requires_login_then_clears_cart() {
        let (mut shop, store) = shop();

        let outcome = run(&mut shop, ActionKind::Checkout, &ActionRequest::default());
        assert_eq!(outcome.redirect, Some(Page::Login));
        assert_eq!(
            outcome.notice,
            Some(Notice::LoginRequired(GatedAction::Checkout))
        );

        login(&mut shop, "Budi", None).unwrap();
        run(
            &mut shop,
            ActionKind::AddToCart,
            &ActionRequest::for_product(ProductId::new(1)),
        );
        let outcome = run(&mut shop, ActionKind::Checkout, &ActionRequest::default());

        assert_eq!(outcome.notice, Some(Notice::CheckoutComplete));
        assert!(shop.cart().is_empty());
        assert_eq!(
            store.get_json::<Vec<CartLine>>(keys::CART).unwrap(),
            Some(Vec::new())
        );
        assert!(shop.session().is_authenticated());
    }

    #[test]
    fn test_logout_redirects_to_storefront() {
        let (mut shop, store) = shop();
        login(&mut shop, "Budi", None).unwrap();

        let outcome = run(&mut shop, ActionKind::Logout, &ActionRequest::default());
        assert_eq!(outcome, Outcome::redirect(Page::Storefront));
        assert_eq!(store.get_raw(keys::CURRENT_USER).unwrap(), None);
    }

    #[test]
    fn test_admin_stubs_do_not_persist() {
        let (mut shop, store) = shop();

        let outcome = run(
            &mut shop,
            ActionKind::EditProduct,
            &ActionRequest::for_product(ProductId::new(2)),
        );
        assert_eq!(outcome.notice, Some(Notice::EditProduct(ProductId::new(2))));

        let request = ActionRequest {
            product_id: Some(ProductId::new(2)),
            quantity: None,
            value: Some(" 40 ".to_string()),
        };
        let outcome = run(&mut shop, ActionKind::UpdateStock, &request);
        assert_eq!(
            outcome.notice,
            Some(Notice::StockUpdated {
                product_id: ProductId::new(2),
                stock: 40
            })
        );

        let request = ActionRequest {
            value: Some("lots".to_string()),
            ..request
        };
        assert_eq!(
            run(&mut shop, ActionKind::UpdateStock, &request),
            Outcome::none()
        );
        assert_eq!(store.get_raw(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_login_rejects_blank_identity() {
        let (mut shop, _) = shop();
        let outcome = login(&mut shop, "  ", None).unwrap();

        assert_eq!(outcome.redirect, Some(Page::Login));
        assert_eq!(
            outcome.notice,
            Some(Notice::LoginRejected(IdentityError::Empty))
        );
        assert!(!shop.session().is_authenticated());
    }
}
