//! Cart, session and store working together over a file-backed store.

#![allow(clippy::unwrap_used)]

use pustaka_core::{CartLine, ProductId, SessionUser};
use pustaka_integration_tests::{open_shop, temp_store};
use pustaka_storefront::actions::{
    self, ActionContext, ActionKind, ActionRequest, GatedAction, Notice, Outcome, dispatch,
};
use pustaka_storefront::catalog::{Catalog, CatalogLoader, CatalogSource};
use pustaka_storefront::pages::Page;
use pustaka_storefront::shop::Shop;
use pustaka_storefront::store::{Store, StoreExt, keys};

fn run(shop: &mut Shop, catalog: &Catalog, kind: ActionKind, request: &ActionRequest) -> Outcome {
    dispatch(
        kind,
        &mut ActionContext {
            shop,
            catalog,
            request,
        },
    )
    .unwrap()
}

fn add(shop: &mut Shop, catalog: &Catalog, id: i64) -> Outcome {
    run(
        shop,
        catalog,
        ActionKind::AddToCart,
        &ActionRequest::for_product(ProductId::new(id)),
    )
}

// =============================================================================
// Catalog fallback
// =============================================================================

#[tokio::test]
async fn test_unreachable_catalog_falls_back() {
    let loader = CatalogLoader::new(CatalogSource::parse("http://127.0.0.1:9/products.json"));
    let catalog = loader.load().await;

    let ids: Vec<i64> = catalog.products().iter().map(|p| p.id.as_i64()).collect();
    let prices: Vec<u64> = catalog.products().iter().map(|p| p.price.amount()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(prices, vec![120_000, 95_000]);
}

// =============================================================================
// Shopping session
// =============================================================================

#[test]
fn test_guest_add_is_rejected_without_touching_cart() {
    let (_dir, store) = temp_store();
    let mut shop = open_shop(&store);

    let outcome = add(&mut shop, &Catalog::fallback(), 1);

    assert_eq!(outcome.redirect, Some(Page::Login));
    assert_eq!(
        outcome.notice,
        Some(Notice::LoginRequired(GatedAction::AddToCart))
    );
    assert!(shop.cart().is_empty());
    assert!(store.get_raw(keys::CART).unwrap().is_none());
}

#[test]
fn test_stock_ceiling_on_repeated_adds() {
    let (_dir, store) = temp_store();
    let mut shop = open_shop(&store);
    let catalog = Catalog::fallback();
    actions::login(&mut shop, "budi@example.com", None).unwrap();

    // Product 2 has 8 in stock
    for _ in 0..8 {
        add(&mut shop, &catalog, 2);
    }
    let outcome = add(&mut shop, &catalog, 2);

    assert_eq!(outcome.notice, Some(Notice::StockExceeded));
    assert_eq!(shop.cart().line(ProductId::new(2)).unwrap().quantity, 8);
}

#[test]
fn test_cart_survives_reopen_in_order() {
    let (_dir, store) = temp_store();
    let catalog = Catalog::fallback();
    {
        let mut shop = open_shop(&store);
        actions::login(&mut shop, "Budi", None).unwrap();
        add(&mut shop, &catalog, 2);
        add(&mut shop, &catalog, 1);
        add(&mut shop, &catalog, 2);
    }

    let shop = open_shop(&store);
    let ids: Vec<i64> = shop
        .cart()
        .lines()
        .iter()
        .map(|line| line.product_id().as_i64())
        .collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(shop.cart().total_item_count(), 3);
    assert_eq!(shop.session().current().unwrap().display_name(), "Budi");
}

#[test]
fn test_zero_quantity_removes_line() {
    let (_dir, store) = temp_store();
    let mut shop = open_shop(&store);
    let catalog = Catalog::fallback();
    actions::login(&mut shop, "Budi", None).unwrap();
    add(&mut shop, &catalog, 1);
    add(&mut shop, &catalog, 2);

    let request = ActionRequest {
        quantity: Some(0),
        ..ActionRequest::for_product(ProductId::new(1))
    };
    run(&mut shop, &catalog, ActionKind::UpdateQuantity, &request);

    let stored: Vec<CartLine> = store.get_json(keys::CART).unwrap().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored.first().map(CartLine::product_id),
        Some(ProductId::new(2))
    );
}

#[test]
fn test_checkout_empties_cart_and_keeps_session() {
    let (_dir, store) = temp_store();
    let mut shop = open_shop(&store);
    let catalog = Catalog::fallback();
    actions::login(&mut shop, "Budi", None).unwrap();
    add(&mut shop, &catalog, 1);

    let outcome = run(
        &mut shop,
        &catalog,
        ActionKind::Checkout,
        &ActionRequest::default(),
    );

    assert_eq!(outcome.notice, Some(Notice::CheckoutComplete));
    assert!(shop.cart().is_empty());
    assert!(shop.session().is_authenticated());
    let stored: Vec<CartLine> = store.get_json(keys::CART).unwrap().unwrap();
    assert!(stored.is_empty());
}

#[test]
fn test_logout_clears_session_and_cart_on_disk() {
    let (_dir, store) = temp_store();
    let mut shop = open_shop(&store);
    let catalog = Catalog::fallback();
    actions::login(&mut shop, "Budi", Some("admin".to_string())).unwrap();
    add(&mut shop, &catalog, 1);

    let outcome = run(
        &mut shop,
        &Catalog::default(),
        ActionKind::Logout,
        &ActionRequest::default(),
    );

    assert_eq!(outcome.redirect, Some(Page::Storefront));
    assert!(
        store
            .get_json::<SessionUser>(keys::CURRENT_USER)
            .unwrap()
            .is_none()
    );
    let stored: Vec<CartLine> = store.get_json(keys::CART).unwrap().unwrap();
    assert!(stored.is_empty());

    let reopened = open_shop(&store);
    assert!(!reopened.session().is_authenticated());
    assert!(reopened.cart().is_empty());
}
