//! Action route handlers.
//!
//! Forms post to `/actions/{action}`. The action runs against the shop and
//! the browser is redirected (303) either to the page the outcome names or
//! back to the page the form came from, with any notice in the query string.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use pustaka_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::actions::{ActionContext, ActionKind, ActionRequest, dispatch};
use crate::catalog::Catalog;
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user};
use crate::pages::Page;
use crate::state::AppState;

/// Form fields accepted by every action. Unused fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    pub product_id: Option<String>,
    pub quantity: Option<String>,
    pub value: Option<String>,
    /// Path of the page that submitted the form.
    pub page: Option<String>,
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty())
}

impl ActionForm {
    /// Parse the typed action arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if `product_id` or `quantity` is not
    /// an integer.
    pub fn to_request(&self) -> Result<ActionRequest> {
        let product_id = non_empty(self.product_id.as_deref())
            .map(str::parse::<ProductId>)
            .transpose()
            .map_err(|e| AppError::BadRequest(format!("product_id: {e}")))?;
        let quantity = non_empty(self.quantity.as_deref())
            .map(str::parse::<i64>)
            .transpose()
            .map_err(|e| AppError::BadRequest(format!("quantity: {e}")))?;

        Ok(ActionRequest {
            product_id,
            quantity,
            value: self.value.clone(),
        })
    }

    /// Page to return to when the outcome doesn't redirect elsewhere.
    #[must_use]
    pub fn return_page(&self) -> Page {
        non_empty(self.page.as_deref()).map_or(Page::Storefront, Page::from_path)
    }
}

/// Run a UI action.
#[instrument(skip(state, form))]
pub async fn perform(
    State(state): State<AppState>,
    Path(action): Path<String>,
    Form(form): Form<ActionForm>,
) -> Result<Redirect> {
    let kind: ActionKind = action.parse()?;
    let request = form.to_request()?;

    let product = request.product_id.map(|id| id.to_string());
    let data: Vec<(&str, &str)> = product
        .as_deref()
        .map(|id| vec![("product_id", id)])
        .unwrap_or_default();
    add_breadcrumb("action", kind.id(), Some(data.as_slice()));

    let mut shop = state.shop().await;
    let catalog = if kind.needs_catalog() && shop.session().is_authenticated() {
        state.catalog().load().await
    } else {
        Catalog::default()
    };

    let outcome = dispatch(
        kind,
        &mut ActionContext {
            shop: &mut *shop,
            catalog: &catalog,
            request: &request,
        },
    )?;

    if kind == ActionKind::Logout {
        clear_sentry_user();
    }

    let target = outcome.redirect.unwrap_or_else(|| form.return_page());
    Ok(Redirect::to(&target.location(outcome.notice.as_ref())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_request_parses_fields() {
        let form = ActionForm {
            product_id: Some(" 2 ".to_string()),
            quantity: Some("-1".to_string()),
            value: Some("12".to_string()),
            page: Some("/cart.html".to_string()),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.product_id, Some(ProductId::new(2)));
        assert_eq!(request.quantity, Some(-1));
        assert_eq!(request.value.as_deref(), Some("12"));
        assert_eq!(form.return_page(), Page::Cart);
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let form = ActionForm {
            product_id: Some(String::new()),
            quantity: Some("  ".to_string()),
            ..ActionForm::default()
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.product_id, None);
        assert_eq!(request.quantity, None);
        assert_eq!(form.return_page(), Page::Storefront);
    }

    #[test]
    fn test_non_numeric_product_is_bad_request() {
        let form = ActionForm {
            product_id: Some("abc".to_string()),
            ..ActionForm::default()
        };
        assert!(matches!(form.to_request(), Err(AppError::BadRequest(_))));
    }
}
