//! Login route handler.
//!
//! There is no credential check: the submitted name or email becomes the
//! session record. Logout is the `logout` action.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::actions;
use crate::error::{Result, set_sentry_user};
use crate::pages::Page;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Name or email.
    pub identity: String,
    pub role: Option<String>,
}

/// Store the session record and return to the storefront.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Redirect> {
    let mut shop = state.shop().await;
    let outcome = actions::login(&mut shop, &form.identity, form.role)?;

    if let Some(user) = shop.session().current() {
        set_sentry_user(user.display_name(), user.email.as_deref());
    }

    let target = outcome.redirect.unwrap_or(Page::Storefront);
    Ok(Redirect::to(&target.location(outcome.notice.as_ref())))
}
