//! Page route handlers.
//!
//! Every page request goes through [`bootstrap`], which picks the page from
//! the request path and enforces its precondition.

use axum::{
    extract::{Query, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::pages::{PageInit, PageView, bootstrap};
use crate::state::AppState;

/// Query parameters accepted by every page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Message carried over from the action that redirected here.
    pub notice: Option<String>,
}

impl IntoResponse for PageInit {
    fn into_response(self) -> Response {
        match self {
            Self::Render(PageView::Storefront(page)) => page.into_response(),
            Self::Render(PageView::Cart(page)) => page.into_response(),
            Self::Render(PageView::Admin(page)) => page.into_response(),
            Self::Render(PageView::Login(page)) => page.into_response(),
            Self::Redirect { to, notice } => {
                Redirect::to(&to.location(notice.as_ref())).into_response()
            }
        }
    }
}

/// Render the page for the request path.
#[instrument(skip(state, query), fields(path = %uri.path()))]
pub async fn show(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> Result<Response> {
    let notice = query.notice.filter(|n| !n.trim().is_empty());
    let mut shop = state.shop().await;
    let init = bootstrap(uri.path(), &mut *shop, state.catalog(), notice).await?;
    Ok(init.into_response())
}
