//! Session gate.
//!
//! Tracks the locally stored shopper record and gates cart mutations and
//! checkout behind its presence. There is no credential check: a record in
//! [`keys::CURRENT_USER`] is the session.

use std::sync::Arc;

use pustaka_core::{ADMIN_ROLE, SessionUser};
use thiserror::Error;
use tracing::{info, warn};

use crate::cart::{CartEngine, CartError};
use crate::store::{Store, StoreError, StoreExt, keys};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// No shopper is logged in.
    #[error("login required")]
    Unauthenticated,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// The current session record, mirrored to [`keys::CURRENT_USER`].
pub struct SessionGate {
    current: Option<SessionUser>,
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SessionGate {
    /// Restore the session saved in `store`. Unreadable records are treated
    /// as logged out.
    pub fn restore(store: Arc<dyn Store>) -> Self {
        let current = store
            .get_json::<SessionUser>(keys::CURRENT_USER)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable stored session");
                None
            });
        Self { current, store }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Return the logged-in shopper, or call `on_fail` and report a gate
    /// failure so the calling action aborts.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Unauthenticated`] when no session is present.
    pub fn require_authentication<F: FnOnce()>(
        &self,
        on_fail: F,
    ) -> Result<&SessionUser, GateError> {
        self.current.as_ref().ok_or_else(|| {
            on_fail();
            GateError::Unauthenticated
        })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(SessionUser::is_admin)
    }

    /// Store `user` as the current session.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Store`] if persisting fails.
    pub fn login(&mut self, user: SessionUser) -> Result<(), GateError> {
        self.store.set_json(keys::CURRENT_USER, &user)?;
        info!(user = user.display_name(), "Logged in");
        self.current = Some(user);
        Ok(())
    }

    /// Give a logged-in shopper without any role the admin role.
    ///
    /// Returns whether the role was granted. Shoppers with an explicit role
    /// keep it.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Unauthenticated`] when nobody is logged in, or
    /// [`GateError::Store`] if persisting fails.
    pub fn grant_default_admin_role(&mut self) -> Result<bool, GateError> {
        let current = self.current.as_ref().ok_or(GateError::Unauthenticated)?;
        if current.role.is_some() {
            return Ok(false);
        }
        let user = SessionUser {
            role: Some(ADMIN_ROLE.to_owned()),
            ..current.clone()
        };
        self.store.set_json(keys::CURRENT_USER, &user)?;
        info!(user = user.display_name(), "Granted default admin role");
        self.current = Some(user);
        Ok(true)
    }

    /// Clear the session and the cart and persist both.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    pub fn logout(&mut self, cart: &mut CartEngine) -> Result<(), GateError> {
        self.store.remove(keys::CURRENT_USER)?;
        let previous = self.current.take();
        cart.clear()?;
        info!(
            user = previous.as_ref().map_or("", SessionUser::display_name),
            "Logged out"
        );
        Ok(())
    }
}
