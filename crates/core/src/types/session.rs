//! Session-related types.
//!
//! The record stored under the `currentUser` key while a shopper is logged in.

use serde::{Deserialize, Serialize};

use super::UserIdentity;

/// Role value that grants access to the admin product table.
pub const ADMIN_ROLE: &str = "admin";

/// Locally stored identity of the logged-in shopper.
///
/// Either `name` or `email` is set, depending on what was typed at login.
/// There is no credential: the presence of the record is the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SessionUser {
    /// Build a session record from a parsed login identity.
    #[must_use]
    pub fn new(identity: UserIdentity, role: Option<String>) -> Self {
        let role = role
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty());
        match identity {
            UserIdentity::Name(name) => Self {
                name: Some(name),
                email: None,
                role,
            },
            UserIdentity::Email(email) => Self {
                name: None,
                email: Some(email),
                role,
            },
        }
    }

    /// Name shown in the header: the name if set, otherwise the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_name() {
        let user = SessionUser {
            name: Some("Budi".to_string()),
            email: Some("budi@toko.id".to_string()),
            role: None,
        };
        assert_eq!(user.display_name(), "Budi");

        let user = SessionUser::new(UserIdentity::Email("budi@toko.id".to_string()), None);
        assert_eq!(user.display_name(), "budi@toko.id");
    }

    #[test]
    fn test_is_admin_requires_exact_role() {
        let admin = SessionUser::new(
            UserIdentity::Name("Ani".to_string()),
            Some("admin".to_string()),
        );
        assert!(admin.is_admin());

        let shouty = SessionUser::new(
            UserIdentity::Name("Ani".to_string()),
            Some("Admin".to_string()),
        );
        assert!(!shouty.is_admin());

        let blank = SessionUser::new(UserIdentity::Name("Ani".to_string()), Some("  ".to_string()));
        assert_eq!(blank.role, None);
    }

    #[test]
    fn test_stored_form_omits_missing_fields() {
        let user = SessionUser::new(UserIdentity::Name("Ani".to_string()), None);
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"name":"Ani"}"#);

        let back: SessionUser = serde_json::from_str(r#"{"email":"a@b.c","role":"admin"}"#).unwrap();
        assert!(back.is_admin());
        assert_eq!(back.display_name(), "a@b.c");
    }
}
