//! Login identity type.

use core::fmt;

/// Errors that can occur when parsing a [`UserIdentity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The input is empty or whitespace.
    #[error("name or email cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("name or email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input looks like an email but one side of the @ is empty.
    #[error("email must have both a local part and a domain")]
    MalformedEmail,
}

/// What a shopper typed into the login form: a display name or an email.
///
/// Anything containing `@` is treated as an email and must have a non-empty
/// local part and domain. Everything else is a display name.
///
/// ## Examples
///
/// ```
/// use pustaka_core::UserIdentity;
///
/// assert!(matches!(UserIdentity::parse("budi@example.com"), Ok(UserIdentity::Email(_))));
/// assert!(matches!(UserIdentity::parse("Budi"), Ok(UserIdentity::Name(_))));
/// assert!(UserIdentity::parse("   ").is_err());
/// assert!(UserIdentity::parse("budi@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserIdentity {
    Name(String),
    Email(String),
}

impl UserIdentity {
    /// Maximum accepted length (RFC 5321 email limit).
    pub const MAX_LENGTH: usize = 254;

    /// Parse login input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, or contains `@` with an empty side.
    pub fn parse(input: &str) -> Result<Self, IdentityError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(IdentityError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(IdentityError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((local, domain)) if local.is_empty() || domain.is_empty() => {
                Err(IdentityError::MalformedEmail)
            }
            Some(_) => Ok(Self::Email(s.to_owned())),
            None => Ok(Self::Name(s.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(s) | Self::Email(s) => s,
        }
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for UserIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
