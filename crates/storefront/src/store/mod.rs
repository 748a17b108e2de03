//! Persistent key-value store adapter.
//!
//! The storefront keeps its whole state in two JSON blobs, mirroring what a
//! browser would keep in local storage:
//!
//! - [`keys::CART`] - JSON array of cart lines
//! - [`keys::CURRENT_USER`] - JSON object for the logged-in shopper, absent otherwise
//!
//! Backends implement the string-level [`Store`] trait; [`StoreExt`] adds
//! typed JSON access on top of any backend.

mod file;
mod memory;
#[cfg(test)]
pub(crate) mod testing;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys used by the storefront.
pub mod keys {
    /// Key for the serialized cart lines.
    pub const CART: &str = "cart";

    /// Key for the current session record.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors that can occur while reading or writing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for key {key} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// String-level key-value persistence.
///
/// Each call is atomic at key granularity. There is no cross-key transaction
/// and no coordination between processes sharing a backend (last write wins).
pub trait Store: Send + Sync + 'static {
    /// Read the raw value stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed JSON access for any [`Store`].
pub trait StoreExt: Store {
    /// Read and deserialize the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored text is not valid JSON
    /// for `T`, or the backend's error if the read fails.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.get_raw(key)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                    key: key.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if `value` cannot be serialized, or
    /// the backend's error if the write fails.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_owned(),
            source,
        })?;
        self.set_raw(key, &raw)
    }
}

impl<S: Store + ?Sized> StoreExt for S {}
