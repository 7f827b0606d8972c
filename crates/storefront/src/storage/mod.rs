//! Durable client-local storage.
//!
//! # Layers
//!
//! - [`KeyValueStore`] - string-keyed string store, the stand-in for browser
//!   local storage. Backends: [`MemoryStore`] and [`FileStore`].
//! - [`ListStore`] - typed read-modify-write helper that keeps ordered
//!   sequences of JSON records under a single key.
//!
//! # Persisted keys
//!
//! | Key | Value |
//! |---|---|
//! | `cart` | JSON array of cart line items |
//! | `wishlist` | JSON array of product ids |
//! | `token` | raw bearer token |

mod file;
mod list;
mod memory;

pub use file::FileStore;
pub use list::ListStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage keys used by the storefront.
pub mod keys {
    /// Cart line items.
    pub const CART: &str = "cart";

    /// Favorited product ids.
    pub const WISHLIST: &str = "wishlist";

    /// Bearer token for the REST API.
    pub const TOKEN: &str = "token";
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used by this backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// The stored value is not valid JSON for the requested type.
    #[error("corrupt value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be serialized.
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A durable string-keyed string store.
///
/// Mirrors the browser `Storage` interface. Implementations must be safe to
/// share between threads; callers perform whole-value overwrites only.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}
