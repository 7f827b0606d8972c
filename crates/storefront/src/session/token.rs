//! Bearer token persistence.

use std::sync::Arc;

use secrecy::SecretString;

use crate::storage::{KeyValueStore, StorageError, keys};

/// The session token, stored raw under the `token` key.
#[derive(Debug, Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the stored token.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    pub fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .store
            .get_item(keys::TOKEN)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// The stored token, treating an unreadable store as signed out.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.get().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read session token");
            None
        })
    }

    /// Whether a token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.store.set_item(keys::TOKEN, token)
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_item(keys::TOKEN)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_set_get_clear() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        assert!(!tokens.is_authenticated());

        tokens.set("abc.def").unwrap();
        assert_eq!(tokens.get().unwrap().unwrap().expose_secret(), "abc.def");
        assert!(tokens.is_authenticated());

        tokens.clear().unwrap();
        assert!(tokens.get().unwrap().is_none());
    }

    #[test]
    fn test_empty_token_is_signed_out() {
        let backend = Arc::new(MemoryStore::new());
        backend.set_item("token", "").unwrap();
        assert!(!TokenStore::new(backend).is_authenticated());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        tokens.set("super-secret").unwrap();
        let token = tokens.token().unwrap();
        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
