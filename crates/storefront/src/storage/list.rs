//! Typed list persistence over a [`KeyValueStore`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, StorageError};

/// Stores ordered sequences of JSON records, one sequence per key.
///
/// Every write serializes and replaces the whole sequence. Callers load,
/// mutate their copy and save it back.
#[derive(Debug, Clone)]
pub struct ListStore {
    store: Arc<dyn KeyValueStore>,
}

impl ListStore {
    /// Wrap a key-value backend.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The underlying key-value backend.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Load the sequence under `key`.
    ///
    /// Missing, unreadable and corrupt values all degrade to an empty
    /// sequence. The latter two are logged.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_load(key) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable stored list");
                Vec::new()
            }
        }
    }

    /// Load the sequence under `key`, reporting why a value is unusable.
    ///
    /// Returns `Ok(None)` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] if the stored value does not decode,
    /// or the backend's error if it cannot be read.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StorageError> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Replace the sequence under `key` with `items`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if encoding or the backend write fails.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set_item(key, &raw)?;
        tracing::debug!(key, len = items.len(), "saved list");
        Ok(())
    }

    /// Drop the sequence under `key`; later loads return empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend write fails.
    pub fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove_item(key)
    }
}
