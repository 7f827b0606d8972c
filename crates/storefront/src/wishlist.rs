//! Client-local wishlist of favorited product ids.
//!
//! Stored under the `wishlist` key as a JSON array of ids with set semantics.

use lulu_core::ProductId;

use crate::storage::{ListStore, StorageError, keys};

/// Pure membership test against an already-loaded wishlist.
#[must_use]
pub fn is_favorite(id: &ProductId, list: &[ProductId]) -> bool {
    list.contains(id)
}

/// Toggle-membership operations over the persistent list store.
#[derive(Debug, Clone)]
pub struct WishlistManager {
    lists: ListStore,
}

impl WishlistManager {
    /// Create a wishlist manager over `lists`.
    #[must_use]
    pub const fn new(lists: ListStore) -> Self {
        Self { lists }
    }

    /// Current favorites in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<ProductId> {
        self.lists.load(keys::WISHLIST)
    }

    /// Flip a product's membership and return the updated list.
    ///
    /// A present id is removed (every occurrence, in case older data holds
    /// duplicates); an absent id is appended once.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the updated list cannot be saved.
    pub fn toggle(&self, id: &ProductId) -> Result<Vec<ProductId>, StorageError> {
        let mut items = self.items();

        if is_favorite(id, &items) {
            items.retain(|existing| existing != id);
            tracing::debug!(product_id = %id, "removed from wishlist");
        } else {
            items.push(id.clone());
            tracing::debug!(product_id = %id, "added to wishlist");
        }

        self.lists.save(keys::WISHLIST, &items)?;
        Ok(items)
    }

    /// Remove every favorite.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.lists.clear(keys::WISHLIST)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn wishlist() -> (Arc<MemoryStore>, WishlistManager) {
        let backend = Arc::new(MemoryStore::new());
        let wishlist = WishlistManager::new(ListStore::new(backend.clone()));
        (backend, wishlist)
    }

    fn ids(raw: &[&str]) -> Vec<ProductId> {
        raw.iter().copied().map(ProductId::from).collect()
    }

    #[test]
    fn test_toggle_sequence() {
        let (_, wishlist) = wishlist();
        wishlist.toggle(&ProductId::new("p1")).unwrap();
        wishlist.toggle(&ProductId::new("p2")).unwrap();
        let items = wishlist.toggle(&ProductId::new("p1")).unwrap();
        assert_eq!(items, ids(&["p2"]));
        assert_eq!(wishlist.items(), ids(&["p2"]));
    }

    #[test]
    fn test_double_toggle_restores_contents_and_order() {
        let (_, wishlist) = wishlist();
        for id in ["a", "b", "c"] {
            wishlist.toggle(&ProductId::new(id)).unwrap();
        }
        let before = wishlist.items();

        wishlist.toggle(&ProductId::new("z")).unwrap();
        let after = wishlist.toggle(&ProductId::new("z")).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_toggle_removes_all_duplicates() {
        let (backend, wishlist) = wishlist();
        backend
            .set_item("wishlist", r#"["p1","p2","p1"]"#)
            .unwrap();

        let items = wishlist.toggle(&ProductId::new("p1")).unwrap();
        assert_eq!(items, ids(&["p2"]));
    }

    #[test]
    fn test_persisted_as_plain_string_array() {
        let (backend, wishlist) = wishlist();
        wishlist.toggle(&ProductId::new("p9")).unwrap();
        assert_eq!(backend.get_item("wishlist").unwrap().as_deref(), Some(r#"["p9"]"#));
    }

    #[test]
    fn test_is_favorite_is_pure() {
        let list = ids(&["p1", "p3"]);
        assert!(is_favorite(&ProductId::new("p3"), &list));
        assert!(!is_favorite(&ProductId::new("p2"), &list));
        assert!(!is_favorite(&ProductId::new("p1"), &[]));
    }

    #[test]
    fn test_clear() {
        let (_, wishlist) = wishlist();
        wishlist.toggle(&ProductId::new("p1")).unwrap();
        wishlist.clear().unwrap();
        assert!(wishlist.items().is_empty());
    }
}
