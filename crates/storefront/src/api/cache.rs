//! Cache types for catalog responses.

use lulu_core::CategoryId;

use super::types::Category;

/// Cache key for category lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Category(CategoryId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Category(Box<Category>),
}
