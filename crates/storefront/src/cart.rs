//! Client-local shopping cart.
//!
//! The cart lives under the `cart` key as a JSON array of [`CartLineItem`]s.
//! It is a snapshot cache: name, price and image are captured when a product
//! is added and never refreshed from the catalog. Server-side order state is
//! only created at checkout through the orders API.
//!
//! Invariants:
//! - at most one line item per product id
//! - every stored line item has `quantity >= 1`; dropping to zero removes it

use lulu_core::{Money, ProductId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::types::{OrderItem, Product};
use crate::storage::{ListStore, StorageError, keys};

/// Image used when a product has no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// One product's aggregated entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    #[serde(default = "one", deserialize_with = "quantity_at_least_one")]
    pub quantity: u32,
}

impl CartLineItem {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

const fn one() -> u32 {
    1
}

// Older records may carry no quantity, `null`, or `0`; all of them count as one unit.
fn quantity_at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let quantity = Option::<u32>::deserialize(deserializer)?;
    Ok(quantity.unwrap_or(1).max(1))
}

/// Product fields captured at the moment of an add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// URL of the product's first image, if it has one.
    pub image_url: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.images.first().map(|image| image.url.clone()),
        }
    }
}

/// Totals shown on the checkout summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct products.
    pub line_count: usize,
    /// Sum of quantities.
    pub item_count: u32,
    /// Sum of line totals.
    pub subtotal: Money,
}

impl CartSummary {
    /// Summarise a list of line items.
    #[must_use]
    pub fn of(items: &[CartLineItem]) -> Self {
        Self {
            line_count: items.len(),
            item_count: items
                .iter()
                .fold(0_u32, |acc, item| acc.saturating_add(item.quantity)),
            subtotal: items.iter().map(CartLineItem::line_total).sum(),
        }
    }
}

/// Convert line items into the order API's item shape.
#[must_use]
pub fn to_order_items(items: &[CartLineItem]) -> Vec<OrderItem> {
    items
        .iter()
        .map(|item| OrderItem {
            product: item.id.clone(),
            quantity: item.quantity,
            price: item.price,
            variant: None,
        })
        .collect()
}

fn merge_duplicates(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => merged.push(item),
        }
    }
    merged
}

/// Quantity-accumulating cart operations over the persistent list store.
#[derive(Debug, Clone)]
pub struct CartManager {
    lists: ListStore,
}

impl CartManager {
    /// Create a cart manager over `lists`.
    #[must_use]
    pub const fn new(lists: ListStore) -> Self {
        Self { lists }
    }

    /// Current line items, oldest first.
    ///
    /// Stored lines sharing a product id are merged into the first of them.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        merge_duplicates(self.lists.load(keys::CART))
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// with quantity 1 built from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the updated cart cannot be saved.
    pub fn add_item(&self, snapshot: &ProductSnapshot) -> Result<Vec<CartLineItem>, StorageError> {
        let mut items = self.items();

        if let Some(existing) = items.iter_mut().find(|item| item.id == snapshot.id) {
            existing.quantity = existing.quantity.max(1).saturating_add(1);
        } else {
            let image = snapshot
                .image_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .unwrap_or(PLACEHOLDER_IMAGE);
            items.push(CartLineItem {
                id: snapshot.id.clone(),
                name: snapshot.name.clone(),
                price: snapshot.price,
                image: image.to_string(),
                quantity: 1,
            });
        }

        self.lists.save(keys::CART, &items)?;
        tracing::debug!(product_id = %snapshot.id, lines = items.len(), "added to cart");
        Ok(items)
    }

    /// Set a line's quantity. Zero removes the line; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the updated cart cannot be saved.
    pub fn set_quantity(
        &self,
        id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartLineItem>, StorageError> {
        if quantity == 0 {
            return self.remove_item(id);
        }

        let mut items = self.items();
        if let Some(existing) = items.iter_mut().find(|item| &item.id == id) {
            existing.quantity = quantity;
        }
        self.lists.save(keys::CART, &items)?;
        Ok(items)
    }

    /// Remove a product's line entirely.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the updated cart cannot be saved.
    pub fn remove_item(&self, id: &ProductId) -> Result<Vec<CartLineItem>, StorageError> {
        let mut items = self.items();
        items.retain(|item| &item.id != id);
        self.lists.save(keys::CART, &items)?;
        Ok(items)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.lists.clear(keys::CART)
    }
}
