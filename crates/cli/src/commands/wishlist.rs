//! `lulu wishlist` commands.

use lulu_core::ProductId;
use lulu_storefront::wishlist::is_favorite;
use lulu_storefront::{Storefront, StorefrontError};

pub fn show(storefront: &Storefront) {
    let items = storefront.wishlist().items();
    if items.is_empty() {
        println!("Your wishlist is empty");
    }
    for id in items {
        println!("{id}");
    }
}

pub fn toggle(storefront: &Storefront, id: &ProductId) -> Result<(), StorefrontError> {
    let items = storefront.wishlist().toggle(id)?;
    if is_favorite(id, &items) {
        println!("Added {id} to wishlist");
    } else {
        println!("Removed {id} from wishlist");
    }
    Ok(())
}

pub fn clear(storefront: &Storefront) -> Result<(), StorefrontError> {
    storefront.wishlist().clear()?;
    println!("Wishlist cleared");
    Ok(())
}
