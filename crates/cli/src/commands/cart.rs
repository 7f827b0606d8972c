//! `lulu cart` commands.

use lulu_core::ProductId;
use lulu_storefront::cart::{CartLineItem, CartSummary};
use lulu_storefront::{Storefront, StorefrontError};

pub fn show(storefront: &Storefront) {
    print_cart(&storefront.cart().items());
}

pub async fn add(storefront: &Storefront, id: &ProductId) -> Result<(), StorefrontError> {
    let items = storefront.add_to_cart(id).await?;
    if let Some(item) = items.iter().find(|item| &item.id == id) {
        println!("{} added to cart!", item.name);
    }
    Ok(())
}

pub fn set(storefront: &Storefront, id: &ProductId, quantity: u32) -> Result<(), StorefrontError> {
    let items = storefront.cart().set_quantity(id, quantity)?;
    print_cart(&items);
    Ok(())
}

pub fn remove(storefront: &Storefront, id: &ProductId) -> Result<(), StorefrontError> {
    let items = storefront.cart().remove_item(id)?;
    println!("Removed from cart");
    print_cart(&items);
    Ok(())
}

pub fn clear(storefront: &Storefront) -> Result<(), StorefrontError> {
    storefront.cart().clear()?;
    println!("Cart cleared");
    Ok(())
}

fn print_cart(items: &[CartLineItem]) {
    if items.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for item in items {
        println!(
            "{:<24} {:<32} {:>4} x {:>12} = {:>12}",
            item.id,
            item.name,
            item.quantity,
            item.price.display(),
            item.line_total().display()
        );
    }

    let summary = CartSummary::of(items);
    println!(
        "{} item(s) in {} line(s), subtotal {}",
        summary.item_count,
        summary.line_count,
        summary.subtotal.display()
    );
}
