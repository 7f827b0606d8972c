//! `lulu products` and `lulu categories` commands.

use lulu_core::ProductId;
use lulu_storefront::api::types::Product;
use lulu_storefront::catalog::page_title;
use lulu_storefront::wishlist::is_favorite;
use lulu_storefront::{Storefront, StorefrontError};

pub async fn list_products(
    storefront: &Storefront,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<(), StorefrontError> {
    let page = storefront.browse(category, search).await?;

    println!("{}", page_title(category.unwrap_or_default()));
    print_products(storefront, &page.products);
    println!("{} of {} product(s)", page.products.len(), page.total);
    Ok(())
}

pub async fn show_product(storefront: &Storefront, id: &ProductId) -> Result<(), StorefrontError> {
    let product = storefront.api().product(id).await?;

    println!("{} ({})", product.name, product.id);
    println!("Price:    {}", product.price.display());
    if let Some(compare) = product.compare_price {
        println!("Was:      {}", compare.display());
    }
    println!("Category: {}", product.category.label());
    if product.is_in_stock() {
        println!("Stock:    {}", product.stock);
    } else {
        println!("Stock:    out of stock");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    Ok(())
}

pub async fn featured(storefront: &Storefront) -> Result<(), StorefrontError> {
    let products = storefront.api().featured_products().await?;
    print_products(storefront, &products);
    Ok(())
}

pub async fn list_categories(storefront: &Storefront) -> Result<(), StorefrontError> {
    for category in storefront.api().categories().await? {
        match category.description {
            Some(description) => println!("{:<24} {:<16} {description}", category.id, category.name),
            None => println!("{:<24} {}", category.id, category.name),
        }
    }
    Ok(())
}

fn print_products(storefront: &Storefront, products: &[Product]) {
    let favorites = storefront.wishlist().items();
    for product in products {
        let heart = if is_favorite(&product.id, &favorites) { "*" } else { " " };
        let stock = if product.is_in_stock() { "" } else { "  (out of stock)" };
        println!(
            "{heart} {:<24} {:<32} {:>12}{stock}",
            product.id,
            product.name,
            product.price.display()
        );
    }
}
