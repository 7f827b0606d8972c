//! Subcommand implementations.
//!
//! Each command prints its result to stdout and returns the storefront error
//! unchanged; `main` turns errors into a message and exit status.

pub mod auth;
pub mod bookings;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wishlist;

use lulu_storefront::{Storefront, StorefrontError};

/// Check that the backend is reachable.
pub async fn health(storefront: &Storefront) -> Result<(), StorefrontError> {
    let health = storefront.api().health().await?;
    match health.message {
        Some(message) => println!("{}: {message}", health.status),
        None => println!("{}", health.status),
    }
    Ok(())
}
