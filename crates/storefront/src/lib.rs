//! Lulu Artistry storefront client library.
//!
//! Client-side state for the shop: a durable key-value store standing in for
//! browser local storage, the cart and wishlist kept in it, the signed-in
//! session, and a typed client for the backend REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use lulu_storefront::{Storefront, StorefrontConfig};
//!
//! let storefront = Storefront::open(StorefrontConfig::from_env()?)?;
//! storefront.add_to_cart(&"p1".into()).await?;
//! println!("{}", CartSummary::of(&storefront.cart().items()).subtotal);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod storage;
pub mod wishlist;

pub use config::StorefrontConfig;
pub use error::{StorefrontError, UNREACHABLE_MESSAGE};
pub use state::{CheckoutDetails, Storefront};
