//! Lulu Core - Shared types library.
//!
//! This crate provides common types used across the Lulu Artistry storefront client:
//! - `storefront` - Cart, wishlist, REST client and auth session library
//! - `cli` - Command-line front-end driving the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
