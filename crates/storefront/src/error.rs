//! Unified error handling with Sentry integration.
//!
//! Provides a unified `StorefrontError` type over the per-module errors, and a
//! user-facing message for each that hides transport and storage details.

use lulu_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::ValidationError;
use crate::storage::StorageError;

/// Shown when the backend cannot be reached.
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the store, please try again";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Backend request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local storage write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Form input rejected before sending.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The product has no stock left.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The OAuth callback reported a failure or carried no token.
    #[error("{0}")]
    SocialLogin(String),
}

impl StorefrontError {
    /// Text suitable for a notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => match err {
                ApiError::Api { message, .. } => message.clone(),
                ApiError::Http(_) => UNREACHABLE_MESSAGE.to_string(),
                ApiError::RateLimited(secs) => {
                    format!("Too many requests, please try again in {secs} seconds")
                }
                ApiError::Storage(_) => "Could not save your session".to_string(),
                ApiError::Parse(_) | ApiError::InvalidUrl(_) => {
                    "Something went wrong, please try again".to_string()
                }
            },
            Self::Storage(_) => "Could not save your changes".to_string(),
            Self::Validation(err) => err.to_string(),
            Self::Config(err) => err.to_string(),
            Self::OutOfStock(_) => "This product is out of stock".to_string(),
            Self::EmptyCart => "Your cart is empty".to_string(),
            Self::SocialLogin(message) => message.clone(),
        }
    }

    /// Whether this is worth reporting to Sentry.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Config(_)
                | Self::Api(ApiError::Parse(_) | ApiError::InvalidUrl(_) | ApiError::Storage(_))
        )
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a shopper action.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_passes_through() {
        let err = StorefrontError::from(ApiError::Api {
            status: 400,
            message: "Insufficient stock for Lash Kit".to_string(),
            errors: None,
        });
        assert_eq!(err.user_message(), "Insufficient stock for Lash Kit");
        assert!(!err.is_unexpected());
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = StorefrontError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Passwords do not match");
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err = StorefrontError::from(StorageError::InvalidKey("../etc".to_string()));
        assert_eq!(err.user_message(), "Could not save your changes");
        assert!(err.is_unexpected());
    }

    #[test]
    fn test_out_of_stock_display() {
        let err = StorefrontError::OutOfStock(ProductId::new("p1"));
        assert_eq!(err.to_string(), "Product p1 is out of stock");
        assert_eq!(err.user_message(), "This product is out of stock");
    }

    #[test]
    fn test_rate_limited_message() {
        let err = StorefrontError::from(ApiError::RateLimited(7));
        assert_eq!(
            err.user_message(),
            "Too many requests, please try again in 7 seconds"
        );
    }
}
