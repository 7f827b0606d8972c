//! Storefront handle shared by every front end.
//!
//! Built once at startup from configuration and a key-value store. Everything
//! stateful hangs off it: the REST client, the cart, the wishlist and the
//! session token.

use std::sync::Arc;

use lulu_core::{ProductId, SocialProvider};
use tracing::instrument;
use url::Url;

use crate::api::ApiClient;
use crate::api::types::{
    AuthResponse, CreateOrderRequest, CustomerInfo, DeliveryZone, MessageResponse, Order,
    ProductsResponse, ShippingAddress,
};
use crate::cart::{CartLineItem, CartManager, ProductSnapshot, to_order_items};
use crate::catalog;
use crate::config::StorefrontConfig;
use crate::error::{
    Result, StorefrontError, add_breadcrumb, clear_sentry_user, set_sentry_user,
};
use crate::session::{
    CallbackOutcome, CallbackParams, LoginForm, RegistrationForm, TokenStore,
    complete_social_login,
};
use crate::storage::{FileStore, KeyValueStore, ListStore};
use crate::wishlist::WishlistManager;

/// Customer and delivery details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub customer_info: CustomerInfo,
    pub shipping_address: ShippingAddress,
    pub delivery_zone: DeliveryZone,
    pub payment_method: String,
    pub notes: Option<String>,
}

/// Storefront state.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Debug, Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

#[derive(Debug)]
struct StorefrontInner {
    config: StorefrontConfig,
    api: ApiClient,
    cart: CartManager,
    wishlist: WishlistManager,
}

impl Storefront {
    /// Create a storefront over `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let lists = ListStore::new(Arc::clone(&store));
        let api = ApiClient::new(&config.api, TokenStore::new(store))?;

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                api,
                cart: CartManager::new(lists.clone()),
                wishlist: WishlistManager::new(lists),
            }),
        })
    }

    /// Create a storefront persisting to `config.storage_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let store = Arc::new(FileStore::new(&config.storage_dir));
        Self::new(config, store)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the REST API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn cart(&self) -> &CartManager {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistManager {
        &self.inner.wishlist
    }

    /// The persisted session token.
    #[must_use]
    pub fn session(&self) -> &TokenStore {
        self.inner.api.tokens()
    }

    // =========================================================================
    // Shopping
    // =========================================================================

    /// Fetch a product and add one unit of it to the cart.
    ///
    /// # Errors
    ///
    /// Returns `OutOfStock` if the product has no stock, or an API or
    /// storage error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_to_cart(&self, id: &ProductId) -> Result<Vec<CartLineItem>> {
        let product = self.api().product(id).await?;
        if !product.is_in_stock() {
            return Err(StorefrontError::OutOfStock(product.id));
        }

        let items = self.cart().add_item(&ProductSnapshot::from(&product))?;
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
        Ok(items)
    }

    /// Submit the cart as an order, clearing it once the backend accepts.
    ///
    /// The cart is left untouched if the request fails. Once the backend has
    /// accepted the order a failure to clear the cart is logged, not
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart` if there is nothing to order, or an API error.
    #[instrument(skip_all)]
    pub async fn place_order(&self, details: CheckoutDetails) -> Result<Order> {
        let items = self.cart().items();
        if items.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let request = CreateOrderRequest {
            items: to_order_items(&items),
            customer_info: details.customer_info,
            shipping_address: details.shipping_address,
            delivery_zone: details.delivery_zone,
            payment_method: details.payment_method,
            notes: details.notes.filter(|n| !n.trim().is_empty()),
        };

        let order = self.api().create_order(&request).await?;

        // The order exists server-side from here on; never report failure.
        if let Err(e) = self.cart().clear() {
            tracing::warn!(
                error = %e,
                order_id = %order.id,
                "Order placed but the cart could not be cleared"
            );
            sentry::capture_error(&e);
        }

        tracing::info!(order_number = %order.order_number, "Order placed");
        add_breadcrumb(
            "checkout",
            "Order placed",
            Some(&[("order_id", order.id.as_str())]),
        );
        Ok(order)
    }

    /// Fetch the products for a shop page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn browse(&self, slug: Option<&str>, search: Option<&str>) -> Result<ProductsResponse> {
        Ok(catalog::browse(self.api(), slug, search).await?)
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Validate the form, then create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns a validation error without contacting the backend, or an API
    /// error.
    pub async fn register(&self, form: &RegistrationForm) -> Result<AuthResponse> {
        let request = form.validate()?;
        let response = self.api().register(&request).await?;
        set_sentry_user(&response.user.id, Some(&response.user.email));
        Ok(response)
    }

    /// Validate the form, then sign in.
    ///
    /// # Errors
    ///
    /// Returns a validation error without contacting the backend, or an API
    /// error.
    pub async fn login(&self, form: &LoginForm) -> Result<AuthResponse> {
        let request = form.validate()?;
        let response = self.api().login(&request).await?;
        set_sentry_user(&response.user.id, Some(&response.user.email));
        Ok(response)
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn logout(&self) -> Result<MessageResponse> {
        let response = self.api().logout().await?;
        clear_sentry_user();
        Ok(response)
    }

    /// URL that starts a social sign-in, redirecting back to the site origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn social_login_url(&self, provider: SocialProvider) -> Result<Url> {
        Ok(self
            .api()
            .social_login_url(provider, &self.config().site_origin)?)
    }

    /// Finish a social sign-in from the callback URL or query string.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be stored.
    pub async fn complete_social_login(&self, callback: &str) -> Result<CallbackOutcome> {
        let params = CallbackParams::parse(callback);
        let outcome = complete_social_login(self.api(), &params).await?;
        if let CallbackOutcome::Success {
            user: Some(user), ..
        } = &outcome
        {
            set_sentry_user(&user.id, Some(&user.email));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn storefront() -> Storefront {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        Storefront::new(config, Arc::new(MemoryStore::new())).unwrap()
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            customer_info: CustomerInfo {
                first_name: "Ada".into(),
                last_name: "Obi".into(),
                email: "ada@example.com".into(),
                phone: "0800".into(),
            },
            shipping_address: ShippingAddress {
                street: "1 Admiralty Way".into(),
                city: "Lagos".into(),
                state: "Lagos".into(),
                landmark: None,
            },
            delivery_zone: DeliveryZone {
                zone: "Lekki".into(),
                cost: lulu_core::Money::from_naira(2000),
            },
            payment_method: "transfer".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_before_request() {
        let storefront = storefront();
        let err = storefront.place_order(details()).await.unwrap_err();
        assert!(matches!(err, StorefrontError::EmptyCart));
    }

    #[tokio::test]
    async fn test_invalid_registration_is_rejected_before_request() {
        let storefront = storefront();
        let form = RegistrationForm {
            password: "a".into(),
            confirm_password: "b".into(),
            ..RegistrationForm::default()
        };
        let err = storefront.register(&form).await.unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match");
    }

    #[test]
    fn test_cart_and_wishlist_share_the_store() {
        let store = Arc::new(MemoryStore::new());
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        let storefront = Storefront::new(config, store.clone()).unwrap();

        storefront.wishlist().toggle(&ProductId::new("p1")).unwrap();
        storefront.session().set("t").unwrap();

        assert_eq!(store.len(), 2);
    }
}
