//! End-to-end shopper flows through the `Storefront` handle.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use lulu_core::{Money, OrderStatus, ProductId};
use lulu_integration_tests::{MockBackend, REGISTERED_TOKEN, SOCIAL_TOKEN};
use lulu_storefront::api::types::{CustomerInfo, DeliveryZone, ShippingAddress};
use lulu_storefront::cart::{CartSummary, PLACEHOLDER_IMAGE};
use lulu_storefront::session::{CallbackOutcome, RegistrationForm};
use lulu_storefront::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use lulu_storefront::{CheckoutDetails, StorefrontError};
use secrecy::ExposeSecret;
use tempfile::TempDir;

/// Memory store whose removals always fail.
#[derive(Debug, Default)]
struct StuckStore(MemoryStore);

impl KeyValueStore for StuckStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::InvalidKey(key.to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.0.clear()
    }
}

fn checkout_details(notes: Option<&str>) -> CheckoutDetails {
    CheckoutDetails {
        customer_info: CustomerInfo {
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            email: "ada@example.com".to_string(),
            phone: "08012345678".to_string(),
        },
        shipping_address: ShippingAddress {
            street: "1 Admiralty Way".to_string(),
            city: "Lagos".to_string(),
            state: "Lagos".to_string(),
            landmark: Some("Opposite the mall".to_string()),
        },
        delivery_zone: DeliveryZone {
            zone: "Lekki".to_string(),
            cost: Money::from_naira(2000),
        },
        payment_method: "bank_transfer".to_string(),
        notes: notes.map(str::to_string),
    }
}

fn registration(password: &str, confirm: &str) -> RegistrationForm {
    RegistrationForm {
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        email: "ada@example.com".to_string(),
        phone: "08012345678".to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

#[tokio::test]
async fn add_to_cart_snapshots_product_and_accumulates() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));
    let p1 = ProductId::new("p1");

    storefront.add_to_cart(&p1).await.unwrap();
    let items = storefront.add_to_cart(&p1).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Mink Lash Kit");
    assert_eq!(items[0].image, "https://cdn.example/p1.jpg");
    assert_eq!(items[0].quantity, 2);
    assert_eq!(
        CartSummary::of(&items).subtotal,
        Money::from_naira(30_000)
    );
}

#[tokio::test]
async fn out_of_stock_product_is_not_added() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    let err = storefront
        .add_to_cart(&ProductId::new("p2"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorefrontError::OutOfStock(ref id) if id.as_str() == "p2"));
    assert!(storefront.cart().items().is_empty());
}

#[tokio::test]
async fn unknown_product_leaves_cart_unchanged() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    let err = storefront
        .add_to_cart(&ProductId::new("missing"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Product not found");
    assert!(storefront.cart().items().is_empty());
}

#[tokio::test]
async fn checkout_submits_cart_and_clears_it() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));
    let p1 = ProductId::new("p1");

    storefront.add_to_cart(&p1).await.unwrap();
    storefront.add_to_cart(&p1).await.unwrap();

    let order = storefront.place_order(checkout_details(None)).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, Money::from_naira(32_000));
    assert!(storefront.cart().items().is_empty());

    let body = backend.requests_to("/orders")[0].body.clone().unwrap();
    assert_eq!(body["items"][0]["product"], "p1");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["customerInfo"]["firstName"], "Ada");
    assert_eq!(body["shippingAddress"]["landmark"], "Opposite the mall");
    assert!(body.get("notes").is_none());
}

#[tokio::test]
async fn failed_checkout_keeps_the_cart() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    storefront.add_to_cart(&ProductId::new("p1")).await.unwrap();
    let err = storefront
        .place_order(checkout_details(Some("fail")))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Payment gateway unavailable");
    assert_eq!(storefront.cart().items().len(), 1);
}

#[tokio::test]
async fn accepted_order_is_returned_when_cart_cannot_be_cleared() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(StuckStore::default()));

    storefront.add_to_cart(&ProductId::new("p1")).await.unwrap();
    let order = storefront.place_order(checkout_details(None)).await.unwrap();

    assert_eq!(order.order_number, "LA-0001");
    assert_eq!(backend.requests_to("/orders").len(), 1);
    assert_eq!(storefront.cart().items().len(), 1);
}

#[tokio::test]
async fn invalid_registration_sends_no_request() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    let err = storefront
        .register(&registration("hunter22", "hunter23"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Passwords do not match");
    assert!(backend.requests().is_empty());
    assert!(!storefront.session().is_authenticated());
}

#[tokio::test]
async fn registration_starts_a_session() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    let response = storefront
        .register(&registration("hunter22", "hunter22"))
        .await
        .unwrap();

    assert_eq!(response.user.first_name, "Ada");
    assert_eq!(
        storefront.session().get().unwrap().unwrap().expose_secret(),
        REGISTERED_TOKEN
    );
}

#[tokio::test]
async fn social_callback_with_token_signs_in() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    let outcome = storefront
        .complete_social_login(&format!(
            "http://localhost:3000/auth/callback?provider=google&token={SOCIAL_TOKEN}"
        ))
        .await
        .unwrap();

    let CallbackOutcome::Success { provider, user } = &outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(provider.as_deref(), Some("google"));
    assert_eq!(user.as_ref().unwrap().email, "ada@example.com");
    assert_eq!(outcome.message(), "Successfully logged in with google!");
    assert!(storefront.session().is_authenticated());
}

#[tokio::test]
async fn social_callback_with_rejected_token_still_succeeds() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    let outcome = storefront
        .complete_social_login("?token=expired&provider=facebook")
        .await
        .unwrap();

    assert!(matches!(outcome, CallbackOutcome::Success { user: None, .. }));
    assert_eq!(backend.requests_to("/auth/me").len(), 1);
}

#[tokio::test]
async fn social_callback_error_or_missing_token_fails() {
    let backend = MockBackend::spawn().await;
    let storefront = backend.storefront(Arc::new(MemoryStore::new()));

    let outcome = storefront
        .complete_social_login("?error=access_denied&token=ignored")
        .await
        .unwrap();
    assert_eq!(outcome.message(), "Social login failed: access_denied");

    let outcome = storefront
        .complete_social_login("?provider=google")
        .await
        .unwrap();
    assert_eq!(
        outcome.message(),
        "No token received from authentication provider"
    );

    assert!(!storefront.session().is_authenticated());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn cart_and_wishlist_survive_restart() {
    let backend = MockBackend::spawn().await;
    let dir = TempDir::new().unwrap();

    {
        let storefront = backend.storefront(Arc::new(FileStore::new(dir.path())));
        storefront.add_to_cart(&ProductId::new("p1")).await.unwrap();
        storefront.wishlist().toggle(&ProductId::new("p2")).unwrap();
    }

    let reopened = backend.storefront(Arc::new(FileStore::new(dir.path())));
    let items = reopened.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ProductId::new("p1"));
    assert_ne!(items[0].image, PLACEHOLDER_IMAGE);
    assert_eq!(reopened.wishlist().items(), vec![ProductId::new("p2")]);
}
