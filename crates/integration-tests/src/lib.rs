//! Integration tests for the Lulu Artistry storefront client.
//!
//! The tests run the client against [`MockBackend`], an in-process `axum`
//! server that speaks the backend's REST API and records every request.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lulu-integration-tests
//! ```
//!
//! # Fixtures
//!
//! | Fixture | Value |
//! |---|---|
//! | Login | `ada@example.com` / `hunter22` returns token [`VALID_TOKEN`] |
//! | Registration | any email except `taken@example.com` returns [`REGISTERED_TOKEN`] |
//! | Products | `p1` (stock 3), `p2` (stock 0, no images) |
//! | Categories | `c1` Lashes, `c2` Tattoos |
//! | Orders | notes of `fail` make `POST /orders` return 500 |
//! | Bookings | `GET /bookings` is rate limited with `Retry-After: 12` |

use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

use lulu_storefront::storage::KeyValueStore;
use lulu_storefront::{Storefront, StorefrontConfig};

/// Token issued by a successful login.
pub const VALID_TOKEN: &str = "test-token";

/// Token issued by a successful registration.
pub const REGISTERED_TOKEN: &str = "registered-token";

/// Token a social sign-in callback carries.
pub const SOCIAL_TOKEN: &str = "social-token";

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process REST backend on an ephemeral port.
pub struct MockBackend {
    base_url: String,
    state: MockState,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    /// Bind to `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let state = MockState::default();

        let api = Router::new()
            .route("/health", get(health))
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/me", get(me))
            .route("/auth/logout", get(logout))
            .route("/categories", get(categories))
            .route("/products", get(products))
            .route("/products/{id}", get(product))
            .route("/orders", post(create_order))
            .route("/orders/{id}", get(order_not_found))
            .route("/bookings", get(rate_limited))
            .route("/bookings/availability", get(availability));

        let app = Router::new()
            .nest("/api", api)
            .layer(from_fn_with_state(state.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|e| panic!("failed to bind ephemeral port: {e}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|e| panic!("listener has no address: {e}"));
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    /// The API base URL, `http://127.0.0.1:<port>/api`.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a URL.
    #[must_use]
    pub fn api_url(&self) -> Url {
        Url::parse(&format!("{}/api", self.base_url))
            .unwrap_or_else(|e| panic!("invalid mock URL: {e}"))
    }

    /// Configuration pointing at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration is invalid.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        let mut config = StorefrontConfig::from_lookup(|_| None)
            .unwrap_or_else(|e| panic!("default config: {e}"));
        config.api.base_url = self.api_url();
        config
    }

    /// A storefront talking to this backend, persisting to `store`.
    ///
    /// # Panics
    ///
    /// Panics if the storefront cannot be built.
    #[must_use]
    pub fn storefront(&self, store: Arc<dyn KeyValueStore>) -> Storefront {
        Storefront::new(self.config(), store).unwrap_or_else(|e| panic!("storefront: {e}"))
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for `path` (relative to `/api`).
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        let full = format!("/api{path}");
        self.requests()
            .into_iter()
            .filter(|r| r.path == full)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            authorization: header(&parts.headers, AUTHORIZATION.as_str()),
            body: serde_json::from_slice(&bytes).ok(),
        });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn user() -> Value {
    json!({
        "_id": "u1",
        "firstName": "Ada",
        "lastName": "Obi",
        "email": "ada@example.com",
        "phone": "08012345678",
        "role": "customer"
    })
}

fn product_fixture(id: &str) -> Option<Value> {
    match id {
        "p1" => Some(json!({
            "_id": "p1",
            "name": "Mink Lash Kit",
            "description": "Everything for a full set",
            "price": 15000,
            "category": { "id": "c1", "name": "Lashes" },
            "images": [{ "url": "https://cdn.example/p1.jpg" }],
            "stock": 3,
            "isFeatured": true
        })),
        "p2" => Some(json!({
            "_id": "p2",
            "name": "Brow Pencil",
            "price": 4500.5,
            "category": "c2",
            "images": [],
            "stock": 0
        })),
        _ => None,
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "ada@example.com" && body["password"] == "hunter22" {
        Json(json!({ "token": VALID_TOKEN, "user": user() })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "User already exists",
                "errors": { "email": ["Email is already registered"] }
            })),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "token": REGISTERED_TOKEN, "user": user() })),
    )
        .into_response()
}

async fn me(headers: HeaderMap) -> Response {
    let authorized = header(&headers, AUTHORIZATION.as_str()).is_some_and(|value| {
        [VALID_TOKEN, REGISTERED_TOKEN, SOCIAL_TOKEN]
            .iter()
            .any(|token| value == format!("Bearer {token}"))
    });
    if authorized {
        Json(user()).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Not authorized, token failed")
    }
}

async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out successfully" }))
}

async fn categories() -> Json<Value> {
    Json(json!([
        { "_id": "c1", "name": "Lashes", "description": "Lash extensions and kits" },
        { "_id": "c2", "name": "Tattoos" }
    ]))
}

async fn products() -> Json<Value> {
    let products: Vec<Value> = ["p1", "p2"].into_iter().filter_map(product_fixture).collect();
    Json(json!({
        "products": products,
        "total": 2,
        "page": 1,
        "limit": 100,
        "totalPages": 1
    }))
}

async fn product(Path(id): Path<String>) -> Response {
    product_fixture(&id).map_or_else(
        || error(StatusCode::NOT_FOUND, "Product not found"),
        |product| Json(product).into_response(),
    )
}

async fn create_order(Json(body): Json<Value>) -> Response {
    if body["notes"] == "fail" {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Payment gateway unavailable");
    }

    let subtotal: f64 = body["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| item["price"].as_f64().unwrap_or(0.0) * item["quantity"].as_f64().unwrap_or(0.0))
                .sum()
        })
        .unwrap_or(0.0);
    let total = subtotal + body["deliveryZone"]["cost"].as_f64().unwrap_or(0.0);

    (
        StatusCode::CREATED,
        Json(json!({
            "_id": "o1",
            "orderNumber": "LA-0001",
            "items": body["items"],
            "customerInfo": body["customerInfo"],
            "shippingAddress": body["shippingAddress"],
            "deliveryZone": body["deliveryZone"],
            "paymentMethod": body["paymentMethod"],
            "status": "pending",
            "total": total,
            "createdAt": "2025-03-14T10:00:00.000Z",
            "updatedAt": "2025-03-14T10:00:00.000Z"
        })),
    )
        .into_response()
}

async fn order_not_found() -> Response {
    (StatusCode::NOT_FOUND, "<html>Not Found</html>").into_response()
}

async fn rate_limited() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [("Retry-After", "12")],
        Json(json!({ "message": "Too many requests" })),
    )
        .into_response()
}

async fn availability() -> Json<Value> {
    Json(json!({
        "available": true,
        "availableSlots": [
            { "start": "10:00", "end": "11:00" },
            { "start": "14:00", "end": "15:30" }
        ]
    }))
}
