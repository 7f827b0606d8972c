//! Request and response types for the storefront REST API.
//!
//! Field names are camelCase on the wire. Document ids are read from `id`,
//! falling back to `_id`, because some backend routes return raw documents
//! and others return both keys.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use lulu_core::{
    BookingId, BookingStatus, CategoryId, Money, OrderId, OrderStatus, ProductId, UserId, UserRole,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared
// =============================================================================

/// (De)serializes a document id flattened into its parent object.
///
/// Reads `id`, falling back to `_id`; whichever is not used is ignored.
/// Always writes `id`.
mod document_id {
    use serde::de::{Deserialize, DeserializeOwned, Deserializer, Error};
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    #[derive(serde::Deserialize)]
    struct Keys<T> {
        id: Option<T>,
        #[serde(rename = "_id")]
        object_id: Option<T>,
    }

    pub fn serialize<T, S>(id: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DocumentId", 1)?;
        state.serialize_field("id", id)?;
        state.end()
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let keys = Keys::<T>::deserialize(deserializer)?;
        keys.id
            .or(keys.object_id)
            .ok_or_else(|| D::Error::missing_field("id"))
    }
}

/// Body of simple acknowledgement responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Field-level validation messages.
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Cancellation reason for orders and bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

// =============================================================================
// Auth Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token and profile returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// A customer or admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten, with = "document_id")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    /// First and last name joined with a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Partial profile update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

// =============================================================================
// Catalog Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten, with = "document_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub name: String,
    pub value: String,
    pub stock: i64,
    pub sku: String,
}

/// A product's category: either a bare id or the populated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductCategory {
    Id(CategoryId),
    Populated(Category),
}

impl ProductCategory {
    /// The category id, whichever form was sent.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        match self {
            Self::Id(id) => id,
            Self::Populated(category) => &category.id,
        }
    }

    /// Display label: the category name if populated, otherwise the id.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Id(id) => id.as_str(),
            Self::Populated(category) => &category.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten, with = "document_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub compare_price: Option<Money>,
    pub category: ProductCategory,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<Money>,
    pub category: CategoryId,
    pub images: Vec<ProductImage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
    pub stock: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub is_featured: bool,
}

/// Partial product update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// Filters for `GET /products`. Unset, zero and empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Sort expression, e.g. `-createdAt` or `price`.
    pub sort: Option<String>,
    pub category: Option<CategoryId>,
    pub search: Option<String>,
}

impl ProductQuery {
    /// Query-string pairs in the order the backend documents them.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        push_non_empty(&mut pairs, "sort", self.sort.as_deref());
        push_non_empty(&mut pairs, "category", self.category.as_ref().map(CategoryId::as_str));
        push_non_empty(&mut pairs, "search", self.search.as_deref());
        pairs
    }
}

fn push_non_empty(pairs: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((name, value.to_string()));
    }
}

// =============================================================================
// Order Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemVariant {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductId,
    pub quantity: u32,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<OrderItemVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub zone: String,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    pub customer_info: CustomerInfo,
    pub shipping_address: ShippingAddress,
    pub delivery_zone: DeliveryZone,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(flatten, with = "document_id")]
    pub id: OrderId,
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub customer_info: CustomerInfo,
    pub shipping_address: ShippingAddress,
    pub delivery_zone: DeliveryZone,
    pub payment_method: String,
    pub status: OrderStatus,
    pub total: Money,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Filters for the admin order listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminOrderQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<OrderStatus>,
}

impl AdminOrderQuery {
    /// Query-string pairs; unset and zero values are not sent.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}

/// A page of orders from the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

// =============================================================================
// Booking Types
// =============================================================================

/// Appointment window, e.g. `10:00`-`11:30`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(rename = "type")]
    pub artist_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service: String,
    pub artist: Artist,
    pub location: String,
    pub appointment_date: NaiveDate,
    pub time_slot: TimeSlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(flatten, with = "document_id")]
    pub id: BookingId,
    pub service: String,
    pub artist: Artist,
    pub location: String,
    /// Date as sent by the backend (a plain date or a full timestamp).
    pub appointment_date: String,
    pub time_slot: TimeSlot,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for `GET /bookings/availability`. All three are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub location: String,
    pub artist_type: String,
}

impl AvailabilityQuery {
    /// Query-string pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("location", self.location.clone()),
            ("artistType", self.artist_type.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(default)]
    pub available_slots: Vec<TimeSlot>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_with_embedded_category() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Lash Kit",
            "description": "Everything for a full set",
            "price": 5000,
            "category": { "id": "c1", "name": "Lashes" },
            "images": [{ "url": "/a.jpg" }],
            "stock": 3,
            "isFeatured": true,
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.category.label(), "Lashes");
        assert_eq!(product.category.id(), &CategoryId::new("c1"));
        assert!(product.is_in_stock());
        assert!(product.is_featured);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_product_with_category_id_and_defaults() {
        let product: Product = serde_json::from_value(json!({
            "id": "p2",
            "name": "Brow Gel",
            "price": 3500.5,
            "category": "c2"
        }))
        .unwrap();

        assert_eq!(product.category, ProductCategory::Id(CategoryId::new("c2")));
        assert!(product.images.is_empty());
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_document_with_both_id_keys() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "id": "p1",
            "name": "Lash Kit",
            "price": 1,
            "category": "c1"
        }))
        .unwrap();
        assert_eq!(product.id, ProductId::new("p1"));

        let category: Category =
            serde_json::from_value(json!({ "id": "c1", "_id": "legacy", "name": "Lashes" }))
                .unwrap();
        assert_eq!(category.id, CategoryId::new("c1"));
    }

    #[test]
    fn test_document_without_id_is_rejected() {
        let err = serde_json::from_value::<Category>(json!({ "name": "Lashes" })).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn test_document_id_serializes_as_id() {
        let category: Category =
            serde_json::from_value(json!({ "_id": "c1", "name": "Lashes" })).unwrap();
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["id"], "c1");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_register_request_is_camel_case() {
        let body = serde_json::to_value(RegisterRequest {
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@example.com".into(),
            phone: "08012345678".into(),
            password: "hunter22".into(),
        })
        .unwrap();
        assert_eq!(body["firstName"], "Ada");
        assert_eq!(body["lastName"], "Obi");
    }

    #[test]
    fn test_update_profile_omits_unset_fields() {
        let body = serde_json::to_value(UpdateProfileRequest {
            phone: Some("0800".into()),
            ..UpdateProfileRequest::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "phone": "0800" }));
    }

    #[test]
    fn test_product_query_pairs_skip_unset_and_empty() {
        let query = ProductQuery {
            page: Some(1),
            limit: Some(0),
            sort: Some("-createdAt".into()),
            category: None,
            search: Some(String::new()),
        };
        assert_eq!(
            query.to_pairs(),
            vec![("page", "1".to_string()), ("sort", "-createdAt".to_string())]
        );
        assert!(ProductQuery::default().to_pairs().is_empty());
    }

    #[test]
    fn test_availability_pairs() {
        let query = AvailabilityQuery {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            location: "Lekki".into(),
            artist_type: "lash".into(),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("date", "2025-03-14".to_string()),
                ("location", "Lekki".to_string()),
                ("artistType", "lash".to_string()),
            ]
        );
    }

    #[test]
    fn test_artist_type_field_name() {
        let artist: Artist = serde_json::from_value(json!({ "type": "brow", "name": "Lulu" })).unwrap();
        assert_eq!(artist.artist_type, "brow");
    }

    #[test]
    fn test_error_body_tolerates_missing_fields() {
        let body: ApiErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(body, ApiErrorBody::default());
    }
}
