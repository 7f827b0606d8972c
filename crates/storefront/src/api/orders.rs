//! Order endpoints.

use lulu_core::OrderId;
use tracing::instrument;

use super::types::{
    AdminOrderQuery, CancelRequest, CreateOrderRequest, Order, OrdersPage,
    UpdateOrderStatusRequest,
};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all, fields(items = request.items.len()))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.post(&["orders"], request).await
    }

    /// The signed-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get(&["orders"], &[]).await
    }

    /// A single order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&["orders", id.as_str()], &[]).await
    }

    /// Cancel an order with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, e.g. the order already shipped.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel_order(&self, id: &OrderId, reason: &str) -> Result<Order, ApiError> {
        let request = CancelRequest {
            reason: reason.to_string(),
        };
        self.put(&["orders", id.as_str(), "cancel"], &request).await
    }

    /// Every order, paginated (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn all_orders(&self, query: &AdminOrderQuery) -> Result<OrdersPage, ApiError> {
        self.get(&["orders", "admin", "all"], &query.to_pairs()).await
    }

    /// Move an order to a new status (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<Order, ApiError> {
        self.put(&["orders", id.as_str(), "status"], request).await
    }
}
