use std::sync::Arc;

use common::ApiResponse;
use models::order::{Order, OrderItem, OrderStatus, StatusUpdate};
use tracing::instrument;

use super::to_body;
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Clone)]
pub struct OrderService {
    client: Arc<ApiClient>,
}

impl OrderService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Order>>, ClientError> {
        self.client.list_all(endpoints::ORDERS).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Order>, ClientError> {
        self.client.call_as(Operation::get(endpoints::order(id))).await
    }

    /// Move an order to `status`. `Unknown` is never sent.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<ApiResponse<Order>, ClientError> {
        if status == OrderStatus::Unknown {
            return Err(ClientError::Validation("unknown order status".into()));
        }
        let op = Operation::patch(endpoints::order_status(id), to_body(&StatusUpdate { status })?)
            .with_message("Order status updated successfully");
        self.client.call_as(op).await
    }

    pub async fn list_items(&self, id: i64) -> Result<ApiResponse<Vec<OrderItem>>, ClientError> {
        self.client.list_all(&endpoints::order_items(id)).await
    }
}
