use std::sync::Arc;

use common::ApiResponse;
use models::review::{Review, ReviewReply};

use super::to_body;
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Clone)]
pub struct ReviewService {
    client: Arc<ApiClient>,
}

impl ReviewService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Review>>, ClientError> {
        self.client.list_all(endpoints::REVIEWS).await
    }

    pub async fn reply(
        &self,
        id: i64,
        reply: &ReviewReply,
    ) -> Result<ApiResponse<Review>, ClientError> {
        reply.validate()?;
        let op = Operation::post(endpoints::review_reply(id), to_body(reply)?)
            .with_message("Reply posted successfully");
        self.client.call_as(op).await
    }
}
