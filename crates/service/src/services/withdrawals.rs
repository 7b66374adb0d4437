use std::sync::Arc;

use common::ApiResponse;
use models::finance::{WithdrawalForm, WithdrawalRequest};
use tracing::info;

use super::to_body;
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Clone)]
pub struct WithdrawalService {
    client: Arc<ApiClient>,
}

impl WithdrawalService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn list(&self) -> Result<ApiResponse<Vec<WithdrawalRequest>>, ClientError> {
        self.client.list_all(endpoints::WITHDRAWAL_REQUESTS).await
    }

    pub async fn create(
        &self,
        form: &WithdrawalForm,
    ) -> Result<ApiResponse<WithdrawalRequest>, ClientError> {
        form.validate()?;
        let op = Operation::post(endpoints::WITHDRAWAL_REQUESTS, to_body(form)?)
            .with_message("Withdrawal request submitted successfully");
        let resp = self.client.call_as::<WithdrawalRequest>(op).await?;
        info!(id = resp.data.id, amount = resp.data.amount, "withdrawal requested");
        Ok(resp)
    }
}
