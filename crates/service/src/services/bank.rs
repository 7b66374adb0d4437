use std::sync::Arc;

use common::ApiResponse;
use models::finance::{BankDetails, BankDetailsForm};

use super::to_body;
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Clone)]
pub struct BankService {
    client: Arc<ApiClient>,
}

impl BankService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    /// `None` until payout details have been saved once.
    pub async fn get(&self) -> Result<ApiResponse<Option<BankDetails>>, ClientError> {
        self.client.call_optional(Operation::get_optional(endpoints::BANK_DETAILS)).await
    }

    /// First-time save.
    pub async fn save(
        &self,
        form: &BankDetailsForm,
    ) -> Result<ApiResponse<BankDetails>, ClientError> {
        form.validate()?;
        let op = Operation::post(endpoints::BANK_DETAILS, to_body(form)?)
            .with_message("Bank details saved successfully");
        self.client.call_as(op).await
    }

    pub async fn update(
        &self,
        form: &BankDetailsForm,
    ) -> Result<ApiResponse<BankDetails>, ClientError> {
        form.validate()?;
        let op = Operation::put(endpoints::BANK_DETAILS, to_body(form)?)
            .with_message("Bank details updated successfully");
        self.client.call_as(op).await
    }
}
