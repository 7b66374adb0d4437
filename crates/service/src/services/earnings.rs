use std::sync::Arc;

use common::ApiResponse;
use models::de::parse_date;
use models::finance::{EarningsEntry, EarningsSummary};

use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Clone)]
pub struct EarningsService {
    client: Arc<ApiClient>,
}

impl EarningsService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn summary(&self) -> Result<ApiResponse<EarningsSummary>, ClientError> {
        self.client.call_as(Operation::get(endpoints::EARNINGS_SUMMARY)).await
    }

    /// Daily earnings between two `YYYY-MM-DD` dates, both inclusive.
    pub async fn report(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<ApiResponse<Vec<EarningsEntry>>, ClientError> {
        let start = parse_date("start_date", start_date)?;
        let end = parse_date("end_date", end_date)?;
        if end < start {
            return Err(ClientError::Validation("end_date must not be before start_date".into()));
        }
        let path = endpoints::earnings_report(&start.to_string(), &end.to_string());
        self.client.call_as(Operation::get(path)).await
    }
}
