use std::sync::Arc;

use common::ApiResponse;
use serde_json::Value;

use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;
use crate::identity::VenueIdentityCache;

#[derive(Clone)]
pub struct QrService {
    client: Arc<ApiClient>,
    venue: Arc<VenueIdentityCache>,
}

impl QrService {
    pub fn new(client: Arc<ApiClient>, venue: Arc<VenueIdentityCache>) -> Self {
        Self { client, venue }
    }

    /// QR code payload for the caller's venue, as the server shapes it.
    pub async fn get(&self) -> Result<ApiResponse<Value>, ClientError> {
        let venue_id = self.venue.get_my_venue_id(&self.client).await?;
        self.client.call(Operation::get(endpoints::venue_qr_code(venue_id))).await
    }
}
