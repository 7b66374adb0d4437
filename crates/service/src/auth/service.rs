use std::sync::Arc;

use common::ApiResponse;
use models::auth::{extract_token, LoginRequest};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::client::{ApiClient, Envelope, Operation};
use crate::endpoints;
use crate::errors::ClientError;
use crate::identity::VenueIdentityCache;
use crate::services::to_body;

/// Auth business service independent of any UI
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
    venue: Arc<VenueIdentityCache>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>, venue: Arc<VenueIdentityCache>) -> Self {
        Self { client, venue }
    }

    /// Exchange credentials for a bearer token and store it.
    ///
    /// `remember` picks the long retention window. The returned payload is
    /// the login body's `data` (or the body itself) for display.
    #[instrument(skip(self, password), fields(email = %email, remember))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<ApiResponse<Value>, ClientError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let op = Operation::post(endpoints::LOGIN, to_body(&request)?)
            .public()
            .with_envelope(Envelope::Raw)
            .with_message("Login successful");
        let resp = self.client.call(op).await?;

        let token = extract_token(&resp.data).ok_or(ClientError::MissingToken)?;
        self.client.session().set_token(&token, remember).await;
        self.venue.invalidate().await;
        info!("logged in");

        Ok(resp.map(|body| Envelope::Data.unwrap(body)))
    }

    /// Tell the server (best effort) and drop the local session either way.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApiResponse<()> {
        if self.client.session().is_authenticated().await {
            if let Err(e) = self.client.call(Operation::post(endpoints::LOGOUT, json!({}))).await {
                warn!(error = %e, "server logout failed; clearing local session anyway");
            }
        }
        self.client.session().remove_token().await;
        self.venue.invalidate().await;
        info!("logged out");
        ApiResponse::ok((), "Logged out successfully")
    }

    pub async fn is_authenticated(&self) -> bool { self.client.session().is_authenticated().await }
}
