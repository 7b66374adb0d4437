use std::sync::Arc;

use common::ApiResponse;
use models::order::StatusUpdate;
use models::reservation::{Reservation, ReservationForm, ReservationStatus};
use serde_json::Value;

use super::to_body;
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Clone)]
pub struct ReservationService {
    client: Arc<ApiClient>,
}

impl ReservationService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Reservation>>, ClientError> {
        self.client.list_all(endpoints::RESERVATIONS).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Reservation>, ClientError> {
        self.client.call_as(Operation::get(endpoints::reservation(id))).await
    }

    pub async fn create(
        &self,
        form: &ReservationForm,
    ) -> Result<ApiResponse<Reservation>, ClientError> {
        form.validate()?;
        let op = Operation::post(endpoints::RESERVATIONS, to_body(form)?)
            .with_message("Reservation created successfully");
        self.client.call_as(op).await
    }

    pub async fn update(
        &self,
        id: i64,
        form: &ReservationForm,
    ) -> Result<ApiResponse<Reservation>, ClientError> {
        form.validate()?;
        let op = Operation::put(endpoints::reservation(id), to_body(form)?)
            .with_message("Reservation updated successfully");
        self.client.call_as(op).await
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<ApiResponse<Reservation>, ClientError> {
        if status == ReservationStatus::Unknown {
            return Err(ClientError::Validation("unknown reservation status".into()));
        }
        let body = to_body(&StatusUpdate { status })?;
        let op = Operation::patch(endpoints::reservation_status(id), body)
            .with_message("Reservation status updated successfully");
        self.client.call_as(op).await
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        self.client.call(Operation::delete(endpoints::reservation(id))).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::{Method, RequestBody};
    use crate::test_support::Harness;

    fn form() -> ReservationForm {
        serde_json::from_value(json!({
            "guestName": "Ada", "partySize": 4,
            "reservationDate": "2024-05-01", "reservationTime": "19:30"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_sends_wire_field_names() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(
            201,
            json!({"data": {"id": 1, "guest_name": "Ada", "party_size": 4, "status": "pending"}}),
        );
        let resp = ReservationService::new(h.client.clone()).create(&form()).await.unwrap();
        assert_eq!(resp.data.guest_name, "Ada");
        assert_eq!(resp.message, "Reservation created successfully");

        let RequestBody::Json(body) = h.transport.last_request().unwrap().body else {
            panic!("json body expected")
        };
        assert_eq!(body["guest_name"], "Ada");
        assert_eq!(body["party_size"], 4);
        assert!(body.get("guestName").is_none());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_network() {
        let h = Harness::logged_in("t").await;
        let mut f = form();
        f.party_size = 0;
        assert!(ReservationService::new(h.client.clone()).create(&f).await.is_err());
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn status_and_update_use_their_endpoints() {
        let h = Harness::logged_in("t").await;
        let svc = ReservationService::new(h.client.clone());
        h.transport.push_json(
            200,
            json!({"data": {"id": 2, "guest_name": "Ada", "party_size": 4, "status": "no_show"}}),
        );
        let resp = svc.update_status(2, ReservationStatus::NoShow).await.unwrap();
        assert_eq!(resp.data.status, ReservationStatus::NoShow);
        assert!(h.transport.last_request().unwrap().url.ends_with("/reservations/2/status/"));

        h.transport.push_json(
            200,
            json!({"data": {"id": 2, "guest_name": "Ada", "party_size": 4, "status": "pending"}}),
        );
        svc.update(2, &form()).await.unwrap();
        assert_eq!(h.transport.last_request().unwrap().method, Method::Put);
    }

    #[tokio::test]
    async fn delete_of_missing_reservation_succeeds() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(404, json!({"detail": "Not found."}));
        let resp = ReservationService::new(h.client.clone()).delete(8).await.unwrap();
        assert!(resp.success);
    }
}
