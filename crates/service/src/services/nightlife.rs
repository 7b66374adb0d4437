use std::sync::Arc;

use common::ApiResponse;
use models::nightlife::{
    EntryType, EntryTypeForm, EventForm, NightlifeEvent, TimeSlot, TimeSlotForm,
};
use serde_json::Value;

use super::to_body;
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Clone)]
pub struct NightlifeService {
    client: Arc<ApiClient>,
}

impl NightlifeService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn list_events(&self) -> Result<ApiResponse<Vec<NightlifeEvent>>, ClientError> {
        self.client.list_all(endpoints::NIGHTLIFE_EVENTS).await
    }

    pub async fn get_event(&self, id: i64) -> Result<ApiResponse<NightlifeEvent>, ClientError> {
        self.client.call_as(Operation::get(endpoints::nightlife_event(id))).await
    }

    pub async fn create_event(
        &self,
        form: &EventForm,
    ) -> Result<ApiResponse<NightlifeEvent>, ClientError> {
        form.validate()?;
        let op = Operation::post(endpoints::NIGHTLIFE_EVENTS, to_body(form)?)
            .with_message("Event created successfully");
        self.client.call_as(op).await
    }

    pub async fn update_event(
        &self,
        id: i64,
        form: &EventForm,
    ) -> Result<ApiResponse<NightlifeEvent>, ClientError> {
        form.validate()?;
        let op = Operation::put(endpoints::nightlife_event(id), to_body(form)?)
            .with_message("Event updated successfully");
        self.client.call_as(op).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        self.client.call(Operation::delete(endpoints::nightlife_event(id))).await
    }

    pub async fn entry_types(
        &self,
        event_id: i64,
    ) -> Result<ApiResponse<Vec<EntryType>>, ClientError> {
        self.client.list_all(&endpoints::entry_types(event_id)).await
    }

    pub async fn create_entry_type(
        &self,
        event_id: i64,
        form: &EntryTypeForm,
    ) -> Result<ApiResponse<EntryType>, ClientError> {
        form.validate()?;
        let op = Operation::post(endpoints::entry_types(event_id), to_body(form)?)
            .with_message("Entry type created successfully");
        self.client.call_as(op).await
    }

    pub async fn time_slots(
        &self,
        event_id: i64,
    ) -> Result<ApiResponse<Vec<TimeSlot>>, ClientError> {
        self.client.list_all(&endpoints::time_slots(event_id)).await
    }

    pub async fn create_time_slot(
        &self,
        event_id: i64,
        form: &TimeSlotForm,
    ) -> Result<ApiResponse<TimeSlot>, ClientError> {
        form.validate()?;
        let op = Operation::post(endpoints::time_slots(event_id), to_body(form)?)
            .with_message("Time slot created successfully");
        self.client.call_as(op).await
    }
}
