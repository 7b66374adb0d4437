use std::sync::Arc;

use common::ApiResponse;
use models::venue::{OperatingHours, ProfileForm, VenueProfile};
use models::FileUpload;

use super::{ensure_image, to_body};
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;
use crate::http::{Method, MultipartForm};

/// Venue profile, its picture and weekly operating hours.
#[derive(Clone)]
pub struct ProfileService {
    client: Arc<ApiClient>,
}

impl ProfileService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    /// A venue without a profile yet answers 404; that is `data: None`.
    pub async fn get(&self) -> Result<ApiResponse<Option<VenueProfile>>, ClientError> {
        self.client.call_optional(Operation::get_optional(endpoints::PROFILE)).await
    }

    pub async fn update(
        &self,
        form: &ProfileForm,
    ) -> Result<ApiResponse<VenueProfile>, ClientError> {
        form.validate()?;
        let op = Operation::put(endpoints::PROFILE, to_body(form)?)
            .with_message("Profile updated successfully");
        self.client.call_as(op).await
    }

    pub async fn upload_picture(
        &self,
        file: FileUpload,
    ) -> Result<ApiResponse<VenueProfile>, ClientError> {
        ensure_image(&file)?;
        let form = MultipartForm::new().file("profile_picture", file);
        let op = Operation::multipart(Method::Post, endpoints::PROFILE_PICTURE, form)
            .with_message("Profile picture updated successfully");
        self.client.call_as(op).await
    }

    pub async fn operating_hours(&self) -> Result<ApiResponse<Vec<OperatingHours>>, ClientError> {
        self.client.list_all(endpoints::OPERATING_HOURS).await
    }

    /// Replace the whole week.
    pub async fn update_operating_hours(
        &self,
        hours: &[OperatingHours],
    ) -> Result<ApiResponse<Vec<OperatingHours>>, ClientError> {
        for day in hours {
            day.validate()?;
        }
        let op = Operation::put(endpoints::OPERATING_HOURS, to_body(&hours)?)
            .with_message("Operating hours updated successfully");
        self.client.call_as(op).await
    }

    pub async fn update_operating_day(
        &self,
        id: i64,
        hours: &OperatingHours,
    ) -> Result<ApiResponse<OperatingHours>, ClientError> {
        hours.validate()?;
        let op = Operation::patch(endpoints::operating_hours_detail(id), to_body(hours)?)
            .with_message("Operating hours updated successfully");
        self.client.call_as(op).await
    }
}
