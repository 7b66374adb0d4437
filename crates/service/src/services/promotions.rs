use std::sync::Arc;

use common::ApiResponse;
use models::promotion::{Promotion, PromotionForm};
use models::FileUpload;
use serde_json::Value;

use super::{form_with_image, to_body};
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;
use crate::http::Method;

const IMAGE_FIELD: &str = "image";

#[derive(Clone)]
pub struct PromotionService {
    client: Arc<ApiClient>,
}

impl PromotionService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Promotion>>, ClientError> {
        self.client.list_all(endpoints::PROMOTIONS).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Promotion>, ClientError> {
        self.client.call_as(Operation::get(endpoints::promotion(id))).await
    }

    pub async fn create(
        &self,
        form: &PromotionForm,
        image: Option<FileUpload>,
    ) -> Result<ApiResponse<Promotion>, ClientError> {
        form.validate()?;
        let op = Self::write(Method::Post, endpoints::PROMOTIONS.to_string(), form, image)?;
        self.client.call_as(op.with_message("Promotion created successfully")).await
    }

    pub async fn update(
        &self,
        id: i64,
        form: &PromotionForm,
        image: Option<FileUpload>,
    ) -> Result<ApiResponse<Promotion>, ClientError> {
        form.validate()?;
        let op = Self::write(Method::Put, endpoints::promotion(id), form, image)?;
        self.client.call_as(op.with_message("Promotion updated successfully")).await
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        self.client.call(Operation::delete(endpoints::promotion(id))).await
    }

    fn write(
        method: Method,
        endpoint: String,
        form: &PromotionForm,
        image: Option<FileUpload>,
    ) -> Result<Operation, ClientError> {
        Ok(match (method, image) {
            (method, Some(file)) => {
                let parts = form_with_image(form, IMAGE_FIELD, Some(file))?;
                Operation::multipart(method, endpoint, parts)
            }
            (Method::Put, None) => Operation::put(endpoint, to_body(form)?),
            (_, None) => Operation::post(endpoint, to_body(form)?),
        })
    }
}
