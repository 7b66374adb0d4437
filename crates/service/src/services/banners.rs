use std::sync::Arc;

use common::ApiResponse;
use models::banner::{Banner, BannerForm};
use models::FileUpload;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{ensure_image, form_with_image, to_body};
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;
use crate::http::Method;
use crate::identity::VenueIdentityCache;

const IMAGE_FIELD: &str = "image";

/// Banners belong to the caller's venue; listing and creation resolve the
/// venue id through the shared cache.
#[derive(Clone)]
pub struct BannerService {
    client: Arc<ApiClient>,
    venue: Arc<VenueIdentityCache>,
}

impl BannerService {
    pub fn new(client: Arc<ApiClient>, venue: Arc<VenueIdentityCache>) -> Self {
        Self { client, venue }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Banner>>, ClientError> {
        let venue_id = self.venue.get_my_venue_id(&self.client).await?;
        self.client.list_all(&endpoints::venue_banners(venue_id)).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Banner>, ClientError> {
        self.client.call_as(Operation::get(endpoints::banner(id))).await
    }

    /// New banners always carry an image; the form is checked before any
    /// request, the venue lookup included.
    #[instrument(skip(self, form, image), fields(title = %form.title))]
    pub async fn create(
        &self,
        form: &BannerForm,
        image: Option<FileUpload>,
    ) -> Result<ApiResponse<Banner>, ClientError> {
        form.validate()?;
        let image = image
            .ok_or_else(|| ClientError::Validation("Banner image is required".into()))?;
        ensure_image(&image)?;

        let venue_id = self.venue.get_my_venue_id(&self.client).await?;
        let parts = form_with_image(form, IMAGE_FIELD, Some(image))?
            .text("venue", venue_id.to_string());
        debug!(venue_id, "creating banner");
        let op = Operation::multipart(Method::Post, endpoints::venue_banners(venue_id), parts)
            .with_message("Banner created successfully");
        self.client.call_as(op).await
    }

    /// Replace the image only when a new one is given.
    pub async fn update(
        &self,
        id: i64,
        form: &BannerForm,
        image: Option<FileUpload>,
    ) -> Result<ApiResponse<Banner>, ClientError> {
        form.validate()?;
        let op = match image {
            Some(file) => {
                let parts = form_with_image(form, IMAGE_FIELD, Some(file))?;
                Operation::multipart(Method::Patch, endpoints::banner(id), parts)
            }
            None => Operation::patch(endpoints::banner(id), to_body(form)?),
        };
        self.client.call_as(op.with_message("Banner updated successfully")).await
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        self.client.call(Operation::delete(endpoints::banner(id))).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::RequestBody;
    use crate::test_support::Harness;

    fn form() -> BannerForm {
        serde_json::from_value(json!({
            "bannerTitle": "X", "description": "Y",
            "startDate": "2024-01-01", "endDate": "2024-01-02",
            "startTime": "10:00", "endTime": "11:00"
        }))
        .unwrap()
    }

    fn service(h: &Harness) -> BannerService {
        BannerService::new(h.client.clone(), Arc::new(VenueIdentityCache::new()))
    }

    #[tokio::test]
    async fn create_without_image_is_rejected_before_any_request() {
        let h = Harness::logged_in("t").await;
        let err = service(&h).create(&form(), None).await.unwrap_err();
        assert_eq!(err, ClientError::Validation("Banner image is required".into()));
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn create_rejects_non_image_attachment() {
        let h = Harness::logged_in("t").await;
        let err = service(&h)
            .create(&form(), Some(FileUpload::from_name("terms.pdf", vec![1])))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn create_posts_multipart_under_my_venue() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"data": {"id": 12}}));
        h.transport.push_json(201, json!({"data": {"id": 1, "banner_title": "X"}}));

        let resp = service(&h)
            .create(&form(), Some(FileUpload::from_name("sale.png", vec![1, 2])))
            .await
            .unwrap();
        assert_eq!(resp.data.title, "X");

        let req = h.transport.last_request().unwrap();
        assert!(req.url.ends_with("/venues/12/banners/"));
        assert_eq!(req.header("content-type"), None);
        let RequestBody::Multipart(parts) = req.body else { panic!("multipart expected") };
        assert_eq!(parts.field("banner_title"), Some("X"));
        assert_eq!(parts.field("start_time"), Some("10:00"));
        assert_eq!(parts.field("venue"), Some("12"));
        assert_eq!(parts.files.len(), 1);
        assert_eq!(parts.files[0].0, "image");
    }

    #[tokio::test]
    async fn title_round_trips_through_wire_name() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"data": {"id": 1}}));
        h.transport.push_json(201, json!({"data": {"id": 4, "banner_title": "Sale"}}));
        h.transport.push_json(200, json!({"data": {"id": 4, "banner_title": "Sale"}}));

        let mut f = form();
        f.title = "Sale".into();
        let svc = service(&h);
        svc.create(&f, Some(FileUpload::from_name("a.jpg", vec![1]))).await.unwrap();
        let fetched = svc.get(4).await.unwrap();
        assert_eq!(fetched.data.title, "Sale");
    }

    #[tokio::test]
    async fn update_without_image_sends_json() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"data": {"id": 3, "banner_title": "X"}}));
        service(&h).update(3, &form(), None).await.unwrap();
        let req = h.transport.last_request().unwrap();
        assert_eq!(req.method, Method::Patch);
        let RequestBody::Json(body) = req.body else { panic!("json expected") };
        assert_eq!(body["banner_title"], "X");
    }

    #[tokio::test]
    async fn list_is_scoped_to_venue() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"id": 7}));
        h.transport.push_json(
            200,
            json!({"results": [{"id": 1, "title": "A"}, {"id": 2, "banner_title": "B"}]}),
        );
        let resp = service(&h).list().await.unwrap();
        assert_eq!(resp.data.iter().map(|b| b.title.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(h.transport.last_request().unwrap().url.ends_with("/venues/7/banners/"));
    }
}
