use std::sync::Arc;

use common::ApiResponse;
use models::menu::{CategoryForm, MenuCategory, MenuItem, MenuItemForm};
use models::FileUpload;
use serde_json::Value;

use super::{form_with_image, to_body};
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;
use crate::http::Method;

/// Menu categories and the items filed under them.
#[derive(Clone)]
pub struct MenuService {
    client: Arc<ApiClient>,
}

impl MenuService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn list_categories(&self) -> Result<ApiResponse<Vec<MenuCategory>>, ClientError> {
        self.client.list_all(endpoints::MENU_CATEGORIES).await
    }

    pub async fn create_category(
        &self,
        form: &CategoryForm,
    ) -> Result<ApiResponse<MenuCategory>, ClientError> {
        form.validate()?;
        let op = Operation::post(endpoints::MENU_CATEGORIES, to_body(form)?)
            .with_message("Category created successfully");
        self.client.call_as(op).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        form: &CategoryForm,
    ) -> Result<ApiResponse<MenuCategory>, ClientError> {
        form.validate()?;
        let op = Operation::put(endpoints::menu_category(id), to_body(form)?)
            .with_message("Category updated successfully");
        self.client.call_as(op).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        self.client.call(Operation::delete(endpoints::menu_category(id))).await
    }

    pub async fn list_items(&self) -> Result<ApiResponse<Vec<MenuItem>>, ClientError> {
        self.client.list_all(endpoints::MENU_ITEMS).await
    }

    pub async fn get_item(&self, id: i64) -> Result<ApiResponse<MenuItem>, ClientError> {
        self.client.call_as(Operation::get(endpoints::menu_item(id))).await
    }

    /// Multipart when an image is attached, JSON otherwise.
    pub async fn create_item(
        &self,
        form: &MenuItemForm,
        image: Option<FileUpload>,
    ) -> Result<ApiResponse<MenuItem>, ClientError> {
        form.validate()?;
        let op = match image {
            Some(file) => {
                let parts = form_with_image(form, "image", Some(file))?;
                Operation::multipart(Method::Post, endpoints::MENU_ITEMS, parts)
            }
            None => Operation::post(endpoints::MENU_ITEMS, to_body(form)?),
        };
        self.client.call_as(op.with_message("Menu item created successfully")).await
    }

    pub async fn update_item(
        &self,
        id: i64,
        form: &MenuItemForm,
        image: Option<FileUpload>,
    ) -> Result<ApiResponse<MenuItem>, ClientError> {
        form.validate()?;
        let op = match image {
            Some(file) => {
                let parts = form_with_image(form, "image", Some(file))?;
                Operation::multipart(Method::Patch, endpoints::menu_item(id), parts)
            }
            None => Operation::patch(endpoints::menu_item(id), to_body(form)?),
        };
        self.client.call_as(op.with_message("Menu item updated successfully")).await
    }

    pub async fn delete_item(&self, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        self.client.call(Operation::delete(endpoints::menu_item(id))).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::RequestBody;
    use crate::test_support::Harness;

    fn item_form() -> MenuItemForm {
        serde_json::from_value(json!({"name": "Burger", "price": 8.5, "categoryId": 2})).unwrap()
    }

    #[tokio::test]
    async fn delete_category_tolerates_no_content() {
        let h = Harness::logged_in("t").await;
        h.transport.push_raw(204, None, "");
        let resp = MenuService::new(h.client.clone()).delete_category(3).await.unwrap();
        assert_eq!(resp.message, "Deleted successfully");
        assert!(h.transport.last_request().unwrap().url.ends_with("/menu-categories/3/"));
    }

    #[tokio::test]
    async fn item_with_image_is_multipart() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(201, json!({"data": {"id": 1, "name": "Burger", "price": "8.50"}}));
        let resp = MenuService::new(h.client.clone())
            .create_item(&item_form(), Some(FileUpload::from_name("burger.jpg", vec![1])))
            .await
            .unwrap();
        assert_eq!(resp.data.price, 8.5);
        let RequestBody::Multipart(parts) = h.transport.last_request().unwrap().body else {
            panic!("multipart expected")
        };
        assert_eq!(parts.field("category"), Some("2"));
        assert_eq!(parts.field("is_available"), Some("true"));
    }

    #[tokio::test]
    async fn item_without_image_is_json() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"data": {"id": 1, "name": "Burger", "price": 8.5}}));
        MenuService::new(h.client.clone()).update_item(1, &item_form(), None).await.unwrap();
        let req = h.transport.last_request().unwrap();
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.method, Method::Patch);
    }

    #[tokio::test]
    async fn blank_category_name_is_rejected() {
        let h = Harness::logged_in("t").await;
        let form = CategoryForm { name: "  ".into(), description: None };
        assert!(MenuService::new(h.client.clone()).create_category(&form).await.is_err());
        assert_eq!(h.transport.request_count(), 0);
    }
}
