use std::sync::Arc;

use common::ApiResponse;
use models::chat::{Conversation, Message, SendMessage, UploadedFile};
use models::FileUpload;

use super::to_body;
use crate::client::{ApiClient, Operation};
use crate::endpoints;
use crate::errors::ClientError;
use crate::http::{Method, MultipartForm};

/// Vendor chat: conversations, their messages and attachment upload.
#[derive(Clone)]
pub struct ChatService {
    client: Arc<ApiClient>,
}

impl ChatService {
    pub fn new(client: Arc<ApiClient>) -> Self { Self { client } }

    pub async fn conversations(&self) -> Result<ApiResponse<Vec<Conversation>>, ClientError> {
        self.client.list_all(endpoints::CONVERSATIONS).await
    }

    pub async fn messages(
        &self,
        conversation_id: i64,
    ) -> Result<ApiResponse<Vec<Message>>, ClientError> {
        self.client.list_all(&endpoints::conversation_messages(conversation_id)).await
    }

    pub async fn send_message(
        &self,
        conversation_id: i64,
        message: &SendMessage,
    ) -> Result<ApiResponse<Message>, ClientError> {
        message.validate()?;
        let endpoint = endpoints::conversation_messages(conversation_id);
        let op = Operation::post(endpoint, to_body(message)?)
            .with_message("Message sent");
        self.client.call_as(op).await
    }

    /// Upload an attachment; the returned URL goes into
    /// [`SendMessage::attachment`].
    pub async fn upload_file(
        &self,
        file: FileUpload,
    ) -> Result<ApiResponse<UploadedFile>, ClientError> {
        if file.bytes.is_empty() {
            return Err(ClientError::Validation(format!("{} is empty", file.file_name)));
        }
        let parts = MultipartForm::new().file("file", file);
        let op = Operation::multipart(Method::Post, endpoints::CHAT_UPLOAD, parts)
            .with_message("File uploaded successfully");
        self.client.call_as(op).await
    }
}
