use serde::{Deserialize, Serialize};

use crate::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    #[serde(default, alias = "participant_name", alias = "customer_name")]
    pub title: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(default, alias = "text")]
    pub content: String,
    #[serde(default, alias = "sender_id")]
    pub sender: Option<i64>,
    #[serde(default, alias = "file_url")]
    pub attachment: Option<String>,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessage {
    pub content: String,
    #[serde(default, alias = "attachmentUrl", skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl SendMessage {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.content.trim().is_empty() && self.attachment.is_none() {
            return Err(ModelError::Validation("message needs text or an attachment".into()));
        }
        Ok(())
    }
}

/// Response of the chat upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(alias = "file_url", alias = "file")]
    pub url: String,
}
