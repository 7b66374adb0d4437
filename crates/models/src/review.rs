use serde::{Deserialize, Serialize};

use crate::{ModelError, Searchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(default, alias = "user_name", alias = "customer_name")]
    pub reviewer_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, alias = "response")]
    pub reply: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReply {
    #[serde(alias = "response")]
    pub reply: String,
}

impl ReviewReply {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.reply.trim().is_empty() { return Err(ModelError::required("reply")); }
        Ok(())
    }
}

impl Searchable for Review {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.rating.to_string()];
        v.extend(self.reviewer_name.clone());
        v.extend(self.comment.clone());
        v
    }
}
