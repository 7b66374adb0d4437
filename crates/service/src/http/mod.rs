//! Transport seam between the call contract and the network.
//!
//! [`ApiClient`](crate::client::ApiClient) builds fully-formed
//! [`HttpRequest`]s (URL, headers, body) and interprets raw
//! [`HttpResponse`]s; an [`HttpTransport`] only moves bytes.

pub mod reqwest_transport;

use async_trait::async_trait;
use models::FileUpload;
use serde::Serialize;

use crate::errors::ClientError;

pub use reqwest_transport::ReqwestTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    pub fn is_idempotent_read(&self) -> bool { matches!(self, Method::Get) }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text fields plus file parts of a multipart submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FileUpload)>,
}

impl MultipartForm {
    pub fn new() -> Self { Self::default() }

    /// Flatten a serializable payload into text parts, one per top-level
    /// field. `null` values are skipped; strings are sent verbatim and every
    /// other value as its JSON text.
    pub fn from_serializable<T: Serialize>(payload: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(payload).map_err(|e| ClientError::Decode(e.to_string()))?;
        let serde_json::Value::Object(map) = value else {
            return Err(ClientError::Validation("multipart payload must be an object".into()));
        };
        let fields = map
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect();
        Ok(Self { fields, files: Vec::new() })
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.files.push((name.into(), file));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    /// True when the media type (parameters ignored) is `application/json`.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }
}

/// Moves one request over the wire. Only network-level failures are errors;
/// every HTTP status comes back as a response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}
