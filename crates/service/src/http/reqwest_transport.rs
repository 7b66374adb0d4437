//! Reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use super::{HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, RequestBody};
use crate::errors::ClientError;

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with explicit connect and overall request timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_config(cfg: &configs::ApiConfig) -> Result<Self, ClientError> {
        Self::new(cfg.connect_timeout(), cfg.request_timeout())
    }
}

fn to_reqwest_method(m: Method) -> reqwest::Method {
    match m {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<Form, ClientError> {
    let mut out = Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for (name, file) in form.files {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| ClientError::Validation(format!("invalid content type for {name}: {e}")))?;
        out = out.part(name, part);
    }
    Ok(out)
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Transport(format!("request timed out: {e}"))
    } else {
        ClientError::Transport(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = self.client.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| ClientError::Decode(e.to_string()))?;
                builder.body(bytes)
            }
            // reqwest sets the multipart content type with its boundary
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(map_transport_error)?.to_vec();
        debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, content_type, body })
    }
}
