//! Scriptable transport and redirect doubles for exercising the call
//! contract without a network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::{ApiClient, AuthRedirect};
use crate::errors::ClientError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::session::SessionManager;

pub const BASE_URL: &str = "https://api.test";

/// Replays queued responses in order and records every request it sees.
/// An empty queue answers `{}` with 200.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ClientError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn push(&self, response: Result<HttpResponse, ClientError>) -> &Self {
        self.responses.lock().unwrap_or_else(|p| p.into_inner()).push_back(response);
        self
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(json_response(status, body)))
    }

    pub fn push_raw(&self, status: u16, content_type: Option<&str>, body: &str) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.as_bytes().to_vec(),
        }))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).last().cloned()
    }
}

pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: serde_json::to_vec(&body).unwrap_or_default(),
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).push(request);
        self.responses
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(json_response(200, serde_json::json!({}))))
    }
}

/// Remembers every login redirect instead of navigating.
#[derive(Default)]
pub struct RecordingRedirect {
    routes: Mutex<Vec<String>>,
}

impl RecordingRedirect {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl AuthRedirect for RecordingRedirect {
    fn redirect_to_login(&self, route: &str) {
        self.routes.lock().unwrap_or_else(|p| p.into_inner()).push(route.to_string());
    }
}

/// A client wired to fresh doubles. The session starts empty.
pub struct Harness {
    pub client: Arc<ApiClient>,
    pub transport: Arc<MockTransport>,
    pub redirect: Arc<RecordingRedirect>,
    pub session: Arc<SessionManager>,
}

impl Harness {
    pub fn new() -> Self {
        let transport = MockTransport::new();
        let redirect = RecordingRedirect::new();
        let session = Arc::new(SessionManager::in_memory());
        let client = ApiClient::new(BASE_URL, transport.clone(), session.clone())
            .with_redirect(redirect.clone())
            .with_login_route("/login");
        Self { client: Arc::new(client), transport, redirect, session }
    }

    /// Harness whose session already holds `token`.
    pub async fn logged_in(token: &str) -> Self {
        let h = Self::new();
        h.session.set_token(token, false).await;
        h
    }
}

impl Default for Harness {
    fn default() -> Self { Self::new() }
}
