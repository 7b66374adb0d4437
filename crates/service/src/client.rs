//! The single request/response contract every resource operation follows.
//!
//! 1. No token → [`ClientError::Unauthenticated`], nothing is sent.
//! 2. Bearer token and `Accept: application/json` on every request; JSON
//!    bodies carry `Content-Type: application/json`, multipart bodies leave
//!    the content type to the transport.
//! 3. 401 from an authenticated endpoint clears the session, redirects to the
//!    login route and fails with [`ClientError::SessionExpired`]. Public
//!    operations (login) treat a 401 like any other rejection.
//! 4. Deletes succeed on 204 and on 404; optional reads turn 404 into a
//!    `None` payload.
//! 5. Any other response must be JSON, otherwise [`ClientError::Protocol`];
//!    non-2xx JSON becomes [`ClientError::RequestFailed`] with the server's
//!    message.
//! 6. 2xx bodies are unwrapped from their `{data}` / `{results}` envelope.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use common::{ApiResponse, Page};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::{is_retryable_status, ClientError};
use crate::http::{
    HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, RequestBody, ReqwestTransport,
};
use crate::observability;
use crate::retry::{retry_with_policy, RetryPolicy};
use crate::session::SessionManager;

/// Upper bound on pages followed by [`ApiClient::list_all`].
const MAX_FOLLOWED_PAGES: usize = 500;

/// How a 404 (and 204) is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Read,
    /// 404 is a soft miss: success with a null payload.
    OptionalRead,
    Write,
    /// 204 and 404 are both success.
    Delete,
}

/// Where the payload sits in a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `data`, then `results`, then the body itself.
    Auto,
    /// `data`, then the body itself.
    Data,
    /// `results`, then `data`, then the body itself.
    Results,
    /// The body as received.
    Raw,
}

impl Envelope {
    pub fn unwrap(self, body: Value) -> Value {
        let order: &[&str] = match self {
            Envelope::Auto => &["data", "results"],
            Envelope::Data => &["data"],
            Envelope::Results => &["results", "data"],
            Envelope::Raw => &[],
        };
        if let Value::Object(map) = &body {
            for key in order {
                if let Some(v) = map.get(*key) {
                    return v.clone();
                }
            }
        }
        body
    }
}

/// One instantiation of the contract: endpoint, method, body and the rules
/// for reading the answer.
#[derive(Debug, Clone)]
pub struct Operation {
    pub method: Method,
    pub endpoint: String,
    pub body: RequestBody,
    pub kind: OperationKind,
    pub envelope: Envelope,
    pub requires_auth: bool,
    pub success_message: String,
}

impl Operation {
    fn new(
        method: Method,
        endpoint: impl Into<String>,
        body: RequestBody,
        kind: OperationKind,
    ) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body,
            kind,
            envelope: Envelope::Auto,
            requires_auth: true,
            success_message: "Request completed successfully".to_string(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint, RequestBody::Empty, OperationKind::Read)
    }

    /// GET where a 404 means "nothing there yet" rather than failure.
    pub fn get_optional(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint, RequestBody::Empty, OperationKind::OptionalRead)
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, endpoint, RequestBody::Json(body), OperationKind::Write)
    }

    pub fn put(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, endpoint, RequestBody::Json(body), OperationKind::Write)
    }

    pub fn patch(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, endpoint, RequestBody::Json(body), OperationKind::Write)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint, RequestBody::Empty, OperationKind::Delete)
            .with_message("Deleted successfully")
    }

    pub fn multipart(method: Method, endpoint: impl Into<String>, form: MultipartForm) -> Self {
        Self::new(method, endpoint, RequestBody::Multipart(form), OperationKind::Write)
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    /// Skip the bearer token (login).
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }
}

/// Replacement for the browser redirect performed when the session dies.
pub trait AuthRedirect: Send + Sync {
    fn redirect_to_login(&self, route: &str);
}

/// Default redirect: there is no page to navigate, so log it.
pub struct LoggingRedirect;

impl AuthRedirect for LoggingRedirect {
    fn redirect_to_login(&self, route: &str) {
        warn!(route, "session ended; login required");
    }
}

/// Generic JSON API client bound to one base URL and one session.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionManager>,
    redirect: Arc<dyn AuthRedirect>,
    login_route: String,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            redirect: Arc::new(LoggingRedirect),
            login_route: "/".to_string(),
            retry: RetryPolicy::disabled(),
        }
    }

    /// Client over the reqwest transport, configured from `cfg`.
    pub fn from_config(
        cfg: &configs::ClientConfig,
        session: Arc<SessionManager>,
    ) -> Result<Self, ClientError> {
        let transport = Arc::new(ReqwestTransport::from_config(&cfg.api)?);
        Ok(Self::new(cfg.api.base_url.clone(), transport, session)
            .with_login_route(cfg.api.login_route.clone())
            .with_retry(RetryPolicy::from_config(&cfg.retry)))
    }

    pub fn with_redirect(mut self, redirect: Arc<dyn AuthRedirect>) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn session(&self) -> &Arc<SessionManager> { &self.session }

    pub fn base_url(&self) -> &str { &self.base_url }

    /// `endpoint` may be a path under the base URL or an absolute URL
    /// (pagination `next` links).
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    #[instrument(skip(self, op), fields(method = %op.method, endpoint = %op.endpoint))]
    pub async fn call(&self, op: Operation) -> Result<ApiResponse<Value>, ClientError> {
        let result = self.execute(&op).await;
        if let Err(e) = &result {
            observability::record_failure(e);
            debug!(code = e.code(), error = %e, "operation failed");
        }
        result
    }

    /// [`call`](Self::call), decoding the unwrapped payload into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        op: Operation,
    ) -> Result<ApiResponse<T>, ClientError> {
        let resp = self.call(op).await?;
        decode_payload(resp)
    }

    /// [`call`](Self::call) for soft-miss reads: a null payload becomes `None`.
    pub async fn call_optional<T: DeserializeOwned>(
        &self,
        op: Operation,
    ) -> Result<ApiResponse<Option<T>>, ClientError> {
        let resp = self.call(op).await?;
        decode_payload(resp)
    }

    /// Fetch every page of a paginated list endpoint by following `next`.
    ///
    /// A `next` link pointing at an already fetched page, or more than
    /// [`MAX_FOLLOWED_PAGES`] pages, fails with [`ClientError::Decode`]
    /// rather than handing back a partial collection.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<ApiResponse<Vec<T>>, ClientError> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(endpoint.to_string());
        let mut message = String::new();

        while let Some(url) = next.take() {
            if !seen.insert(self.resolve(&url)) {
                warn!(url = %url, "pagination loop");
                return Err(ClientError::Decode(format!("pagination loops back to {url}")));
            }
            if seen.len() > MAX_FOLLOWED_PAGES {
                warn!(url = %url, "pagination runaway");
                return Err(ClientError::Decode(format!("more than {MAX_FOLLOWED_PAGES} pages")));
            }
            let resp = self.call(Operation::get(url).with_envelope(Envelope::Raw)).await?;
            message = resp.message;
            let page = into_page(resp.data)?;
            next = page.next.filter(|n| !n.is_empty());
            for raw in page.results {
                let item =
                    serde_json::from_value(raw).map_err(|e| ClientError::Decode(e.to_string()))?;
                items.push(item);
            }
        }
        debug!(count = items.len(), pages = seen.len(), "list fetched");
        Ok(ApiResponse::ok(items, message))
    }

    async fn execute(&self, op: &Operation) -> Result<ApiResponse<Value>, ClientError> {
        let token = if op.requires_auth {
            match self.session.get_token().await {
                Some(t) => Some(t),
                None => return Err(ClientError::Unauthenticated),
            }
        } else {
            None
        };

        let request = self.build_request(op, token.as_deref());
        let response = self.send(request).await?;
        self.interpret(op, response).await
    }

    fn build_request(&self, op: &Operation, token: Option<&str>) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(t) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {t}")));
        }
        if matches!(op.body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method: op.method,
            url: self.resolve(&op.endpoint),
            headers,
            body: op.body.clone(),
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let started = Instant::now();
        // only reads are ever repeated
        let policy = if request.method.is_idempotent_read() {
            self.retry.clone()
        } else {
            RetryPolicy::disabled()
        };
        let result = retry_with_policy(
            &policy,
            || {
                observability::REQUESTS_TOTAL.inc();
                self.transport.send(request.clone())
            },
            |resp: &HttpResponse| is_retryable_status(resp.status),
        )
        .await;
        observability::REQUEST_DURATION.observe(started.elapsed().as_secs_f64());
        result
    }

    async fn interpret(
        &self,
        op: &Operation,
        response: HttpResponse,
    ) -> Result<ApiResponse<Value>, ClientError> {
        let status = response.status;

        if status == 401 && op.requires_auth {
            self.expire_session().await;
            return Err(ClientError::SessionExpired);
        }
        if op.kind == OperationKind::Delete {
            if status == 204 {
                return Ok(ApiResponse::ok(Value::Null, op.success_message.clone()));
            }
            if status == 404 {
                info!(endpoint = %op.endpoint, "delete target already gone");
                return Ok(ApiResponse::ok(Value::Null, "Resource already deleted"));
            }
        }

        if !response.is_json() {
            warn!(status, content_type = ?response.content_type, "non-JSON response");
            return Err(ClientError::Protocol { status, content_type: response.content_type });
        }
        let body: Value = serde_json::from_slice(&response.body)
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if !response.is_success() {
            if status == 404 && op.kind == OperationKind::OptionalRead {
                let message = server_message(&body).unwrap_or_else(|| "Not found".to_string());
                return Ok(ApiResponse::ok(Value::Null, message));
            }
            let message = server_message(&body)
                .unwrap_or_else(|| format!("HTTP error! status: {status}"));
            return Err(ClientError::RequestFailed { status, message });
        }

        let message = server_message(&body).unwrap_or_else(|| op.success_message.clone());
        Ok(ApiResponse::ok(op.envelope.unwrap(body), message))
    }

    async fn expire_session(&self) {
        self.session.remove_token().await;
        observability::SESSION_EXPIRED_TOTAL.inc();
        self.redirect.redirect_to_login(&self.login_route);
    }
}

/// Server-supplied message: `message`, then `error`, then `detail`.
fn server_message(body: &Value) -> Option<String> {
    ["message", "error", "detail"].iter().find_map(|k| match body.get(*k) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

fn decode_payload<T: DeserializeOwned>(
    resp: ApiResponse<Value>,
) -> Result<ApiResponse<T>, ClientError> {
    let data = serde_json::from_value(resp.data).map_err(|e| ClientError::Decode(e.to_string()))?;
    Ok(ApiResponse { success: resp.success, data, message: resp.message })
}

/// Accepts a DRF-style page, a `{data: [...]}` envelope or a bare array.
fn into_page(body: Value) -> Result<Page<Value>, ClientError> {
    match body {
        Value::Array(results) => Ok(Page { results, ..Page::default() }),
        Value::Object(ref map) if map.contains_key("results") => {
            serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
        }
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(results)) => Ok(Page { results, ..Page::default() }),
            _ => Err(ClientError::Decode(
                "list response has neither results nor data array".into(),
            )),
        },
        _ => Err(ClientError::Decode("list response is not an object or array".into())),
    }
}
