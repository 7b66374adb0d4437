//! Client layer for the hospitality vendor API.
//! - One request/response contract (`client`) shared by every resource service.
//! - Session tokens behind an injectable store (`session`).
//! - Field mapping and validation live in the `models` crate.

pub mod errors;
pub mod session;
pub mod http;
pub mod retry;
pub mod observability;
pub mod client;
pub mod endpoints;
pub mod identity;
pub mod pagination;
pub mod auth;
pub mod services;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use auth::AuthService;
pub use client::{ApiClient, AuthRedirect, Envelope, LoggingRedirect, Operation, OperationKind};
pub use errors::ClientError;
pub use identity::VenueIdentityCache;
pub use pagination::{ListView, PageButton, SearchAllFields};
pub use retry::RetryPolicy;
pub use services::Services;
pub use session::{SessionManager, TokenStore};
