//! Session token ownership.
//!
//! A [`SessionManager`] is created once and handed to the API client; nothing
//! reads the token from ambient state.

pub mod store;
pub mod manager;

pub use manager::{Clock, SessionManager};
pub use store::{FileTokenStore, MemoryTokenStore, StoredToken, TokenStore};
