//! Login/logout against the hospitality API and the local session they drive.

pub mod service;

pub use service::AuthService;
