//! Types and runtime helpers shared by every crate of the venue console.

pub mod types;
pub mod utils;
pub mod env;

pub use types::{ApiResponse, Page};
