//! Resource records owned by the remote hospitality API.
//!
//! Read models deserialize the server's snake_case wire fields (accepting the
//! legacy aliases some endpoints still emit). Form payloads accept the
//! dashboard's camelCase field names on input and always serialize to the
//! wire names, so a value submitted as `bannerTitle` is sent as
//! `banner_title` and read back as `Banner::title`.

pub mod errors;
pub mod de;
pub mod search;
pub mod upload;
pub mod auth;
pub mod venue;
pub mod order;
pub mod reservation;
pub mod banner;
pub mod promotion;
pub mod menu;
pub mod review;
pub mod finance;
pub mod chat;
pub mod nightlife;

pub use errors::ModelError;
pub use search::Searchable;
pub use upload::FileUpload;
