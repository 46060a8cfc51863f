//! REST API types shared by every endpoint

pub mod error;
pub mod json;
pub mod message;

pub use error::ApiError;
pub use json::Json;
pub use message::RestMessage;
