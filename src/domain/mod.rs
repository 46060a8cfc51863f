//! Domain layer - Core business logic and entities

pub mod error;
pub mod timestamp;
pub mod user;

pub use error::DomainError;
pub use user::{Login, User, UserRepository, UserStatus};
