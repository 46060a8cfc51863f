//! User domain
//!
//! Domain types for user accounts: the record entity and status enum,
//! field validation, login credentials, and the storage port.

mod entity;
mod login;
mod repository;
pub mod validation;

pub use entity::{User, UserStatus};
pub use login::Login;
pub use repository::UserRepository;
pub use validation::{validate_email, validate_required};

#[cfg(test)]
pub use repository::MockUserRepository;
#[cfg(test)]
pub use repository::mock::InMemoryUserRepository;
