use thiserror::Error;

use crate::domain::user::UserStatus;

/// Fixed message for the `Internal` kind. Driver and cipher detail stays in
/// the logs at the site that classifies the failure.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Unable to process the request due to an internal error. Please contact the systems administrator";

/// Core domain errors. Display output doubles as the external message, so the
/// texts here are the ones callers see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Aggregate of every required field that arrived blank, in input order.
    #[error("Missing mandatory parameter(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("The email id is not valid.")]
    InvalidEmail,

    #[error("Invalid status '{given}'. Valid statuses: {}", UserStatus::names().join(", "))]
    InvalidStatus { given: String },

    /// One fixed message for every way a password can miss the policy.
    #[error(
        "password should be at least 8 characters long with at least one number, one uppercase letter, one lowercase letter and one special character"
    )]
    WeakPassword,

    /// Email uniqueness violation surfaced by the store.
    #[error("Email id {0} is already in use.")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid username or password")]
    Unauthorized,

    #[error("{INTERNAL_ERROR_MESSAGE}")]
    Internal,
}

impl DomainError {
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingFields(fields.into_iter().map(Into::into).collect())
    }

    pub fn invalid_status(given: impl Into<String>) -> Self {
        Self::InvalidStatus {
            given: given.into(),
        }
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict(email.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("User with id {id} was not found"))
    }
}
