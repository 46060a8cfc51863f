//! User entity and account status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::timestamp;

/// Status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account in regular use
    #[default]
    Active,
    /// Account kept on record but disabled
    Inactive,
}

impl UserStatus {
    /// Every valid external name, in declaration order.
    pub fn names() -> [&'static str; 2] {
        ["active", "inactive"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Parse an external status value against the closed set.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(DomainError::invalid_status(other)),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier; zero until first persisted
    #[serde(default)]
    id: i64,
    first_name: String,
    last_name: String,
    /// Canonical (lowercase) email address
    email: String,
    #[serde(default)]
    status: UserStatus,
    /// Protected credential - never exposed in serialization
    #[serde(skip_serializing, default)]
    password: Option<String>,
    /// Creation timestamp
    #[serde(with = "timestamp::serde_format")]
    date_created: DateTime<Utc>,
    /// Last update timestamp
    #[serde(with = "timestamp::serde_format")]
    date_updated: DateTime<Utc>,
}

impl User {
    /// Create a record that has not been persisted yet. Both timestamps start
    /// at `created`; the store assigns the id.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        status: UserStatus,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            status,
            password: None,
            date_created: created,
            date_updated: created,
        }
    }

    // Getters

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }

    pub fn date_updated(&self) -> DateTime<Utc> {
        self.date_updated
    }

    // Mutators

    /// Record the identifier assigned by the store.
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(password.into());
    }

    /// Drop the protected credential before the record leaves the service.
    pub fn clear_password(&mut self) {
        self.password = None;
    }

    pub fn set_date_updated(&mut self, date_updated: DateTime<Utc>) {
        self.date_updated = date_updated;
    }
}
