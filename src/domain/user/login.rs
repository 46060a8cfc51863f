//! Login credentials submitted to the authentication endpoint

use serde::Deserialize;

use crate::domain::error::DomainError;
use crate::domain::user::validation::{fields, validate_required};

/// Credentials pair. The username is the account email address.
#[derive(Debug, Clone, Deserialize)]
pub struct Login {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Login {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are mandatory; blanks are aggregated into one error.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_required(&[
            (fields::USERNAME, &self.username),
            (fields::PASSWORD, &self.password),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_valid() {
        let login = Login::new("jane.doe@example.com", "Secr3t pa$s");
        assert!(login.validate().is_ok());
    }

    #[test]
    fn test_login_missing_both_fields() {
        let login = Login::new("", "  ");
        assert_eq!(
            login.validate(),
            Err(DomainError::MissingFields(vec![
                "username".to_string(),
                "password".to_string(),
            ]))
        );
    }

    #[test]
    fn test_login_missing_password_only() {
        let login = Login::new("jane.doe@example.com", "");
        assert_eq!(
            login.validate(),
            Err(DomainError::MissingFields(vec!["password".to_string()]))
        );
    }
}
