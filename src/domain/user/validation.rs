//! User field validation: required-field aggregation and email checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::DomainError;

/// External field names as they appear on the wire. Required-field errors
/// report these, so they must stay in sync with the serde renames.
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const STATUS: &str = "status";
    pub const PASSWORD: &str = "password";
    pub const USERNAME: &str = "username";
}

/// Full-string email pattern: dot-atom local part, dot-separated domain
/// labels of at most 63 characters that start and end alphanumeric.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Check `(external name, value)` pairs and aggregate every name whose value
/// is blank after trimming into a single error, preserving input order.
pub fn validate_required(values: &[(&str, &str)]) -> Result<(), DomainError> {
    let missing: Vec<String> = values
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| (*name).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::missing_fields(missing))
    }
}

/// Validate an email address and return its canonical form: trimmed and
/// lower-cased. Uniqueness is the store's concern, not checked here.
pub fn validate_email(email: &str) -> Result<String, DomainError> {
    let trimmed = email.trim();
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(DomainError::InvalidEmail);
    }
    Ok(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Required-field tests

    #[test]
    fn test_validate_required_all_present() {
        assert!(validate_required(&[("firstName", "Jane"), ("email", "a@b.io")]).is_ok());
    }

    #[test]
    fn test_validate_required_aggregates_in_order() {
        let result = validate_required(&[
            (fields::FIRST_NAME, "  "),
            (fields::LAST_NAME, "Doe"),
            (fields::EMAIL, ""),
            (fields::PASSWORD, "\t"),
        ]);

        assert_eq!(
            result,
            Err(DomainError::MissingFields(vec![
                "firstName".to_string(),
                "email".to_string(),
                "password".to_string(),
            ]))
        );
    }

    #[test]
    fn test_validate_required_whitespace_only_is_blank() {
        let result = validate_required(&[(fields::USERNAME, "   ")]);
        assert_eq!(
            result,
            Err(DomainError::MissingFields(vec!["username".to_string()]))
        );
    }

    // Email tests

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("jane.doe@example.com").is_ok());
        assert!(validate_email("user+tag@sub.domain.org").is_ok());
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("first_last@host-name.co.uk").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("not-an-email"), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("user@"), Err(DomainError::InvalidEmail));
        assert_eq!(
            validate_email("user@-example.com"),
            Err(DomainError::InvalidEmail)
        );
        assert_eq!(
            validate_email("user@example-.com"),
            Err(DomainError::InvalidEmail)
        );
        assert_eq!(
            validate_email("user name@example.com"),
            Err(DomainError::InvalidEmail)
        );
    }

    #[test]
    fn test_email_is_normalized() {
        assert_eq!(
            validate_email("  Jane.DOE@Example.COM  ").unwrap(),
            "jane.doe@example.com"
        );
    }

    #[test]
    fn test_email_rejects_long_domain_label() {
        let label = "a".repeat(64);
        let email = format!("user@{label}.com");
        assert_eq!(validate_email(&email), Err(DomainError::InvalidEmail));
    }
}
