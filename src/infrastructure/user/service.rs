//! Account workflows on top of the repository port and the credential
//! protector. All validation happens here so every adapter (REST, CLI)
//! gets the same behavior.

use std::sync::Arc;

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::timestamp;
use crate::domain::user::validation::fields;
use crate::domain::user::{
    Login, User, UserRepository, UserStatus, validate_email, validate_required,
};
use crate::infrastructure::user::password::{PasswordProtector, verify_password_strength};

/// Payload for registering a new account. A blank status falls back to
/// [`UserStatus::Active`] before validation runs.
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub password: String,
}

/// Partial update for an existing account. Blank fields keep the stored
/// value; status and password are never touched by an update.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

pub struct UserService<R, P> {
    repository: Arc<R>,
    protector: Arc<P>,
}

impl<R, P> UserService<R, P>
where
    R: UserRepository,
    P: PasswordProtector,
{
    pub fn new(repository: Arc<R>, protector: Arc<P>) -> Self {
        Self {
            repository,
            protector,
        }
    }

    /// Registers a new account and returns the stored record without its
    /// credential.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let status_value = if request.status.trim().is_empty() {
            UserStatus::default().as_str().to_string()
        } else {
            request.status.clone()
        };

        validate_required(&[
            (fields::FIRST_NAME, &request.first_name),
            (fields::LAST_NAME, &request.last_name),
            (fields::EMAIL, &request.email),
            (fields::STATUS, &status_value),
            (fields::PASSWORD, &request.password),
        ])?;

        let email = validate_email(&request.email)?;
        let status = UserStatus::parse(&status_value)?;
        verify_password_strength(&request.password)?;

        let created = timestamp::now();
        let protected = self.protector.protect(&request.password)?;

        let mut user = User::new(
            request.first_name.trim().to_string(),
            request.last_name.trim().to_string(),
            email,
            status,
            created,
        );
        user.set_password(protected);

        let mut user = self.repository.create(user).await?;
        user.clear_password();

        debug!(user_id = user.id(), "user created");

        Ok(user)
    }

    pub async fn get(&self, user_id: i64) -> Result<User, DomainError> {
        self.repository.get(user_id).await
    }

    /// Applies a partial update. Only non-blank fields replace the stored
    /// values; a replacement email must pass validation first.
    pub async fn update(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        let mut user = self.repository.get(user_id).await?;

        let first_name = request.first_name.trim();
        if !first_name.is_empty() {
            user.set_first_name(first_name.to_string());
        }

        let last_name = request.last_name.trim();
        if !last_name.is_empty() {
            user.set_last_name(last_name.to_string());
        }

        if !request.email.trim().is_empty() {
            user.set_email(validate_email(&request.email)?);
        }

        user.set_date_updated(timestamp::now());

        let mut user = self.repository.update(&user).await?;
        user.clear_password();

        debug!(user_id = user.id(), "user updated");

        Ok(user)
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), DomainError> {
        self.repository.delete(user_id).await?;

        debug!(user_id, "user deleted");

        Ok(())
    }

    /// Lists the accounts carrying the given status. The status must match
    /// one of the known values exactly; no repository call is made otherwise.
    pub async fn find_by_status(&self, status: &str) -> Result<Vec<User>, DomainError> {
        let status = UserStatus::parse(status)?;

        self.repository.find_by_status(status).await
    }

    /// Checks the submitted credentials against the stored account. Every
    /// failure mode collapses into [`DomainError::Unauthorized`] so callers
    /// cannot probe which part was wrong.
    pub async fn login(&self, login: Login) -> Result<User, DomainError> {
        login.validate()?;

        let username = login.username.trim().to_lowercase();

        let mut user = match self.repository.get_by_email(&username).await {
            Ok(user) => user,
            Err(DomainError::NotFound(_)) => return Err(DomainError::Unauthorized),
            Err(err) => return Err(err),
        };

        let protected = match user.password() {
            Some(protected) => protected.to_string(),
            None => return Err(DomainError::Unauthorized),
        };

        let stored = self
            .protector
            .unprotect(&protected)
            .map_err(|_| DomainError::Unauthorized)?;

        if stored != login.password.trim() {
            return Err(DomainError::Unauthorized);
        }

        user.clear_password();

        debug!(user_id = user.id(), "user authenticated");

        Ok(user)
    }
}
