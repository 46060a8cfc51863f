//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::domain::{DomainError, Login, User};
use crate::infrastructure::user::{
    CreateUserRequest, PasswordProtector, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get(&self, user_id: i64) -> Result<User, DomainError>;
    async fn update(&self, user_id: i64, request: UpdateUserRequest)
        -> Result<User, DomainError>;
    async fn delete(&self, user_id: i64) -> Result<(), DomainError>;
    async fn find_by_status(&self, status: &str) -> Result<Vec<User>, DomainError>;
    async fn login(&self, login: Login) -> Result<User, DomainError>;
}

#[async_trait::async_trait]
impl<R, P> UserServiceTrait for UserService<R, P>
where
    R: UserRepository + 'static,
    P: PasswordProtector + 'static,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, user_id: i64) -> Result<User, DomainError> {
        UserService::get(self, user_id).await
    }

    async fn update(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        UserService::update(self, user_id, request).await
    }

    async fn delete(&self, user_id: i64) -> Result<(), DomainError> {
        UserService::delete(self, user_id).await
    }

    async fn find_by_status(&self, status: &str) -> Result<Vec<User>, DomainError> {
        UserService::find_by_status(self, status).await
    }

    async fn login(&self, login: Login) -> Result<User, DomainError> {
        UserService::login(self, login).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}
