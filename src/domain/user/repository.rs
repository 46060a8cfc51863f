//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserStatus};
use crate::domain::DomainError;

/// Storage port for user records. Implementations classify their driver
/// errors: absent rows become `NotFound`, email uniqueness violations become
/// `Conflict`, anything else is logged and surfaced as `Internal`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by id. The protected password is not part of the result.
    async fn get(&self, id: i64) -> Result<User, DomainError>;

    /// Get a user by canonical email, protected password included (login).
    async fn get_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// All users with the given status; an empty match is an empty vec.
    async fn find_by_status(&self, status: UserStatus) -> Result<Vec<User>, DomainError>;

    /// Insert a new record and return it with the store-assigned id.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist name, email and dateUpdated changes for an existing record.
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a record by id.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory stand-in for the real store. Mirrors its observable
    /// behavior: id assignment, email uniqueness, password column omitted
    /// everywhere except the email lookup, column subset on update.
    #[derive(Debug, Default)]
    pub struct InMemoryUserRepository {
        users: Arc<RwLock<HashMap<i64, User>>>,
        next_id: Arc<RwLock<i64>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// A repository whose every call fails like a classified driver error.
        pub fn failing() -> Self {
            Self {
                should_fail: Arc::new(RwLock::new(true)),
                ..Self::default()
            }
        }

        /// Make every operation fail the way a classified driver error does.
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::Internal);
            }
            Ok(())
        }

        fn sanitized(user: &User) -> User {
            let mut copy = user.clone();
            copy.clear_password();
            copy
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn get(&self, id: i64) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            users
                .get(&id)
                .map(Self::sanitized)
                .ok_or_else(|| DomainError::user_not_found(id))
        }

        async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            users
                .values()
                .find(|user| user.email() == email)
                .cloned()
                .ok_or_else(|| {
                    DomainError::not_found(format!("User with email {email} was not found"))
                })
        }

        async fn find_by_status(&self, status: UserStatus) -> Result<Vec<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            let mut matches: Vec<User> = users
                .values()
                .filter(|user| user.status() == status)
                .map(Self::sanitized)
                .collect();
            matches.sort_by_key(|user| user.id());
            Ok(matches)
        }

        async fn create(&self, mut user: User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if users.values().any(|existing| existing.email() == user.email()) {
                return Err(DomainError::conflict(user.email()));
            }

            let mut next_id = self.next_id.write().await;
            *next_id += 1;
            user.set_id(*next_id);

            users.insert(user.id(), user.clone());
            Ok(user)
        }

        async fn update(&self, user: &User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if !users.contains_key(&user.id()) {
                return Err(DomainError::user_not_found(user.id()));
            }

            let email_taken = users
                .values()
                .any(|existing| existing.email() == user.email() && existing.id() != user.id());
            if email_taken {
                return Err(DomainError::conflict(user.email()));
            }

            let stored = users
                .get_mut(&user.id())
                .ok_or_else(|| DomainError::user_not_found(user.id()))?;

            stored.set_first_name(user.first_name());
            stored.set_last_name(user.last_name());
            stored.set_email(user.email());
            stored.set_date_updated(user.date_updated());

            Ok(Self::sanitized(stored))
        }

        async fn delete(&self, id: i64) -> Result<(), DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            users
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| DomainError::user_not_found(id))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::timestamp;

        fn create_test_user(email: &str) -> User {
            let mut user = User::new("Jane", "Doe", email, UserStatus::Active, timestamp::now());
            user.set_password("protected-token");
            user
        }

        #[tokio::test]
        async fn test_create_assigns_id_and_get_hides_password() {
            let repo = InMemoryUserRepository::new();

            let created = repo.create(create_test_user("a@example.com")).await.unwrap();
            assert!(created.id() > 0);

            let retrieved = repo.get(created.id()).await.unwrap();
            assert_eq!(retrieved.email(), "a@example.com");
            assert!(retrieved.password().is_none());
        }

        #[tokio::test]
        async fn test_get_missing_is_not_found() {
            let repo = InMemoryUserRepository::new();
            let err = repo.get(99).await.unwrap_err();
            assert_eq!(err, DomainError::user_not_found(99));
        }

        #[tokio::test]
        async fn test_create_enforces_email_uniqueness() {
            let repo = InMemoryUserRepository::new();
            repo.create(create_test_user("a@example.com")).await.unwrap();

            let err = repo
                .create(create_test_user("a@example.com"))
                .await
                .unwrap_err();
            assert_eq!(err, DomainError::conflict("a@example.com"));
        }

        #[tokio::test]
        async fn test_get_by_email_includes_password() {
            let repo = InMemoryUserRepository::new();
            repo.create(create_test_user("a@example.com")).await.unwrap();

            let retrieved = repo.get_by_email("a@example.com").await.unwrap();
            assert_eq!(retrieved.password(), Some("protected-token"));
        }

        #[tokio::test]
        async fn test_update_touches_only_name_email_and_date() {
            let repo = InMemoryUserRepository::new();
            let created = repo.create(create_test_user("a@example.com")).await.unwrap();

            let mut changes = created.clone();
            changes.set_first_name("Janet");
            changes.set_email("janet@example.com");
            changes.set_date_updated(timestamp::now());
            repo.update(&changes).await.unwrap();

            let stored = repo.get_by_email("janet@example.com").await.unwrap();
            assert_eq!(stored.first_name(), "Janet");
            assert_eq!(stored.date_created(), created.date_created());
            // the stored credential survives an update
            assert_eq!(stored.password(), Some("protected-token"));
        }

        #[tokio::test]
        async fn test_update_missing_is_not_found() {
            let repo = InMemoryUserRepository::new();
            let mut ghost = create_test_user("ghost@example.com");
            ghost.set_id(42);

            let err = repo.update(&ghost).await.unwrap_err();
            assert_eq!(err, DomainError::user_not_found(42));
        }

        #[tokio::test]
        async fn test_delete() {
            let repo = InMemoryUserRepository::new();
            let created = repo.create(create_test_user("a@example.com")).await.unwrap();

            repo.delete(created.id()).await.unwrap();
            assert!(repo.get(created.id()).await.is_err());
        }

        #[tokio::test]
        async fn test_delete_missing_is_not_found() {
            let repo = InMemoryUserRepository::new();
            let err = repo.delete(7).await.unwrap_err();
            assert_eq!(err, DomainError::user_not_found(7));
        }

        #[tokio::test]
        async fn test_find_by_status_empty_is_ok() {
            let repo = InMemoryUserRepository::new();
            let matches = repo.find_by_status(UserStatus::Inactive).await.unwrap();
            assert!(matches.is_empty());
        }

        #[tokio::test]
        async fn test_find_by_status_filters() {
            let repo = InMemoryUserRepository::new();
            repo.create(create_test_user("a@example.com")).await.unwrap();
            repo.create(create_test_user("b@example.com")).await.unwrap();

            let active = repo.find_by_status(UserStatus::Active).await.unwrap();
            assert_eq!(active.len(), 2);
            assert!(active.iter().all(|user| user.password().is_none()));

            let inactive = repo.find_by_status(UserStatus::Inactive).await.unwrap();
            assert!(inactive.is_empty());
        }

        #[tokio::test]
        async fn test_should_fail_surfaces_internal() {
            let repo = InMemoryUserRepository::new();
            repo.set_should_fail(true).await;

            let err = repo.get(1).await.unwrap_err();
            assert_eq!(err, DomainError::Internal);
        }
    }
}
