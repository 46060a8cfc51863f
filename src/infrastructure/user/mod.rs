//! Account infrastructure: credential protection, the Postgres-backed
//! store and the service that wires them together.

mod password;
mod postgres_repository;
mod service;

pub use password::{
    AesGcmProtector, PasswordProtector, generate_password, verify_password_strength,
};
pub use postgres_repository::PostgresUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
