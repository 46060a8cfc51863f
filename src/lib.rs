//! PMP Users API
//!
//! A REST service for managing user accounts backed by PostgreSQL:
//! - User CRUD plus search by account status
//! - Reversible credential protection with AES-256-GCM
//! - Login verification against stored credentials

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use api::state::AppState;
use infrastructure::user::{AesGcmProtector, PostgresUserRepository, UserService};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.security.passphrase.is_empty() {
        warn!(
            "No security passphrase configured. Stored credentials will be \
            protected with an empty passphrase. Set APP__SECURITY__PASSPHRASE \
            or config/local.toml before exposing this service."
        );
    }

    info!("Connecting to PostgreSQL...");
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
    info!("Successfully connected to the Users database.");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let protector = Arc::new(AesGcmProtector::new(&config.security.passphrase));
    let user_service: Arc<dyn api::state::UserServiceTrait> =
        Arc::new(UserService::new(user_repository, protector));

    Ok(AppState::new(user_service))
}
