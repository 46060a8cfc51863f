//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::error;

use crate::domain::DomainError;
use crate::domain::timestamp;
use crate::domain::user::{User, UserRepository, UserStatus};

/// PostgreSQL implementation of `UserRepository`. All SQL lives here; the
/// pool is injected at construction. Timestamps are stored as fixed-format
/// strings, and the password column is only read by the login lookup.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: i64) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, status, date_created, date_updated
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            error!(error = %err, user_id = id, "failed to query user by id");
            DomainError::Internal
        })?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::user_not_found(id)),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, status, password, date_created, date_updated
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            error!(error = %err, "failed to query user by email");
            DomainError::Internal
        })?;

        match row {
            Some(row) => {
                let mut user = row_to_user(&row)?;
                user.set_password(row.get::<String, _>("password"));
                Ok(user)
            }
            None => Err(DomainError::not_found(format!(
                "User with email {email} was not found"
            ))),
        }
    }

    async fn find_by_status(&self, status: UserStatus) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, status, date_created, date_updated
            FROM users
            WHERE status = $1
            ORDER BY id
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            error!(error = %err, status = %status, "failed to query users by status");
            DomainError::Internal
        })?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(row_to_user(&row)?);
        }

        Ok(users)
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, email, status, password,
                               date_created, date_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email())
        .bind(user.status().as_str())
        .bind(user.password().unwrap_or_default())
        .bind(timestamp::format(&user.date_created()))
        .bind(timestamp::format(&user.date_updated()))
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_email_unique_violation(&err) {
                DomainError::conflict(user.email())
            } else {
                error!(error = %err, "failed to insert user");
                DomainError::Internal
            }
        })?;

        user.set_id(id);
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, date_updated = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email())
        .bind(timestamp::format(&user.date_updated()))
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_email_unique_violation(&err) {
                DomainError::conflict(user.email())
            } else {
                error!(error = %err, user_id = user.id(), "failed to update user");
                DomainError::Internal
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found(user.id()));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                error!(error = %err, user_id = id, "failed to delete user");
                DomainError::Internal
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found(id));
        }

        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let status_raw: String = row.get("status");
    let status = UserStatus::parse(&status_raw).map_err(|_| {
        error!(status = %status_raw, "unrecognized status value in store");
        DomainError::Internal
    })?;

    let date_created = parse_timestamp(row.get("date_created"))?;
    let date_updated = parse_timestamp(row.get("date_updated"))?;

    let mut user = User::new(
        row.get::<String, _>("first_name"),
        row.get::<String, _>("last_name"),
        row.get::<String, _>("email"),
        status,
        date_created,
    );
    user.set_id(row.get("id"));
    user.set_date_updated(date_updated);

    Ok(user)
}

fn parse_timestamp(raw: String) -> Result<DateTime<Utc>, DomainError> {
    timestamp::parse(&raw).map_err(|err| {
        error!(error = %err, value = %raw, "malformed timestamp in store");
        DomainError::Internal
    })
}

/// True when the driver reports a duplicate-key violation of the email
/// uniqueness constraint.
fn is_email_unique_violation(err: &sqlx::Error) -> bool {
    let Some(db_err) = err.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    match db_err.constraint() {
        Some(name) => name.contains("email"),
        None => mentions_email_unique(db_err.message()),
    }
}

/// Fallback shim for drivers that flag a unique violation without naming the
/// constraint: classify by the violation message instead. Keep this the only
/// place that inspects driver message text.
fn mentions_email_unique(message: &str) -> bool {
    message.contains("email")
}
