//! Account endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, RestMessage};
use crate::domain::{Login, User};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Fixed message for a path parameter that is not a numeric id.
pub const INVALID_USER_ID_MESSAGE: &str = "invalid user id";

/// Account payload accepted by the create and update endpoints. Every field
/// is optional on the wire; the service decides which blanks matter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub password: String,
}

/// Query parameters for the account search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub status: String,
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<RestMessage>), ApiError> {
    debug!(email = %payload.email, "creating user");

    let request = CreateUserRequest {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        status: payload.status,
        password: payload.password,
    };

    let user = state
        .user_service
        .create(request)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(RestMessage::new(format!(
            "User with id {} was created",
            user.id()
        ))),
    ))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    debug!(user_id, "getting user");

    let user = state
        .user_service
        .get(user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(user))
}

/// GET /users/search
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    debug!(status = %params.status, "searching users by status");

    let users = state
        .user_service
        .find_by_status(&params.status)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(users))
}

/// PUT /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<RestMessage>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    debug!(user_id, "updating user");

    let request = UpdateUserRequest {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
    };

    state
        .user_service
        .update(user_id, request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(RestMessage::new(format!(
        "User with id {user_id} was updated"
    ))))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RestMessage>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    debug!(user_id, "deleting user");

    state
        .user_service
        .delete(user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(RestMessage::new(format!(
        "User with id {user_id} was deleted"
    ))))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(login): Json<Login>,
) -> Result<Json<User>, ApiError> {
    debug!("processing login request");

    let user = state
        .user_service
        .login(login)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(user))
}

/// The id segment must be a well-formed integer before it reaches the
/// service; anything else gets the fixed message.
fn parse_user_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        info!("{}", INVALID_USER_ID_MESSAGE);
        ApiError::bad_request(INVALID_USER_ID_MESSAGE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_payload_deserialization() {
        let json = r#"{
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane.doe@example.com",
            "status": "active",
            "password": "Sup3r Secret#24"
        }"#;

        let payload: UserPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.first_name, "Jane");
        assert_eq!(payload.last_name, "Doe");
        assert_eq!(payload.email, "jane.doe@example.com");
        assert_eq!(payload.status, "active");
        assert_eq!(payload.password, "Sup3r Secret#24");
    }

    #[test]
    fn test_user_payload_defaults_missing_fields() {
        let json = r#"{"firstName": "Jane"}"#;

        let payload: UserPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.first_name, "Jane");
        assert_eq!(payload.last_name, "");
        assert_eq!(payload.email, "");
        assert_eq!(payload.status, "");
        assert_eq!(payload.password, "");
    }

    #[test]
    fn test_search_params_default_to_blank_status() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.status, "");
    }

    #[test]
    fn test_parse_user_id_accepts_integers() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert_eq!(parse_user_id("-3").unwrap(), -3);
    }

    #[test]
    fn test_parse_user_id_rejects_garbage() {
        for raw in ["abc", "12.5", "", "9999999999999999999999999"] {
            let err = parse_user_id(raw).unwrap_err();
            assert_eq!(err.status, 400);
            assert_eq!(err.message, INVALID_USER_ID_MESSAGE);
        }
    }
}
