//! User CRUD endpoints
//!
//! Thin adapters from HTTP to [`UsersService`](rollcall_shared::service::UsersService):
//! path ids are parsed, bodies validated, and the service result is
//! returned as the JSON body without reshaping.
//!
//! # Endpoints
//!
//! - `POST /v1/users` - Create user
//! - `GET /v1/users` - List users
//! - `GET /v1/users/:id` - Get user (`null` when absent)
//! - `PATCH /v1/users/:id` - Update user, returns `[affectedCount, [records]]`
//! - `DELETE /v1/users/:id` - Delete user, returns the deleted count

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use rollcall_shared::models::user::{CreateUser, UpdateResult, UpdateUser, User, UserId};
use serde::Deserialize;
use validator::Validate;

/// Create user request
///
/// Omitted and `null` names both fail `required`, so a request without a
/// first or last name is rejected with 422.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// First name
    #[validate(
        required(message = "firstname is required"),
        length(min = 1, max = 255, message = "firstname must be 1-255 characters")
    )]
    pub firstname: Option<String>,

    /// Last name
    #[validate(
        required(message = "lastname is required"),
        length(min = 1, max = 255, message = "lastname must be 1-255 characters")
    )]
    pub lastname: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    /// Call after `validate`; both names are present by then
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            firstname: req.firstname.unwrap_or_default(),
            lastname: req.lastname.unwrap_or_default(),
        }
    }
}

/// Update user request
///
/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New first name
    #[validate(length(min = 1, max = 255, message = "firstname must be 1-255 characters"))]
    pub firstname: Option<String>,

    /// New last name
    #[validate(length(min = 1, max = 255, message = "lastname must be 1-255 characters"))]
    pub lastname: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateUser {
            firstname: req.firstname,
            lastname: req.lastname,
        }
    }
}

/// Parses a user id from its path segment
///
/// Non-numeric or out-of-range ids are rejected instead of being coerced.
pub fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    raw.parse::<UserId>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid user id: {}", raw)))
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /v1/users
/// Content-Type: application/json
///
/// { "firstname": "John", "lastname": "Doe" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "id": 1, "firstname": "John", "lastname": "Doe" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed JSON
/// - `422 Unprocessable Entity`: Missing or empty names
/// - `500 Internal Server Error`: Store failure
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(req) = payload?;
    req.validate()?;

    let user = state.users.create(req.into()).await?;

    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users
///
/// # Endpoint
///
/// ```text
/// GET /v1/users
/// ```
///
/// # Response
///
/// ```json
/// [{ "id": 1, "firstname": "John", "lastname": "Doe" }]
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.find_all().await?;
    Ok(Json(users))
}

/// Get user
///
/// Returns `null` with `200 OK` when no user has the id.
///
/// # Errors
///
/// - `400 Bad Request`: Non-numeric id
/// - `500 Internal Server Error`: Store failure
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<User>>> {
    let id = parse_user_id(&id)?;
    let user = state.users.find_one(id).await?;

    tracing::debug!(user_id = id, found = user.is_some(), "User lookup");
    Ok(Json(user))
}

/// Update user
///
/// # Endpoint
///
/// ```text
/// PATCH /v1/users/1
/// Content-Type: application/json
///
/// { "firstname": "Jane" }
/// ```
///
/// # Response
///
/// ```json
/// [1, [{ "id": 1, "firstname": "Jane", "lastname": "Doe" }]]
/// ```
///
/// An unknown id yields `[0, []]`.
///
/// # Errors
///
/// - `400 Bad Request`: Non-numeric id or malformed JSON
/// - `422 Unprocessable Entity`: Empty names
/// - `500 Internal Server Error`: Store failure
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_user_id(&id)?;
    let Json(req) = payload?;
    req.validate()?;

    let result = state.users.update(id, req.into()).await?;

    tracing::info!(user_id = id, affected = result.0, "User update applied");
    Ok(Json(result))
}

/// Delete user
///
/// Returns the number of deleted rows: `1`, or `0` for an unknown id.
///
/// # Errors
///
/// - `400 Bad Request`: Non-numeric id
/// - `500 Internal Server Error`: Store failure
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<u64>> {
    let id = parse_user_id(&id)?;
    let deleted = state.users.remove(id).await?;

    tracing::info!(user_id = id, deleted, "User delete applied");
    Ok(Json(deleted))
}
