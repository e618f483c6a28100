//! JSON handlers for the user resource.
//!
//! Bodies are taken as raw `serde_json::Value` and deserialized with
//! `serde_json::from_value`, so a missing required key becomes a 400 with the
//! serde message in the `error` field rather than a framework rejection.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;

use rolodex_core::UserId;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User, UserPatch};
use crate::state::AppState;

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// List all users.
///
/// GET /api/users
///
/// # Errors
///
/// Returns `AppError::Storage` if the query fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.db()).list().await?;
    Ok(Json(users))
}

/// Get a user by id.
///
/// GET /api/users/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no row matches.
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<User>> {
    let user = UserRepository::new(state.db())
        .get(UserId::new(id))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

/// Create a user. The store assigns the id.
///
/// POST /api/users/add
///
/// # Errors
///
/// Returns `AppError::Validation` if required fields are absent,
/// `AppError::Storage` on constraint violation or backend failure.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<User>)> {
    let new_user: NewUser =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;

    let user = UserRepository::new(state.db()).create(&new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Full update: overwrite all five mutable fields for the submitted id.
///
/// PUT /api/users/update
///
/// Succeeds with the submitted object even when no row matches the id; the
/// row-affected count is deliberately not checked.
///
/// # Errors
///
/// Returns `AppError::Validation` if required fields (including `user_id`)
/// are absent, `AppError::Storage` if the statement fails.
pub async fn update(State(state): State<AppState>, Json(body): Json<Value>) -> Result<Json<User>> {
    let user: User =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;

    UserRepository::new(state.db()).replace(&user).await?;
    Ok(Json(user))
}

/// Partial update: apply only the supplied fields, then re-read the row.
///
/// PATCH /api/users/patch/{id}
///
/// # Errors
///
/// Returns `AppError::Validation` if the field set is empty,
/// `AppError::NotFound` if no row exists for the id after the update.
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<User>> {
    let fields: UserPatch =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;

    if fields.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }

    let user = UserRepository::new(state.db())
        .patch(UserId::new(id), &fields)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

/// Delete a user by id.
///
/// DELETE /api/users/delete/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if zero rows were affected.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let deleted = UserRepository::new(state.db()).delete(UserId::new(id)).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
    }))
}
