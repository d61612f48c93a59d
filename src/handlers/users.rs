//! `/users` handlers. Users are created through `/auth/register`.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::{not_found, parse_id};
use crate::auth::{username_taken, Password};
use crate::entity::USERS;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::models::{RegisterRequest, User};
use crate::response::{deleted, success_many, success_one_ok, DeleteOutcome};
use crate::service::CrudService;
use crate::state::AppState;

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "All users under `data`, count under `meta`", body = Vec<User>))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<User>(state.db()).await?;
    Ok(success_many(rows))
}

/// Retrieve a single user
#[utoipa::path(
    get,
    path = "/users/{userId}",
    tag = "Users",
    params(("userId" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user under `data`", body = User),
        (status = 404, description = "No user with this id")
    )
)]
pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::read::<User>(state.db(), id)
        .await?
        .ok_or_else(|| not_found(USERS.label, id))?;
    Ok(success_one_ok(row))
}

/// Replace a user's information; the new password is hashed
#[utoipa::path(
    put,
    path = "/users/{userId}",
    tag = "Users",
    params(("userId" = i32, Path, description = "User identifier")),
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "The updated user under `data`", body = User),
        (status = 404, description = "No user with this id"),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let password = Password::hash(&body.password).await?;
    let row = CrudService::update::<User>(state.db(), id, &body.columns(&password))
        .await
        .map_err(|e| username_taken(e, &body.username))?
        .ok_or_else(|| not_found(USERS.label, id))?;
    Ok(success_one_ok(row))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{userId}",
    tag = "Users",
    params(("userId" = i32, Path, description = "User identifier")),
    responses((status = 200, description = "Deleted; `affected` is 0 when the id did not exist", body = DeleteOutcome))
)]
pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let affected = CrudService::delete(state.db(), &USERS, id).await?;
    Ok(deleted(USERS.label, affected))
}
