//! `/auth` handlers: register, login, and the restored session.

use axum::extract::State;
use axum::response::IntoResponse;

use crate::auth::LoginResponse;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::response::{success_one, success_one_ok};
use crate::state::AppState;

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "The created user under `data`", body = User),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth.register(&body).await?;
    Ok(success_one(user))
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token and user under `data`", body = LoginResponse),
        (status = 401, description = "Unknown username or wrong password"),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.auth.login(&body).await?;
    Ok(success_one_ok(session))
}

/// The user behind the bearer token
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The current user under `data`", body = User),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    success_one_ok(user)
}
