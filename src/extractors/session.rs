//! Restore the caller's session from an `Authorization: Bearer <token>` header.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::TOKEN_TYPE_BEARER;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// The authenticated user, re-read from the database on every request.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(TOKEN_TYPE_BEARER) && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let user = state.auth.restore(token).await?;
        Ok(CurrentUser(user))
    }
}
