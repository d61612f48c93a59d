//! Registration, credential verification, login and session restore.

use std::sync::Arc;

use serde_json::Value;

use super::password::Password;
use super::token::{LoginResponse, SessionKeys};
use crate::entity::USERS;
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, RegisterRequest, User, UserCredentials};
use crate::service::CrudService;
use crate::sql::Projection;
use crate::store::Gateway;

pub struct AuthService {
    gateway: Arc<dyn Gateway>,
    keys: SessionKeys,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn Gateway>, keys: SessionKeys) -> Self {
        AuthService { gateway, keys }
    }

    /// Insert a user with a hashed password. A taken username surfaces as a conflict.
    pub async fn register(&self, req: &RegisterRequest) -> AppResult<User> {
        let password = Password::hash(&req.password).await?;
        let user: User = CrudService::create(&*self.gateway, &req.columns(&password))
            .await
            .map_err(|e| username_taken(e, &req.username))?;
        tracing::info!(user_id = user.user_id, "user registered");
        Ok(user)
    }

    /// Users whose username matches and whose stored hash verifies. An unknown user or a
    /// wrong password is an empty result, not an error.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Vec<User>> {
        let candidates: Vec<UserCredentials> = CrudService::find_by(
            &*self.gateway,
            &USERS,
            &[("username", Value::from(username))],
            Projection::WithSensitive,
        )
        .await?;
        if candidates.is_empty() {
            Password::check_dummy(password).await?;
            return Ok(Vec::new());
        }
        let mut users = Vec::with_capacity(candidates.len());
        for c in candidates {
            if Password::from_hash(c.password_hash).check(password).await? {
                users.push(c.user);
            }
        }
        Ok(users)
    }

    /// Verify credentials and issue a session token for the matching user.
    pub async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .verify_credentials(&req.username, &req.password)
            .await?
            .into_iter()
            .next()
            .ok_or(AppError::InvalidCredentials)?;
        tracing::info!(user_id = user.user_id, "login succeeded");
        self.keys.issue(user)
    }

    /// Restore a session from a bearer token: the signature and expiry must hold and the
    /// user must still exist.
    pub async fn restore(&self, token: &str) -> AppResult<User> {
        let claims = self.keys.verify(token)?;
        let user_id = claims.user_id()?;
        CrudService::read::<User>(&*self.gateway, user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

/// `username` is the only unique column users have, so any constraint conflict on a user
/// write is reported as a taken username.
pub(crate) fn username_taken(e: AppError, username: &str) -> AppError {
    match e {
        AppError::Conflict(_) => AppError::Conflict(format!("username '{}' is already taken", username)),
        other => other,
    }
}
