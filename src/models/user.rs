use super::Record;
use crate::auth::Password;
use crate::entity::{EntityDef, USERS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Public view of a user row. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = "dominyk@example.com")]
    pub email: String,
    #[schema(example = "Dominyk McNamara")]
    pub name: String,
    #[schema(example = "DominykMcNamara")]
    pub username: String,
}

impl Record for User {
    fn entity() -> &'static EntityDef {
        &USERS
    }
}

/// User row including the stored hash; only produced by credential lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCredentials {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Registration body; also the full-replace body of `PUT /users/{userId}`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    #[schema(example = "dominyk@example.com")]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "name must be 1 to 255 characters"))]
    #[schema(example = "Dominyk McNamara")]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "username must be 1 to 100 characters"))]
    #[schema(example = "DominykMcNamara")]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "HelloWorld123!", min_length = 8)]
    pub password: String,
}

impl RegisterRequest {
    /// Column values for INSERT/UPDATE, with the plaintext replaced by its hash.
    pub fn columns(&self, password: &Password) -> Vec<(&'static str, Value)> {
        vec![
            ("email", Value::from(self.email.clone())),
            ("name", Value::from(self.name.clone())),
            ("username", Value::from(self.username.clone())),
            ("password_hash", Value::from(password.as_str())),
        ]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "DominykMcNamara")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "HelloWorld123!")]
    pub password: String,
}
