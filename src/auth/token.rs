//! Signed, expiring session tokens (HS256 JWT). The user id is the only claim the
//! server trusts; everything else about the user is re-read on restore.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AuthSettings;
use crate::error::{AppError, AppResult};
use crate::models::User;

pub const TOKEN_TYPE_BEARER: &str = "Bearer";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user id, as a string per RFC 7519.
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires.
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: User,
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl SessionKeys {
    pub fn new(settings: &AuthSettings) -> Self {
        SessionKeys {
            encoding: EncodingKey::from_secret(settings.jwt_secret_bytes()),
            decoding: DecodingKey::from_secret(settings.jwt_secret_bytes()),
            ttl_hours: settings.jwt_expiration_hours,
        }
    }

    /// Serialize a session: sign a token naming the user.
    pub fn issue(&self, user: User) -> AppResult<LoginResponse> {
        let now = Utc::now();
        let ttl = Duration::try_hours(self.ttl_hours)
            .ok_or_else(|| AppError::Internal(format!("token lifetime of {}h is out of range", self.ttl_hours)))?;
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal("token expiry overflows the calendar".into()))?;
        let claims = Claims {
            sub: user.user_id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let access_token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: ttl.num_seconds(),
            user,
        })
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
