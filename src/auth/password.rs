//! Argon2id password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, AppResult};

/// Valid Argon2id PHC string that matches no real password; verified against when a
/// username is unknown so both paths cost the same.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$Zx7aF6yC7rGk5a3y0Mt0Zq4rVq5hF3xN1ZyqUu0s9eM";

#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password").field("hash", &"[REDACTED]").finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh random salt.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("password hash failed: {}", e)))?;
        Ok(Password { hash: hash.to_string() })
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Password { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// False for a mismatch and for a malformed stored hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            tracing::warn!("stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default().verify_password(plain_text.as_bytes(), &parsed).is_ok()
    }

    /// Spend one verification on a hash nobody owns.
    pub fn verify_dummy(plain_text: &str) {
        let _ = Password::from_hash(DUMMY_HASH.to_string()).verify(plain_text);
    }

    /// [`Password::new`] on the blocking pool. Request handlers use this form.
    pub async fn hash(plain_text: &str) -> AppResult<Self> {
        let plain_text = plain_text.to_string();
        off_worker(move || Password::new(&plain_text)).await?
    }

    /// [`Password::verify`] on the blocking pool.
    pub async fn check(&self, plain_text: &str) -> AppResult<bool> {
        let (password, plain_text) = (self.clone(), plain_text.to_string());
        off_worker(move || password.verify(&plain_text)).await
    }

    /// [`Password::verify_dummy`] on the blocking pool.
    pub async fn check_dummy(plain_text: &str) -> AppResult<()> {
        let plain_text = plain_text.to_string();
        off_worker(move || Password::verify_dummy(&plain_text)).await
    }
}

/// Argon2 costs tens of milliseconds of CPU; keep it off the async workers.
async fn off_worker<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("password task failed: {}", e)))
}
