//! Credential hashing, session tokens and the authentication service.

pub mod password;
pub mod service;
pub mod token;

pub use password::Password;
pub use service::AuthService;
pub(crate) use service::username_taken;
pub use token::{Claims, LoginResponse, SessionKeys, TOKEN_TYPE_BEARER};
