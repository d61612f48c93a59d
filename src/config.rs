//! Process configuration from environment variables (optionally seeded from `.env`).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
/// Upper bound for `JWT_EXPIRATION_HOURS` (one year).
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

#[derive(Clone)]
pub struct DatabaseSettings {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.connect_options.get_host())
            .field("port", &self.connect_options.get_port())
            .field("database", &self.connect_options.get_database())
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct AuthSettings {
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, jwt_expiration_hours: i64) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::WeakSecret(MIN_JWT_SECRET_LENGTH));
        }
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&jwt_expiration_hours) {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_HOURS",
                value: jwt_expiration_hours.to_string(),
            });
        }
        Ok(AuthSettings {
            jwt_secret,
            jwt_expiration_hours,
        })
    }

    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub server_host: String,
    pub server_port: u16,
}

impl Settings {
    /// Load `.env` (if any) then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Every required value is checked here,
    /// so a misconfigured process fails before binding its listener.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let connect_options = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).map_err(|_| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: "<redacted>".into(),
            })?,
            None => {
                let host = get("DBHOST").ok_or(ConfigError::Missing("DBHOST"))?;
                let user = get("DBUSER").ok_or(ConfigError::Missing("DBUSER"))?;
                let database = get("DB").ok_or(ConfigError::Missing("DB"))?;
                let port = parse_or("DBPORT", get("DBPORT"), DEFAULT_DB_PORT)?;
                let mut opts = PgConnectOptions::new()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .database(&database);
                if let Some(password) = get("DBPASSWORD") {
                    opts = opts.password(&password);
                }
                opts
            }
        };

        let database = DatabaseSettings {
            connect_options,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                get("DB_ACQUIRE_TIMEOUT_SECS"),
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?),
        };

        let auth = AuthSettings::new(
            get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            parse_or("JWT_EXPIRATION_HOURS", get("JWT_EXPIRATION_HOURS"), DEFAULT_JWT_EXPIRATION_HOURS)?,
        )?;

        Ok(Settings {
            database,
            auth,
            server_host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), DEFAULT_SERVER_PORT)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}
