//! Storefront API: users, products, carts and orders over PostgreSQL, with
//! registration, login and bearer-token sessions.

pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, AppResult, ConfigError};
pub use routes::app;
pub use schema::ensure_tables;
pub use service::CrudService;
pub use state::AppState;
pub use store::{Gateway, PgGateway};
