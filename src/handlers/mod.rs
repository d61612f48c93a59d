//! HTTP handlers, one module per resource plus authentication.

pub mod auth;
pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

use crate::error::AppError;

/// Path identifiers are 32-bit integers (SERIAL columns).
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

fn not_found(label: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} {} does not exist", label.to_lowercase(), id))
}
