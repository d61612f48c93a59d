use super::{Changeset, Record};
use crate::entity::{EntityDef, ORDERS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[schema(example = 1)]
    pub order_id: i32,
    /// true while the order is active.
    #[schema(example = true)]
    pub status: bool,
    #[schema(example = 24.99)]
    pub total: f64,
    /// Informational reference to a user; not enforced by the database.
    #[schema(example = 1)]
    pub user_id: i32,
}

impl Record for Order {
    fn entity() -> &'static EntityDef {
        &ORDERS
    }
}

/// Body for creating or replacing an order. The total is taken as given.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OrderRequest {
    #[schema(example = true)]
    pub status: bool,
    #[validate(range(min = 0.0, message = "total must not be negative"))]
    #[schema(example = 24.99)]
    pub total: f64,
    #[validate(range(min = 1, message = "user_id must be a positive id"))]
    #[schema(example = 1)]
    pub user_id: i32,
}

impl Changeset for OrderRequest {
    fn columns(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("status", Value::from(self.status)),
            ("total", Value::from(self.total)),
            ("user_id", Value::from(self.user_id)),
        ]
    }
}
