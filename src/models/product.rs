use super::{Changeset, Record};
use crate::entity::{EntityDef, PRODUCTS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub product_id: i32,
    #[schema(example = "Tomato")]
    pub name: String,
    #[schema(example = "Farm fresh")]
    pub description: String,
    #[schema(example = 1.0)]
    pub price: f64,
}

impl Record for Product {
    fn entity() -> &'static EntityDef {
        &PRODUCTS
    }
}

/// Body for creating or replacing a product.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1 to 255 characters"))]
    #[schema(example = "Tomato")]
    pub name: String,
    #[schema(example = "Farm fresh")]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    #[schema(example = 1.0)]
    pub price: f64,
}

impl Changeset for ProductRequest {
    fn columns(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("description", Value::from(self.description.clone())),
            ("price", Value::from(self.price)),
        ]
    }
}
