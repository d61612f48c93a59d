use super::Record;
use crate::entity::{EntityDef, CARTS};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A cart is only an identifier row; it has no body to create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    #[schema(example = 1)]
    pub cart_id: i32,
}

impl Record for Cart {
    fn entity() -> &'static EntityDef {
        &CARTS
    }
}
