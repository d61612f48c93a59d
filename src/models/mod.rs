//! Typed rows and validated request bodies for each resource.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::Cart;
pub use order::{Order, OrderRequest};
pub use product::{Product, ProductRequest};
pub use user::{LoginRequest, RegisterRequest, User, UserCredentials};

use crate::entity::EntityDef;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A row type backed by one table.
pub trait Record: DeserializeOwned + Serialize + Send {
    fn entity() -> &'static EntityDef;
}

/// A request body that writes every mutable column of its table.
pub trait Changeset {
    fn columns(&self) -> Vec<(&'static str, Value)>;
}
