//! Resource routers. Each is nested under its collection path by [`crate::routes::app`].

use crate::handlers::{auth, carts, orders, products, users};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// `/users`: list, read, replace, delete. Creation goes through `/auth/register`.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/:userId", get(users::read).put(users::update).delete(users::delete))
}

/// `/product`: full CRUD.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/:productId",
            get(products::read).put(products::update).delete(products::delete),
        )
}

/// `/cart`: carts carry only their identifier, so there is no update.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(carts::list).post(carts::create))
        .route("/:cartId", get(carts::read).delete(carts::delete))
}

/// `/orders`: full CRUD.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route(
            "/:orderId",
            get(orders::read).put(orders::update).delete(orders::delete),
        )
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}
