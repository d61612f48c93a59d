//! Router assembly.

pub mod common;
pub mod resources;

#[cfg(test)]
mod tests;

pub use common::common_routes;
pub use resources::{auth_routes, cart_routes, order_routes, product_routes, user_routes};

use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The complete application: resource routes, auth, probes and API docs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .nest("/users", user_routes())
        .nest("/product", product_routes())
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
        .nest("/auth", auth_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            // The limit sits outermost: Cors needs a `Default` response body, which the
            // limit's body wrapper is not.
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
