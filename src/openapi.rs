//! OpenAPI document served at `/api-docs/openapi.json`, browsable under `/swagger-ui`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::LoginResponse;
use crate::handlers::{auth, carts, orders, products, users};
use crate::models::{Cart, LoginRequest, Order, OrderRequest, Product, ProductRequest, RegisterRequest, User};
use crate::response::{DeleteOutcome, MetaCount};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Users, products, carts and orders backed by PostgreSQL. \
                       Successful bodies are wrapped as `{\"data\": ...}`; lists add `{\"meta\": {\"count\": n}}`."
    ),
    paths(
        auth::register,
        auth::login,
        auth::me,
        users::list,
        users::read,
        users::update,
        users::delete,
        products::list,
        products::read,
        products::create,
        products::update,
        products::delete,
        carts::list,
        carts::read,
        carts::create,
        carts::delete,
        orders::list,
        orders::read,
        orders::create,
        orders::update,
        orders::delete,
    ),
    components(schemas(
        User,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        Product,
        ProductRequest,
        Cart,
        Order,
        OrderRequest,
        DeleteOutcome,
        MetaCount,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and session restore"),
        (name = "Users", description = "User accounts"),
        (name = "Products", description = "Product catalogue"),
        (name = "Cart", description = "Shopping carts"),
        (name = "Orders", description = "Customer orders")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/register",
            "/auth/login",
            "/auth/me",
            "/users",
            "/users/{userId}",
            "/product",
            "/product/{productId}",
            "/cart",
            "/cart/{cartId}",
            "/orders",
            "/orders/{orderId}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("Product"));
    }
}
