use super::*;
use crate::auth::{Password, SessionKeys};
use crate::config::AuthSettings;
use crate::error::AppError;
use crate::models::User;
use crate::store::MockGateway;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const SECRET: &str = "router-test-secret-at-least-32-bytes!!";

fn router(gw: MockGateway) -> Router {
    let auth = AuthSettings::new(SECRET, 1).unwrap();
    app(AppState::new(Arc::new(gw), &auth))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

async fn dispatch(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn keys() -> SessionKeys {
    SessionKeys::new(&AuthSettings::new(SECRET, 1).unwrap())
}

fn user_row(id: i32) -> Value {
    json!({"user_id": id, "email": "dom@example.com", "name": "Dom", "username": "dom"})
}

fn register_body() -> Value {
    json!({"email": "dom@example.com", "name": "Dom", "username": "dom", "password": "HelloWorld123!"})
}

fn product_row(id: i32) -> Value {
    json!({"product_id": id, "name": "Lamp", "description": "Desk lamp", "price": 19.99})
}

#[tokio::test]
async fn health_needs_no_database() {
    let (status, body) = send(router(MockGateway::new()), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn ready_reports_unreachable_database() {
    let mut gw = MockGateway::new();
    gw.expect_ping()
        .times(1)
        .returning(|| Err(AppError::Unavailable("pool timed out".into())));
    let (status, body) = send(router(gw), Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, _| sql.contains(r#"FROM "product""#))
        .times(1)
        .returning(|_, _| Ok(vec![]));
    let (status, body) = send(router(gw), Method::GET, "/product", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["count"], 0);
}

#[tokio::test]
async fn cart_lookup_binds_the_path_id() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| sql.contains(r#"FROM "cart" WHERE "cart_id""#) && params.to_vec() == vec![json!(7)])
        .times(1)
        .returning(|_, _| Ok(vec![json!({"cart_id": 7})]));
    let (status, body) = send(router(gw), Method::GET, "/cart/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"cart_id": 7}));
}

#[tokio::test]
async fn order_lookup_binds_the_path_id() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| {
            sql.contains(r#"FROM "orders" WHERE "order_id""#) && params.to_vec() == vec![json!(9)]
        })
        .times(1)
        .returning(|_, _| Ok(vec![json!({"order_id": 9, "status": true, "total": 42.5, "user_id": 1})]));
    let (status, body) = send(router(gw), Method::GET, "/orders/9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_id"], 9);
    assert_eq!(body["data"]["total"], 42.5);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let mut gw = MockGateway::new();
    gw.expect_query().times(1).returning(|_, _| Ok(vec![]));
    let (status, body) = send(router(gw), Method::GET, "/product/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (status, body) = send(router(MockGateway::new()), Method::GET, "/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn create_product_returns_created_row() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| {
            sql.starts_with(r#"INSERT INTO "product""#)
                && params.to_vec() == vec![json!("Lamp"), json!("Desk lamp"), json!(19.99)]
        })
        .times(1)
        .returning(|_, _| Ok(vec![product_row(1)]));
    let body = json!({"name": "Lamp", "description": "Desk lamp", "price": 19.99});
    let (status, body) = send(router(gw), Method::POST, "/product", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"], product_row(1));
}

#[tokio::test]
async fn create_product_without_price_never_reaches_database() {
    let body = json!({"name": "Lamp", "description": "Desk lamp"});
    let (status, body) = send(router(MockGateway::new()), Method::POST, "/product", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let body = json!({"name": "Lamp", "description": "", "price": -1.0});
    let (status, _) = send(router(MockGateway::new()), Method::PUT, "/product/1", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_of_missing_order_is_not_found() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| sql.starts_with(r#"UPDATE "orders""#) && params.to_vec().last() == Some(&json!(3)))
        .times(1)
        .returning(|_, _| Ok(vec![]));
    let body = json!({"status": false, "total": 10.0, "user_id": 1});
    let (status, _) = send(router(gw), Method::PUT, "/orders/3", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_reports_affected_rows() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, _| sql.starts_with(r#"DELETE FROM "orders""#))
        .times(1)
        .returning(|_, _| Ok(vec![]));
    let (status, body) = send(router(gw), Method::DELETE, "/orders/12", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["affected"], 0);
    assert_eq!(body["data"]["message"], "Order successfully deleted");
}

#[tokio::test]
async fn carts_and_users_expose_no_extra_methods() {
    let (status, _) = send(router(MockGateway::new()), Method::PUT, "/cart/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = send(router(MockGateway::new()), Method::POST, "/users", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn user_reads_never_select_the_password_hash() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, _| sql.contains(r#"FROM "users""#) && !sql.contains("password_hash"))
        .times(1)
        .returning(|_, _| {
            Ok(vec![json!({"user_id": 1, "email": "a@b.co", "name": "A", "username": "a"})])
        });
    let (status, body) = send(router(gw), Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn unknown_username_is_invalid_credentials() {
    let mut gw = MockGateway::new();
    gw.expect_query().times(1).returning(|_, _| Ok(vec![]));
    let body = json!({"username": "ghost", "password": "whatever123"});
    let (status, body) = send(router(gw), Method::POST, "/auth/login", Some(body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_credentials");
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let (status, body) = send(router(MockGateway::new()), Method::GET, "/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn oversized_body_is_rejected_before_parsing() {
    let padding = "x".repeat(MAX_BODY_BYTES + 1);
    let payload = json!({"name": padding, "description": "", "price": 1.0}).to_string();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/product")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();
    let response = router(MockGateway::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(router(MockGateway::new()), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/product/{productId}").is_some());
}

#[tokio::test]
async fn streamed_oversized_body_is_payload_too_large() {
    // no Content-Length, so the limit trips while the body is buffered
    let padding = "x".repeat(MAX_BODY_BYTES + 1);
    let body = json!({"name": padding, "description": "", "price": 1.0});
    let (status, body) = send(router(MockGateway::new()), Method::POST, "/product", Some(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");
}

#[tokio::test]
async fn body_without_json_content_type_is_unsupported() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/orders")
        .body(Body::from(json!({"status": true, "total": 1.0, "user_id": 1}).to_string()))
        .unwrap();
    let (status, body) = dispatch(router(MockGateway::new()), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"]["code"], "unsupported_media_type");
}

#[tokio::test]
async fn register_stores_a_hash_and_returns_created_user() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| {
            let params = params.to_vec();
            sql.starts_with(r#"INSERT INTO "users""#)
                && params.len() == 4
                && params[3].as_str().is_some_and(|h| h.starts_with("$argon2id$"))
                && !params.contains(&json!("HelloWorld123!"))
        })
        .times(1)
        .returning(|_, _| Ok(vec![user_row(1)]));
    let (status, body) = send(router(gw), Method::POST, "/auth/register", Some(register_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"], user_row(1));
}

#[tokio::test]
async fn login_issues_a_token_for_the_user() {
    let hash = Password::new("HelloWorld123!").unwrap().as_str().to_string();
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| sql.contains(r#"FROM "users" WHERE "username""#) && params.to_vec() == vec![json!("dom")])
        .times(1)
        .returning(move |_, _| {
            let mut row = user_row(5);
            row["password_hash"] = json!(hash);
            Ok(vec![row])
        });
    let body = json!({"username": "dom", "password": "HelloWorld123!"});
    let (status, body) = send(router(gw), Method::POST, "/auth/login", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"], user_row(5));
    let token = body["data"]["access_token"].as_str().unwrap();
    assert_eq!(keys().verify(token).unwrap().user_id().unwrap(), 5);
}

#[tokio::test]
async fn me_restores_the_user_behind_the_token() {
    let user: User = serde_json::from_value(user_row(5)).unwrap();
    let token = keys().issue(user).unwrap().access_token;
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| sql.contains(r#"FROM "users" WHERE "user_id""#) && params.to_vec() == vec![json!(5)])
        .times(1)
        .returning(|_, _| Ok(vec![user_row(5)]));
    let request = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = dispatch(router(gw), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], user_row(5));
}

#[tokio::test]
async fn user_update_rehashes_the_password() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .withf(|sql, params| {
            let params = params.to_vec();
            sql.starts_with(r#"UPDATE "users""#)
                && params.len() == 5
                && params[3].as_str().is_some_and(|h| h.starts_with("$argon2id$"))
                && !params.contains(&json!("HelloWorld123!"))
                && params[4] == json!(4)
        })
        .times(1)
        .returning(|_, _| Ok(vec![user_row(4)]));
    let (status, body) = send(router(gw), Method::PUT, "/users/4", Some(register_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], user_row(4));
}

#[tokio::test]
async fn user_update_of_missing_id_is_not_found() {
    let mut gw = MockGateway::new();
    gw.expect_query().times(1).returning(|_, _| Ok(vec![]));
    let (status, _) = send(router(gw), Method::PUT, "/users/40", Some(register_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_update_to_a_taken_username_is_conflict() {
    let mut gw = MockGateway::new();
    gw.expect_query()
        .times(1)
        .returning(|_, _| Err(AppError::Conflict("the request conflicts with an existing row".into())));
    let (status, body) = send(router(gw), Method::PUT, "/users/4", Some(register_body())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "conflict: username 'dom' is already taken");
}

#[tokio::test]
async fn created_order_appears_in_the_listing() {
    let stored: Arc<Mutex<Vec<Value>>> = Arc::default();
    let mut gw = MockGateway::new();
    let inserts = stored.clone();
    gw.expect_query()
        .withf(|sql, _| sql.starts_with(r#"INSERT INTO "orders""#))
        .times(1)
        .returning(move |_, params| {
            let mut rows = inserts.lock().unwrap();
            let row = json!({
                "order_id": rows.len() + 1,
                "status": params[0],
                "total": params[1],
                "user_id": params[2]
            });
            rows.push(row.clone());
            Ok(vec![row])
        });
    let listing = stored.clone();
    gw.expect_query()
        .withf(|sql, _| sql.contains(r#"FROM "orders" ORDER BY"#))
        .times(1)
        .returning(move |_, _| Ok(listing.lock().unwrap().clone()));
    let app = router(gw);

    let body = json!({"status": true, "total": 30.5, "user_id": 2});
    let (status, created) = send(app.clone(), Method::POST, "/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = send(app, Method::GET, "/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["meta"]["count"], 1);
    assert_eq!(listed["data"][0], created["data"]);
    assert_eq!(listed["data"][0]["total"], 30.5);
}
