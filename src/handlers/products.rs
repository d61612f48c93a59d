//! `/product` handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::{not_found, parse_id};
use crate::entity::PRODUCTS;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::models::{Changeset, Product, ProductRequest};
use crate::response::{deleted, success_many, success_one, success_one_ok, DeleteOutcome};
use crate::service::CrudService;
use crate::state::AppState;

/// List all products
#[utoipa::path(
    get,
    path = "/product",
    tag = "Products",
    responses((status = 200, description = "All products under `data`, count under `meta`", body = Vec<Product>))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<Product>(state.db()).await?;
    Ok(success_many(rows))
}

/// Retrieve a single product
#[utoipa::path(
    get,
    path = "/product/{productId}",
    tag = "Products",
    params(("productId" = i32, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The product under `data`", body = Product),
        (status = 404, description = "No product with this id")
    )
)]
pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::read::<Product>(state.db(), id)
        .await?
        .ok_or_else(|| not_found(PRODUCTS.label, id))?;
    Ok(success_one_ok(row))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/product",
    tag = "Products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "The created product under `data`", body = Product),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row: Product = CrudService::create(state.db(), &body.columns()).await?;
    Ok(success_one(row))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/product/{productId}",
    tag = "Products",
    params(("productId" = i32, Path, description = "Product identifier")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "The updated product under `data`", body = Product),
        (status = 404, description = "No product with this id"),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidatedJson(body): ValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::update::<Product>(state.db(), id, &body.columns())
        .await?
        .ok_or_else(|| not_found(PRODUCTS.label, id))?;
    Ok(success_one_ok(row))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/product/{productId}",
    tag = "Products",
    params(("productId" = i32, Path, description = "Product identifier")),
    responses((status = 200, description = "Deleted; `affected` is 0 when the id did not exist", body = DeleteOutcome))
)]
pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let affected = CrudService::delete(state.db(), &PRODUCTS, id).await?;
    Ok(deleted(PRODUCTS.label, affected))
}
