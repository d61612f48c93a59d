//! `/cart` handlers. Carts have no body and no update route.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::{not_found, parse_id};
use crate::entity::CARTS;
use crate::error::AppError;
use crate::models::Cart;
use crate::response::{deleted, success_many, success_one, success_one_ok, DeleteOutcome};
use crate::service::CrudService;
use crate::state::AppState;

/// List all carts
#[utoipa::path(
    get,
    path = "/cart",
    tag = "Cart",
    responses((status = 200, description = "All carts under `data`, count under `meta`", body = Vec<Cart>))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<Cart>(state.db()).await?;
    Ok(success_many(rows))
}

/// Retrieve a single cart
#[utoipa::path(
    get,
    path = "/cart/{cartId}",
    tag = "Cart",
    params(("cartId" = i32, Path, description = "Cart identifier")),
    responses(
        (status = 200, description = "The cart under `data`", body = Cart),
        (status = 404, description = "No cart with this id")
    )
)]
pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::read::<Cart>(state.db(), id)
        .await?
        .ok_or_else(|| not_found(CARTS.label, id))?;
    Ok(success_one_ok(row))
}

/// Create a cart; the identifier comes from the database sequence
#[utoipa::path(
    post,
    path = "/cart",
    tag = "Cart",
    responses((status = 201, description = "The created cart under `data`", body = Cart))
)]
pub async fn create(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let row: Cart = CrudService::create(state.db(), &[]).await?;
    Ok(success_one(row))
}

/// Delete a cart
#[utoipa::path(
    delete,
    path = "/cart/{cartId}",
    tag = "Cart",
    params(("cartId" = i32, Path, description = "Cart identifier")),
    responses((status = 200, description = "Deleted; `affected` is 0 when the id did not exist", body = DeleteOutcome))
)]
pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let affected = CrudService::delete(state.db(), &CARTS, id).await?;
    Ok(deleted(CARTS.label, affected))
}
