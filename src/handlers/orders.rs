//! `/orders` handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::{not_found, parse_id};
use crate::entity::ORDERS;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::models::{Changeset, Order, OrderRequest};
use crate::response::{deleted, success_many, success_one, success_one_ok, DeleteOutcome};
use crate::service::CrudService;
use crate::state::AppState;

/// List all orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    responses((status = 200, description = "All orders under `data`, count under `meta`", body = Vec<Order>))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<Order>(state.db()).await?;
    Ok(success_many(rows))
}

/// Retrieve a single order
#[utoipa::path(
    get,
    path = "/orders/{orderId}",
    tag = "Orders",
    params(("orderId" = i32, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "The order under `data`", body = Order),
        (status = 404, description = "No order with this id")
    )
)]
pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::read::<Order>(state.db(), id)
        .await?
        .ok_or_else(|| not_found(ORDERS.label, id))?;
    Ok(success_one_ok(row))
}

/// Create an order
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "The created order under `data`", body = Order),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row: Order = CrudService::create(state.db(), &body.columns()).await?;
    Ok(success_one(row))
}

/// Replace an order
#[utoipa::path(
    put,
    path = "/orders/{orderId}",
    tag = "Orders",
    params(("orderId" = i32, Path, description = "Order identifier")),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "The updated order under `data`", body = Order),
        (status = 404, description = "No order with this id"),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidatedJson(body): ValidatedJson<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::update::<Order>(state.db(), id, &body.columns())
        .await?
        .ok_or_else(|| not_found(ORDERS.label, id))?;
    Ok(success_one_ok(row))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{orderId}",
    tag = "Orders",
    params(("orderId" = i32, Path, description = "Order identifier")),
    responses((status = 200, description = "Deleted; `affected` is 0 when the id did not exist", body = DeleteOutcome))
)]
pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let affected = CrudService::delete(state.db(), &ORDERS, id).await?;
    Ok(deleted(ORDERS.label, affected))
}
