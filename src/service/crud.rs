//! Generic CRUD execution: one statement per call through the gateway, rows decoded into
//! the resource's record type.

use crate::entity::EntityDef;
use crate::error::{AppError, AppResult};
use crate::models::Record;
use crate::sql::{self, Projection, QueryBuf};
use crate::store::Gateway;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// Every row, ordered by identifier.
    pub async fn list<R: Record>(gw: &dyn Gateway) -> AppResult<Vec<R>> {
        let rows = run(gw, sql::select_list(R::entity())).await?;
        decode_rows(rows)
    }

    /// One row by identifier, or None.
    pub async fn read<R: Record>(gw: &dyn Gateway, id: i32) -> AppResult<Option<R>> {
        let rows = run(gw, sql::select_by_id(R::entity(), id)).await?;
        first(rows)
    }

    /// Rows whose columns equal the given values.
    pub async fn find_by<R: DeserializeOwned>(
        gw: &dyn Gateway,
        entity: &EntityDef,
        filters: &[(&str, Value)],
        projection: Projection,
    ) -> AppResult<Vec<R>> {
        let rows = run(gw, sql::select_where(entity, filters, projection)).await?;
        decode_rows(rows)
    }

    /// Insert one row and return it with its generated identifier.
    pub async fn create<R: Record>(gw: &dyn Gateway, values: &[(&str, Value)]) -> AppResult<R> {
        let entity = R::entity();
        let rows = run(gw, sql::insert(entity, values)).await?;
        first(rows)?.ok_or_else(|| AppError::Internal(format!("insert into {} returned no row", entity.table_name)))
    }

    /// Overwrite every writable column of one row. None when the identifier does not exist.
    pub async fn update<R: Record>(gw: &dyn Gateway, id: i32, values: &[(&str, Value)]) -> AppResult<Option<R>> {
        let rows = run(gw, sql::update(R::entity(), id, values)).await?;
        first(rows)
    }

    /// Delete by identifier and report how many rows went away (0 or 1).
    pub async fn delete(gw: &dyn Gateway, entity: &EntityDef, id: i32) -> AppResult<u64> {
        let rows = run(gw, sql::delete(entity, id)).await?;
        Ok(rows.len() as u64)
    }
}

async fn run(gw: &dyn Gateway, q: QueryBuf) -> AppResult<Vec<Value>> {
    gw.query(&q.sql, &q.params).await
}

fn decode_rows<R: DeserializeOwned>(rows: Vec<Value>) -> AppResult<Vec<R>> {
    rows.into_iter().map(decode).collect()
}

fn first<R: DeserializeOwned>(rows: Vec<Value>) -> AppResult<Option<R>> {
    rows.into_iter().next().map(decode).transpose()
}

fn decode<R: DeserializeOwned>(row: Value) -> AppResult<R> {
    serde_json::from_value(row).map_err(|e| AppError::Internal(format!("row decode: {}", e)))
}
