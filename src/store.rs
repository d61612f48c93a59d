//! Database gateway: one parameterized-query operation over a shared Postgres pool.

use crate::config::DatabaseSettings;
use crate::error::AppError;
use crate::sql::PgBindValue;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, ConnectOptions, Connection, Row};

/// Everything above this trait talks to the database through `query`; there are no
/// transactions and no retries, each call is exactly one statement.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Run one statement with positionally bound parameters and return every row as a JSON object.
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, AppError>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    /// Open the shared pool. Liveness is verified first over a dedicated connection and then
    /// through the pool; either failure is returned so startup can abort.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, AppError> {
        let mut conn = settings.connect_options.connect().await?;
        let (now,): (String,) = sqlx::query_as("SELECT NOW()::text").fetch_one(&mut conn).await?;
        tracing::info!(%now, "database reachable");
        conn.close().await?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(settings.connect_options.clone())
            .await?;
        sqlx::query("SELECT NOW()").execute(&pool).await?;
        tracing::info!(max_connections = settings.max_connections, "connection pool ready");
        Ok(PgGateway { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        PgGateway { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %sql, params = params.len(), "query");
        let mut query = sqlx::query(sql);
        for p in params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_json(row: &PgRow) -> Value {
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::from(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::from(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
