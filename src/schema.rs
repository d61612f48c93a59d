//! Idempotent table DDL run at startup. Columns mirror the descriptors in `entity`.

use crate::error::AppError;
use crate::store::Gateway;

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS "users" (
            "user_id" SERIAL PRIMARY KEY,
            "email" VARCHAR(255) NOT NULL,
            "name" VARCHAR(255) NOT NULL,
            "username" VARCHAR(100) NOT NULL UNIQUE,
            "password_hash" TEXT NOT NULL
        )
        "#,
    ),
    (
        "product",
        r#"
        CREATE TABLE IF NOT EXISTS "product" (
            "product_id" SERIAL PRIMARY KEY,
            "name" VARCHAR(255) NOT NULL,
            "description" TEXT NOT NULL DEFAULT '',
            "price" NUMERIC(12, 2) NOT NULL CHECK ("price" >= 0)
        )
        "#,
    ),
    (
        "cart",
        r#"
        CREATE TABLE IF NOT EXISTS "cart" (
            "cart_id" SERIAL PRIMARY KEY
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS "orders" (
            "order_id" SERIAL PRIMARY KEY,
            "status" BOOLEAN NOT NULL DEFAULT TRUE,
            "total" NUMERIC(12, 2) NOT NULL CHECK ("total" >= 0),
            "user_id" INTEGER NOT NULL
        )
        "#,
    ),
];

/// Create the four tables if they do not exist yet. Existing tables are left untouched.
pub async fn ensure_tables(gateway: &dyn Gateway) -> Result<(), AppError> {
    for (name, ddl) in TABLES {
        gateway.query(ddl, &[]).await?;
        tracing::debug!(table = name, "table ensured");
    }
    Ok(())
}
