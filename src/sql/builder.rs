//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from entity descriptors.

use crate::entity::{ColumnInfo, EntityDef};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its cast placeholder (`$n::type`).
    fn push_param(&mut self, v: Value, col: &ColumnInfo) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), col.pg_type)
    }
}

/// Which columns a SELECT/RETURNING list carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Everything except sensitive columns.
    Public,
    /// Every column, including sensitive ones. Only for credential checks.
    WithSensitive,
}

/// SELECT list: numeric columns as float8 so rows decode to JSON numbers.
fn select_column_list(entity: &EntityDef, projection: Projection) -> String {
    entity
        .columns
        .iter()
        .filter(|c| projection == Projection::WithSensitive || !c.sensitive)
        .map(|c| {
            let q = quoted(c.name);
            if c.is_numeric() {
                format!("{}::float8 AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ordered by identifier.
pub fn select_list(entity: &EntityDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(entity, Projection::Public),
        quoted(entity.table_name),
        quoted(entity.pk_column)
    );
    q
}

/// SELECT by identifier.
pub fn select_by_id(entity: &EntityDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), entity.pk());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(entity, Projection::Public),
        quoted(entity.table_name),
        quoted(entity.pk_column),
        ph
    );
    q
}

/// SELECT with exact-match filters joined by AND. Unknown columns are skipped.
pub fn select_where(entity: &EntityDef, filters: &[(&str, Value)], projection: Projection) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (name, val) in filters {
        let Some(col) = entity.column(name) else { continue };
        let ph = q.push_param(val.clone(), col);
        where_parts.push(format!("{} = {}", quoted(col.name), ph));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(entity, projection),
        quoted(entity.table_name),
        where_clause,
        quoted(entity.pk_column)
    );
    q
}

/// INSERT every writable column, in descriptor order. Values missing from `values` bind NULL.
/// An entity without writable columns inserts DEFAULT VALUES.
pub fn insert(entity: &EntityDef, values: &[(&str, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(entity.table_name);
    let returning = select_column_list(entity, Projection::Public);
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in entity.writable_columns() {
        let val = lookup(values, c.name);
        placeholders.push(q.push_param(val, c));
        cols.push(quoted(c.name));
    }
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by identifier: SET every writable column (full-row replace).
pub fn update(entity: &EntityDef, id: i32, values: &[(&str, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = entity
        .writable_columns()
        .map(|c| {
            let val = lookup(values, c.name);
            format!("{} = {}", quoted(c.name), q.push_param(val, c))
        })
        .collect();
    let id_ph = q.push_param(Value::from(id), entity.pk());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(entity.table_name),
        sets.join(", "),
        quoted(entity.pk_column),
        id_ph,
        select_column_list(entity, Projection::Public)
    );
    q
}

/// DELETE by identifier, returning the identifier of each removed row.
pub fn delete(entity: &EntityDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), entity.pk());
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        quoted(entity.table_name),
        quoted(entity.pk_column),
        ph,
        quoted(entity.pk_column)
    );
    q
}

fn lookup(values: &[(&str, Value)], name: &str) -> Value {
    values
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.clone())
        .unwrap_or(Value::Null)
}
