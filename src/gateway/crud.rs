//! Generic entity gateway: create, bulk create, and list against PostgreSQL.
//!
//! Stateless; every operation draws a connection from the pool for its own
//! duration only. Release and rollback are guaranteed by sqlx's pool and
//! transaction Drop semantics on every exit path.

use crate::error::AppError;
use crate::gateway::PayloadValidator;
use crate::model::EntityDef;
use crate::sql::{self, PgBindValue};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row};
use std::collections::HashMap;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;
const BULK_LIMIT: usize = 100;

pub struct EntityGateway;

impl EntityGateway {
    /// Insert one row. Returns the created row, payload merged with the
    /// server-assigned primary key, visible to subsequent reads immediately.
    pub async fn create_one(
        pool: &PgPool,
        entity: &EntityDef,
        payload: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        PayloadValidator::validate(entity, payload)?;
        let q = sql::insert(entity, payload);
        tracing::debug!(table = entity.table, sql = %q.sql, "insert");
        let row = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_one(pool)
            .await?;
        Ok(row_to_json(&row))
    }

    /// Insert a batch inside one transaction: either every payload commits or
    /// none do. The first failure rolls back all prior inserts and surfaces.
    pub async fn create_many(
        pool: &PgPool,
        entity: &EntityDef,
        payloads: &[HashMap<String, Value>],
    ) -> Result<Vec<Value>, AppError> {
        if payloads.len() > BULK_LIMIT {
            return Err(AppError::BadRequest(format!(
                "bulk create limited to {} items",
                BULK_LIMIT
            )));
        }
        for payload in payloads {
            PayloadValidator::validate(entity, payload)?;
        }
        let mut tx = pool.begin().await?;
        let mut out = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let q = sql::insert(entity, payload);
            tracing::debug!(table = entity.table, sql = %q.sql, "insert (tx)");
            let row = bind_params(sqlx::query(&q.sql), &q.params)
                .fetch_one(&mut *tx)
                .await?;
            out.push(row_to_json(&row));
        }
        tx.commit().await?;
        Ok(out)
    }

    /// List rows ordered by primary key ascending. Offset defaults to 0;
    /// limit defaults to 10 and is capped at 1000; zero is rejected since a
    /// window with no rows was never what the caller meant. An empty table
    /// yields an empty vec, never an error.
    pub async fn list_all(
        pool: &PgPool,
        entity: &EntityDef,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<Value>, AppError> {
        let offset = offset.unwrap_or(0);
        let limit = effective_limit(limit)?;
        let q = sql::select_list(entity, offset, limit);
        tracing::debug!(table = entity.table, sql = %q.sql, "select");
        let rows = sqlx::query(&q.sql).fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

fn effective_limit(limit: Option<u32>) -> Result<u32, AppError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(0) => Err(AppError::Validation("limit must be positive".into())),
        Some(n) => Ok(n.min(MAX_LIMIT)),
    }
}

fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    params: &'q [Value],
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    for p in params {
        query = query.bind(PgBindValue::from_json(p));
    }
    query
}

/// Map a row into a JSON object keyed by column name.
pub fn row_to_json(row: &PgRow) -> Value {
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
