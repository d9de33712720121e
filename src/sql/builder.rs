//! Builds parameterized INSERT and SELECT statements from an entity
//! definition. Identifiers come from the static model only; every
//! client-supplied value is bound positionally, never interpolated.

use crate::model::EntityDef;
use serde_json::Value;
use std::collections::HashMap;

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

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

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Columns returned by every statement: primary key first, then the client
/// columns in definition order.
fn returning_list(entity: &EntityDef) -> String {
    std::iter::once(entity.pk_column)
        .chain(entity.columns.iter().map(|c| c.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT naming all client columns in definition order, values bound
/// positionally; RETURNING the full row so the server-assigned key comes back
/// in the same round trip.
pub fn insert(entity: &EntityDef, payload: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(entity.columns.len());
    let mut placeholders = Vec::with_capacity(entity.columns.len());
    for col in &entity.columns {
        let value = payload.get(col.name).cloned().unwrap_or(Value::Null);
        let n = q.push_param(value);
        cols.push(quoted(col.name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(entity.table),
        cols.join(", "),
        placeholders.join(", "),
        returning_list(entity)
    );
    q
}

/// SELECT with ORDER BY primary key ascending so pagination windows are
/// stable, plus LIMIT/OFFSET. Both numbers are caller-clamped integers, not
/// client text, so they are formatted inline.
pub fn select_list(entity: &EntityDef, offset: u32, limit: u32) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT {} OFFSET {}",
        returning_list(entity),
        quoted(entity.table),
        quoted(entity.pk_column),
        limit,
        offset
    );
    q
}
