//! Generic entity handlers: create, list, bulk create.
//!
//! Routes use a parameterized path so one handler serves every entity; the
//! entity definition is resolved from the model by path segment.

use crate::error::AppError;
use crate::gateway::EntityGateway;
use crate::model::{EntityDef, Operation};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Pagination query parameters, named as in the original API (`skip`/`limit`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

fn entity_for<'a>(
    state: &'a AppState,
    path_segment: &str,
    op: Operation,
) -> Result<&'a EntityDef, AppError> {
    let entity = state
        .model
        .entity_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(path_segment.to_string()))?;
    if !entity.allows(op) {
        return Err(AppError::OperationNotAllowed {
            path_segment: path_segment.to_string(),
            operation: op.name(),
        });
    }
    Ok(entity)
}

fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Value>>, AppError> {
    let entity = entity_for(&state, &path_segment, Operation::List)?;
    let rows = EntityGateway::list_all(&state.pool, entity, params.skip, params.limit).await?;
    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let entity = entity_for(&state, &path_segment, Operation::Create)?;
    let payload = body_to_map(body)?;
    let row = EntityGateway::create_one(&state.pool, entity, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn bulk_create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Vec<Value>>), AppError> {
    let entity = entity_for(&state, &path_segment, Operation::BulkCreate)?;
    let items = match body {
        Value::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for v in arr {
                out.push(body_to_map(v)?);
            }
            out
        }
        _ => return Err(AppError::BadRequest("body must be a JSON array".into())),
    };
    let rows = EntityGateway::create_many(&state.pool, entity, &items).await?;
    Ok((StatusCode::CREATED, Json(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inventory_model;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    fn test_state() -> AppState {
        // Lazy pool: never connects, enough for resolution-only paths.
        let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/ignored");
        AppState {
            pool: pool.unwrap(),
            model: Arc::new(inventory_model().unwrap()),
        }
    }

    #[tokio::test]
    async fn unknown_path_segment_is_not_found() {
        let state = test_state();
        let err = entity_for(&state, "sucursales", Operation::List).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn disabled_operation_is_rejected() {
        let state = test_state();
        let err = entity_for(&state, "usuarios", Operation::BulkCreate).unwrap_err();
        assert!(matches!(err, AppError::OperationNotAllowed { .. }));
        assert!(entity_for(&state, "usuarios", Operation::Create).is_ok());
    }

    #[test]
    fn non_object_body_is_a_bad_request() {
        assert!(matches!(
            body_to_map(json!([1, 2])),
            Err(AppError::BadRequest(_))
        ));
        assert!(body_to_map(json!({"nombre": "Ana"})).is_ok());
    }
}
