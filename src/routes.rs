//! Routers: entity CRUD routes plus health/readiness/version.

use crate::error::AppError;
use crate::handlers::{bulk_create, create, list};
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

/// Entity routes. The original API used trailing slashes (`/usuarios/`), so
/// both forms are registered.
pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", get(list).post(create))
        .route("/:path_segment/", get(list).post(create))
        .route("/:path_segment/bulk", post(bulk_create))
        .route("/:path_segment/bulk/", post(bulk_create))
        .with_state(state)
}

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}

/// Readiness pings the pool; a failure surfaces through the crate's own
/// taxonomy as a 503 `store_error`, the same shape gateway failures take.
async fn ready(State(state): State<AppState>) -> Result<Json<StatusBody>, AppError> {
    sqlx::query("SELECT 1").fetch_one(&state.pool).await?;
    Ok(Json(StatusBody { status: "ok" }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready (with DB ping), GET /version.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
