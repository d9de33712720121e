//! Shared application state for all routes.

use crate::model::Model;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub model: Arc<Model>,
}
