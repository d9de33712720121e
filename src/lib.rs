//! Inventory/order management REST API: a declarative entity model driving a
//! generic SQL gateway, with one set of axum handlers serving every entity.

pub mod error;
pub mod gateway;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod sql;
pub mod state;

pub use error::{AppError, ModelError};
pub use gateway::{EntityGateway, PayloadValidator};
pub use migration::apply_migrations;
pub use model::{inventory_model, EntityDef, Model};
pub use routes::{common_routes_with_ready, entity_routes};
pub use state::AppState;
