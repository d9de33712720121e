//! EntityGateway: generic create/list semantics parametrized by entity definition.

mod crud;
mod validation;
pub use crud::{EntityGateway, DEFAULT_LIMIT, MAX_LIMIT};
pub use validation::PayloadValidator;
