pub mod registry;
pub mod types;
pub mod validator;

pub use registry::inventory_model;
pub use types::*;
pub use validator::validate;
