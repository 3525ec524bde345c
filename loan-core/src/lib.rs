pub mod api;
pub mod calculations;
pub mod models;
pub mod validation;

pub use api::client::{ApiError, ApplicationApi};
pub use models::*;
