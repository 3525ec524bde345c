pub mod client;
pub mod factory;

pub use client::{ApiError, ApplicationApi};
pub use factory::{ApiClientFactory, ApiClientRegistry, ApiConfig};
