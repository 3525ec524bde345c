mod factory;
mod repository;
pub mod seed;

pub use factory::MemoryApiFactory;
pub use repository::InMemoryApplicationApi;
pub use seed::{SeedError, load_from_file, load_from_str};
