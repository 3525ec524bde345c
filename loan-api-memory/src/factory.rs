use std::path::Path;

use async_trait::async_trait;
use loan_core::ApplicationApi;
use loan_core::api::{ApiClientFactory, ApiConfig, ApiError};
use tracing::info;

use crate::repository::InMemoryApplicationApi;
use crate::seed;

/// [`ApiClientFactory`] for the in-memory backend.
///
/// Register this with a [`loan_core::api::ApiClientRegistry`] to make the
/// `"memory"` backend available:
///
/// ```rust
/// use loan_core::api::ApiClientRegistry;
/// use loan_api_memory::MemoryApiFactory;
///
/// let mut registry = ApiClientRegistry::new();
/// registry.register(Box::new(MemoryApiFactory)).unwrap();
/// assert_eq!(registry.available_backends(), vec!["memory"]);
/// ```
pub struct MemoryApiFactory;

#[async_trait]
impl ApiClientFactory for MemoryApiFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    /// An empty `connection_string` starts with no records; otherwise it is
    /// the path of a CSV seed file (see [`crate::seed`]).
    async fn create(&self, config: &ApiConfig) -> Result<Box<dyn ApplicationApi>, ApiError> {
        let path = config.connection_string.trim();
        if path.is_empty() {
            return Ok(Box::new(InMemoryApplicationApi::new()));
        }

        let applications = seed::load_from_file(Path::new(path))
            .map_err(|e| ApiError::Configuration(format!("cannot seed from '{path}': {e}")))?;
        info!(count = applications.len(), path, "seeded in-memory applications");
        Ok(Box::new(InMemoryApplicationApi::with_applications(
            applications,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use loan_core::api::{ApiClientFactory, ApiConfig, ApiError};

    use super::MemoryApiFactory;

    #[test]
    fn backend_name_is_memory() {
        assert_eq!(MemoryApiFactory.backend_name(), "memory");
    }

    #[tokio::test]
    async fn creates_empty_backend_without_seed() {
        let api = MemoryApiFactory
            .create(&ApiConfig::default())
            .await
            .expect("empty backend");

        assert!(api.list_applications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_seed_file_is_configuration_error() {
        let config = ApiConfig::new("memory", "/this/path/does/not/exist.csv");

        match MemoryApiFactory.create(&config).await {
            Err(ApiError::Configuration(msg)) => assert!(msg.contains("exist.csv")),
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a client"),
        }
    }
}
