use async_trait::async_trait;
use thiserror::Error;

use crate::models::Application;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Application '{0}' not found")]
    NotFound(String),

    #[error("Application '{0}' already exists")]
    Conflict(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Backend operations the application form depends on.
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    async fn get_application(&self, application_number: &str) -> Result<Application, ApiError>;

    async fn create_application(&self, application: &Application) -> Result<Application, ApiError>;

    async fn update_application(
        &self,
        application_number: &str,
        application: &Application,
    ) -> Result<Application, ApiError>;

    // Backs the list page the form returns to after saving.
    async fn list_applications(&self) -> Result<Vec<Application>, ApiError>;
}
