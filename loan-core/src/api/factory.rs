//! Selecting an [`ApplicationApi`] backend by name.
//!
//! Hosts register one [`ApiClientFactory`] per backend they link in, then
//! ask the [`ApiClientRegistry`] for a client matching the user's
//! [`ApiConfig`]. Backend names are matched case-insensitively.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::client::{ApiError, ApplicationApi};

/// Which backend the form talks to, and how to reach it.
///
/// | backend  | connection_string                         |
/// |----------|-------------------------------------------|
/// | `memory` | empty, or path to a CSV seed file         |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub backend: String,
    /// Backend-specific; passed to the factory untouched.
    pub connection_string: String,
}

impl ApiConfig {
    pub fn new(
        backend: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            connection_string: connection_string.into(),
        }
    }

    /// `backend` normalised for lookup.
    pub fn backend_key(&self) -> String {
        self.backend.trim().to_ascii_lowercase()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("memory", "")
    }
}

#[async_trait]
pub trait ApiClientFactory: Send + Sync {
    /// Lowercase name users select the backend by.
    fn backend_name(&self) -> &'static str;

    async fn create(&self, config: &ApiConfig) -> Result<Box<dyn ApplicationApi>, ApiError>;
}

#[derive(Default)]
pub struct ApiClientRegistry {
    factories: BTreeMap<&'static str, Box<dyn ApiClientFactory>>,
}

impl ApiClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a backend.
    ///
    /// # Errors
    /// [`ApiError::Configuration`] if a backend with the same name is
    /// already registered; the existing factory is kept.
    pub fn register(
        &mut self,
        factory: Box<dyn ApiClientFactory>,
    ) -> Result<(), ApiError> {
        let name = factory.backend_name();
        if self.factories.contains_key(name) {
            return Err(ApiError::Configuration(format!(
                "API backend '{name}' is already registered"
            )));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Builds a client for `config.backend`.
    ///
    /// # Errors
    /// [`ApiError::Configuration`] when no backend of that name exists, or
    /// whatever the selected factory reports.
    pub async fn create(&self, config: &ApiConfig) -> Result<Box<dyn ApplicationApi>, ApiError> {
        let key = config.backend_key();
        match self.factories.get(key.as_str()) {
            Some(factory) => factory.create(config).await,
            None if self.factories.is_empty() => Err(ApiError::Configuration(
                "no API backends are registered".to_string(),
            )),
            None => Err(ApiError::Configuration(format!(
                "no API backend named '{}' (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            ))),
        }
    }
}
