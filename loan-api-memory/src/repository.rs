use std::collections::BTreeMap;

use async_trait::async_trait;
use loan_core::{ApiError, Application, ApplicationApi};
use tokio::sync::RwLock;
use tracing::debug;

/// [`ApplicationApi`] backed by a map held in memory.
///
/// Records are keyed by application number and listed in key order.
#[derive(Debug, Default)]
pub struct InMemoryApplicationApi {
    records: RwLock<BTreeMap<String, Application>>,
}

impl InMemoryApplicationApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend that already holds `applications`.
    ///
    /// # Errors
    /// [`ApiError::Conflict`] when two records share an application number.
    pub fn with_applications(
        applications: impl IntoIterator<Item = Application>
    ) -> Result<Self, ApiError> {
        let mut records = BTreeMap::new();
        for app in applications {
            if records.contains_key(&app.application_number) {
                return Err(ApiError::Conflict(app.application_number));
            }
            records.insert(app.application_number.clone(), app);
        }
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn check_number(application_number: &str) -> Result<(), ApiError> {
    if application_number.trim().is_empty() {
        return Err(ApiError::Rejected("application number is required".to_string()));
    }
    Ok(())
}

#[async_trait]
impl ApplicationApi for InMemoryApplicationApi {
    async fn get_application(&self, application_number: &str) -> Result<Application, ApiError> {
        self.records
            .read()
            .await
            .get(application_number)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(application_number.to_string()))
    }

    async fn create_application(&self, application: &Application) -> Result<Application, ApiError> {
        check_number(&application.application_number)?;

        let mut records = self.records.write().await;
        if records.contains_key(&application.application_number) {
            return Err(ApiError::Conflict(application.application_number.clone()));
        }
        records.insert(application.application_number.clone(), application.clone());
        debug!(number = %application.application_number, "application created");
        Ok(application.clone())
    }

    async fn update_application(
        &self,
        application_number: &str,
        application: &Application,
    ) -> Result<Application, ApiError> {
        if application.application_number != application_number {
            return Err(ApiError::Rejected(format!(
                "application number cannot change from '{}' to '{}'",
                application_number, application.application_number
            )));
        }

        let mut records = self.records.write().await;
        let slot = records
            .get_mut(application_number)
            .ok_or_else(|| ApiError::NotFound(application_number.to_string()))?;
        *slot = application.clone();
        debug!(number = %application_number, "application updated");
        Ok(application.clone())
    }

    async fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use loan_core::{ApplicationStatus, LoanTerms, Name, PersonalInformation};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn application(number: &str) -> Application {
        Application {
            application_number: number.to_string(),
            personal_information: PersonalInformation {
                name: Name {
                    first: "Ada".to_string(),
                    last: "Lovelace".to_string(),
                },
                phone_number: Some("5551234567".to_string()),
                email: Some("ada@example.com".to_string()),
            },
            loan_terms: LoanTerms {
                amount: dec!(1200),
                term: 12,
                monthly_payment_amount: Some(dec!(100.00)),
            },
            status: ApplicationStatus::default(),
            date_applied: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_application() {
        let api = InMemoryApplicationApi::new();
        let created = api.create_application(&application("A100")).await.unwrap();

        let fetched = api.get_application("A100").await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(api.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_application() {
        let api = InMemoryApplicationApi::new();

        let result = api.get_application("nope").await;

        assert_eq!(result, Err(ApiError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let api = InMemoryApplicationApi::new();
        api.create_application(&application("A100")).await.unwrap();

        let result = api.create_application(&application("A100")).await;

        assert_eq!(result, Err(ApiError::Conflict("A100".to_string())));
    }

    #[tokio::test]
    async fn test_create_requires_number() {
        let api = InMemoryApplicationApi::new();

        let result = api.create_application(&application("  ")).await;

        assert!(matches!(result, Err(ApiError::Rejected(_))));
        assert!(api.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_application() {
        let api = InMemoryApplicationApi::new();
        api.create_application(&application("A100")).await.unwrap();

        let mut changed = application("A100");
        changed.loan_terms.amount = dec!(2400);
        changed.status = ApplicationStatus::ALL[1];
        api.update_application("A100", &changed).await.unwrap();

        assert_eq!(api.get_application("A100").await.unwrap(), changed);
    }

    #[tokio::test]
    async fn test_update_missing_application() {
        let api = InMemoryApplicationApi::new();

        let result = api.update_application("A100", &application("A100")).await;

        assert_eq!(result, Err(ApiError::NotFound("A100".to_string())));
    }

    #[tokio::test]
    async fn test_update_cannot_rename() {
        let api = InMemoryApplicationApi::new();
        api.create_application(&application("A100")).await.unwrap();

        let result = api.update_application("A100", &application("B200")).await;

        assert!(matches!(result, Err(ApiError::Rejected(_))));
        assert!(api.get_application("B200").await.is_err());
    }

    #[tokio::test]
    async fn test_list_applications_in_number_order() {
        let api = InMemoryApplicationApi::with_applications([
            application("C300"),
            application("A100"),
            application("B200"),
        ])
        .unwrap();

        let numbers: Vec<_> = api
            .list_applications()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.application_number)
            .collect();

        assert_eq!(numbers, vec!["A100", "B200", "C300"]);
    }

    #[test]
    fn test_with_applications_rejects_duplicates() {
        let result =
            InMemoryApplicationApi::with_applications([application("A100"), application("A100")]);

        assert!(matches!(result, Err(ApiError::Conflict(n)) if n == "A100"));
    }
}
