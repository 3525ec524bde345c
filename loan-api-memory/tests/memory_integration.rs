//! Exercises the memory backend through the registry with an on-disk seed file.

use std::path::Path;

use loan_api_memory::{MemoryApiFactory, load_from_file};
use loan_core::api::{ApiClientRegistry, ApiConfig};
use loan_core::{ApiError, ApplicationApi};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_applications.csv")
        .to_string_lossy()
        .into_owned()
}

async fn seeded_api() -> Box<dyn ApplicationApi> {
    let mut registry = ApiClientRegistry::new();
    registry
        .register(Box::new(MemoryApiFactory))
        .expect("first registration");

    match registry.create(&ApiConfig::new("memory", fixture_path())).await {
        Ok(api) => api,
        Err(e) => panic!("seeded backend should build: {e}"),
    }
}

#[test]
fn test_fixture_file_parses() {
    let apps = load_from_file(Path::new(&fixture_path())).expect("fixture should load");

    assert_eq!(apps.len(), 3);
    assert_eq!(apps[1].personal_information.phone_number, None);
    assert_eq!(apps[2].personal_information.email, None);
}

#[tokio::test]
async fn test_seeded_backend_serves_records() {
    let api = seeded_api().await;

    let a100 = api.get_application("A100").await.unwrap();
    assert_eq!(a100.applicant_name(), "Ada Lovelace");
    assert_eq!(a100.loan_terms.monthly_payment_amount, Some(dec!(100)));

    let c300 = api.get_application("C300").await.unwrap();
    assert_eq!(c300.loan_terms.monthly_payment_amount, Some(dec!(333.33)));

    assert_eq!(api.list_applications().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_seeded_backend_rejects_duplicate_create() {
    let api = seeded_api().await;
    let existing = api.get_application("B200").await.unwrap();

    let result = api.create_application(&existing).await;

    assert_eq!(result, Err(ApiError::Conflict("B200".to_string())));
}

#[tokio::test]
async fn test_backend_name_is_case_insensitive() {
    let mut registry = ApiClientRegistry::new();
    registry
        .register(Box::new(MemoryApiFactory))
        .expect("first registration");

    match registry.create(&ApiConfig::new("Memory", "")).await {
        Ok(api) => assert!(api.list_applications().await.unwrap().is_empty()),
        Err(e) => panic!("mixed-case backend name should resolve: {e}"),
    }
}
