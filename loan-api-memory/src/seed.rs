//! CSV seed data for the in-memory backend.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Whitespace
//! around values is trimmed.
//!
//! | Column                   | Required | Type      | Notes                                   |
//! |--------------------------|----------|-----------|-----------------------------------------|
//! | `application_number`     | yes      | string    | e.g. `A100`                             |
//! | `first_name`             | yes      | string    |                                         |
//! | `last_name`              | yes      | string    |                                         |
//! | `phone_number`           | no       | string    | Ten digits; empty for `None`            |
//! | `email`                  | no       | string    | Empty for `None`                        |
//! | `status`                 | no       | integer   | `0`, `1` or `2`; defaults to `0`        |
//! | `amount`                 | yes      | decimal   | e.g. `12000.00`                         |
//! | `term`                   | yes      | integer   | Months                                  |
//! | `monthly_payment_amount` | no       | decimal   | Derived from amount/term when empty     |
//! | `date_applied`           | no       | RFC 3339  | Defaults to the load time               |
//!
//! ### Minimal example
//!
//! ```csv
//! application_number,first_name,last_name,amount,term
//! A100,Ada,Lovelace,1200.00,12
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use loan_core::calculations::monthly_payment;
use loan_core::{Application, ApplicationStatus, LoanTerms, Name, PersonalInformation};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    application_number: String,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    email: Option<String>,
    status: Option<u8>,
    amount: Decimal,
    term: u32,
    monthly_payment_amount: Option<Decimal>,
    date_applied: Option<String>,
}

/// Errors that can occur while loading seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Bad structure, missing required column or type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// `row` is 1-based, counting data rows only.
    #[error("unknown status {status} on row {row}")]
    InvalidStatus { status: u8, row: usize },

    #[error("invalid date_applied '{value}' on row {row}")]
    InvalidDate { value: String, row: usize },
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
    loaded_at: DateTime<Utc>,
) -> Result<Application, SeedError> {
    let status = match row.status {
        Some(raw) => ApplicationStatus::try_from(raw).map_err(|_| SeedError::InvalidStatus {
            status: raw,
            row: row_number,
        })?,
        None => ApplicationStatus::default(),
    };

    let date_applied = match non_empty(row.date_applied) {
        Some(value) => DateTime::parse_from_rfc3339(&value)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|_| SeedError::InvalidDate {
                value,
                row: row_number,
            })?,
        None => loaded_at,
    };

    let monthly_payment_amount = row
        .monthly_payment_amount
        .or_else(|| monthly_payment(row.amount, Decimal::from(row.term)));

    Ok(Application {
        application_number: row.application_number,
        personal_information: PersonalInformation {
            name: Name {
                first: row.first_name,
                last: row.last_name,
            },
            phone_number: non_empty(row.phone_number),
            email: non_empty(row.email),
        },
        loan_terms: LoanTerms {
            amount: row.amount,
            term: row.term,
            monthly_payment_amount,
        },
        status,
        date_applied,
    })
}

/// Parse CSV text into applications, in file order.
///
/// # Errors
///
/// * [`SeedError::Parse`] if the CSV is structurally invalid.
/// * [`SeedError::InvalidStatus`] / [`SeedError::InvalidDate`] for bad cells.
pub fn load_from_str(input: &str) -> Result<Vec<Application>, SeedError> {
    let loaded_at = Utc::now();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1, loaded_at)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Application>, SeedError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}
