use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ApplicationStatus;

/// A loan application as exchanged with the backend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_number: String,
    pub personal_information: PersonalInformation,
    pub loan_terms: LoanTerms,
    pub status: ApplicationStatus,
    pub date_applied: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    pub name: Name,
    /// Ten ASCII digits, no separators.
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Repayment term in months.
    pub term: u32,
    /// Derived from `amount / term`, two decimal places.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub monthly_payment_amount: Option<Decimal>,
}

impl Application {
    /// Applicant's full name, "First Last".
    pub fn applicant_name(&self) -> String {
        let name = &self.personal_information.name;
        format!("{} {}", name.first, name.last)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn application() -> Application {
        Application {
            application_number: "A100".to_string(),
            personal_information: PersonalInformation {
                name: Name {
                    first: "Ada".to_string(),
                    last: "Lovelace".to_string(),
                },
                phone_number: Some("5551234567".to_string()),
                email: None,
            },
            loan_terms: LoanTerms {
                amount: dec!(1200),
                term: 12,
                monthly_payment_amount: Some(dec!(100.00)),
            },
            status: ApplicationStatus::ALL[1],
            date_applied: Utc.with_ymd_and_hms(2024, 2, 20, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn serialises_camel_case_with_numeric_money_and_status() {
        let value = serde_json::to_value(application()).unwrap();

        assert_eq!(value["applicationNumber"], json!("A100"));
        assert_eq!(value["personalInformation"]["name"]["first"], json!("Ada"));
        assert_eq!(value["personalInformation"]["phoneNumber"], json!("5551234567"));
        assert_eq!(value["loanTerms"]["amount"], json!(1200.0));
        assert_eq!(value["loanTerms"]["term"], json!(12));
        assert_eq!(value["loanTerms"]["monthlyPaymentAmount"], json!(100.0));
        assert_eq!(value["status"], json!(1));
        assert_eq!(value["dateApplied"], json!("2024-02-20T09:00:00Z"));
    }

    #[test]
    fn deserialises_wire_record() {
        let wire = json!({
            "applicationNumber": "A100",
            "personalInformation": {
                "name": { "first": "Ada", "last": "Lovelace" },
                "phoneNumber": "5551234567",
                "email": null
            },
            "loanTerms": { "amount": 1200, "term": 12, "monthlyPaymentAmount": 100.0 },
            "status": 1,
            "dateApplied": "2024-02-20T09:00:00Z"
        });

        let parsed: Application = serde_json::from_value(wire).unwrap();

        assert_eq!(parsed, application());
    }

    #[test]
    fn missing_monthly_payment_deserialises_as_none() {
        let terms: LoanTerms = serde_json::from_value(json!({ "amount": 333.33, "term": 3 })).unwrap();

        assert_eq!(terms.amount, dec!(333.33));
        assert_eq!(terms.monthly_payment_amount, None);
    }

    #[test]
    fn out_of_range_status_is_rejected() {
        let mut wire = serde_json::to_value(application()).unwrap();
        wire["status"] = json!(5);

        let err = serde_json::from_value::<Application>(wire).unwrap_err();

        assert!(err.to_string().contains('5'), "{err}");
    }
}
