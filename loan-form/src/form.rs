//! Form state for creating or editing a loan application.
//!
//! The form keeps every field as the raw text the user typed, together with
//! touched/disabled flags. Validation runs over a fixed list of
//! `(field, validator)` pairs; the monthly payment is re-derived whenever the
//! amount or the term changes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use loan_core::calculations::common::parse_number;
use loan_core::calculations::{format_payment, monthly_payment_from_input};
use loan_core::validation::{ValidationError, Validator};
use loan_core::{Application, ApplicationStatus, LoanTerms, Name, PersonalInformation};
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::debug;

use crate::config::FormConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    ApplicationNumber,
    Status,
    Amount,
    MonthlyPayAmount,
    Terms,
}

impl Field {
    /// Every field in display order.
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::PhoneNumber,
        Field::Email,
        Field::ApplicationNumber,
        Field::Status,
        Field::Amount,
        Field::MonthlyPayAmount,
        Field::Terms,
    ];

    /// Control name as used by the page template (`"firstName"`).
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::PhoneNumber => "phoneNumber",
            Self::Email => "email",
            Self::ApplicationNumber => "applicationNumber",
            Self::Status => "status",
            Self::Amount => "amount",
            Self::MonthlyPayAmount => "monthlyPayAmount",
            Self::Terms => "terms",
        }
    }

    pub fn validators(self) -> &'static [Validator] {
        match self {
            Self::FirstName | Self::LastName | Self::ApplicationNumber => &[Validator::Required],
            Self::PhoneNumber => &[Validator::PhoneNumber],
            Self::Email => &[Validator::Email],
            Self::Status => &[Validator::Status],
            Self::Amount => &[Validator::Required, Validator::Number, Validator::Positive],
            Self::MonthlyPayAmount => &[],
            Self::Terms => &[
                Validator::Required,
                Validator::Number,
                Validator::WholeNumber,
                Validator::Positive,
                Validator::Months,
            ],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the control name (`firstName`) or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "").to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub disabled: bool,
}

/// Every error found by a failed validation, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} invalid field(s): {}", .0.len(), describe(.0))]
pub struct InvalidForm(pub Vec<(Field, ValidationError)>);

fn describe(errors: &[(Field, ValidationError)]) -> String {
    errors
        .iter()
        .map(|(field, err)| format!("{field}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl InvalidForm {
    fn single(
        field: Field,
        error: ValidationError,
    ) -> Self {
        Self(vec![(field, error)])
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(|(field, _)| *field)
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationForm {
    fields: [FieldState; 9],
    config: FormConfig,
}

impl ApplicationForm {
    pub fn new(config: FormConfig) -> Self {
        let mut form = Self {
            fields: Default::default(),
            config,
        };
        form.slot_mut(Field::Status).value = ApplicationStatus::default().to_string();
        form.slot_mut(Field::MonthlyPayAmount).disabled = true;
        form
    }

    fn slot(
        &self,
        field: Field,
    ) -> &FieldState {
        &self.fields[field.index()]
    }

    fn slot_mut(
        &mut self,
        field: Field,
    ) -> &mut FieldState {
        &mut self.fields[field.index()]
    }

    pub fn state(
        &self,
        field: Field,
    ) -> &FieldState {
        self.slot(field)
    }

    pub fn value(
        &self,
        field: Field,
    ) -> &str {
        &self.slot(field).value
    }

    pub fn is_disabled(
        &self,
        field: Field,
    ) -> bool {
        self.slot(field).disabled
    }

    pub fn is_touched(
        &self,
        field: Field,
    ) -> bool {
        self.slot(field).touched
    }

    /// Stores user input. Returns `false` and leaves the form untouched when
    /// the field is disabled.
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> bool {
        if self.is_disabled(field) {
            debug!(%field, "ignoring edit of disabled field");
            return false;
        }
        self.slot_mut(field).value = value.into();
        if matches!(field, Field::Amount | Field::Terms) {
            self.recalculate_monthly_payment();
        }
        true
    }

    pub fn disable(
        &mut self,
        field: Field,
    ) {
        self.slot_mut(field).disabled = true;
    }

    /// Marks `field` touched and returns its current errors.
    pub fn blur(
        &mut self,
        field: Field,
    ) -> Vec<ValidationError> {
        self.slot_mut(field).touched = true;
        self.errors(field)
    }

    pub fn mark_all_touched(&mut self) {
        for state in &mut self.fields {
            state.touched = true;
        }
    }

    /// Errors for one field. Disabled fields never report errors.
    pub fn errors(
        &self,
        field: Field,
    ) -> Vec<ValidationError> {
        let state = self.slot(field);
        if state.disabled {
            return Vec::new();
        }
        if field == Field::PhoneNumber && self.config.allow_empty_phone && state.value.is_empty() {
            return Vec::new();
        }
        field
            .validators()
            .iter()
            .filter_map(|v| v.check(&state.value).err())
            .collect()
    }

    pub fn validate(&self) -> Result<(), InvalidForm> {
        let errors: Vec<_> = Field::ALL
            .into_iter()
            .flat_map(|field| {
                self.errors(field)
                    .into_iter()
                    .map(move |err| (field, err))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvalidForm(errors))
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Re-derives the monthly payment from amount and term.
    ///
    /// Leaves the previous value in place when either input is empty,
    /// non-numeric or not positive.
    pub fn recalculate_monthly_payment(&mut self) {
        let Some(payment) =
            monthly_payment_from_input(self.value(Field::Amount), self.value(Field::Terms))
        else {
            return;
        };
        let formatted = format_payment(payment);
        debug!(monthly_payment = %formatted, "monthly payment recalculated");
        self.slot_mut(Field::MonthlyPayAmount).value = formatted;
    }

    /// Copies a loaded record into the form, including disabled fields.
    pub fn populate(
        &mut self,
        application: &Application,
    ) {
        let info = &application.personal_information;
        let terms = &application.loan_terms;

        self.slot_mut(Field::FirstName).value = info.name.first.clone();
        self.slot_mut(Field::LastName).value = info.name.last.clone();
        self.slot_mut(Field::PhoneNumber).value = info.phone_number.clone().unwrap_or_default();
        self.slot_mut(Field::Email).value = info.email.clone().unwrap_or_default();
        self.slot_mut(Field::ApplicationNumber).value = application.application_number.clone();
        self.slot_mut(Field::Status).value = application.status.to_string();
        self.slot_mut(Field::Amount).value = terms.amount.to_string();
        self.slot_mut(Field::MonthlyPayAmount).value = terms
            .monthly_payment_amount
            .map(format_payment)
            .unwrap_or_default();
        self.slot_mut(Field::Terms).value = terms.term.to_string();

        self.recalculate_monthly_payment();
    }

    /// Assembles the record to submit.
    ///
    /// # Errors
    /// [`InvalidForm`] listing every failing field.
    pub fn to_application(
        &self,
        date_applied: DateTime<Utc>,
    ) -> Result<Application, InvalidForm> {
        self.validate()?;

        let amount = parse_number(self.value(Field::Amount))
            .ok_or_else(|| InvalidForm::single(Field::Amount, ValidationError::NotANumber))?;
        let term = parse_number(self.value(Field::Terms))
            .and_then(|t| t.to_u32())
            .ok_or_else(|| InvalidForm::single(Field::Terms, ValidationError::TermTooLong))?;
        let status = match self.value(Field::Status).trim() {
            "" => ApplicationStatus::default(),
            raw => ApplicationStatus::parse(raw).ok_or_else(|| {
                InvalidForm::single(Field::Status, ValidationError::UnknownStatus)
            })?,
        };

        Ok(Application {
            application_number: self.value(Field::ApplicationNumber).trim().to_string(),
            personal_information: PersonalInformation {
                name: Name {
                    first: self.value(Field::FirstName).trim().to_string(),
                    last: self.value(Field::LastName).trim().to_string(),
                },
                phone_number: optional(self.value(Field::PhoneNumber)),
                email: optional(self.value(Field::Email)),
            },
            loan_terms: LoanTerms {
                amount,
                term,
                monthly_payment_amount: parse_number(self.value(Field::MonthlyPayAmount)),
            },
            status,
            date_applied,
        })
    }
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
