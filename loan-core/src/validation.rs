//! Field validators for loan application input.
//!
//! Each predicate works on the raw text a user typed. Apart from
//! [`required`] and [`phone_number`], an empty value passes: required-ness is
//! checked separately so one field can combine several rules.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::parse_number;
use crate::models::ApplicationStatus;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

// Total length is capped at 254 and the local part at 64, both checked in `email`.
// Plain or scientific notation, as accepted by `parse_number`.
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric pattern is valid")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

/// Inline error reported for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Phone number must contain exactly 10 digits")]
    PhoneNumber,

    #[error("Enter a valid email address")]
    Email,

    #[error("not a number")]
    NotANumber,

    #[error("number is out of range")]
    OutOfRange,

    #[error("must be a whole number")]
    NotWholeNumber,

    #[error("must be greater than zero")]
    NotPositive,

    #[error("term must be at most {} months", u32::MAX)]
    TermTooLong,

    #[error("Status must be 0, 1 or 2")]
    UnknownStatus,
}

/// A single rule that can be attached to a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
    PhoneNumber,
    Email,
    Number,
    WholeNumber,
    Positive,
    Months,
    Status,
}

impl Validator {
    pub fn check(
        self,
        value: &str,
    ) -> Result<(), ValidationError> {
        match self {
            Self::Required => required(value),
            Self::PhoneNumber => phone_number(value),
            Self::Email => email(value),
            Self::Number => number(value),
            Self::WholeNumber => whole_number(value),
            Self::Positive => positive(value),
            Self::Months => months(value),
            Self::Status => status(value),
        }
    }
}

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Exactly ten ASCII digits with no separators. An empty value fails.
pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::PhoneNumber)
    }
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let local_len = value.find('@').unwrap_or(value.len());
    if value.len() > EMAIL_MAX_LEN || local_len > EMAIL_LOCAL_MAX_LEN || !EMAIL_RE.is_match(value) {
        return Err(ValidationError::Email);
    }
    Ok(())
}

/// Well-formed numbers that [`Decimal`] cannot hold fail with
/// [`ValidationError::OutOfRange`] rather than `NotANumber`.
pub fn number(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || parse_number(trimmed).is_some() {
        Ok(())
    } else if NUMERIC_RE.is_match(trimmed) {
        Err(ValidationError::OutOfRange)
    } else {
        Err(ValidationError::NotANumber)
    }
}

/// Passes empty and non-numeric input; pair with [`number`] to reject those.
pub fn whole_number(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n.fract() != Decimal::ZERO => Err(ValidationError::NotWholeNumber),
        _ => Ok(()),
    }
}

/// Passes empty and non-numeric input; pair with [`number`] to reject those.
pub fn positive(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n <= Decimal::ZERO => Err(ValidationError::NotPositive),
        _ => Ok(()),
    }
}

/// A whole number of months must fit the stored `u32` term. Passes empty,
/// non-numeric and fractional input.
pub fn months(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n.fract() == Decimal::ZERO && n > Decimal::from(u32::MAX) => {
            Err(ValidationError::TermTooLong)
        }
        _ => Ok(()),
    }
}

/// Empty selects the default status.
pub fn status(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || ApplicationStatus::parse(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::UnknownStatus)
    }
}
