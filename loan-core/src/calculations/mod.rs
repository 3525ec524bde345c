//! Loan arithmetic shared by the form and the API backends.

pub mod common;
pub mod monthly_payment;

pub use monthly_payment::{format_payment, monthly_payment, monthly_payment_from_input};
