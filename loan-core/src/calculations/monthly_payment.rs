//! Monthly payment derivation for a loan.
//!
//! The payment is the principal spread evenly over the term: no interest is
//! applied. The result is rounded half-up to cents.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use loan_core::calculations::{format_payment, monthly_payment};
//!
//! let payment = monthly_payment(dec!(1200), dec!(12)).unwrap();
//! assert_eq!(format_payment(payment), "100.00");
//! ```

use rust_decimal::Decimal;

use super::common::{parse_number, round_half_up};

/// `round(amount / term, 2)`, or `None` when either input is not positive.
pub fn monthly_payment(
    amount: Decimal,
    term: Decimal,
) -> Option<Decimal> {
    if amount <= Decimal::ZERO || term <= Decimal::ZERO {
        return None;
    }
    amount.checked_div(term).map(round_half_up)
}

/// Derives the payment from raw form input.
///
/// Returns `None` for empty, non-numeric, zero or negative values; callers
/// keep their previous derived value in that case.
pub fn monthly_payment_from_input(
    amount: &str,
    term: &str,
) -> Option<Decimal> {
    monthly_payment(parse_number(amount)?, parse_number(term)?)
}

/// Formats a payment with exactly two decimal places (`"100.00"`).
pub fn format_payment(payment: Decimal) -> String {
    let mut rounded = round_half_up(payment);
    rounded.rescale(2);
    rounded.to_string()
}
