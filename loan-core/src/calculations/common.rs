//! Rounding and number parsing used across loan calculations.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Parses user input as a number.
///
/// Surrounding whitespace is ignored. Plain decimals (`"123.45"`) and
/// scientific notation (`"1.2e3"`) are accepted. Returns `None` for empty or
/// non-numeric input, for digit separators (`,` or `_`), and for values
/// beyond the range of [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::parse_number;
///
/// assert_eq!(parse_number(" 1200 "), Some(dec!(1200)));
/// assert_eq!(parse_number("1.5e2"), Some(dec!(150)));
/// assert_eq!(parse_number("abc"), None);
/// assert_eq!(parse_number(""), None);
/// ```
pub fn parse_number(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
