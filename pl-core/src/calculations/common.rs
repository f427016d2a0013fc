//! Common utility functions for forecast calculations.
//!
//! This module provides shared functionality used across the forecast,
//! line-item and metric calculations: rounding, percentage conversion and
//! lenient parsing of user-typed numbers.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::ParameterError;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pl_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the one-decimal precision of a percentage input.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pl_core::calculations::common::round_one_decimal;
///
/// assert_eq!(round_one_decimal(dec!(65.04)), dec!(65.0));
/// assert_eq!(round_one_decimal(dec!(65.05)), dec!(65.1));
/// ```
pub fn round_one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a percentage (e.g. `70`) into a ratio (e.g. `0.7`).
pub fn percent_to_ratio(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Parses a user-typed percentage.
///
/// Surrounding whitespace and comma thousands separators are ignored.
///
/// # Errors
///
/// Returns [`ParameterError::NotNumeric`] for empty or non-numeric input.
pub fn parse_percentage(input: &str) -> Result<Decimal, ParameterError> {
    let normalized = input.trim().replace(',', "");
    if normalized.is_empty() {
        return Err(ParameterError::NotNumeric(input.to_string()));
    }
    normalized
        .parse()
        .map_err(|_| ParameterError::NotNumeric(input.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(2888.985));

        assert_eq!(result, dec!(2888.99));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46)); // Away from zero
    }

    // =========================================================================
    // round_one_decimal tests
    // =========================================================================

    #[test]
    fn round_one_decimal_keeps_single_decimal_values() {
        assert_eq!(round_one_decimal(dec!(999.9)), dec!(999.9));
    }

    #[test]
    fn round_one_decimal_can_cross_the_upper_bound() {
        assert_eq!(round_one_decimal(dec!(999.96)), dec!(1000.0));
    }

    // =========================================================================
    // percent_to_ratio tests
    // =========================================================================

    #[test]
    fn percent_to_ratio_divides_by_one_hundred() {
        assert_eq!(percent_to_ratio(dec!(70)), dec!(0.7));
        assert_eq!(percent_to_ratio(dec!(12.5)), dec!(0.125));
        assert_eq!(percent_to_ratio(dec!(0)), dec!(0));
    }

    // =========================================================================
    // parse_percentage tests
    // =========================================================================

    #[test]
    fn parse_percentage_accepts_plain_and_padded_numbers() {
        assert_eq!(parse_percentage("65.0"), Ok(dec!(65.0)));
        assert_eq!(parse_percentage("  120 "), Ok(dec!(120)));
    }

    #[test]
    fn parse_percentage_ignores_thousands_separator() {
        assert_eq!(parse_percentage("1,000.5"), Ok(dec!(1000.5)));
    }

    #[test]
    fn parse_percentage_rejects_text() {
        assert_eq!(
            parse_percentage("abc"),
            Err(ParameterError::NotNumeric("abc".to_string()))
        );
    }

    #[test]
    fn parse_percentage_rejects_empty_input() {
        assert!(parse_percentage("   ").is_err());
    }
}
