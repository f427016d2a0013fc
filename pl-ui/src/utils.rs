use pl_core::calculations::common::{round_half_up, round_one_decimal};
use rust_decimal::Decimal;

/// Inserts a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount with thousands separators and at most two decimals.
///
/// Trailing zeros are dropped, so `840432.00` prints as `840,432`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_half_up(value).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Amount in thousands shown in millions with one decimal, e.g. `588.3`.
pub fn format_millions(value: Decimal) -> String {
    let millions = round_one_decimal(value / Decimal::ONE_THOUSAND);
    format_amount(millions)
}

/// A deduction is stored as a positive magnitude and shown with `▲`.
pub fn format_deduction(value: Decimal) -> String {
    format!("▲{}", format_amount(value))
}

/// Percentage parameter with its fixed single decimal, e.g. `70.0`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.1}", round_one_decimal(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(840432)), "840,432");
        assert_eq!(format_amount(dec!(1234567.89)), "1,234,567.89");
        assert_eq!(format_amount(dec!(999)), "999");
    }

    #[test]
    fn format_amount_drops_trailing_zeros() {
        assert_eq!(format_amount(dec!(588302.40)), "588,302.4");
        assert_eq!(format_amount(dec!(100.00)), "100");
    }

    #[test]
    fn format_amount_rounds_to_two_decimals() {
        assert_eq!(format_amount(dec!(58830.2449)), "58,830.24");
        assert_eq!(format_amount(dec!(0.005)), "0.01");
    }

    #[test]
    fn format_amount_handles_negative_and_zero() {
        assert_eq!(format_amount(dec!(-1234.5)), "-1,234.5");
        assert_eq!(format_amount(Decimal::ZERO), "0");
        assert_eq!(format_amount(dec!(-0.001)), "0");
    }

    #[test]
    fn format_millions_divides_by_thousand() {
        assert_eq!(format_millions(dec!(588302.4)), "588.3");
        assert_eq!(format_millions(dec!(1680864)), "1,680.9");
    }

    #[test]
    fn format_deduction_prefixes_marker() {
        assert_eq!(format_deduction(dec!(117660.48)), "▲117,660.48");
    }

    #[test]
    fn format_percent_always_shows_one_decimal() {
        assert_eq!(format_percent(dec!(70)), "70.0");
        assert_eq!(format_percent(dec!(112.5)), "112.5");
    }
}
