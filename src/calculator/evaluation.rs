//! Decimal arithmetic for a single reduction step.
//!
//! Addition, subtraction and multiplication are exact. Division and percent
//! round half-up (ties away from zero) to a fixed number of fractional digits.

use super::error::ErrorKind;
use super::token::Operator;
use bigdecimal::{BigDecimal, num_bigint::BigInt, RoundingMode, Zero};

/// Apply `op` to `left` and `right`.
pub fn apply(
    op: Operator,
    left: &BigDecimal,
    right: &BigDecimal,
    scale: u32,
) -> Result<BigDecimal, ErrorKind> {
    match op {
        Operator::Add => Ok(left + right),
        Operator::Sub => Ok(left - right),
        Operator::Mul => Ok(left * right),
        Operator::Div => divide(left, right, scale),
    }
}

/// `value` divided by one hundred.
pub fn percent(value: &BigDecimal, scale: u32) -> Result<BigDecimal, ErrorKind> {
    divide(value, &BigDecimal::from(100), scale)
}

/// `left / right` rounded half-up to `scale` fractional digits.
///
/// The quotient is first truncated to one extra digit with exact integer
/// division; half-up rounding only looks at that digit, so the result is
/// rounded exactly once.
fn divide(left: &BigDecimal, right: &BigDecimal, scale: u32) -> Result<BigDecimal, ErrorKind> {
    if right.is_zero() {
        return Err(ErrorKind::DivisionByZero);
    }

    let (numerator, left_exp) = left.as_bigint_and_exponent();
    let (denominator, right_exp) = right.as_bigint_and_exponent();
    let guard_scale = i64::from(scale) + 1;

    // left / right * 10^guard_scale as an integer quotient of two integers.
    let shift = right_exp - left_exp + guard_scale;
    let (numerator, denominator) = if shift >= 0 {
        (numerator * pow10(shift)?, denominator)
    } else {
        (numerator, denominator * pow10(-shift)?)
    };

    let truncated = BigDecimal::new(numerator / denominator, guard_scale);
    Ok(truncated.with_scale_round(i64::from(scale), RoundingMode::HalfUp))
}

fn pow10(exponent: i64) -> Result<BigInt, ErrorKind> {
    let exponent = u32::try_from(exponent).map_err(|_| ErrorKind::MathError)?;
    Ok(BigInt::from(10u8).pow(exponent))
}

/// Canonical text of a committed value: plain notation, no trailing zeros.
pub fn format_decimal(value: &BigDecimal) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    value.normalized().to_plain_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn calc(op: Operator, l: &str, r: &str) -> Result<BigDecimal, ErrorKind> {
        apply(op, &dec(l), &dec(r), 8)
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(calc(Operator::Add, "2", "2"), Ok(dec("4")));
        assert_eq!(calc(Operator::Sub, "2", "5"), Ok(dec("-3")));
        assert_eq!(calc(Operator::Mul, "1.5", "1.5"), Ok(dec("2.25")));
    }

    #[test]
    fn test_multiplication_is_exact() {
        let product = calc(Operator::Mul, "1234567890123456", "1234567890123456").unwrap();
        assert_eq!(format_decimal(&product), "1524157875323881726870921383936");

        let product = calc(Operator::Mul, "0.1234567890123456", "0.1234567890123456").unwrap();
        assert_eq!(format_decimal(&product), "0.01524157875323881726870921383936");
    }

    #[test]
    fn test_division_rounds_half_up() {
        let div = |l, r| calc(Operator::Div, l, r);
        assert_eq!(div("1", "3"), Ok(dec("0.33333333")));
        assert_eq!(div("2", "3"), Ok(dec("0.66666667")));
        assert_eq!(div("-2", "3"), Ok(dec("-0.66666667")));
        assert_eq!(div("1", "200000000"), Ok(dec("0.00000001")));
        assert_eq!(div("-1", "200000000"), Ok(dec("-0.00000001")));
        assert_eq!(div("1", "300000000"), Ok(dec("0")));
    }

    #[test]
    fn test_division_of_large_dividend_keeps_scale() {
        let quotient = calc(Operator::Div, "99999999989999990000000001", "7").unwrap();
        assert_eq!(format_decimal(&quotient), "14285714284285712857142857.28571429");
    }

    #[test]
    fn test_division_with_fractional_operands() {
        assert_eq!(calc(Operator::Div, "0.5", "0.25"), Ok(dec("2")));
        assert_eq!(calc(Operator::Div, "1000", "0.003"), Ok(dec("333333.33333333")));
    }

    #[test]
    fn test_division_scale_is_configurable() {
        assert_eq!(apply(Operator::Div, &dec("2"), &dec("3"), 2), Ok(dec("0.67")));
        assert_eq!(apply(Operator::Div, &dec("7"), &dec("2"), 0), Ok(dec("4")));
    }

    #[test]
    fn test_division_by_zero() {
        let div = |l, r| calc(Operator::Div, l, r);
        assert_eq!(div("5", "0"), Err(ErrorKind::DivisionByZero));
        assert_eq!(div("5", "0.000"), Err(ErrorKind::DivisionByZero));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(&dec("50"), 8), Ok(dec("0.5")));
        assert_eq!(percent(&dec("200"), 8), Ok(dec("2")));
        assert_eq!(percent(&dec("0.000000005"), 8), Ok(dec("0")));
    }

    #[test]
    fn test_format_strips_trailing_zeros() {
        assert_eq!(format_decimal(&dec("0.50000000")), "0.5");
        assert_eq!(format_decimal(&dec("14.000")), "14");
        assert_eq!(format_decimal(&dec("-0.0")), "0");
        assert_eq!(format_decimal(&dec("1000")), "1000");
        assert_eq!(format_decimal(&dec("0.00000001")), "0.00000001");
    }
}
