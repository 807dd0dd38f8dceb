//! Pure precision-normalization module for asset amounts.
//!
//! All math uses `rust_decimal::Decimal` for exact arithmetic.
//! No async, no network calls.
//!
//! Every amount that crosses the submission boundary is first normalized
//! to the declared decimal precision of its asset, so no floating-point
//! drift propagates downstream. Rounding is half-away-from-zero, matching
//! the gateway's fixed-point formatting.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::SdkError;

/// Round `value` to `precision` decimal places, half away from zero.
pub fn round_to_precision(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Format `value` with exactly `precision` decimal places (e.g. `"6.0000"`).
///
/// The value is rounded first, so `format_with_precision(d, p)` always
/// renders `round_to_precision(d, p)`.
pub fn format_with_precision(value: &Decimal, precision: u32) -> String {
    let rounded = round_to_precision(*value, precision);
    // Decimal::round_dp can drop trailing zeros; rescale to pin them.
    let mut pinned = rounded;
    pinned.rescale(precision);
    pinned.to_string()
}

/// Parse a raw user-entered amount string into a `Decimal`.
///
/// Inputs are not assumed pre-validated; empty and malformed strings are
/// rejected with a validation error rather than a panic.
pub fn parse_decimal(input: &str) -> Result<Decimal, SdkError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SdkError::Validation("empty amount".to_string()));
    }
    Decimal::from_str(trimmed)
        .map_err(|e| SdkError::Validation(format!("invalid amount '{}': {}", trimmed, e)))
}

/// Render an amount as a chain asset string, e.g. `"6.0000 EOS"`.
pub fn format_asset(value: &Decimal, precision: u32, symbol: &str) -> String {
    format!("{} {}", format_with_precision(value, precision), symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_to_precision_basic() {
        assert_eq!(round_to_precision(dec("6"), 4), dec("6"));
        assert_eq!(round_to_precision(dec("0.12345"), 4), dec("0.1235"));
        assert_eq!(round_to_precision(dec("0.12344"), 4), dec("0.1234"));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        // toFixed semantics, not banker's rounding
        assert_eq!(round_to_precision(dec("0.00005"), 4), dec("0.0001"));
        assert_eq!(round_to_precision(dec("-0.00005"), 4), dec("-0.0001"));
        assert_eq!(round_to_precision(dec("2.5"), 0), dec("3"));
    }

    #[test]
    fn test_format_pins_trailing_zeros() {
        assert_eq!(format_with_precision(&dec("6"), 4), "6.0000");
        assert_eq!(format_with_precision(&dec("6.00"), 4), "6.0000");
        assert_eq!(format_with_precision(&dec("0"), 4), "0.0000");
        assert_eq!(format_with_precision(&dec("1.5"), 2), "1.50");
    }

    #[test]
    fn test_format_rounds_before_rendering() {
        assert_eq!(format_with_precision(&dec("0.123456"), 4), "0.1235");
        assert_eq!(format_with_precision(&dec("9.99999"), 4), "10.0000");
    }

    #[test]
    fn test_format_deterministic() {
        let v = dec("2.0") * dec("3.0");
        assert_eq!(format_with_precision(&v, 4), "6.0000");
        assert_eq!(format_with_precision(&v, 4), "6.0000");
    }

    #[test]
    fn test_parse_decimal_valid() {
        assert_eq!(parse_decimal("0.1").unwrap(), dec("0.1"));
        assert_eq!(parse_decimal(" 42 ").unwrap(), dec("42"));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("   ").is_err());
        assert!(parse_decimal("1.2.3").is_err());
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn test_format_asset() {
        assert_eq!(format_asset(&dec("6"), 4, "EOS"), "6.0000 EOS");
        assert_eq!(format_asset(&dec("5"), 2, "DAQ"), "5.00 DAQ");
    }
}
