//! Decimal-as-text price parsing and line-total arithmetic.
//!
//! Prices are persisted exactly as the seller entered them ("50000",
//! "25000.50"); they are parsed only when an order needs to compute totals.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{LapakError, LapakResult};

/// Parse a stored price field. Surrounding whitespace is tolerated;
/// anything else malformed is an [`LapakError::InvalidPrice`].
pub fn parse_price(value: &str) -> LapakResult<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LapakError::InvalidPrice {
            value: value.to_string(),
        });
    }
    Decimal::from_str(trimmed).map_err(|_| LapakError::InvalidPrice {
        value: value.to_string(),
    })
}

/// `unit_price * quantity`, exact.
pub fn line_total(unit_price: Decimal, quantity: i64) -> Decimal {
    unit_price * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integral_and_fractional_text() {
        assert_eq!(parse_price("50000").unwrap(), Decimal::from(50000));
        assert_eq!(
            parse_price(" 25000.50 ").unwrap(),
            Decimal::from_str("25000.50").unwrap()
        );
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in ["", "  ", "abc", "12,5", "1e3x"] {
            let err = parse_price(bad).unwrap_err();
            assert!(matches!(err, LapakError::InvalidPrice { .. }), "{bad:?}");
        }
    }

    #[test]
    fn line_total_is_exact() {
        let unit = parse_price("25000.50").unwrap();
        assert_eq!(line_total(unit, 3), Decimal::from_str("75001.50").unwrap());
        assert_eq!(line_total(Decimal::from(50000), 2), Decimal::from(100000));
    }
}
