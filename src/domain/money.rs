//! Monetary types for price and volume representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// One unit of collateral expressed in the venue's fixed-point base unit.
///
/// The venue reports collateral balances as 6-decimal fixed-point
/// integers (1 USDC = 1_000_000 micro-units).
pub const MICRO_UNITS_PER_UNIT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Convert a raw balance in micro-units to a full-precision decimal.
///
/// Full precision is retained for PnL subtraction; rounding to two
/// decimals happens only at display time.
#[must_use]
pub fn from_micro_units(raw: Decimal) -> Decimal {
    raw / MICRO_UNITS_PER_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn micro_unit_conversion_keeps_precision() {
        assert_eq!(from_micro_units(dec!(12_345_678)), dec!(12.345678));
        assert_eq!(from_micro_units(dec!(0)), dec!(0));
    }

    #[test]
    fn display_rounding_is_separate_from_conversion() {
        let full = from_micro_units(dec!(1_234_567));
        assert_eq!(full, dec!(1.234567));
        assert_eq!(full.round_dp(2), dec!(1.23));
    }
}
