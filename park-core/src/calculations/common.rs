//! Common utility functions for price calculations.
//!
//! This module provides the rounding and currency formatting shared by the
//! estimator, the checkout feedback and the history view.

use rust_decimal::Decimal;

/// Display value used where no estimate can be shown.
pub const PLACEHOLDER: &str = "—";

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use park_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as `symbol` followed by exactly two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use park_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency("₹", dec!(50)), "₹50.00");
/// assert_eq!(format_currency("$", dec!(120.5)), "$120.50");
/// ```
pub fn format_currency(
    symbol: &str,
    amount: Decimal,
) -> String {
    format!("{symbol}{:.2}", round_half_up(amount))
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
        let result = round_half_up(dec!(0.125));

        assert_eq!(result, dec!(0.13));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        let result = round_half_up(dec!(50.00));

        assert_eq!(result, dec!(50.00));
    }

    #[test]
    fn round_half_up_handles_small_values() {
        let result = round_half_up(dec!(0.004999));

        assert_eq!(result, dec!(0.00));
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_pads_to_two_decimals() {
        assert_eq!(format_currency("₹", dec!(0)), "₹0.00");
        assert_eq!(format_currency("₹", dec!(7.5)), "₹7.50");
    }

    #[test]
    fn format_currency_rounds_extra_precision() {
        assert_eq!(format_currency("₹", dec!(16.6666666)), "₹16.67");
        assert_eq!(format_currency("₹", dec!(2.345)), "₹2.35");
    }

    #[test]
    fn format_currency_allows_empty_symbol() {
        assert_eq!(format_currency("", dec!(120.5)), "120.50");
    }
}
