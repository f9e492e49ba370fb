//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used by both pipelines,
//! including rounding, input sanitisation and percentage calculation.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::warn;

/// Largest amount the calculators accept (one trillion). Larger inputs are
/// clamped so that decimal arithmetic on them can never overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a caller-supplied amount into `0..=MAX_AMOUNT`.
///
/// Negative amounts become zero. The calculators run every income through
/// this before doing anything else, so they stay total over any input.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::sanitize_amount;
///
/// assert_eq!(sanitize_amount(dec!(-50)), dec!(0));
/// assert_eq!(sanitize_amount(dec!(50000)), dec!(50000));
/// ```
pub fn sanitize_amount(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        warn!(value = %value, "Negative amount treated as zero");
        Decimal::ZERO
    } else if value > MAX_AMOUNT {
        warn!(value = %value, max = %MAX_AMOUNT, "Amount clamped to maximum");
        MAX_AMOUNT
    } else {
        value
    }
}

/// Converts a floating-point amount from a loosely typed caller.
///
/// NaN, infinities and negative values become zero; everything else is
/// converted and then passed through [`sanitize_amount`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::amount_from_f64;
///
/// assert_eq!(amount_from_f64(f64::NAN), dec!(0));
/// assert_eq!(amount_from_f64(f64::INFINITY), dec!(0));
/// assert_eq!(amount_from_f64(1234.5), dec!(1234.5));
/// ```
pub fn amount_from_f64(value: f64) -> Decimal {
    if !value.is_finite() || value < 0.0 {
        warn!(value, "Non-finite or negative amount treated as zero");
        return Decimal::ZERO;
    }
    match Decimal::from_f64(value) {
        Some(amount) => sanitize_amount(amount),
        None => {
            warn!(value, max = %MAX_AMOUNT, "Amount clamped to maximum");
            MAX_AMOUNT
        }
    }
}

/// `part / whole × 100`, rounded to two decimals; zero when `whole` is not positive.
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(part / whole * Decimal::ONE_HUNDRED)
}
