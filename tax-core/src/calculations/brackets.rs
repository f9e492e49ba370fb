//! Progressive band accumulation shared by both pipelines.
//!
//! Bands are walked in ascending order. Each band contributes the slice of the
//! amount that lies between its lower bound and the smaller of its upper bound
//! and the amount; the walk stops at the first band that covers the amount.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::brackets::accumulate;
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0), Some(dec!(11925)), dec!(10)),
//!     TaxBracket::new(dec!(11925), Some(dec!(48475)), dec!(12)),
//!     TaxBracket::new(dec!(48475), None, dec!(22)),
//! ];
//!
//! let result = accumulate(&brackets, dec!(35000), TaxBracket::rate_fraction);
//!
//! assert_eq!(result.total, dec!(3961.50));
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{Band, BandTax};

/// The portion of an amount that falls inside one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSlice<'a, B> {
    pub band: &'a B,
    pub amount: Decimal,
}

/// Total tax over a band table together with its per-band breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAccumulation<B> {
    /// Sum of the rounded per-band contributions.
    pub total: Decimal,
    /// Bands with a strictly positive contribution, lowest first.
    pub breakdown: Vec<BandTax<B>>,
}

impl<B> Default for BracketAccumulation<B> {
    fn default() -> Self {
        Self {
            total: Decimal::ZERO,
            breakdown: Vec::new(),
        }
    }
}

/// Splits `amount` across `bands`.
///
/// `bands` must be sorted ascending. Bands at or above the amount are never
/// visited, so a zero amount or an empty table yields no slices.
pub fn band_slices<B: Band>(
    bands: &[B],
    amount: Decimal,
) -> Vec<BandSlice<'_, B>> {
    let mut slices = Vec::new();
    for band in bands {
        if amount <= band.lower_bound() {
            break;
        }
        slices.push(BandSlice {
            band,
            amount: band.portion_of(amount),
        });
        if band.covers(amount) {
            break;
        }
    }
    slices
}

/// Applies `rate` to every slice of `amount` and sums the results.
///
/// Each contribution is rounded to cents before it is summed, so the total
/// always equals the sum of the breakdown.
pub fn accumulate<B, F>(
    bands: &[B],
    amount: Decimal,
    rate: F,
) -> BracketAccumulation<B>
where
    B: Band + Clone,
    F: Fn(&B) -> Decimal,
{
    let mut result = BracketAccumulation::default();
    for slice in band_slices(bands, amount) {
        let tax = round_half_up(slice.amount * rate(slice.band));
        if tax > Decimal::ZERO {
            result.total += tax;
            result.breakdown.push(BandTax {
                band: slice.band.clone(),
                taxable_amount: slice.amount,
                tax,
            });
        }
    }
    result
}
