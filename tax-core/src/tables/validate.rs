//! Shape checks shared by every band table.

use rust_decimal::Decimal;

use super::TaxTableError;
use crate::models::Band;

/// Checks that `bands` are sorted, contiguous, non-negative and end in a
/// single unbounded band.
///
/// An empty table is valid and means "no tax".
pub fn validate_bands<B: Band>(
    table: &str,
    bands: &[B],
) -> Result<(), TaxTableError> {
    let last = bands.len().saturating_sub(1);
    let mut previous_upper: Option<Decimal> = None;

    for (index, band) in bands.iter().enumerate() {
        let lower = band.lower_bound();
        if lower < Decimal::ZERO {
            return Err(TaxTableError::NegativeLowerBound {
                table: table.to_string(),
                index,
                value: lower,
            });
        }

        if let Some(previous_upper) = previous_upper {
            if lower < previous_upper {
                return Err(TaxTableError::OverlappingBands {
                    table: table.to_string(),
                    index,
                    lower,
                    previous_upper,
                });
            }
            if lower > previous_upper {
                return Err(TaxTableError::GapBetweenBands {
                    table: table.to_string(),
                    index,
                    lower,
                    previous_upper,
                });
            }
        }

        match band.upper_bound() {
            Some(upper) if upper <= lower => {
                return Err(TaxTableError::InvertedBand {
                    table: table.to_string(),
                    index,
                    lower,
                    upper,
                });
            }
            Some(_) if index == last => {
                return Err(TaxTableError::BoundedTopBand {
                    table: table.to_string(),
                });
            }
            None if index != last => {
                return Err(TaxTableError::UnboundedBandNotLast {
                    table: table.to_string(),
                    index,
                });
            }
            _ => {}
        }

        previous_upper = band.upper_bound();
    }

    Ok(())
}

/// Checks that every rate lies in `0..=max`.
pub fn validate_rates(
    table: &str,
    rates: impl IntoIterator<Item = Decimal>,
    max: Decimal,
) -> Result<(), TaxTableError> {
    for (index, rate) in rates.into_iter().enumerate() {
        if rate < Decimal::ZERO || rate > max {
            return Err(TaxTableError::RateOutOfRange {
                table: table.to_string(),
                index,
                rate,
                max,
            });
        }
    }
    Ok(())
}
