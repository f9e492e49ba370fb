use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::FilingStatusCode;

/// A configuration table that violates the shape the calculators rely on.
///
/// `table` names the offending table (e.g. `"federal MFJ"`, `"state CA S"`,
/// `"NI category A"`) so load-time failures point at the bad data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("{table}: band {index} has a negative lower bound {value}")]
    NegativeLowerBound {
        table: String,
        index: usize,
        value: Decimal,
    },

    #[error("{table}: band {index} upper bound {upper} is not above its lower bound {lower}")]
    InvertedBand {
        table: String,
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("{table}: band {index} starts at {lower}, below the previous upper bound {previous_upper}")]
    OverlappingBands {
        table: String,
        index: usize,
        lower: Decimal,
        previous_upper: Decimal,
    },

    #[error("{table}: band {index} starts at {lower}, leaving a gap after {previous_upper}")]
    GapBetweenBands {
        table: String,
        index: usize,
        lower: Decimal,
        previous_upper: Decimal,
    },

    #[error("{table}: band {index} is unbounded but is not the last band")]
    UnboundedBandNotLast { table: String, index: usize },

    #[error("{table}: the last band must be unbounded")]
    BoundedTopBand { table: String },

    #[error("{table}: band {index} rate {rate} is outside 0..={max}")]
    RateOutOfRange {
        table: String,
        index: usize,
        rate: Decimal,
        max: Decimal,
    },

    #[error("{table}: standard deduction must be non-negative, got {amount}")]
    NegativeStandardDeduction { table: String, amount: Decimal },

    #[error("{table}: row for tax year {found} in a table for {expected}")]
    TaxYearMismatch {
        table: String,
        expected: i32,
        found: i32,
    },

    #[error("no federal brackets for filing status {0}")]
    MissingFederalBrackets(FilingStatusCode),

    #[error("FICA {field} must be {expected}, got {value}")]
    InvalidFica {
        field: &'static str,
        expected: &'static str,
        value: Decimal,
    },

    #[error("contribution limit for {field} must be non-negative, got {value}")]
    NegativeContributionLimit { field: &'static str, value: Decimal },
}
