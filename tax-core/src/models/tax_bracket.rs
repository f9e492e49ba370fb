use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Band;

/// A marginal-rate income tax bracket (federal or state).
///
/// `rate_percent` is expressed in percentage points, so `22` means 22%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate_percent: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        rate_percent: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            rate_percent,
        }
    }

    /// The rate as a fraction (22 percentage points → 0.22).
    pub fn rate_fraction(&self) -> Decimal {
        self.rate_percent / Decimal::ONE_HUNDRED
    }
}

impl Band for TaxBracket {
    fn lower_bound(&self) -> Decimal {
        self.min_income
    }

    fn upper_bound(&self) -> Option<Decimal> {
        self.max_income
    }
}

impl std::fmt::Display for TaxBracket {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self.max_income {
            Some(max) => write!(
                f,
                "{}% (${} - ${})",
                self.rate_percent.normalize(),
                self.min_income.normalize(),
                max.normalize()
            ),
            None => write!(
                f,
                "{}% (${} and up)",
                self.rate_percent.normalize(),
                self.min_income.normalize()
            ),
        }
    }
}
