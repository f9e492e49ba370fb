use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{NiBand, NiCategory};

/// Inputs to the UK pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkTaxInput {
    /// Gross annual income.
    pub income: Decimal,
    pub ni_category: NiCategory,
    pub is_employed: bool,
}

/// Employee National Insurance paid within one band, annualised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiContribution {
    pub band: NiBand,
    /// Annual earnings that fell inside the band.
    pub annual_earnings: Decimal,
    /// Annual employee contribution for the band.
    pub amount: Decimal,
}

/// Aggregate result of the UK pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkTaxResult {
    pub tax_year: i32,
    pub gross_income: Decimal,
    /// Annual employee National Insurance.
    pub national_insurance: Decimal,
    /// Annual employer National Insurance; present only for employed earners.
    pub employer_contribution: Option<Decimal>,
    /// Employee contributions only; the employer share is informational.
    pub total_contributions: Decimal,
    pub take_home_pay: Decimal,
    /// Total contributions as a percentage of income, zero when there is no income.
    pub effective_rate: Decimal,
    /// Bands with a positive employee contribution, lowest first.
    pub ni_breakdown: Vec<NiContribution>,
}
