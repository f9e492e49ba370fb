//! UK pipeline: Class 1 National Insurance.

mod national_insurance;

use tracing::debug;

pub use national_insurance::{NiContributions, WEEKS_PER_YEAR, ni_contributions};

use crate::calculations::common::{percentage_of, sanitize_amount};
use crate::models::{UkTaxInput, UkTaxResult};
use crate::tables::UkNiTables;

/// Calculator for the UK pipeline over one year's tables.
#[derive(Debug, Clone, Copy)]
pub struct UkTaxCalculator<'a> {
    tables: &'a UkNiTables,
}

impl<'a> UkTaxCalculator<'a> {
    pub fn new(tables: &'a UkNiTables) -> Self {
        Self { tables }
    }

    /// Never fails. A category without bands pays nothing and zero income
    /// yields a zero effective rate.
    pub fn calculate(
        &self,
        input: &UkTaxInput,
    ) -> UkTaxResult {
        let gross_income = sanitize_amount(input.income);
        let bands = self.tables.bands_for(input.ni_category);
        if bands.is_empty() {
            debug!(
                category = input.ni_category.as_str(),
                tax_year = self.tables.tax_year,
                "No NI bands for category; contributions are zero"
            );
        }

        let contributions = ni_contributions(bands, gross_income, input.is_employed);
        let total_contributions = contributions.employee;

        UkTaxResult {
            tax_year: self.tables.tax_year,
            gross_income,
            national_insurance: contributions.employee,
            employer_contribution: contributions.employer,
            total_contributions,
            take_home_pay: gross_income - total_contributions,
            effective_rate: percentage_of(total_contributions, gross_income),
            ni_breakdown: contributions.breakdown,
        }
    }
}

/// Computes National Insurance for `input`.
pub fn compute_uk_tax(
    tables: &UkNiTables,
    input: &UkTaxInput,
) -> UkTaxResult {
    UkTaxCalculator::new(tables).calculate(input)
}
