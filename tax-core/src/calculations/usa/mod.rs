//! USA pipeline: federal income tax, state income tax and FICA.
//!
//! # Example
//!
//! ```no_run
//! use tax_core::{UsTaxInput, UsTaxTables, compute_us_tax};
//!
//! fn estimate(tables: &UsTaxTables, input: &UsTaxInput) {
//!     let result = compute_us_tax(tables, input);
//!     println!("take-home: {}", result.take_home_pay);
//! }
//! ```

mod deductions;
mod federal;
mod fica;
mod state;

use tracing::debug;

pub use deductions::federal_deductions;
pub use federal::{federal_income_tax, federal_taxable_income};
pub use fica::{FicaTaxes, fica_taxes};
pub use state::{state_income_tax, state_taxable_income};

use crate::calculations::common::{percentage_of, sanitize_amount};
use crate::models::{UsTaxInput, UsTaxResult};
use crate::tables::UsTaxTables;

/// Calculator for the USA pipeline over one year's tables.
#[derive(Debug, Clone, Copy)]
pub struct UsTaxCalculator<'a> {
    tables: &'a UsTaxTables,
}

impl<'a> UsTaxCalculator<'a> {
    pub fn new(tables: &'a UsTaxTables) -> Self {
        Self { tables }
    }

    /// Runs every step of the pipeline.
    ///
    /// Never fails: income is clamped into range first and missing table
    /// entries mean "no tax" for that component.
    pub fn calculate(
        &self,
        input: &UsTaxInput,
    ) -> UsTaxResult {
        let gross_income = sanitize_amount(input.income);
        let status = input.filing_status;

        let deductions = federal_deductions(self.tables, status, &input.deductions);
        let federal_taxable_income = federal_taxable_income(gross_income, &deductions);
        let federal = federal_income_tax(self.tables, status, federal_taxable_income);

        let state_taxable_income =
            state_taxable_income(self.tables, input.state, status, gross_income);
        let state_tax = state_income_tax(self.tables, input.state, status, state_taxable_income);

        let fica = fica_taxes(&self.tables.fica, gross_income, input.is_self_employed);

        let total_tax = federal.total + state_tax + fica.social_security + fica.medicare;

        debug!(
            tax_year = self.tables.tax_year,
            gross = %gross_income,
            federal = %federal.total,
            state = %state_tax,
            total = %total_tax,
            "Computed USA tax"
        );

        UsTaxResult {
            tax_year: self.tables.tax_year,
            gross_income,
            federal_taxable_income,
            state_taxable_income,
            federal_income_tax: federal.total,
            state_tax,
            social_security_tax: fica.social_security,
            medicare_tax: fica.medicare,
            total_tax,
            effective_tax_rate: percentage_of(total_tax, gross_income),
            take_home_pay: gross_income - total_tax,
            deductions,
            tax_bracket_breakdown: federal.breakdown,
        }
    }
}

/// Computes federal, state and payroll taxes for `input`.
pub fn compute_us_tax(
    tables: &UsTaxTables,
    input: &UsTaxInput,
) -> UsTaxResult {
    UsTaxCalculator::new(tables).calculate(input)
}
