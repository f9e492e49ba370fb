//! Federal taxable income and federal income tax.

use rust_decimal::Decimal;

use crate::calculations::brackets::{BracketAccumulation, accumulate};
use crate::calculations::common::max;
use crate::models::{FederalDeductions, FilingStatusCode, TaxBracket};
use crate::tables::UsTaxTables;

/// `max(0, gross - total federal deductions)`.
pub fn federal_taxable_income(
    gross_income: Decimal,
    deductions: &FederalDeductions,
) -> Decimal {
    max(gross_income - deductions.total, Decimal::ZERO)
}

/// Federal income tax on `taxable_income` using the brackets for `status`.
pub fn federal_income_tax(
    tables: &UsTaxTables,
    status: FilingStatusCode,
    taxable_income: Decimal,
) -> BracketAccumulation<TaxBracket> {
    accumulate(
        tables.federal_brackets(status),
        taxable_income,
        TaxBracket::rate_fraction,
    )
}
