//! State income tax on gross income less the state standard deduction.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::accumulate;
use crate::calculations::common::max;
use crate::models::{FilingStatusCode, TaxBracket, UsState};
use crate::tables::UsTaxTables;

/// State taxable income: gross income less the state standard deduction.
///
/// Federal deductions do not reduce the state base.
pub fn state_taxable_income(
    tables: &UsTaxTables,
    state: UsState,
    status: FilingStatusCode,
    gross_income: Decimal,
) -> Decimal {
    let deduction = tables.state_standard_deduction(state, status);
    max(gross_income - deduction, Decimal::ZERO)
}

/// State income tax on `taxable_income`. Zero for states without brackets.
pub fn state_income_tax(
    tables: &UsTaxTables,
    state: UsState,
    status: FilingStatusCode,
    taxable_income: Decimal,
) -> Decimal {
    let brackets = tables.state_brackets(state, status);
    if brackets.is_empty() {
        debug!(state = %state, status = status.as_str(), "No state brackets; state tax is zero");
        return Decimal::ZERO;
    }
    accumulate(brackets, taxable_income, TaxBracket::rate_fraction).total
}
