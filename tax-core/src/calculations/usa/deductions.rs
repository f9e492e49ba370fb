//! Federal deduction composition.
//!
//! The base deduction is either the standard deduction for the filing status
//! or the itemized total. Above-the-line contributions are then added on top,
//! each clamped to the annual limit configured for the tax year.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::sanitize_amount;
use crate::models::{DeductionInput, DeductionKind, DeductionLine, FederalDeductions, FilingStatusCode};
use crate::tables::UsTaxTables;

/// Builds the federal deduction breakdown for one calculation.
///
/// The standard deduction is always recorded when chosen, even when the table
/// has no amount for the filing status. Every other component is recorded
/// only when positive.
pub fn federal_deductions(
    tables: &UsTaxTables,
    status: FilingStatusCode,
    input: &DeductionInput,
) -> FederalDeductions {
    let mut deductions = FederalDeductions::default();

    if input.use_standard_deduction {
        push(
            &mut deductions,
            DeductionKind::FederalStandard,
            tables.federal_standard_deduction(status),
        );
    } else {
        push_positive(
            &mut deductions,
            DeductionKind::FederalItemized,
            input.itemized_deductions,
        );
    }

    let limits = &tables.contribution_limits;
    let contributions = [
        (
            DeductionKind::Retirement401k,
            input.retirement_401k,
            limits.retirement_401k,
        ),
        (
            DeductionKind::HsaContribution,
            input.hsa_contribution,
            limits.hsa_contribution,
        ),
        (
            DeductionKind::StudentLoanInterest,
            input.student_loan_interest,
            limits.student_loan_interest,
        ),
    ];
    for (kind, amount, limit) in contributions {
        push_positive(&mut deductions, kind, clamp_to_limit(kind, amount, limit));
    }

    deductions
}

/// Caps `amount` at `limit`, logging when the cap applies.
fn clamp_to_limit(
    kind: DeductionKind,
    amount: Decimal,
    limit: Option<Decimal>,
) -> Decimal {
    match limit {
        Some(limit) if amount > limit => {
            warn!(
                deduction = kind.label(),
                amount = %amount,
                limit = %limit,
                "Contribution exceeds annual limit; clamping"
            );
            limit
        }
        _ => amount,
    }
}

fn push(
    deductions: &mut FederalDeductions,
    kind: DeductionKind,
    amount: Decimal,
) {
    deductions.total += amount;
    deductions.breakdown.push(DeductionLine { kind, amount });
}

fn push_positive(
    deductions: &mut FederalDeductions,
    kind: DeductionKind,
    amount: Decimal,
) {
    let amount = sanitize_amount(amount);
    if amount > Decimal::ZERO {
        push(deductions, kind, amount);
    }
}
