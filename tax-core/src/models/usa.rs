use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BandTax, FilingStatusCode, TaxBracket, UsState};

/// Federal deduction choices for a single calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionInput {
    /// Take the standard deduction for the filing status instead of
    /// `itemized_deductions`.
    pub use_standard_deduction: bool,
    pub retirement_401k: Decimal,
    pub hsa_contribution: Decimal,
    pub student_loan_interest: Decimal,
    pub itemized_deductions: Decimal,
}

impl Default for DeductionInput {
    fn default() -> Self {
        Self {
            use_standard_deduction: true,
            retirement_401k: Decimal::ZERO,
            hsa_contribution: Decimal::ZERO,
            student_loan_interest: Decimal::ZERO,
            itemized_deductions: Decimal::ZERO,
        }
    }
}

/// Inputs to the USA pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsTaxInput {
    /// Gross annual income.
    pub income: Decimal,
    pub filing_status: FilingStatusCode,
    pub is_self_employed: bool,
    pub state: UsState,
    pub deductions: DeductionInput,
}

/// A federal deduction component, in the order the pipeline applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionKind {
    FederalStandard,
    FederalItemized,
    Retirement401k,
    HsaContribution,
    StudentLoanInterest,
}

impl DeductionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FederalStandard => "Federal Standard Deduction",
            Self::FederalItemized => "Federal Itemized Deductions",
            Self::Retirement401k => "401(k) Contribution",
            Self::HsaContribution => "HSA Contribution",
            Self::StudentLoanInterest => "Student Loan Interest",
        }
    }
}

/// One line of the federal deduction breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub kind: DeductionKind,
    pub amount: Decimal,
}

impl DeductionLine {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Federal deductions applied to gross income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalDeductions {
    pub total: Decimal,
    /// Components in application order.
    pub breakdown: Vec<DeductionLine>,
}

impl FederalDeductions {
    /// Amount recorded for `kind`, if that component was applied.
    pub fn amount_for(
        &self,
        kind: DeductionKind,
    ) -> Option<Decimal> {
        self.breakdown
            .iter()
            .find(|line| line.kind == kind)
            .map(|line| line.amount)
    }
}

/// Aggregate result of the USA pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsTaxResult {
    /// Tax year of the tables the result was computed with.
    pub tax_year: i32,
    pub gross_income: Decimal,
    pub federal_taxable_income: Decimal,
    pub state_taxable_income: Decimal,
    pub federal_income_tax: Decimal,
    pub state_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub total_tax: Decimal,
    /// Total tax as a percentage of gross income, zero when there is no income.
    pub effective_tax_rate: Decimal,
    pub take_home_pay: Decimal,
    pub deductions: FederalDeductions,
    /// Federal brackets that contributed a positive amount, lowest first.
    pub tax_bracket_breakdown: Vec<BandTax<TaxBracket>>,
}
