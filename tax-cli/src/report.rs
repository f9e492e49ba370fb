//! Plain-text rendering of estimate results.

use std::fmt::Write;

use tax_core::{UkTaxResult, UsTaxResult};

use crate::utils::{format_money, format_percent};

const LABEL_WIDTH: usize = 32;

fn line(
    out: &mut String,
    label: &str,
    value: &str,
) {
    let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{value:>16}");
}

pub fn render_us(result: &UsTaxResult) -> String {
    let usd = |value| format_money("$", value);
    let mut out = String::new();

    let _ = writeln!(out, "USA tax estimate ({})", result.tax_year);
    line(&mut out, "Gross income", &usd(result.gross_income));

    let _ = writeln!(out, "\nDeductions");
    for deduction in &result.deductions.breakdown {
        line(&mut out, deduction.label(), &usd(deduction.amount));
    }
    line(&mut out, "Total deductions", &usd(result.deductions.total));

    let _ = writeln!(out, "\nFederal brackets");
    for band in &result.tax_bracket_breakdown {
        line(&mut out, &band.band.to_string(), &usd(band.tax));
    }

    let _ = writeln!(out, "\nSummary");
    line(&mut out, "Federal taxable income", &usd(result.federal_taxable_income));
    line(&mut out, "Federal income tax", &usd(result.federal_income_tax));
    line(&mut out, "State taxable income", &usd(result.state_taxable_income));
    line(&mut out, "State income tax", &usd(result.state_tax));
    line(&mut out, "Social Security", &usd(result.social_security_tax));
    line(&mut out, "Medicare", &usd(result.medicare_tax));
    line(&mut out, "Total tax", &usd(result.total_tax));
    line(&mut out, "Effective tax rate", &format_percent(result.effective_tax_rate));
    line(&mut out, "Take-home pay", &usd(result.take_home_pay));
    out
}

pub fn render_uk(result: &UkTaxResult) -> String {
    let gbp = |value| format_money("£", value);
    let mut out = String::new();

    let _ = writeln!(out, "UK National Insurance estimate ({})", result.tax_year);
    line(&mut out, "Gross income", &gbp(result.gross_income));

    if !result.ni_breakdown.is_empty() {
        let _ = writeln!(out, "\nWeekly bands");
        for contribution in &result.ni_breakdown {
            line(&mut out, &contribution.band.to_string(), &gbp(contribution.amount));
        }
    }

    let _ = writeln!(out, "\nSummary");
    line(&mut out, "Employee NI", &gbp(result.national_insurance));
    if let Some(employer) = result.employer_contribution {
        line(&mut out, "Employer NI (not deducted)", &gbp(employer));
    }
    line(&mut out, "Effective rate", &format_percent(result.effective_rate));
    line(&mut out, "Take-home pay", &gbp(result.take_home_pay));
    out
}
