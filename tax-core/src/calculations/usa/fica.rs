//! Social Security and Medicare payroll taxes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::tables::FicaConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FicaTaxes {
    pub social_security: Decimal,
    pub medicare: Decimal,
}

/// Payroll taxes on gross income.
///
/// Self-employed earners pay both the employer and the employee share of the
/// base rates. The additional Medicare surtax applies to income above the
/// threshold and is the same for everyone.
pub fn fica_taxes(
    config: &FicaConfig,
    gross_income: Decimal,
    is_self_employed: bool,
) -> FicaTaxes {
    let (ss_rate, medicare_rate) = if is_self_employed {
        (config.ss_self_employed_rate, config.medicare_self_employed_rate)
    } else {
        (config.ss_employee_rate, config.medicare_employee_rate)
    };

    let ss_wages = gross_income.min(config.ss_wage_base);
    let surtax_base = max(gross_income - config.medicare_additional_threshold, Decimal::ZERO);

    FicaTaxes {
        social_security: round_half_up(ss_wages * ss_rate),
        medicare: round_half_up(
            gross_income * medicare_rate + surtax_base * config.medicare_additional_rate,
        ),
    }
}
