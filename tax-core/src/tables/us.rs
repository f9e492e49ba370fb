//! USA configuration tables for one tax year.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxTableError;
use super::validate::{validate_bands, validate_rates};
use crate::models::{FilingStatusCode, TaxBracket, UsState};

/// Social Security and Medicare constants.
///
/// Rates are fractions. The self-employed rates carry both the employer and
/// the employee share, so they are normally double the employee rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaConfig {
    /// Earnings above this amount are not subject to Social Security tax.
    ///
    /// For 2025, this is $176,100.
    pub ss_wage_base: Decimal,
    pub ss_employee_rate: Decimal,
    pub ss_self_employed_rate: Decimal,
    pub medicare_employee_rate: Decimal,
    pub medicare_self_employed_rate: Decimal,
    /// Additional Medicare surtax rate. Never doubled for self-employment.
    pub medicare_additional_rate: Decimal,
    /// Income above this amount pays the additional Medicare surtax.
    pub medicare_additional_threshold: Decimal,
}

impl FicaConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableError::InvalidFica`] if:
    /// - any rate is not in [0, 1]
    /// - `ss_wage_base` is not positive
    /// - `medicare_additional_threshold` is negative
    pub fn validate(&self) -> Result<(), TaxTableError> {
        let rates = [
            ("ss_employee_rate", self.ss_employee_rate),
            ("ss_self_employed_rate", self.ss_self_employed_rate),
            ("medicare_employee_rate", self.medicare_employee_rate),
            ("medicare_self_employed_rate", self.medicare_self_employed_rate),
            ("medicare_additional_rate", self.medicare_additional_rate),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(TaxTableError::InvalidFica {
                    field,
                    expected: "between 0 and 1",
                    value,
                });
            }
        }
        if self.ss_wage_base <= Decimal::ZERO {
            return Err(TaxTableError::InvalidFica {
                field: "ss_wage_base",
                expected: "positive",
                value: self.ss_wage_base,
            });
        }
        if self.medicare_additional_threshold < Decimal::ZERO {
            return Err(TaxTableError::InvalidFica {
                field: "medicare_additional_threshold",
                expected: "non-negative",
                value: self.medicare_additional_threshold,
            });
        }
        Ok(())
    }
}

/// Annual caps on above-the-line contributions. `None` means uncapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimits {
    #[serde(default)]
    pub retirement_401k: Option<Decimal>,
    #[serde(default)]
    pub hsa_contribution: Option<Decimal>,
    #[serde(default)]
    pub student_loan_interest: Option<Decimal>,
}

impl ContributionLimits {
    pub fn validate(&self) -> Result<(), TaxTableError> {
        let limits = [
            ("retirement_401k", self.retirement_401k),
            ("hsa_contribution", self.hsa_contribution),
            ("student_loan_interest", self.student_loan_interest),
        ];
        for (field, limit) in limits {
            match limit {
                Some(value) if value < Decimal::ZERO => {
                    return Err(TaxTableError::NegativeContributionLimit { field, value });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Every USA table the pipeline reads for one tax year.
///
/// State tables are sparse: a state (or a filing status within a state) with
/// no entry falls back to the `Single` entry and then to "no tax".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsTaxTables {
    pub tax_year: i32,
    pub federal_brackets: BTreeMap<FilingStatusCode, Vec<TaxBracket>>,
    pub federal_standard_deductions: BTreeMap<FilingStatusCode, Decimal>,
    pub state_brackets: BTreeMap<UsState, BTreeMap<FilingStatusCode, Vec<TaxBracket>>>,
    pub state_standard_deductions: BTreeMap<UsState, BTreeMap<FilingStatusCode, Decimal>>,
    pub fica: FicaConfig,
    #[serde(default)]
    pub contribution_limits: ContributionLimits,
}

impl UsTaxTables {
    /// Federal brackets for `status`; empty if the table has none.
    pub fn federal_brackets(
        &self,
        status: FilingStatusCode,
    ) -> &[TaxBracket] {
        self.federal_brackets
            .get(&status)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Federal standard deduction for `status`; zero if the table has none.
    pub fn federal_standard_deduction(
        &self,
        status: FilingStatusCode,
    ) -> Decimal {
        self.federal_standard_deductions
            .get(&status)
            .copied()
            .unwrap_or_default()
    }

    /// State brackets for `status`, falling back to the state's `Single`
    /// brackets, then to an empty table.
    ///
    /// Only a missing entry falls back; an empty table for `status` means the
    /// state levies no tax on that filing status.
    pub fn state_brackets(
        &self,
        state: UsState,
        status: FilingStatusCode,
    ) -> &[TaxBracket] {
        self.state_brackets
            .get(&state)
            .and_then(|by_status| {
                by_status
                    .get(&status)
                    .or_else(|| by_status.get(&FilingStatusCode::Single))
            })
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// State standard deduction for `status`, falling back to the state's
    /// `Single` amount, then to zero.
    pub fn state_standard_deduction(
        &self,
        state: UsState,
        status: FilingStatusCode,
    ) -> Decimal {
        self.state_standard_deductions
            .get(&state)
            .and_then(|by_status| {
                by_status
                    .get(&status)
                    .or_else(|| by_status.get(&FilingStatusCode::Single))
            })
            .copied()
            .unwrap_or_default()
    }

    /// Validates every table.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTableError`] found. Federal brackets are required
    /// for every filing status; state tables may be absent.
    pub fn validate(&self) -> Result<(), TaxTableError> {
        for status in FilingStatusCode::ALL {
            let brackets = self
                .federal_brackets
                .get(&status)
                .filter(|brackets| !brackets.is_empty())
                .ok_or(TaxTableError::MissingFederalBrackets(status))?;
            let table = format!("federal {}", status.as_str());
            validate_bands(&table, brackets)?;
            validate_rates(
                &table,
                brackets.iter().map(|b| b.rate_percent),
                Decimal::ONE_HUNDRED,
            )?;
        }

        for (status, amount) in &self.federal_standard_deductions {
            if *amount < Decimal::ZERO {
                return Err(TaxTableError::NegativeStandardDeduction {
                    table: format!("federal {}", status.as_str()),
                    amount: *amount,
                });
            }
        }

        for (state, by_status) in &self.state_brackets {
            for (status, brackets) in by_status {
                let table = format!("state {} {}", state.as_str(), status.as_str());
                validate_bands(&table, brackets)?;
                validate_rates(
                    &table,
                    brackets.iter().map(|b| b.rate_percent),
                    Decimal::ONE_HUNDRED,
                )?;
            }
        }

        for (state, by_status) in &self.state_standard_deductions {
            for (status, amount) in by_status {
                if *amount < Decimal::ZERO {
                    return Err(TaxTableError::NegativeStandardDeduction {
                        table: format!("state {} {}", state.as_str(), status.as_str()),
                        amount: *amount,
                    });
                }
            }
        }

        self.fica.validate()?;
        self.contribution_limits.validate()
    }
}
