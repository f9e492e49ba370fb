//! Payroll constants read from `payroll.toml`.
//!
//! ```toml
//! tax_year = 2025
//!
//! [fica]
//! ss_wage_base = "176100"
//! ss_employee_rate = "0.062"
//! # ...
//!
//! [contribution_limits]
//! retirement_401k = "23500"
//! ```
//!
//! Amounts are written as strings so they parse into exact decimals. The
//! `[contribution_limits]` table is optional; a missing limit means uncapped.

use serde::{Deserialize, Serialize};
use tax_core::{ContributionLimits, FicaConfig};

use crate::loader::TaxDataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    pub tax_year: i32,
    pub fica: FicaConfig,
    #[serde(default)]
    pub contribution_limits: ContributionLimits,
}

impl PayrollConfig {
    pub fn from_toml(input: &str) -> Result<Self, TaxDataError> {
        toml::from_str(input).map_err(|e| TaxDataError::Toml(e.to_string()))
    }
}
