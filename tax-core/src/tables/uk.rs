use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxTableError;
use super::validate::{validate_bands, validate_rates};
use crate::models::{NiBand, NiCategory};

/// National Insurance bands per category for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkNiTables {
    pub tax_year: i32,
    pub bands: BTreeMap<NiCategory, Vec<NiBand>>,
}

impl UkNiTables {
    /// Bands for `category`; empty if the table has none.
    pub fn bands_for(
        &self,
        category: NiCategory,
    ) -> &[NiBand] {
        self.bands
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), TaxTableError> {
        for (category, bands) in &self.bands {
            let table = format!("NI category {}", category.as_str());
            validate_bands(&table, bands)?;
            validate_rates(&table, bands.iter().map(|b| b.employee_rate), Decimal::ONE)?;
            validate_rates(&table, bands.iter().map(|b| b.employer_rate), Decimal::ONE)?;
        }
        Ok(())
    }
}
