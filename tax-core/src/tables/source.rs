use thiserror::Error;

use super::{TaxTableError, UkNiTables, UsTaxTables};

#[derive(Debug, Error)]
pub enum TableSourceError {
    #[error("Tax year {0} is not available from this source")]
    YearNotAvailable(i32),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid table: {0}")]
    InvalidTable(#[from] TaxTableError),
}

/// Somewhere versioned tax tables can be read from.
///
/// Implementations return fully validated tables; the calculators never
/// re-check them.
pub trait TaxTableSource: Send + Sync {
    /// Name of the factory that produced this source, for diagnostics.
    fn source_name(&self) -> &'static str;

    /// Tax years this source can serve, ascending.
    fn tax_years(&self) -> Result<Vec<i32>, TableSourceError>;

    fn us_tables(
        &self,
        tax_year: i32,
    ) -> Result<UsTaxTables, TableSourceError>;

    fn uk_tables(
        &self,
        tax_year: i32,
    ) -> Result<UkNiTables, TableSourceError>;
}
