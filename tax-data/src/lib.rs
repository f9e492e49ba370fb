//! Loading versioned tax tables from CSV and TOML.
//!
//! [`EmbeddedSourceFactory`] and [`DirectorySourceFactory`] plug into a
//! [`tax_core::TableSourceRegistry`]; the lower-level [`TaxTableLoader`] parses
//! and validates individual files.

pub mod loader;
pub mod payroll;
pub mod store;

pub use loader::{
    BracketRecord, Jurisdiction, NiBandRecord, StandardDeductionRecord, TaxDataError,
    TaxTableLoader,
};
pub use payroll::PayrollConfig;
pub use store::{
    DirectorySourceFactory, DirectoryTableSource, EMBEDDED_TAX_YEAR, EmbeddedSourceFactory,
    EmbeddedTableSource, default_data_dir, load_uk_tables, load_us_tables,
};
