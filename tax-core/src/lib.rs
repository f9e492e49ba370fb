//! Core types and calculators for the tax estimator.
//!
//! [`compute_us_tax`] and [`compute_uk_tax`] are the two entry points. Both
//! take tables loaded once per tax year (see [`tables`]) and never fail.

pub mod calculations;
pub mod models;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use calculations::{compute_uk_tax, compute_us_tax};
pub use models::*;
pub use tables::{
    ContributionLimits, FicaConfig, TableSourceConfig, TableSourceError, TableSourceFactory,
    TableSourceRegistry, TaxTableError, TaxTableSource, UkNiTables, UsTaxTables,
};
