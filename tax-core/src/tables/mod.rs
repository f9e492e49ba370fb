//! Versioned configuration tables consumed by the calculators.
//!
//! Tables are plain data: built and validated once at startup, then passed
//! by reference into [`compute_us_tax`](crate::calculations::compute_us_tax)
//! and [`compute_uk_tax`](crate::calculations::compute_uk_tax).

mod error;
pub mod factory;
pub mod source;
mod uk;
mod us;
pub mod validate;

pub use error::TaxTableError;
pub use factory::{TableSourceConfig, TableSourceFactory, TableSourceRegistry};
pub use source::{TableSourceError, TaxTableSource};
pub use uk::UkNiTables;
pub use us::{ContributionLimits, FicaConfig, UsTaxTables};
