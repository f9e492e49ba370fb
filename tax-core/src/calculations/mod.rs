//! Tax calculations for both pipelines.
//!
//! Every calculator here is pure and total: inputs are sanitised rather than
//! rejected, and missing table entries mean "no tax" for that component.

pub mod brackets;
pub mod common;
pub mod uk;
pub mod usa;

pub use brackets::{BandSlice, BracketAccumulation, accumulate, band_slices};
pub use uk::{UkTaxCalculator, compute_uk_tax};
pub use usa::{UsTaxCalculator, compute_us_tax};
