//! Wiring between the command line and the calculators.

use anyhow::{Context, Result};
use tax_core::{
    TableSourceRegistry, TaxTableSource, UkTaxInput, UkTaxResult, UsTaxInput, UsTaxResult,
    compute_uk_tax, compute_us_tax,
};
use tax_data::{DirectorySourceFactory, EmbeddedSourceFactory};
use tracing::{debug, info};

/// Registry with every table source this binary knows about.
pub fn build_registry() -> TableSourceRegistry {
    let mut registry = TableSourceRegistry::new();
    registry.register(Box::new(EmbeddedSourceFactory));
    registry.register(Box::new(DirectorySourceFactory));
    registry
}

/// Loads the USA tables for `tax_year` and runs the pipeline once.
pub fn estimate_us(
    source: &dyn TaxTableSource,
    tax_year: i32,
    input: &UsTaxInput,
) -> Result<UsTaxResult> {
    let tables = source.us_tables(tax_year).with_context(|| {
        format!(
            "Failed to load USA tables for {tax_year} from the {} source",
            source.source_name()
        )
    })?;
    debug!(tax_year, state = %input.state, "running USA pipeline");

    let result = compute_us_tax(&tables, input);
    info!(total_tax = %result.total_tax, "USA estimate complete");
    Ok(result)
}

/// Loads the UK tables for `tax_year` and runs the pipeline once.
pub fn estimate_uk(
    source: &dyn TaxTableSource,
    tax_year: i32,
    input: &UkTaxInput,
) -> Result<UkTaxResult> {
    let tables = source.uk_tables(tax_year).with_context(|| {
        format!(
            "Failed to load UK tables for {tax_year} from the {} source",
            source.source_name()
        )
    })?;
    debug!(tax_year, category = input.ni_category.as_str(), "running UK pipeline");

    let result = compute_uk_tax(&tables, input);
    info!(national_insurance = %result.national_insurance, "UK estimate complete");
    Ok(result)
}
