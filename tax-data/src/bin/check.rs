use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tax_core::{FilingStatusCode, NiCategory, TaxTableSource};
use tax_data::{DirectoryTableSource, default_data_dir};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Parse and validate a tax data directory.
///
/// The directory holds one folder per tax year, each containing
/// `brackets.csv`, `standard_deductions.csv`, `ni_bands.csv` and
/// `payroll.toml`. Every year found is loaded and validated; the first
/// invalid table aborts with a non-zero exit code.
#[derive(Parser, Debug)]
#[command(name = "tax-tables-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Data root containing `<year>/` folders. Defaults to `TAX_DATA_DIR`,
    /// then `./data`.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Check only this tax year.
    #[arg(short, long)]
    year: Option<i32>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let root = args.data_dir.unwrap_or_else(default_data_dir);
    let source = DirectoryTableSource::new(&root);

    let years = match args.year {
        Some(year) => vec![year],
        None => source
            .tax_years()
            .with_context(|| format!("Failed to list tax years in: {}", root.display()))?,
    };
    if years.is_empty() {
        bail!("No tax year folders found in: {}", root.display());
    }

    println!("Checking tax tables in: {}", root.display());

    for year in years {
        debug!(year, "checking tax year");

        let us = source
            .us_tables(year)
            .with_context(|| format!("Invalid USA tables for {year}"))?;
        let uk = source
            .uk_tables(year)
            .with_context(|| format!("Invalid UK tables for {year}"))?;

        let federal: usize = FilingStatusCode::ALL
            .iter()
            .map(|status| us.federal_brackets(*status).len())
            .sum();
        let ni: usize = NiCategory::ALL
            .iter()
            .map(|category| uk.bands_for(*category).len())
            .sum();

        println!("{year}:");
        println!("  federal brackets:          {federal}");
        println!("  states with brackets:      {}", us.state_brackets.len());
        println!(
            "  states with deductions:    {}",
            us.state_standard_deductions.len()
        );
        println!("  SS wage base:              {}", us.fica.ss_wage_base);
        println!("  NI categories / bands:     {} / {ni}", uk.bands.len());
    }

    println!("All tables valid.");
    Ok(())
}
