use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tax_cli::{app, report, utils};
use tax_core::{
    DeductionInput, FilingStatusCode, NiCategory, TableSourceConfig, UkTaxInput, UsState,
    UsTaxInput,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal income tax estimator.
///
/// Loads the tables for the requested tax year from the configured source and
/// estimates USA federal, state and payroll taxes or UK National Insurance.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version, about)]
struct Cli {
    /// Table source to use.
    #[arg(long, default_value = "embedded", global = true)]
    source: String,

    /// Data root for the `directory` source (contains `<year>/` folders).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Tax year to estimate.
    #[arg(long, default_value = "2025", global = true)]
    year: i32,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// USA federal income tax, state income tax and FICA.
    Us(UsArgs),
    /// UK Class 1 National Insurance.
    Uk(UkArgs),
}

#[derive(Debug, Args)]
struct UsArgs {
    /// Gross annual income, e.g. `50000` or `50,000.00`.
    #[arg(long, value_parser = utils::parse_amount)]
    income: Decimal,

    /// Filing status: S, MFJ or MFS.
    #[arg(long, default_value = "S", value_parser = parse_filing_status)]
    status: FilingStatusCode,

    /// Two-letter state code.
    #[arg(long, default_value = "CA", value_parser = parse_state)]
    state: UsState,

    /// Pay both halves of Social Security and Medicare.
    #[arg(long)]
    self_employed: bool,

    /// Itemize instead of taking the standard deduction.
    #[arg(long, value_parser = utils::parse_amount)]
    itemized: Option<Decimal>,

    /// Pre-tax 401(k) contribution, capped at the annual limit.
    #[arg(long, value_parser = utils::parse_amount, default_value = "0")]
    retirement_401k: Decimal,

    /// HSA contribution, capped at the annual limit.
    #[arg(long, value_parser = utils::parse_amount, default_value = "0")]
    hsa: Decimal,

    #[arg(long, value_parser = utils::parse_amount, default_value = "0")]
    student_loan_interest: Decimal,
}

impl UsArgs {
    fn into_input(self) -> UsTaxInput {
        UsTaxInput {
            income: self.income,
            filing_status: self.status,
            is_self_employed: self.self_employed,
            state: self.state,
            deductions: DeductionInput {
                use_standard_deduction: self.itemized.is_none(),
                retirement_401k: self.retirement_401k,
                hsa_contribution: self.hsa,
                student_loan_interest: self.student_loan_interest,
                itemized_deductions: self.itemized.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Args)]
struct UkArgs {
    /// Gross annual income.
    #[arg(long, value_parser = utils::parse_amount)]
    income: Decimal,

    /// NI category letter: A, B or H.
    #[arg(long, default_value = "A", value_parser = parse_category)]
    category: NiCategory,

    /// Not employed; no employer contribution is reported.
    #[arg(long)]
    self_employed: bool,
}

fn parse_filing_status(s: &str) -> Result<FilingStatusCode, String> {
    FilingStatusCode::parse(&s.trim().to_ascii_uppercase())
        .ok_or_else(|| format!("unknown filing status '{s}' (use S, MFJ or MFS)"))
}

fn parse_state(s: &str) -> Result<UsState, String> {
    UsState::parse(s).ok_or_else(|| format!("unknown state code '{s}'"))
}

fn parse_category(s: &str) -> Result<NiCategory, String> {
    NiCategory::parse(s).ok_or_else(|| format!("unknown NI category '{s}' (use A, B or H)"))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = TableSourceConfig {
        source: cli.source,
        location: cli.data_dir,
    };

    debug!("opening {} table source", config.source);
    let registry = app::build_registry();
    let source = registry.create(&config)?;

    let output = match cli.command {
        Command::Us(args) => {
            let result = app::estimate_us(source.as_ref(), cli.year, &args.into_input())?;
            match cli.format {
                OutputFormat::Text => report::render_us(&result),
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            }
        }
        Command::Uk(args) => {
            let input = UkTaxInput {
                income: args.income,
                ni_category: args.category,
                is_employed: !args.self_employed,
            };
            let result = app::estimate_uk(source.as_ref(), cli.year, &input)?;
            match cli.format {
                OutputFormat::Text => report::render_uk(&result),
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            }
        }
    };

    println!("{output}");
    Ok(())
}
