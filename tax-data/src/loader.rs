use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tax_core::{
    FilingStatusCode, NiBand, NiCategory, TableSourceError, TaxBracket, TaxTableError,
    UkNiTables, UsState, UsTaxTables,
};
use thiserror::Error;
use tracing::debug;

use crate::payroll::PayrollConfig;

/// Errors that can occur when loading tax table data.
#[derive(Debug, Error)]
pub enum TaxDataError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    Toml(String),

    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    #[error("unrecognised jurisdiction '{jurisdiction}' on row {row}")]
    InvalidJurisdiction { jurisdiction: String, row: usize },

    #[error("unrecognised NI category '{category}' on row {row}")]
    InvalidCategory { category: String, row: usize },

    #[error("Tax year {0} not found in the data directory")]
    TaxYearNotFound(i32),

    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Invalid table: {0}")]
    Table(#[from] TaxTableError),
}

impl From<csv::Error> for TaxDataError {
    fn from(err: csv::Error) -> Self {
        TaxDataError::CsvParse(err.to_string())
    }
}

impl From<TaxDataError> for TableSourceError {
    fn from(err: TaxDataError) -> Self {
        match err {
            TaxDataError::TaxYearNotFound(year) => TableSourceError::YearNotAvailable(year),
            TaxDataError::Io { .. } => TableSourceError::Io(err.to_string()),
            TaxDataError::Table(table) => TableSourceError::InvalidTable(table),
            other => TableSourceError::Parse(other.to_string()),
        }
    }
}

/// Where a bracket or deduction row applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    Federal,
    State(UsState),
}

impl Jurisdiction {
    /// `US` is federal; anything else must be a two-letter state code.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "US" | "us" => Some(Self::Federal),
            other => UsState::parse(other).map(Self::State),
        }
    }
}

/// A single record from `brackets.csv`.
///
/// - `jurisdiction`: `US` for federal brackets, otherwise a state code
/// - `filing_status`: `S`, `MFJ` or `MFS`
/// - `max_income`: empty for the unbounded top bracket
/// - `rate`: percentage points (e.g. `22` for 22%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    pub filing_status: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A single record from `standard_deductions.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StandardDeductionRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    pub filing_status: String,
    pub amount: Decimal,
}

/// A single record from `ni_bands.csv`. Thresholds are weekly and rates are
/// fractions (e.g. `0.08`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NiBandRecord {
    pub tax_year: i32,
    pub category: String,
    pub min_weekly: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_weekly: Option<Decimal>,
    pub employee_rate: Decimal,
    pub employer_rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for versioned tax tables stored as CSV and TOML.
///
/// Parsing and building are separate steps so callers can inspect raw
/// records (the `tax-tables-check` binary does) before validation.
pub struct TaxTableLoader;

impl TaxTableLoader {
    fn parse<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, TaxDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: T = result?;
            records.push(record);
        }

        Ok(records)
    }

    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TaxDataError> {
        Self::parse(reader)
    }

    pub fn parse_standard_deductions<R: Read>(
        reader: R
    ) -> Result<Vec<StandardDeductionRecord>, TaxDataError> {
        Self::parse(reader)
    }

    pub fn parse_ni_bands<R: Read>(reader: R) -> Result<Vec<NiBandRecord>, TaxDataError> {
        Self::parse(reader)
    }

    /// Groups bracket and deduction records into validated USA tables.
    ///
    /// Rows are numbered from 1 (the first line after the header). Brackets
    /// within each group are sorted by `min_income` before validation.
    ///
    /// # Errors
    ///
    /// * [`TaxDataError::InvalidJurisdiction`] / [`TaxDataError::InvalidFilingStatus`]
    ///   for unrecognised codes.
    /// * [`TaxDataError::Table`] when a row belongs to another tax year or the
    ///   assembled tables fail validation.
    pub fn build_us_tables(
        tax_year: i32,
        brackets: &[BracketRecord],
        deductions: &[StandardDeductionRecord],
        payroll: PayrollConfig,
    ) -> Result<UsTaxTables, TaxDataError> {
        check_year("payroll", tax_year, payroll.tax_year)?;

        let mut federal_brackets: BTreeMap<FilingStatusCode, Vec<TaxBracket>> = BTreeMap::new();
        let mut state_brackets: BTreeMap<UsState, BTreeMap<FilingStatusCode, Vec<TaxBracket>>> =
            BTreeMap::new();

        for (idx, record) in brackets.iter().enumerate() {
            let row = idx + 1;
            check_year("brackets", tax_year, record.tax_year)?;
            let status = filing_status(&record.filing_status, row)?;
            let bracket = TaxBracket::new(record.min_income, record.max_income, record.rate);

            let group = match jurisdiction(&record.jurisdiction, row)? {
                Jurisdiction::Federal => federal_brackets.entry(status).or_default(),
                Jurisdiction::State(state) => state_brackets
                    .entry(state)
                    .or_default()
                    .entry(status)
                    .or_default(),
            };
            group.push(bracket);
        }

        for group in federal_brackets.values_mut() {
            group.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        }
        for group in state_brackets.values_mut().flat_map(BTreeMap::values_mut) {
            group.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        }

        let mut federal_standard_deductions = BTreeMap::new();
        let mut state_standard_deductions: BTreeMap<UsState, BTreeMap<FilingStatusCode, Decimal>> =
            BTreeMap::new();

        for (idx, record) in deductions.iter().enumerate() {
            let row = idx + 1;
            check_year("standard deductions", tax_year, record.tax_year)?;
            let status = filing_status(&record.filing_status, row)?;

            match jurisdiction(&record.jurisdiction, row)? {
                Jurisdiction::Federal => {
                    federal_standard_deductions.insert(status, record.amount);
                }
                Jurisdiction::State(state) => {
                    state_standard_deductions
                        .entry(state)
                        .or_default()
                        .insert(status, record.amount);
                }
            }
        }

        let tables = UsTaxTables {
            tax_year,
            federal_brackets,
            federal_standard_deductions,
            state_brackets,
            state_standard_deductions,
            fica: payroll.fica,
            contribution_limits: payroll.contribution_limits,
        };
        tables.validate()?;

        debug!(
            tax_year,
            states = tables.state_brackets.len(),
            "Built USA tax tables"
        );
        Ok(tables)
    }

    /// Groups NI band records by category into validated UK tables.
    pub fn build_uk_tables(
        tax_year: i32,
        records: &[NiBandRecord],
    ) -> Result<UkNiTables, TaxDataError> {
        let mut bands: BTreeMap<NiCategory, Vec<NiBand>> = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            check_year("NI bands", tax_year, record.tax_year)?;
            let category = NiCategory::parse(&record.category).ok_or_else(|| {
                TaxDataError::InvalidCategory {
                    category: record.category.clone(),
                    row,
                }
            })?;

            bands.entry(category).or_default().push(NiBand::new(
                record.min_weekly,
                record.max_weekly,
                record.employee_rate,
                record.employer_rate,
            ));
        }

        for group in bands.values_mut() {
            group.sort_by(|a, b| a.min_weekly.cmp(&b.min_weekly));
        }

        let tables = UkNiTables { tax_year, bands };
        tables.validate()?;

        debug!(tax_year, categories = tables.bands.len(), "Built UK NI tables");
        Ok(tables)
    }
}

fn check_year(
    table: &str,
    expected: i32,
    found: i32,
) -> Result<(), TaxDataError> {
    if expected == found {
        return Ok(());
    }
    Err(TaxTableError::TaxYearMismatch {
        table: table.to_string(),
        expected,
        found,
    }
    .into())
}

fn filing_status(
    code: &str,
    row: usize,
) -> Result<FilingStatusCode, TaxDataError> {
    FilingStatusCode::parse(code).ok_or_else(|| TaxDataError::InvalidFilingStatus {
        status: code.to_string(),
        row,
    })
}

fn jurisdiction(
    code: &str,
    row: usize,
) -> Result<Jurisdiction, TaxDataError> {
    Jurisdiction::parse(code).ok_or_else(|| TaxDataError::InvalidJurisdiction {
        jurisdiction: code.to_string(),
        row,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{ContributionLimits, FicaConfig};

    use super::*;

    const BRACKETS_CSV: &str = "\
tax_year,jurisdiction,filing_status,min_income,max_income,rate
2025,US,S,11925,,12
2025,US,S,0,11925,10
2025,US,MFJ,0,23850,10
2025,US,MFJ,23850,,12
2025,US,MFS,0,,10
2025,CA,S,0,10412,1
2025,CA,S,10412,,2
";

    const DEDUCTIONS_CSV: &str = "\
tax_year,jurisdiction,filing_status,amount
2025,US,S,15000
2025,US,MFJ,30000
2025,CA,S,5540
";

    const NI_CSV: &str = "\
tax_year,category,min_weekly,max_weekly,employee_rate,employer_rate
2025,A,0,242,0,0
2025,A,242,967,0.08,0.15
2025,A,967,,0.02,0.15
2025,h,0,,0,0
";

    fn payroll() -> PayrollConfig {
        PayrollConfig {
            tax_year: 2025,
            fica: FicaConfig {
                ss_wage_base: dec!(176100),
                ss_employee_rate: dec!(0.062),
                ss_self_employed_rate: dec!(0.124),
                medicare_employee_rate: dec!(0.0145),
                medicare_self_employed_rate: dec!(0.029),
                medicare_additional_rate: dec!(0.009),
                medicare_additional_threshold: dec!(200000),
            },
            contribution_limits: ContributionLimits::default(),
        }
    }

    fn us_tables(brackets: &str) -> Result<UsTaxTables, TaxDataError> {
        let brackets = TaxTableLoader::parse_brackets(brackets.as_bytes())?;
        let deductions = TaxTableLoader::parse_standard_deductions(DEDUCTIONS_CSV.as_bytes())?;
        TaxTableLoader::build_us_tables(2025, &brackets, &deductions, payroll())
    }

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_bracket_row() {
        let csv = "tax_year,jurisdiction,filing_status,min_income,max_income,rate\n2025,NY,MFS,8500,11700,4.5";

        let records = TaxTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                tax_year: 2025,
                jurisdiction: "NY".to_string(),
                filing_status: "MFS".to_string(),
                min_income: dec!(8500),
                max_income: Some(dec!(11700)),
                rate: dec!(4.5),
            }]
        );
    }

    #[test]
    fn test_parse_unbounded_max_income() {
        let records =
            TaxTableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 7);
        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].min_income, dec!(11925));
    }

    #[test]
    fn test_parse_ni_band_rows() {
        let records = TaxTableLoader::parse_ni_bands(NI_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 4);
        assert_eq!(records[1].employee_rate, dec!(0.08));
        assert_eq!(records[2].max_weekly, None);
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "tax_year,jurisdiction,filing_status\n2025,US,S";

        let err = TaxTableLoader::parse_brackets(csv.as_bytes())
            .expect_err("Should fail for missing column");

        let TaxDataError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_decimal() {
        let csv = "tax_year,jurisdiction,filing_status,min_income,max_income,rate\n2025,US,S,0,abc,10";

        let err = TaxTableLoader::parse_brackets(csv.as_bytes())
            .expect_err("Should fail for invalid decimal");

        assert!(matches!(err, TaxDataError::CsvParse(_)), "got: {:?}", err);
    }

    // =========================================================================
    // build tests
    // =========================================================================

    #[test]
    fn test_build_us_tables_groups_and_sorts() {
        let tables = us_tables(BRACKETS_CSV).expect("tables");

        let single = tables.federal_brackets(FilingStatusCode::Single);
        assert_eq!(single.len(), 2);
        assert_eq!(single[0].min_income, dec!(0));
        assert_eq!(single[1].max_income, None);

        assert_eq!(tables.state_brackets(UsState::CA, FilingStatusCode::Single).len(), 2);
        assert_eq!(
            tables.state_standard_deduction(UsState::CA, FilingStatusCode::Single),
            dec!(5540)
        );
        assert_eq!(
            tables.federal_standard_deduction(FilingStatusCode::MarriedFilingJointly),
            dec!(30000)
        );
    }

    #[test]
    fn test_build_us_tables_rejects_unknown_jurisdiction() {
        let csv = format!("{BRACKETS_CSV}2025,XX,S,0,,5\n");

        let err = us_tables(&csv).expect_err("unknown jurisdiction");

        let TaxDataError::InvalidJurisdiction { jurisdiction, row } = err else {
            panic!("Expected InvalidJurisdiction, got: {:?}", err);
        };
        assert_eq!(jurisdiction, "XX");
        assert_eq!(row, 8);
    }

    #[test]
    fn test_build_us_tables_rejects_unknown_filing_status() {
        let csv = format!("{BRACKETS_CSV}2025,CA,HOH,0,,5\n");

        let err = us_tables(&csv).expect_err("unknown filing status");

        assert!(
            matches!(err, TaxDataError::InvalidFilingStatus { ref status, row: 8 } if status == "HOH"),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn test_build_us_tables_rejects_gap() {
        let csv = BRACKETS_CSV.replace("2025,CA,S,10412,,2", "2025,CA,S,10413,,2");

        let err = us_tables(&csv).expect_err("gap between bands");

        assert!(
            matches!(
                err,
                TaxDataError::Table(TaxTableError::GapBetweenBands { index: 1, .. })
            ),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn test_build_us_tables_rejects_other_year() {
        let csv = format!("{BRACKETS_CSV}2024,CA,MFJ,0,,5\n");

        let err = us_tables(&csv).expect_err("year mismatch");

        assert!(
            matches!(
                err,
                TaxDataError::Table(TaxTableError::TaxYearMismatch {
                    expected: 2025,
                    found: 2024,
                    ..
                })
            ),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn test_build_us_tables_requires_every_federal_status() {
        let csv = BRACKETS_CSV.replace("2025,US,MFS,0,,10\n", "");

        let err = us_tables(&csv).expect_err("missing MFS");

        assert!(
            matches!(
                err,
                TaxDataError::Table(TaxTableError::MissingFederalBrackets(
                    FilingStatusCode::MarriedFilingSeparately
                ))
            ),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn test_build_uk_tables_accepts_lowercase_category() {
        let records = TaxTableLoader::parse_ni_bands(NI_CSV.as_bytes()).expect("parse");

        let tables = TaxTableLoader::build_uk_tables(2025, &records).expect("tables");

        assert_eq!(tables.bands_for(NiCategory::A).len(), 3);
        assert_eq!(tables.bands_for(NiCategory::H).len(), 1);
        assert!(tables.bands_for(NiCategory::B).is_empty());
    }

    #[test]
    fn test_build_uk_tables_rejects_unknown_category() {
        let csv = format!("{NI_CSV}2025,Z,0,,0,0\n");
        let records = TaxTableLoader::parse_ni_bands(csv.as_bytes()).expect("parse");

        let err = TaxTableLoader::build_uk_tables(2025, &records).expect_err("bad category");

        assert!(
            matches!(err, TaxDataError::InvalidCategory { row: 5, .. }),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn test_data_error_maps_to_source_error() {
        assert!(matches!(
            TableSourceError::from(TaxDataError::TaxYearNotFound(2030)),
            TableSourceError::YearNotAvailable(2030)
        ));
        assert!(matches!(
            TableSourceError::from(TaxDataError::CsvParse("bad".to_string())),
            TableSourceError::Parse(_)
        ));
    }
}
