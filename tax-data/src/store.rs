//! [`TaxTableSource`] implementations backed by the CSV/TOML layout:
//!
//! ```text
//! <root>/<year>/brackets.csv
//! <root>/<year>/standard_deductions.csv
//! <root>/<year>/ni_bands.csv
//! <root>/<year>/payroll.toml
//! ```

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tax_core::{
    TableSourceConfig, TableSourceError, TableSourceFactory, TaxTableSource, UkNiTables,
    UsTaxTables,
};
use tracing::{debug, warn};

use crate::loader::{TaxDataError, TaxTableLoader};
use crate::payroll::PayrollConfig;

pub const BRACKETS_FILE: &str = "brackets.csv";
pub const STANDARD_DEDUCTIONS_FILE: &str = "standard_deductions.csv";
pub const NI_BANDS_FILE: &str = "ni_bands.csv";
pub const PAYROLL_FILE: &str = "payroll.toml";

/// Tax year compiled into the binary.
pub const EMBEDDED_TAX_YEAR: i32 = 2025;

const EMBEDDED_BRACKETS: &str = include_str!("../data/2025/brackets.csv");
const EMBEDDED_STANDARD_DEDUCTIONS: &str = include_str!("../data/2025/standard_deductions.csv");
const EMBEDDED_NI_BANDS: &str = include_str!("../data/2025/ni_bands.csv");
const EMBEDDED_PAYROLL: &str = include_str!("../data/2025/payroll.toml");

/// Builds USA tables from the four raw inputs of one tax year.
pub fn load_us_tables<B: Read, D: Read>(
    tax_year: i32,
    brackets: B,
    deductions: D,
    payroll: &str,
) -> Result<UsTaxTables, TaxDataError> {
    let brackets = TaxTableLoader::parse_brackets(brackets)?;
    let deductions = TaxTableLoader::parse_standard_deductions(deductions)?;
    let payroll = PayrollConfig::from_toml(payroll)?;
    TaxTableLoader::build_us_tables(tax_year, &brackets, &deductions, payroll)
}

pub fn load_uk_tables<R: Read>(
    tax_year: i32,
    ni_bands: R,
) -> Result<UkNiTables, TaxDataError> {
    let records = TaxTableLoader::parse_ni_bands(ni_bands)?;
    TaxTableLoader::build_uk_tables(tax_year, &records)
}

/// Resolve the default data directory at runtime.
///
/// Resolution order:
/// 1. **`TAX_DATA_DIR`** if set.
/// 2. **`./data`** if the directory exists in the current working directory.
/// 3. **Crate manifest dir**: `$CARGO_MANIFEST_DIR/data` (dev/tests).
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TAX_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_data = PathBuf::from("./data");
    if cwd_data.is_dir() {
        return cwd_data;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

// ─── embedded ────────────────────────────────────────────────────────────────

/// Tables compiled into the binary with `include_str!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedTableSource;

impl EmbeddedTableSource {
    fn check_year(tax_year: i32) -> Result<(), TableSourceError> {
        if tax_year == EMBEDDED_TAX_YEAR {
            Ok(())
        } else {
            Err(TableSourceError::YearNotAvailable(tax_year))
        }
    }
}

impl TaxTableSource for EmbeddedTableSource {
    fn source_name(&self) -> &'static str {
        "embedded"
    }

    fn tax_years(&self) -> Result<Vec<i32>, TableSourceError> {
        Ok(vec![EMBEDDED_TAX_YEAR])
    }

    fn us_tables(
        &self,
        tax_year: i32,
    ) -> Result<UsTaxTables, TableSourceError> {
        Self::check_year(tax_year)?;
        Ok(load_us_tables(
            tax_year,
            EMBEDDED_BRACKETS.as_bytes(),
            EMBEDDED_STANDARD_DEDUCTIONS.as_bytes(),
            EMBEDDED_PAYROLL,
        )?)
    }

    fn uk_tables(
        &self,
        tax_year: i32,
    ) -> Result<UkNiTables, TableSourceError> {
        Self::check_year(tax_year)?;
        Ok(load_uk_tables(tax_year, EMBEDDED_NI_BANDS.as_bytes())?)
    }
}

// ─── directory ───────────────────────────────────────────────────────────────

/// Tables read from `<root>/<year>/` on every call.
#[derive(Debug, Clone)]
pub struct DirectoryTableSource {
    root: PathBuf,
}

impl DirectoryTableSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn year_dir(
        &self,
        tax_year: i32,
    ) -> Result<PathBuf, TaxDataError> {
        let dir = self.root.join(tax_year.to_string());
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(TaxDataError::TaxYearNotFound(tax_year))
        }
    }
}

fn open(path: &Path) -> Result<File, TaxDataError> {
    File::open(path).map_err(|e| TaxDataError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_to_string(path: &Path) -> Result<String, TaxDataError> {
    fs::read_to_string(path).map_err(|e| TaxDataError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl TaxTableSource for DirectoryTableSource {
    fn source_name(&self) -> &'static str {
        "directory"
    }

    /// Every subdirectory of the root whose name is a year, ascending.
    fn tax_years(&self) -> Result<Vec<i32>, TableSourceError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            TableSourceError::Io(format!("failed to list {}: {e}", self.root.display()))
        })?;

        let mut years = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TableSourceError::Io(e.to_string()))?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().to_str().and_then(|name| name.parse::<i32>().ok()) {
                Some(year) => years.push(year),
                None => debug!(path = %entry.path().display(), "Skipping non-year directory"),
            }
        }
        years.sort_unstable();
        Ok(years)
    }

    fn us_tables(
        &self,
        tax_year: i32,
    ) -> Result<UsTaxTables, TableSourceError> {
        let dir = self.year_dir(tax_year)?;
        debug!(dir = %dir.display(), "Loading USA tables");
        Ok(load_us_tables(
            tax_year,
            open(&dir.join(BRACKETS_FILE))?,
            open(&dir.join(STANDARD_DEDUCTIONS_FILE))?,
            &read_to_string(&dir.join(PAYROLL_FILE))?,
        )?)
    }

    fn uk_tables(
        &self,
        tax_year: i32,
    ) -> Result<UkNiTables, TableSourceError> {
        let dir = self.year_dir(tax_year)?;
        debug!(dir = %dir.display(), "Loading UK tables");
        Ok(load_uk_tables(tax_year, open(&dir.join(NI_BANDS_FILE))?)?)
    }
}

// ─── factories ───────────────────────────────────────────────────────────────

/// [`TableSourceFactory`] for the tables compiled into the binary.
///
/// Register this with a [`tax_core::TableSourceRegistry`] to make the
/// `"embedded"` source available:
///
/// ```rust
/// use tax_core::TableSourceRegistry;
/// use tax_data::EmbeddedSourceFactory;
///
/// let mut registry = TableSourceRegistry::new();
/// registry.register(Box::new(EmbeddedSourceFactory));
/// assert_eq!(registry.available_sources(), vec!["embedded"]);
/// ```
pub struct EmbeddedSourceFactory;

impl TableSourceFactory for EmbeddedSourceFactory {
    fn source_name(&self) -> &'static str {
        "embedded"
    }

    fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableSource>, TableSourceError> {
        if let Some(location) = &config.location {
            warn!(location = %location.display(), "Embedded source ignores the data location");
        }
        Ok(Box::new(EmbeddedTableSource))
    }
}

/// [`TableSourceFactory`] for a data directory on disk.
///
/// `config.location` is the data root; when absent it is resolved with
/// [`default_data_dir`].
pub struct DirectorySourceFactory;

impl TableSourceFactory for DirectorySourceFactory {
    fn source_name(&self) -> &'static str {
        "directory"
    }

    fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableSource>, TableSourceError> {
        let root = config.location.clone().unwrap_or_else(default_data_dir);
        if !root.is_dir() {
            return Err(TableSourceError::Configuration(format!(
                "data directory {} does not exist",
                root.display()
            )));
        }
        Ok(Box::new(DirectoryTableSource::new(root)))
    }
}
