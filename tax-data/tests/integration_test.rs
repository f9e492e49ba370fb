//! Integration tests running both pipelines against the shipped 2025 tables.

use pretty_assertions::assert_eq;
use proptest::prelude::{prop_assert_eq, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{
    DeductionInput, DeductionKind, FilingStatusCode, NiCategory, TableSourceConfig,
    TableSourceError, TableSourceRegistry, TaxTableSource, UkNiTables, UkTaxInput, UsState,
    UsTaxInput, UsTaxTables, compute_uk_tax, compute_us_tax,
};
use tax_data::{DirectorySourceFactory, EmbeddedSourceFactory, EmbeddedTableSource};

fn us_tables() -> UsTaxTables {
    EmbeddedTableSource
        .us_tables(2025)
        .expect("Failed to load embedded USA tables")
}

fn uk_tables() -> UkNiTables {
    EmbeddedTableSource
        .uk_tables(2025)
        .expect("Failed to load embedded UK tables")
}

fn single_filer(
    income: Decimal,
    state: UsState,
) -> UsTaxInput {
    UsTaxInput {
        income,
        filing_status: FilingStatusCode::Single,
        is_self_employed: false,
        state,
        deductions: DeductionInput::default(),
    }
}

#[test]
fn test_single_filer_california_50000() {
    let result = compute_us_tax(&us_tables(), &single_filer(dec!(50000), UsState::CA));

    assert_eq!(result.federal_taxable_income, dec!(35000));
    assert_eq!(result.federal_income_tax, dec!(3961.50));
    assert_eq!(result.state_tax, dec!(1290.62));
    assert_eq!(result.social_security_tax, dec!(3100.00));
    assert_eq!(result.medicare_tax, dec!(725.00));
    assert_eq!(result.total_tax, dec!(9077.12));
    assert_eq!(result.take_home_pay, dec!(40922.88));
    assert_eq!(result.effective_tax_rate, dec!(18.15));
}

#[test]
fn test_texas_has_no_state_tax() {
    let result = compute_us_tax(&us_tables(), &single_filer(dec!(50000), UsState::TX));

    assert_eq!(result.state_tax, dec!(0));
}

#[test]
fn test_flat_tax_state_uses_single_brackets_for_joint_filers() {
    let mut input = single_filer(dec!(80000), UsState::IL);
    input.filing_status = FilingStatusCode::MarriedFilingJointly;

    let result = compute_us_tax(&us_tables(), &input);

    // (80000 - 5700) × 4.95%
    assert_eq!(result.state_taxable_income, dec!(74300));
    assert_eq!(result.state_tax, dec!(3677.85));
}

#[test]
fn test_new_york_single_100000() {
    let result = compute_us_tax(&us_tables(), &single_filer(dec!(100000), UsState::NY));

    assert_eq!(result.state_taxable_income, dec!(92000));
    assert_eq!(result.state_tax, dec!(5570.01));
}

#[test]
fn test_contributions_clamped_to_2025_limits() {
    let mut input = single_filer(dec!(150000), UsState::TX);
    input.deductions.retirement_401k = dec!(30000);
    input.deductions.hsa_contribution = dec!(5000);

    let result = compute_us_tax(&us_tables(), &input);

    assert_eq!(
        result.deductions.amount_for(DeductionKind::Retirement401k),
        Some(dec!(23500))
    );
    assert_eq!(
        result.deductions.amount_for(DeductionKind::HsaContribution),
        Some(dec!(4300))
    );
    assert_eq!(result.deductions.total, dec!(42800));
}

#[test]
fn test_uk_category_a_50000() {
    let input = UkTaxInput {
        income: dec!(50000),
        ni_category: NiCategory::A,
        is_employed: true,
    };

    let result = compute_uk_tax(&uk_tables(), &input);

    assert_eq!(result.national_insurance, dec!(2993.28));
    assert_eq!(result.employer_contribution, Some(dec!(5612.40)));
    assert_eq!(result.take_home_pay, dec!(47006.72));
}

#[test]
fn test_registry_creates_both_sources() {
    let mut registry = TableSourceRegistry::new();
    registry.register(Box::new(EmbeddedSourceFactory));
    registry.register(Box::new(DirectorySourceFactory));

    let embedded = registry
        .create(&TableSourceConfig::default())
        .expect("embedded source");
    let directory = registry
        .create(&TableSourceConfig {
            source: "directory".to_string(),
            location: Some(std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")),
        })
        .expect("directory source");

    assert_eq!(registry.available_sources(), vec!["directory", "embedded"]);
    assert_eq!(
        embedded.us_tables(2025).expect("embedded"),
        directory.us_tables(2025).expect("directory")
    );
}

#[test]
fn test_registry_rejects_unknown_source() {
    let mut registry = TableSourceRegistry::new();
    registry.register(Box::new(EmbeddedSourceFactory));

    let result = registry.create(&TableSourceConfig {
        source: "sqlite".to_string(),
        location: None,
    });

    assert!(matches!(result, Err(TableSourceError::Configuration(_))));
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(32))]

    #[test]
    fn prop_social_security_is_capped(
        extra in 0u64..100_000_000,
        state_index in 0usize..51,
    ) {
        let tables = us_tables();
        let state = UsState::ALL[state_index];
        let base = tables.fica.ss_wage_base;

        let at_base = compute_us_tax(&tables, &single_filer(base, state));
        let above = compute_us_tax(
            &tables,
            &single_filer(base + Decimal::new(extra as i64, 2), state),
        );

        prop_assert_eq!(above.social_security_tax, at_base.social_security_tax);
    }
}
