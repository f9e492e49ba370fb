//! 2025 tables shared by the unit tests.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{FilingStatusCode, NiBand, NiCategory, TaxBracket, UsState};
use crate::tables::{ContributionLimits, FicaConfig, UkNiTables, UsTaxTables};

fn brackets(
    thresholds: &[Decimal],
    rates: &[Decimal],
) -> Vec<TaxBracket> {
    rates
        .iter()
        .enumerate()
        .map(|(i, rate)| {
            let min = if i == 0 { Decimal::ZERO } else { thresholds[i - 1] };
            TaxBracket::new(min, thresholds.get(i).copied(), *rate)
        })
        .collect()
}

fn federal_rates() -> [Decimal; 7] {
    [
        dec!(10),
        dec!(12),
        dec!(22),
        dec!(24),
        dec!(32),
        dec!(35),
        dec!(37),
    ]
}

pub fn fica_2025() -> FicaConfig {
    FicaConfig {
        ss_wage_base: dec!(176100),
        ss_employee_rate: dec!(0.062),
        ss_self_employed_rate: dec!(0.124),
        medicare_employee_rate: dec!(0.0145),
        medicare_self_employed_rate: dec!(0.029),
        medicare_additional_rate: dec!(0.009),
        medicare_additional_threshold: dec!(200000),
    }
}

/// Federal tables for every filing status plus California and New York
/// single-filer tables. Every other state is absent.
pub fn us_tables_2025() -> UsTaxTables {
    let single = brackets(
        &[
            dec!(11925),
            dec!(48475),
            dec!(103350),
            dec!(197300),
            dec!(250525),
            dec!(626350),
        ],
        &federal_rates(),
    );
    let joint = brackets(
        &[
            dec!(23850),
            dec!(96950),
            dec!(206700),
            dec!(394600),
            dec!(501050),
            dec!(751600),
        ],
        &federal_rates(),
    );
    let separate = brackets(
        &[
            dec!(11925),
            dec!(48475),
            dec!(103350),
            dec!(197300),
            dec!(250525),
            dec!(375800),
        ],
        &federal_rates(),
    );

    let california = brackets(
        &[
            dec!(10412),
            dec!(24684),
            dec!(38959),
            dec!(54081),
            dec!(68350),
            dec!(349137),
            dec!(418961),
            dec!(698271),
        ],
        &[
            dec!(1),
            dec!(2),
            dec!(4),
            dec!(6),
            dec!(8),
            dec!(9.3),
            dec!(10.3),
            dec!(11.3),
            dec!(12.3),
        ],
    );
    let new_york = brackets(
        &[
            dec!(8500),
            dec!(11700),
            dec!(13900),
            dec!(21400),
            dec!(80650),
            dec!(215400),
            dec!(1077550),
            dec!(5000000),
        ],
        &[
            dec!(4),
            dec!(4.5),
            dec!(5.25),
            dec!(5.9),
            dec!(6.33),
            dec!(6.85),
            dec!(9.65),
            dec!(10.3),
            dec!(10.9),
        ],
    );

    UsTaxTables {
        tax_year: 2025,
        federal_brackets: BTreeMap::from([
            (FilingStatusCode::Single, single),
            (FilingStatusCode::MarriedFilingJointly, joint),
            (FilingStatusCode::MarriedFilingSeparately, separate),
        ]),
        federal_standard_deductions: BTreeMap::from([
            (FilingStatusCode::Single, dec!(15000)),
            (FilingStatusCode::MarriedFilingJointly, dec!(30000)),
            (FilingStatusCode::MarriedFilingSeparately, dec!(15000)),
        ]),
        state_brackets: BTreeMap::from([
            (
                UsState::CA,
                BTreeMap::from([(FilingStatusCode::Single, california)]),
            ),
            (
                UsState::NY,
                BTreeMap::from([(FilingStatusCode::Single, new_york)]),
            ),
        ]),
        state_standard_deductions: BTreeMap::from([
            (
                UsState::CA,
                BTreeMap::from([
                    (FilingStatusCode::Single, dec!(5540)),
                    (FilingStatusCode::MarriedFilingJointly, dec!(11080)),
                    (FilingStatusCode::MarriedFilingSeparately, dec!(5540)),
                ]),
            ),
            (
                UsState::NY,
                BTreeMap::from([
                    (FilingStatusCode::Single, dec!(8000)),
                    (FilingStatusCode::MarriedFilingJointly, dec!(16050)),
                    (FilingStatusCode::MarriedFilingSeparately, dec!(8000)),
                ]),
            ),
        ]),
        fica: fica_2025(),
        contribution_limits: ContributionLimits {
            retirement_401k: Some(dec!(23500)),
            hsa_contribution: Some(dec!(4300)),
            student_loan_interest: Some(dec!(2500)),
        },
    }
}

pub fn uk_tables_2025() -> UkNiTables {
    let band = |min, max, employee, employer| NiBand::new(min, max, employee, employer);
    let category = |main_employee, main_employer| {
        vec![
            band(dec!(0), Some(dec!(125)), dec!(0), dec!(0)),
            band(dec!(125), Some(dec!(242)), dec!(0), dec!(0)),
            band(dec!(242), Some(dec!(967)), main_employee, main_employer),
            band(dec!(967), None, dec!(0.02), dec!(0.15)),
        ]
    };

    UkNiTables {
        tax_year: 2025,
        bands: BTreeMap::from([
            (NiCategory::A, category(dec!(0.08), dec!(0.15))),
            (NiCategory::B, category(dec!(0.0185), dec!(0.15))),
            (NiCategory::H, category(dec!(0.08), dec!(0))),
        ]),
    }
}
