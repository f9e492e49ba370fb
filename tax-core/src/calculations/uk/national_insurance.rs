//! Class 1 National Insurance on weekly earnings.
//!
//! Annual income is converted to a weekly figure, split across the category's
//! weekly bands and each band's contribution is annualised again. The employer
//! share is taken from the same slices.

use rust_decimal::Decimal;

use crate::calculations::brackets::band_slices;
use crate::calculations::common::round_half_up;
use crate::models::{NiBand, NiContribution};

/// Weeks used to convert between annual and weekly earnings.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Employee and employer contributions for one year of earnings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NiContributions {
    /// Annual employee contribution; the sum of `breakdown`.
    pub employee: Decimal,
    /// Annual employer contribution, present only for employed earners.
    pub employer: Option<Decimal>,
    /// Bands with a positive employee contribution, lowest first.
    pub breakdown: Vec<NiContribution>,
}

/// Splits `annual_income` across `bands` and annualises each contribution.
pub fn ni_contributions(
    bands: &[NiBand],
    annual_income: Decimal,
    is_employed: bool,
) -> NiContributions {
    let weeks = Decimal::from(WEEKS_PER_YEAR);
    let weekly = annual_income / weeks;

    let mut contributions = NiContributions::default();
    let mut employer_weekly = Decimal::ZERO;

    for slice in band_slices(bands, weekly) {
        let amount = round_half_up(slice.amount * slice.band.employee_rate * weeks);
        if amount > Decimal::ZERO {
            contributions.employee += amount;
            contributions.breakdown.push(NiContribution {
                band: slice.band.clone(),
                annual_earnings: round_half_up(slice.amount * weeks),
                amount,
            });
        }
        employer_weekly += slice.amount * slice.band.employer_rate;
    }

    if is_employed {
        contributions.employer = Some(round_half_up(employer_weekly * weeks));
    }
    contributions
}
