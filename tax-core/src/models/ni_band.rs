use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Band;

/// UK National Insurance category letter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum NiCategory {
    /// Standard rate for most employees.
    #[default]
    A,
    /// Reduced rate for married women or widows entitled to pay reduced NI.
    B,
    /// Apprentices under 25.
    H,
}

impl NiCategory {
    pub const ALL: [NiCategory; 3] = [Self::A, Self::B, Self::H];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::H => "H",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "H" | "h" => Some(Self::H),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "Category A (Standard)",
            Self::B => "Category B (Reduced Rate)",
            Self::H => "Category H (Apprentice under 25)",
        }
    }
}

impl std::fmt::Display for NiCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weekly National Insurance band.
///
/// Thresholds are weekly earnings; rates are fractions (`0.08` means 8%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiBand {
    pub min_weekly: Decimal,
    pub max_weekly: Option<Decimal>,
    pub employee_rate: Decimal,
    pub employer_rate: Decimal,
}

impl NiBand {
    pub fn new(
        min_weekly: Decimal,
        max_weekly: Option<Decimal>,
        employee_rate: Decimal,
        employer_rate: Decimal,
    ) -> Self {
        Self {
            min_weekly,
            max_weekly,
            employee_rate,
            employer_rate,
        }
    }
}

impl Band for NiBand {
    fn lower_bound(&self) -> Decimal {
        self.min_weekly
    }

    fn upper_bound(&self) -> Option<Decimal> {
        self.max_weekly
    }
}

impl std::fmt::Display for NiBand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let rate = (self.employee_rate * Decimal::ONE_HUNDRED).normalize();
        match self.max_weekly {
            Some(max) => write!(
                f,
                "£{} - £{} @ {}%",
                self.min_weekly.normalize(),
                max.normalize(),
                rate
            ),
            None => write!(f, "£{}+ @ {}%", self.min_weekly.normalize(), rate),
        }
    }
}
