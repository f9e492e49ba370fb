use serde::{Deserialize, Serialize};

/// Federal filing status.
///
/// Statuses the tables do not carry fall back to [`FilingStatusCode::Single`]
/// wherever a state table is sparse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum FilingStatusCode {
    #[default]
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
}

impl FilingStatusCode {
    pub const ALL: [FilingStatusCode; 3] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            "MFS" => Some(Self::MarriedFilingSeparately),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
        }
    }
}

impl std::fmt::Display for FilingStatusCode {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
