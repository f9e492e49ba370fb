mod band;
mod filing_status;
mod ni_band;
mod tax_bracket;
mod uk;
mod us_state;
mod usa;

pub use band::{Band, BandTax};
pub use filing_status::FilingStatusCode;
pub use ni_band::{NiBand, NiCategory};
pub use tax_bracket::TaxBracket;
pub use uk::{NiContribution, UkTaxInput, UkTaxResult};
pub use us_state::UsState;
pub use usa::{
    DeductionInput, DeductionKind, DeductionLine, FederalDeductions, UsTaxInput, UsTaxResult,
};
