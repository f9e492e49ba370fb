use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An income range with a lower threshold and an optional upper threshold.
///
/// Implemented by both [`TaxBracket`](super::TaxBracket) and
/// [`NiBand`](super::NiBand). Rates are not part of the trait;
/// each pipeline applies its own rate convention to the slices the
/// accumulator produces.
pub trait Band {
    /// Inclusive lower threshold. Income above this value falls in the band.
    fn lower_bound(&self) -> Decimal;

    /// Upper threshold, or `None` for the unbounded top band.
    fn upper_bound(&self) -> Option<Decimal>;

    /// Portion of `amount` that falls inside this band.
    ///
    /// Returns zero when `amount` does not exceed the lower threshold.
    fn portion_of(
        &self,
        amount: Decimal,
    ) -> Decimal {
        let lower = self.lower_bound();
        if amount <= lower {
            return Decimal::ZERO;
        }
        match self.upper_bound() {
            Some(upper) => amount.min(upper) - lower,
            None => amount - lower,
        }
    }

    /// Whether `amount` is fully covered once this band has been applied.
    fn covers(
        &self,
        amount: Decimal,
    ) -> bool {
        self.upper_bound().is_none_or(|upper| amount <= upper)
    }
}

/// Tax attributed to one band by the bracket accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax<B> {
    pub band: B,
    /// Portion of the taxed amount that fell inside the band.
    pub taxable_amount: Decimal,
    /// Tax on that portion, rounded to cents.
    pub tax: Decimal,
}
