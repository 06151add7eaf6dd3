use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// A date-bounded flat reduction applied to every installment that falls
/// inside `[start_date, end_date]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomePeriod {
    /// Opaque identity token supplied by the caller; ignored by the maths.
    #[serde(default)]
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub amount: Money,
}

impl IncomePeriod {
    /// Inclusive on both bounds. An inverted period contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_inverted(&self) -> bool {
        self.start_date > self.end_date
    }

    fn overlaps(&self, other: &IncomePeriod) -> bool {
        !self.is_inverted()
            && !other.is_inverted()
            && self.start_date <= other.end_date
            && other.start_date <= self.end_date
    }
}

/// Income matched to a payment date.
///
/// Overlapping periods do not stack: the last containing period in input
/// order wins.
pub fn matched_income(date: NaiveDate, periods: &[IncomePeriod]) -> Money {
    periods
        .iter()
        .rev()
        .find(|p| p.contains(date))
        .map(|p| p.amount)
        .unwrap_or(Decimal::ZERO)
}

/// Index pairs `(earlier, later)` of periods whose ranges intersect.
pub fn overlapping_periods(periods: &[IncomePeriod]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in periods.iter().enumerate() {
        for (j, b) in periods.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
