use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;

/// Spacing between consecutive installments, in calendar months.
///
/// Kept as the exact ratio `nominal_term_periods / installment_count` so that
/// payment offsets never accumulate rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthStride {
    nominal_term_periods: u32,
    installment_count: u32,
}

impl MonthStride {
    /// Returns `None` when either count is zero.
    pub fn new(nominal_term_periods: u32, installment_count: u32) -> Option<Self> {
        if nominal_term_periods == 0 || installment_count == 0 {
            return None;
        }
        Some(Self {
            nominal_term_periods,
            installment_count,
        })
    }

    /// Stride as a decimal number of months (e.g. 120 / 60 = 2).
    pub fn months(&self) -> Decimal {
        Decimal::from(self.nominal_term_periods) / Decimal::from(self.installment_count)
    }

    /// True when every installment lands on a whole-month offset.
    pub fn is_whole(&self) -> bool {
        self.nominal_term_periods % self.installment_count == 0
    }

    /// Whole months and remainder (over `installment_count`) for installment `n`.
    fn offset(&self, n: u32) -> (u64, u64) {
        let total = u64::from(n) * u64::from(self.nominal_term_periods);
        let count = u64::from(self.installment_count);
        (total / count, total % count)
    }

    /// Payment date of installment `n` (1-based) for a loan starting on `start`.
    ///
    /// Whole months are added with end-of-month clamping, always measured from
    /// `start`. A fractional remainder becomes days against the length of the
    /// month that follows, rounded half-up.
    pub fn payment_date(&self, start: NaiveDate, n: u32) -> NaiveDate {
        let (whole, rem) = self.offset(n);
        let anchor = add_months_saturating(start, whole);
        if rem == 0 {
            return anchor;
        }

        let next = add_months_saturating(start, whole + 1);
        let month_days = (next - anchor).num_days().max(0) as u64;
        let count = u64::from(self.installment_count);
        let days = (2 * rem * month_days + count) / (2 * count);

        anchor
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Add calendar months, clamping the day to the target month's length.
/// Results past the representable range saturate at `NaiveDate::MAX`.
pub fn add_months_saturating(date: NaiveDate, months: u64) -> NaiveDate {
    u32::try_from(months)
        .ok()
        .and_then(|m| date.checked_add_months(Months::new(m)))
        .unwrap_or(NaiveDate::MAX)
}
