use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CreditArchitectError;
use crate::types::*;
use crate::CreditArchitectResult;

/// Terms, in days, offered on standard time deposits.
pub const STANDARD_TERM_DAYS: [u32; 37] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31, 32, 46, 55, 92, 181, 365,
];

fn default_day_basis() -> u32 {
    365
}

pub fn is_standard_term(days: u32) -> bool {
    STANDARD_TERM_DAYS.contains(&days)
}

/// Input for a simple-interest time deposit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermDepositInput {
    pub deposit_amount: Money,
    /// Annual nominal rate, in percent
    pub annual_rate_pct: Percent,
    pub day_count: u32,
    pub start_date: NaiveDate,
    #[serde(default = "default_day_basis")]
    pub day_basis: u32,
}

/// Deposit proceeds at maturity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDepositOutput {
    pub gross_profit: Money,
    pub total_at_maturity: Money,
    pub maturity_date: NaiveDate,
}

/// Simple interest over `day_count` days: `amount * rate * days / (basis * 100)`.
pub fn calculate_term_deposit(
    input: &TermDepositInput,
) -> CreditArchitectResult<ComputationOutput<TermDepositOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.deposit_amount <= Decimal::ZERO {
        return Err(CreditArchitectError::InvalidInput {
            field: "deposit_amount".into(),
            reason: "Deposit amount must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(CreditArchitectError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.day_count == 0 {
        return Err(CreditArchitectError::InvalidInput {
            field: "day_count".into(),
            reason: "Term must be at least one day".into(),
        });
    }
    if input.day_basis == 0 {
        return Err(CreditArchitectError::InvalidInput {
            field: "day_basis".into(),
            reason: "Day basis must be positive".into(),
        });
    }

    if !is_standard_term(input.day_count) {
        warnings.push(format!(
            "{} days is not a standard deposit term",
            input.day_count
        ));
    }

    let gross_profit = input.deposit_amount
        * pct_to_rate(input.annual_rate_pct)
        * Decimal::from(input.day_count)
        / Decimal::from(input.day_basis);

    let maturity_date = input
        .start_date
        .checked_add_days(Days::new(u64::from(input.day_count)))
        .ok_or_else(|| {
            CreditArchitectError::DateError(format!(
                "{} + {} days is out of range",
                input.start_date, input.day_count
            ))
        })?;

    let output = TermDepositOutput {
        gross_profit,
        total_at_maturity: input.deposit_amount + gross_profit,
        maturity_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple interest time deposit (Actual/basis)",
        &serde_json::json!({
            "deposit_amount": input.deposit_amount.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "day_count": input.day_count,
            "day_basis": input.day_basis,
            "withholding_tax": "not modelled",
        }),
        warnings,
        elapsed,
        output,
    ))
}
