use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::amortization::calendar::MonthStride;
use crate::amortization::income::{matched_income, overlapping_periods, IncomePeriod};
use crate::error::InvalidInputKind;
use crate::types::*;
use crate::CreditArchitectResult;

/// Inputs for a repayment plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    /// Periods the interest rate basis spans (months)
    pub nominal_term_periods: u32,
    /// Payments actually scheduled; may be fewer than the nominal periods
    pub installment_count: u32,
    /// Interest per nominal period, in percent
    pub periodic_rate_pct: Percent,
    /// Disbursement date; the first payment falls one stride later
    pub start_date: NaiveDate,
    /// Order matters: later periods take precedence where they overlap
    #[serde(default)]
    pub income_adjustments: Vec<IncomePeriod>,
}

/// A single row of the repayment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub installment_number: u32,
    pub payment_date: NaiveDate,
    pub payment_amount: Money,
    pub income_amount: Money,
    pub net_payment_amount: Money,
    pub interest_amount: Money,
    pub principal_amount: Money,
    pub remaining_balance: Money,
}

/// Totals and the row-by-row plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_payment: Money,
    pub total_interest: Money,
    /// Steady-state gross payment (the first installment's)
    pub installment_amount: Money,
    pub total_income: Money,
    pub total_net_payment: Money,
    pub schedule: Vec<Installment>,
}

impl ScheduleSummary {
    /// All totals zero, no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Rows reserved up front; longer plans grow the vector as they go.
const PREALLOCATED_ROWS: u32 = 1200;

/// Level annuity payment `P * r * (1+r)^n / ((1+r)^n - 1)`.
///
/// A zero rate gives straight-line repayment. When `(1+r)^n` leaves decimal
/// range the payment converges to the interest-only limit `P * r`. Products
/// saturate at the decimal bounds.
pub fn installment_amount(principal: Money, period_rate: Rate, installment_count: u32) -> Money {
    if installment_count == 0 {
        return Decimal::ZERO;
    }
    if period_rate.is_zero() {
        return principal / Decimal::from(installment_count);
    }

    match (Decimal::ONE + period_rate).checked_powu(u64::from(installment_count)) {
        Some(growth) => {
            let denominator = growth - Decimal::ONE;
            if denominator.is_zero() {
                principal / Decimal::from(installment_count)
            } else {
                principal
                    .saturating_mul(period_rate)
                    .saturating_mul(growth / denominator)
            }
        }
        None => principal.saturating_mul(period_rate),
    }
}

/// Rate per installment: the nominal rate scaled linearly by the stride.
fn stride_rate(periodic_rate_pct: Percent, stride: MonthStride) -> Rate {
    pct_to_rate(periodic_rate_pct).saturating_mul(stride.months())
}

/// Build the repayment plan for `request`.
///
/// Total over its input domain: a non-positive principal or a zero term or
/// installment count yields [`ScheduleSummary::empty`]. The final installment
/// repays whatever balance remains, so the plan always closes at exactly zero.
/// Amounts beyond decimal range saturate at `Decimal::MAX` instead of failing.
pub fn compute_schedule(request: &LoanRequest) -> ScheduleSummary {
    if request.principal <= Decimal::ZERO {
        return ScheduleSummary::empty();
    }
    let Some(stride) = MonthStride::new(request.nominal_term_periods, request.installment_count)
    else {
        return ScheduleSummary::empty();
    };

    let n = request.installment_count;
    let period_rate = stride_rate(request.periodic_rate_pct, stride);
    let level_payment = installment_amount(request.principal, period_rate, n);

    debug!(
        stride_months = %stride.months(),
        period_rate = %period_rate,
        installment_amount = %level_payment,
        installments = n,
        "amortization parameters"
    );

    let mut schedule = Vec::with_capacity(n.min(PREALLOCATED_ROWS) as usize);
    let mut balance = request.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_income = Decimal::ZERO;
    let mut total_net_payment = Decimal::ZERO;

    for i in 1..=n {
        let interest = balance.saturating_mul(period_rate);

        // Final installment repays the remaining balance
        let (principal_part, payment) = if i == n {
            (balance, balance.saturating_add(interest))
        } else {
            (level_payment - interest, level_payment)
        };

        balance = balance.saturating_sub(principal_part);
        if balance < Decimal::ZERO || i == n {
            balance = Decimal::ZERO;
        }
        total_interest = total_interest.saturating_add(interest);

        // Income overlay: no stacking, and the net payment never goes negative
        let payment_date = stride.payment_date(request.start_date, i);
        let income = matched_income(payment_date, &request.income_adjustments);
        let net_payment = (payment - income).max(Decimal::ZERO);

        total_income = total_income.saturating_add(income);
        total_net_payment = total_net_payment.saturating_add(net_payment);

        schedule.push(Installment {
            installment_number: i,
            payment_date,
            payment_amount: payment,
            income_amount: income,
            net_payment_amount: net_payment,
            interest_amount: interest,
            principal_amount: principal_part,
            remaining_balance: balance,
        });
    }

    // Reported installment is the first row's gross payment
    let first_payment = schedule
        .first()
        .map(|row| row.payment_amount)
        .unwrap_or(Decimal::ZERO);

    ScheduleSummary {
        total_payment: request.principal.saturating_add(total_interest),
        total_interest,
        installment_amount: first_payment,
        total_income,
        total_net_payment,
        schedule,
    }
}

/// Strict validation for callers that prefer an error over the empty plan.
pub fn validate_request(request: &LoanRequest) -> CreditArchitectResult<()> {
    if request.principal <= Decimal::ZERO {
        return Err(InvalidInputKind::NonPositivePrincipal.into());
    }
    if request.nominal_term_periods == 0 {
        return Err(InvalidInputKind::NonPositiveTerm.into());
    }
    if request.installment_count == 0 {
        return Err(InvalidInputKind::NonPositiveInstallmentCount.into());
    }
    check_defined(request)?;
    Ok(())
}

/// Rejects inputs the schedule maths gives no meaning to.
fn check_defined(request: &LoanRequest) -> Result<(), InvalidInputKind> {
    if request.principal < Decimal::ZERO {
        return Err(InvalidInputKind::NonPositivePrincipal);
    }
    if request.periodic_rate_pct < Decimal::ZERO {
        return Err(InvalidInputKind::NegativeRate);
    }
    for period in &request.income_adjustments {
        if period.amount < Decimal::ZERO {
            return Err(InvalidInputKind::NegativeIncomeAmount);
        }
        if period.is_inverted() {
            return Err(InvalidInputKind::InvertedIncomePeriod);
        }
    }
    Ok(())
}

fn period_label(periods: &[IncomePeriod], idx: usize) -> String {
    match periods.get(idx) {
        Some(p) if !p.id.is_empty() => format!("'{}'", p.id),
        _ => format!("#{}", idx + 1),
    }
}

/// Repayment plan wrapped in the standard output envelope.
///
/// Negative amounts and inverted income periods are rejected; degenerate zero
/// inputs come back as the empty plan with a warning.
pub fn build_schedule(
    request: &LoanRequest,
) -> CreditArchitectResult<ComputationOutput<ScheduleSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(kind) = check_defined(request) {
        warn!(%kind, "rejecting loan request");
        return Err(kind.into());
    }

    if request.principal.is_zero()
        || request.nominal_term_periods == 0
        || request.installment_count == 0
    {
        warnings.push(
            "Principal, term and installment count must all be positive; returning an empty schedule"
                .into(),
        );
    }

    let stride = MonthStride::new(request.nominal_term_periods, request.installment_count);
    if let Some(stride) = stride.filter(|s| !s.is_whole()) {
        warnings.push(format!(
            "Installment stride of {} months is fractional; payment dates are rounded to the nearest day",
            stride.months().round_dp(4)
        ));
    }

    for (earlier, later) in overlapping_periods(&request.income_adjustments) {
        warnings.push(format!(
            "Income periods {} and {} overlap; {} applies on shared dates",
            period_label(&request.income_adjustments, earlier),
            period_label(&request.income_adjustments, later),
            period_label(&request.income_adjustments, later),
        ));
    }

    let summary = compute_schedule(request);

    let period_rate = stride
        .map(|s| stride_rate(request.periodic_rate_pct, s))
        .unwrap_or(Decimal::ZERO);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level annuity amortization with income overlay",
        &serde_json::json!({
            "principal": request.principal.to_string(),
            "nominal_term_periods": request.nominal_term_periods,
            "installment_count": request.installment_count,
            "periodic_rate_pct": request.periodic_rate_pct.to_string(),
            "stride_months": stride.map(|s| s.months().to_string()),
            "period_rate": period_rate.to_string(),
            "start_date": request.start_date.to_string(),
            "income_periods": request.income_adjustments.len(),
        }),
        warnings,
        elapsed,
        summary,
    ))
}
