use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tracing::debug;

use credit_architect_core::amortization::schedule::{self, LoanRequest};
use credit_architect_core::amortization::IncomePeriod;

use crate::input;

/// Arguments for a repayment plan
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Number of payments (defaults to the term)
    #[arg(long)]
    pub installments: Option<u32>,

    /// Interest per nominal period in percent (e.g. 2.79)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Disbursement date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Income period as START:END:AMOUNT; repeatable, later entries win on overlap
    #[arg(long = "income", value_parser = parse_income_period)]
    pub income: Vec<IncomePeriod>,

    /// Reject zero principal, term or installment count instead of returning an empty plan
    #[arg(long)]
    pub strict: bool,
}

/// Parse `2026-01-01:2026-12-31:5000` into an income period.
pub fn parse_income_period(s: &str) -> Result<IncomePeriod, String> {
    let parts: Vec<&str> = s.splitn(3, ':').collect();
    let [start, end, amount] = parts.as_slice() else {
        return Err(format!("expected START:END:AMOUNT, got '{s}'"));
    };
    let start_date: NaiveDate = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid start date '{start}': {e}"))?;
    let end_date: NaiveDate = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid end date '{end}': {e}"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok(IncomePeriod {
        id: String::new(),
        start_date,
        end_date,
        amount,
    })
}

/// Assemble a request from individual flags.
fn request_from_flags(args: ScheduleArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let term = args.term.ok_or("--term is required (or provide --input)")?;

    let income_adjustments = args
        .income
        .into_iter()
        .enumerate()
        .map(|(i, period)| IncomePeriod {
            id: format!("income-{}", i + 1),
            ..period
        })
        .collect();

    Ok(LoanRequest {
        principal,
        nominal_term_periods: term,
        installment_count: args.installments.unwrap_or(term),
        periodic_rate_pct: args.rate.unwrap_or(dec!(1.5)),
        start_date: args
            .start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        income_adjustments,
    })
}

fn plan(request: &LoanRequest, strict: bool) -> Result<Value, Box<dyn std::error::Error>> {
    debug!(
        principal = %request.principal,
        term = request.nominal_term_periods,
        installments = request.installment_count,
        strict,
        "building repayment plan"
    );

    if strict {
        schedule::validate_request(request)?;
    }
    let result = schedule::build_schedule(request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let strict = args.strict;
    let request: LoanRequest = if let Some(path) = args.input.clone() {
        input::file::read_json(&path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        request_from_flags(args)?
    };
    plan(&request, strict)
}
