use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credit_architect_core::deposit::term_deposit::{self, TermDepositInput};

use crate::input;

/// Arguments for a time deposit
#[derive(Args)]
pub struct TermDepositArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount deposited
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 43)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in days
    #[arg(long)]
    pub days: Option<u32>,

    /// Value date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Days per year used to accrue interest
    #[arg(long, default_value_t = 365)]
    pub day_basis: u32,
}

pub fn run_term_deposit(args: TermDepositArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deposit_input: TermDepositInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let amount = args
            .amount
            .ok_or("--amount is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let days = args.days.ok_or("--days is required (or provide --input)")?;

        TermDepositInput {
            deposit_amount: amount,
            annual_rate_pct: rate,
            day_count: days,
            start_date: args
                .start_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            day_basis: args.day_basis,
        }
    };

    let result = term_deposit::calculate_term_deposit(&deposit_input)?;
    Ok(serde_json::to_value(result)?)
}
