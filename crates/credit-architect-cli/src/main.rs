mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::deposit::TermDepositArgs;
use commands::schedule::ScheduleArgs;

/// Loan repayment plans and term deposit calculations
#[derive(Parser)]
#[command(
    name = "carch",
    version,
    about = "Loan repayment plans and term deposit calculations",
    long_about = "A CLI for building amortized loan repayment plans with decimal precision. \
                  Payments can be offset by date-bounded income periods to show the net \
                  amount due. Also computes simple-interest time deposits."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an amortized repayment plan with optional income offsets
    Schedule(ScheduleArgs),
    /// Simple-interest time deposit profit and maturity
    TermDeposit(TermDepositArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "credit_architect_core=debug,carch=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries the result, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::TermDeposit(args) => commands::deposit::run_term_deposit(args),
        Commands::Version => {
            println!("carch {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
