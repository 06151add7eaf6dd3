use napi::Result as NapiResult;
use napi_derive::napi;

use credit_architect_core::amortization::schedule::{self, LoanRequest};
use credit_architect_core::deposit::term_deposit::{self, TermDepositInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Repayment plans
// ---------------------------------------------------------------------------

/// Bare schedule summary. Degenerate inputs give an empty plan; only
/// malformed JSON throws.
#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let summary = schedule::compute_schedule(&input);
    serde_json::to_string(&summary).map_err(to_napi_error)
}

/// Schedule in the standard envelope with warnings and assumptions.
#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Strict validation; throws with the rejection reason.
#[napi]
pub fn validate_loan_request(input_json: String) -> NapiResult<()> {
    let input: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    schedule::validate_request(&input).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Term deposits
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_term_deposit(input_json: String) -> NapiResult<String> {
    let input: TermDepositInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = term_deposit::calculate_term_deposit(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
