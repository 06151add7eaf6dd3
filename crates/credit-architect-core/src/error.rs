use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a loan request is rejected by strict validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidInputKind {
    NonPositivePrincipal,
    NonPositiveTerm,
    NonPositiveInstallmentCount,
    NegativeRate,
    NegativeIncomeAmount,
    InvertedIncomePeriod,
}

impl std::fmt::Display for InvalidInputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            InvalidInputKind::NonPositivePrincipal => "principal must be positive",
            InvalidInputKind::NonPositiveTerm => "nominal term must be at least one period",
            InvalidInputKind::NonPositiveInstallmentCount => {
                "installment count must be at least one"
            }
            InvalidInputKind::NegativeRate => "periodic rate cannot be negative",
            InvalidInputKind::NegativeIncomeAmount => "income amount cannot be negative",
            InvalidInputKind::InvertedIncomePeriod => "income period ends before it starts",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Error)]
pub enum CreditArchitectError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid loan request: {0}")]
    InvalidLoanRequest(InvalidInputKind),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CreditArchitectError {
    fn from(e: serde_json::Error) -> Self {
        CreditArchitectError::SerializationError(e.to_string())
    }
}

impl From<InvalidInputKind> for CreditArchitectError {
    fn from(kind: InvalidInputKind) -> Self {
        CreditArchitectError::InvalidLoanRequest(kind)
    }
}
