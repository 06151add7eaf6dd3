pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "deposit")]
pub mod deposit;

pub use error::{CreditArchitectError, InvalidInputKind};
pub use types::*;

/// Standard result type for all credit-architect operations
pub type CreditArchitectResult<T> = Result<T, CreditArchitectError>;
