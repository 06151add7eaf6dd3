pub mod deposit;
pub mod schedule;
