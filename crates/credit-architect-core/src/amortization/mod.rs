pub mod calendar;
pub mod income;
pub mod schedule;

pub use calendar::MonthStride;
pub use income::{matched_income, IncomePeriod};
pub use schedule::{
    build_schedule, compute_schedule, validate_request, Installment, LoanRequest,
    ScheduleSummary,
};
