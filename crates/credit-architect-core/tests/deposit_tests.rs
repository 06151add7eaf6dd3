use chrono::NaiveDate;
use credit_architect_core::deposit::term_deposit::{
    calculate_term_deposit, TermDepositInput, STANDARD_TERM_DAYS,
};
use rust_decimal_macros::dec;

#[test]
fn test_every_standard_term_matures_on_calendar_day() {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    for days in STANDARD_TERM_DAYS {
        let input = TermDepositInput {
            deposit_amount: dec!(100000),
            annual_rate_pct: dec!(36.5),
            day_count: days,
            start_date: start,
            day_basis: 365,
        };
        let out = calculate_term_deposit(&input).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!((out.result.maturity_date - start).num_days(), i64::from(days));
        // 36.5% on a 365-day basis earns 100 per day per 100,000
        assert_eq!(out.result.gross_profit, dec!(100) * rust_decimal::Decimal::from(days));
    }
}

#[test]
fn test_actual_360_basis() {
    let input = TermDepositInput {
        deposit_amount: dec!(360000),
        annual_rate_pct: dec!(10),
        day_count: 90,
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        day_basis: 360,
    };
    let out = calculate_term_deposit(&input).unwrap();
    assert_eq!(out.result.gross_profit, dec!(9000));
    assert_eq!(out.result.total_at_maturity, dec!(369000));
    // 90 days is not a standard offered term
    assert_eq!(out.warnings.len(), 1);
}
