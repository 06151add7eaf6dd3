use chrono::NaiveDate;
use credit_architect_core::amortization::schedule::{
    build_schedule, compute_schedule, LoanRequest, ScheduleSummary,
};
use credit_architect_core::amortization::IncomePeriod;
use credit_architect_core::Money;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request(principal: Money, term: u32, count: u32, rate_pct: Money) -> LoanRequest {
    LoanRequest {
        principal,
        nominal_term_periods: term,
        installment_count: count,
        periodic_rate_pct: rate_pct,
        start_date: date(2026, 1, 1),
        income_adjustments: vec![],
    }
}

fn principal_sum(summary: &ScheduleSummary) -> Money {
    summary.schedule.iter().map(|r| r.principal_amount).sum()
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_property_purchase_plan() {
    let summary = compute_schedule(&request(dec!(1250000), 120, 120, dec!(2.79)));

    assert_eq!(summary.schedule.len(), 120);
    assert_eq!(summary.schedule[0].installment_number, 1);
    assert_eq!(summary.schedule[0].payment_date, date(2026, 2, 1));
    assert_eq!(summary.schedule[119].remaining_balance, Decimal::ZERO);
    assert_eq!(
        summary.installment_amount.round_dp(2),
        dec!(36207.59)
    );
    assert_eq!(summary.total_payment, dec!(1250000) + summary.total_interest);

    // Every row but the last pays the same gross amount
    for row in &summary.schedule[..119] {
        assert_eq!(row.payment_amount, summary.installment_amount);
    }
    let last = &summary.schedule[119];
    assert!((last.payment_amount - summary.installment_amount).abs() < dec!(0.000001));
}

#[test]
fn test_bimonthly_installments() {
    let summary = compute_schedule(&request(dec!(1250000), 120, 60, dec!(2.79)));
    assert_eq!(summary.schedule.len(), 60);
    assert_eq!(summary.schedule[0].payment_date, date(2026, 3, 1));
    assert_eq!(summary.schedule[1].payment_date, date(2026, 5, 1));
    assert_eq!(summary.schedule[59].payment_date, date(2036, 1, 1));
    assert_eq!(
        summary.schedule[0].interest_amount,
        dec!(1250000) * dec!(0.0558)
    );
    assert_eq!(summary.schedule[59].remaining_balance, Decimal::ZERO);
}

#[test]
fn test_fractional_stride_dates() {
    let summary = compute_schedule(&request(dec!(9000), 3, 2, dec!(1)));
    let dates: Vec<NaiveDate> = summary.schedule.iter().map(|r| r.payment_date).collect();
    assert_eq!(dates, vec![date(2026, 2, 15), date(2026, 4, 1)]);
}

#[test]
fn test_degenerate_requests_match_empty_summary() {
    let expected = ScheduleSummary {
        total_payment: Decimal::ZERO,
        total_interest: Decimal::ZERO,
        installment_amount: Decimal::ZERO,
        total_income: Decimal::ZERO,
        total_net_payment: Decimal::ZERO,
        schedule: vec![],
    };
    assert_eq!(compute_schedule(&request(Decimal::ZERO, 120, 120, dec!(2.79))), expected);
    assert_eq!(compute_schedule(&request(dec!(1000), 0, 120, dec!(2.79))), expected);
    assert_eq!(compute_schedule(&request(dec!(1000), 120, 0, dec!(2.79))), expected);
}

#[test]
fn test_income_overlay_precedence_and_floor() {
    let mut req = request(dec!(120000), 12, 12, dec!(1));
    req.income_adjustments = vec![
        IncomePeriod {
            id: "lease-1".into(),
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
            amount: dec!(4000),
        },
        IncomePeriod {
            id: "bonus".into(),
            start_date: date(2026, 7, 1),
            end_date: date(2026, 7, 1),
            amount: dec!(1000000),
        },
        IncomePeriod {
            id: "lease-2".into(),
            start_date: date(2026, 9, 1),
            end_date: date(2027, 3, 1),
            amount: dec!(2500),
        },
    ];
    let summary = compute_schedule(&req);
    let incomes: Vec<Money> = summary.schedule.iter().map(|r| r.income_amount).collect();
    assert_eq!(
        incomes,
        vec![
            dec!(4000),    // Feb
            dec!(4000),    // Mar
            dec!(4000),    // Apr
            dec!(4000),    // May
            dec!(4000),    // Jun
            dec!(1000000), // Jul
            dec!(4000),    // Aug
            dec!(2500),    // Sep
            dec!(2500),    // Oct
            dec!(2500),    // Nov
            dec!(2500),    // Dec
            dec!(2500),    // Jan 2027
        ]
    );
    assert_eq!(summary.schedule[5].net_payment_amount, Decimal::ZERO);
    assert_eq!(
        summary.schedule[0].net_payment_amount,
        summary.schedule[0].payment_amount - dec!(4000)
    );
    assert_eq!(summary.total_income, dec!(1036500));
}

#[test]
fn test_envelope_serializes_schedule() {
    let out = build_schedule(&request(dec!(1000), 2, 2, dec!(1))).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["schedule"][0]["payment_date"], "2026-02-01");
    let as_decimal = |v: &serde_json::Value| v.as_str().unwrap().parse::<Decimal>().unwrap();
    assert_eq!(
        as_decimal(&json["result"]["schedule"][1]["remaining_balance"]),
        Decimal::ZERO
    );
    assert_eq!(as_decimal(&json["assumptions"]["stride_months"]), dec!(1));
    assert!(json["metadata"]["version"].is_string());
}

#[test]
fn test_request_from_json() {
    let req: LoanRequest = serde_json::from_str(
        r#"{
            "principal": "250000",
            "nominal_term_periods": 24,
            "installment_count": 24,
            "periodic_rate_pct": "1.5",
            "start_date": "2026-03-15",
            "income_adjustments": [
                {"id": "x", "start_date": "2026-04-01", "end_date": "2026-06-30", "amount": "500"}
            ]
        }"#,
    )
    .unwrap();
    let summary = compute_schedule(&req);
    assert_eq!(summary.schedule[0].payment_date, date(2026, 4, 15));
    assert_eq!(summary.schedule[0].income_amount, dec!(500));
    assert_eq!(summary.schedule[3].income_amount, Decimal::ZERO);
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    /// The final balance is exactly zero and never negative along the way
    #[test]
    fn prop_balance_terminates_at_zero(
        cents in 1u64..10_000_000_000u64,
        count in 1u32..360u32,
        multiple in 1u32..4u32,
        rate_bp in 0u32..1500u32,
    ) {
        let principal = Decimal::from(cents) / dec!(100);
        let rate = Decimal::from(rate_bp) / dec!(100);
        let summary = compute_schedule(&request(principal, count * multiple, count, rate));

        prop_assert_eq!(summary.schedule.len(), count as usize);
        let last = summary.schedule.last().unwrap();
        prop_assert_eq!(last.remaining_balance, Decimal::ZERO);

        let mut previous = principal;
        for row in &summary.schedule {
            prop_assert!(row.remaining_balance >= Decimal::ZERO);
            prop_assert!(row.remaining_balance <= previous);
            previous = row.remaining_balance;
        }
    }

    /// Principal portions add back up to the amount borrowed
    #[test]
    fn prop_principal_is_conserved(
        cents in 100u64..10_000_000_000u64,
        term in 1u32..240u32,
        count in 1u32..240u32,
        rate_bp in 0u32..1000u32,
    ) {
        let principal = Decimal::from(cents) / dec!(100);
        let rate = Decimal::from(rate_bp) / dec!(100);
        let summary = compute_schedule(&request(principal, term, count, rate));

        let drift = (principal_sum(&summary) - principal).abs();
        prop_assert!(drift <= principal * dec!(0.000001), "drift {}", drift);
        prop_assert_eq!(summary.total_payment, principal + summary.total_interest);
    }

    /// Zero interest repays in equal slices
    #[test]
    fn prop_zero_rate_is_straight_line(
        cents in 100u64..1_000_000_000u64,
        count in 1u32..120u32,
    ) {
        let principal = Decimal::from(cents) / dec!(100);
        let summary = compute_schedule(&request(principal, count, count, Decimal::ZERO));
        let slice = principal / Decimal::from(count);

        prop_assert_eq!(summary.total_interest, Decimal::ZERO);
        for row in &summary.schedule[..summary.schedule.len() - 1] {
            prop_assert_eq!(row.principal_amount, slice);
        }
    }

    /// Of two periods covering the same date, the one listed later applies
    #[test]
    fn prop_later_income_period_wins(
        first in 0u32..100_000u32,
        second in 0u32..100_000u32,
        count in 1u32..24u32,
    ) {
        let mut req = request(dec!(50000), count, count, dec!(1.5));
        let covering = |amount: u32| IncomePeriod {
            id: String::new(),
            start_date: date(2026, 1, 1),
            end_date: date(2028, 12, 31),
            amount: Decimal::from(amount),
        };
        req.income_adjustments = vec![covering(first), covering(second)];
        let summary = compute_schedule(&req);

        for row in &summary.schedule {
            prop_assert_eq!(row.income_amount, Decimal::from(second));
            prop_assert!(row.net_payment_amount >= Decimal::ZERO);
        }
    }
}
