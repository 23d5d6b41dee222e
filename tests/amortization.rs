mod common;

use common::{sample_input, EPS};
use truck_investment_analyzer::investment::{
    installment, schedule, summarize, InputError, MAX_TERM_MONTHS,
};

#[test]
fn zero_principal_gives_empty_schedule() {
    assert!(schedule(0.0, 0.12, 60).is_empty());
    assert_eq!(installment(0.0, 0.12, 60), 0.0);
    let summary = summarize(&[]);
    assert_eq!(summary.total_paid, 0.0);
    assert_eq!(summary.installment, 0.0);
}

#[test]
fn first_row_interest_is_one_percent_of_principal() {
    let rows = schedule(200_000.0, 0.12, 60);
    assert_eq!(rows.len(), 60);
    assert_eq!(rows[0].month, 1);
    assert!((rows[0].interest - 2_000.0).abs() < EPS);
    assert!((rows[0].opening_balance - 200_000.0).abs() < EPS);
}

#[test]
fn schedule_pays_off_principal() {
    let p = 700_000.0;
    let rows = schedule(p, 0.12, 60);
    let last = rows.last().expect("rows");
    assert!(last.closing_balance.abs() < 1e-6);
    let principal_sum: f64 = rows.iter().map(|r| r.principal).sum();
    assert!((principal_sum - p).abs() < 1e-6, "sum={principal_sum}");

    for pair in rows.windows(2) {
        assert!((pair[1].opening_balance - pair[0].closing_balance).abs() < EPS);
    }
    for r in &rows {
        assert!((r.installment - (r.interest + r.principal)).abs() < EPS);
    }

    let summary = summarize(&rows);
    assert!((summary.total_principal - p).abs() < 1e-6);
    assert!((summary.total_paid - (summary.total_principal + summary.total_interest)).abs() < 1e-6);
    assert!((summary.installment - installment(p, 0.12, 60)).abs() < EPS);
}

#[test]
fn installment_is_constant_except_last_row() {
    let rows = schedule(200_000.0, 0.12, 60);
    let pay = installment(200_000.0, 0.12, 60);
    for r in &rows[..rows.len() - 1] {
        assert!((r.installment - pay).abs() < 1e-6);
    }
    assert!((rows[59].installment - pay).abs() < 1e-3);
}

#[test]
fn zero_rate_splits_principal_evenly() {
    let rows = schedule(120_000.0, 0.0, 24);
    assert_eq!(rows.len(), 24);
    for r in &rows {
        assert_eq!(r.interest, 0.0);
        assert!((r.principal - 5_000.0).abs() < EPS);
    }
    assert_eq!(rows[23].closing_balance, 0.0);
}

#[test]
fn very_long_term_keeps_installment_positive() {
    let p = 200_000.0;
    let huge = installment(p, 0.12, u32::MAX);
    assert!(huge > 0.0);
    // 기간이 매우 길면 이자만 내는 것과 같아진다.
    assert!((huge - p * 0.01).abs() < 1e-3);

    let long = installment(p, 0.12, MAX_TERM_MONTHS);
    assert!(long > p * 0.01 && long < installment(p, 0.12, 60));
}

#[test]
fn validate_rejects_term_above_limit() {
    let mut input = sample_input();
    input.loan_term_months = MAX_TERM_MONTHS;
    assert_eq!(input.validate(), Ok(()));

    input.loan_term_months = u32::MAX;
    assert_eq!(
        input.validate(),
        Err(InputError::TermTooLong {
            months: u32::MAX,
            max: MAX_TERM_MONTHS,
        })
    );
}
