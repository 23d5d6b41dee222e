mod common;

use common::{sample_input, EPS};
use truck_investment_analyzer::investment::fiscal_credit;

#[test]
fn credit_covers_iva_for_ten_months() {
    let fc = fiscal_credit(&sample_input());
    assert!((fc.base - 300_000.0).abs() < EPS);
    assert!((fc.total - 39_000.0).abs() < EPS);
    assert!((fc.monthly_iva - 3_900.0).abs() < EPS);
    let months = fc.months_of_coverage.expect("coverage");
    assert!((months - 10.0).abs() < EPS);
    assert!((fc.monthly_savings - 3_900.0).abs() < EPS);
    assert_eq!(fc.with_credit.iva, 0.0);
    assert!(
        (fc.with_credit.profit_after_debt - fc.without_credit.profit_after_debt - 3_900.0).abs()
            < EPS
    );
}

#[test]
fn trailer_without_invoice_is_excluded() {
    let mut input = sample_input();
    input.trailer_invoiced_with_iva = false;
    let fc = fiscal_credit(&input);
    assert!((fc.base - 250_000.0).abs() < EPS);
    assert!((fc.total - 32_500.0).abs() < EPS);
}

#[test]
fn small_credit_is_used_in_full() {
    let mut input = sample_input();
    input.truck_price = 10_000.0;
    input.trailer_price = 0.0;
    let fc = fiscal_credit(&input);
    assert!((fc.total - 1_300.0).abs() < EPS);
    assert!((fc.monthly_savings - 1_300.0).abs() < EPS);
    assert!(fc.months_of_coverage.expect("coverage") < 1.0);
}

#[test]
fn no_revenue_means_no_coverage() {
    let fc = fiscal_credit(&sample_input().with_trips(0));
    assert_eq!(fc.months_of_coverage, None);
    assert_eq!(fc.monthly_savings, 0.0);
}
