mod common;

use common::{sample_input, EPS};
use truck_investment_analyzer::investment::{self, capital_structure, compute, InputError};

#[test]
fn monthly_cashflow_for_sample_scenario() {
    let c = compute(&sample_input());
    assert!((c.revenue - 30_000.0).abs() < EPS);
    assert!((c.fuel_cost - 8_000.0).abs() < EPS);
    assert!((c.toll_cost - 1_000.0).abs() < EPS);
    assert!((c.operating_costs - 15_000.0).abs() < EPS);
    assert!((c.iva - 3_900.0).abs() < EPS);
    assert!((c.it - 900.0).abs() < EPS);
    assert!((c.total_taxes - 4_800.0).abs() < EPS);
    assert!((c.profit_before_debt - 10_200.0).abs() < EPS);
    assert!((c.debt_service - 4_448.89).abs() < 0.01, "debt={}", c.debt_service);
    assert!((c.profit_after_debt - (c.profit_before_debt - c.debt_service)).abs() < EPS);
    assert_eq!(c.fiscal_credit_used, 0.0);
}

#[test]
fn no_loan_means_no_debt_service() {
    let mut input = sample_input();
    input.loan_principal = 0.0;
    let c = compute(&input);
    assert_eq!(c.debt_service, 0.0);
    assert!((c.profit_after_debt - c.profit_before_debt).abs() < EPS);
}

#[test]
fn fuel_and_tolls_scale_with_trips() {
    let base = compute(&sample_input());
    let more = compute(&sample_input().with_trips(30));
    assert!((more.fuel_cost - base.fuel_cost * 1.5).abs() < EPS);
    assert!((more.toll_cost - base.toll_cost * 1.5).abs() < EPS);
    assert!((more.revenue - 45_000.0).abs() < EPS);
}

#[test]
fn credit_never_exceeds_iva() {
    let c = investment::compute_with_credit(&sample_input(), 1.0e9);
    assert!((c.fiscal_credit_used - 3_900.0).abs() < EPS);
    assert_eq!(c.iva, 0.0);
    assert!((c.total_taxes - 900.0).abs() < EPS);
}

#[test]
fn capital_structure_keeps_reserve_first() {
    let mut input = sample_input();
    input.capital_available = 150_000.0;
    input.reserve_min = 30_000.0;
    let cap = capital_structure(&input);
    assert!((cap.reserve - 30_000.0).abs() < EPS);
    assert!((cap.equity_used - 120_000.0).abs() < EPS);
    assert!((cap.total_funded - 320_000.0).abs() < EPS);
    assert_eq!(cap.funding_gap, 0.0);
    assert!((cap.funding_surplus - 20_000.0).abs() < EPS);
}

#[test]
fn funding_gap_when_capital_is_short() {
    let mut input = sample_input();
    input.capital_available = 60_000.0;
    let cap = capital_structure(&input);
    assert!((cap.funding_gap - 40_000.0).abs() < EPS);
    assert_eq!(cap.funding_surplus, 0.0);
}

#[test]
fn validate_rejects_bad_values() {
    let mut input = sample_input();
    input.driver_salary = -1.0;
    assert!(matches!(
        input.validate(),
        Err(InputError::Negative { field: "driver_salary", .. })
    ));

    let mut input = sample_input();
    input.rate_per_unit = f64::NAN;
    assert_eq!(
        input.validate(),
        Err(InputError::NotFinite { field: "rate_per_unit" })
    );

    let mut input = sample_input();
    input.loan_term_months = 0;
    assert_eq!(input.validate(), Err(InputError::ZeroTerm));

    input.loan_principal = 0.0;
    assert_eq!(input.validate(), Ok(()));
}
