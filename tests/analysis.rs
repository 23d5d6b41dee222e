mod common;

use common::sample_input;
use truck_investment_analyzer::analysis::evaluate;
use truck_investment_analyzer::i18n::Translator;
use truck_investment_analyzer::investment::{BetterClient, BetterClientMode, InputError};
use truck_investment_analyzer::report::{render, ReportData};
use truck_investment_analyzer::scoring::ScoringPolicy;
use truck_investment_analyzer::sensitivity::{SensitivitySettings, TripRange};

#[test]
fn evaluate_runs_every_engine() {
    let input = sample_input();
    let range = TripRange::around(input.trips_per_month, &SensitivitySettings::default());
    let a = evaluate(&input, &ScoringPolicy::default(), &range).expect("analysis");
    assert_eq!(a.schedule.len(), 60);
    assert!((a.cashflow.revenue - 30_000.0).abs() < 1e-6);
    assert!((a.schedule[0].interest - 2_000.0).abs() < 1e-6);
    assert!(a.sensitivity.rows.iter().any(|r| r.is_current));
    assert!(a.better_client.is_none());
    assert_eq!(a.loan.installment, a.cashflow.debt_service);
}

#[test]
fn headline_score_includes_fiscal_credit() {
    let input = sample_input();
    let range = TripRange::from_values(vec![20]);
    let a = evaluate(&input, &ScoringPolicy::default(), &range).expect("analysis");
    // 공제 기간에는 월 IVA 3,900이 전액 상쇄되어 마진이 30%를 넘는다.
    assert!(a.score.score >= a.steady_state_score.score);
    assert!((a.steady_state_score.score - 90.0).abs() < 1e-6);
    assert!((a.score.score - 100.0).abs() < 1e-6);
    let current = a.sensitivity.rows.iter().find(|r| r.is_current).expect("row");
    assert_eq!(current.score, a.steady_state_score);
}

#[test]
fn evaluate_rejects_invalid_input() {
    let mut input = sample_input();
    input.truck_price = -5.0;
    let range = TripRange::from_values(vec![20]);
    let err = evaluate(&input, &ScoringPolicy::default(), &range).unwrap_err();
    assert!(matches!(err, InputError::Negative { field: "truck_price", .. }));
}

#[test]
fn better_client_comparison_is_included() {
    let mut input = sample_input();
    input.better_client = Some(BetterClient {
        trips: 5,
        rate: 200.0,
        mode: BetterClientMode::Additional,
    });
    let range = TripRange::from_values(vec![20]);
    let a = evaluate(&input, &ScoringPolicy::default(), &range).expect("analysis");
    let bc = a.better_client.expect("comparison");
    assert!((bc.revenue_delta() - 10_000.0).abs() < 1e-6);
    assert!((bc.profit_delta() - 6_150.0).abs() < 1e-6);
    assert!(bc.score_delta() >= 0.0);
}

#[test]
fn report_contains_every_section() {
    let mut input = sample_input();
    input.better_client = Some(BetterClient {
        trips: 5,
        rate: 200.0,
        mode: BetterClientMode::Reallocate,
    });
    let range = TripRange::stepped(10, 30, 5).expect("range");
    let a = evaluate(&input, &ScoringPolicy::default(), &range).expect("analysis");
    let tr = Translator::new("en");
    let text = render(&ReportData::new(&a, "Bs"), &tr);

    for heading in [
        "# Investment analysis",
        "## Executive summary",
        "## Investment summary",
        "## Loan details",
        "## Monthly cashflow",
        "## Investment viability",
        "## Fiscal credit from asset purchase",
        "## Better client impact",
        "## Sensitivity: trips per month",
        "## Loan amortization",
    ] {
        assert!(text.contains(heading), "missing {heading}");
    }
    assert!(text.contains("HIGHLY RECOMMENDED"));
    assert!(text.contains("30,000 Bs"));
    assert!(text.contains("| 20* |"));
    assert!(text.contains("First 12 months shown."));
    assert!(text.contains("Score after the fiscal credit"));
}

#[test]
fn report_uses_selected_language() {
    let input = sample_input();
    let range = TripRange::from_values(vec![20]);
    let a = evaluate(&input, &ScoringPolicy::default(), &range).expect("analysis");
    let es = render(&ReportData::new(&a, "Bs"), &Translator::new("es"));
    assert!(es.contains("Resumen ejecutivo"));
    assert!(es.contains("ALTAMENTE RECOMENDADA"));
    let ko = render(&ReportData::new(&a, "Bs"), &Translator::new("ko"));
    assert!(ko.contains("적극 추천"));
}
