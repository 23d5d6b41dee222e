mod common;

use common::{sample_input, EPS};
use truck_investment_analyzer::investment::{compute, schedule, InputModel};
use truck_investment_analyzer::scoring::{
    score, Category, CategoryBreakpoints, Factor, Ratio, ScoreResult, ScoringPolicy, Status,
};

fn score_for(input: &InputModel) -> ScoreResult {
    let c = compute(input);
    let rows = schedule(input.loan_principal, input.annual_rate, input.loan_term_months);
    score(&c, &rows, input, &ScoringPolicy::default())
}

fn points(result: &ScoreResult, factor: Factor) -> f64 {
    result.factor(factor).map(|f| f.points).unwrap_or(-1.0)
}

#[test]
fn sample_scenario_scores_ninety() {
    let r = score_for(&sample_input());
    assert_eq!(points(&r, Factor::ProfitMargin), 15.0);
    assert_eq!(points(&r, Factor::PaybackMonths), 20.0);
    assert_eq!(points(&r, Factor::Dscr), 20.0);
    assert_eq!(points(&r, Factor::Roi), 20.0);
    assert_eq!(points(&r, Factor::FundingGap), 15.0);
    assert!((r.score - 90.0).abs() < EPS);
    assert_eq!(r.category, Category::HighlyRecommended);
    assert!(Category::ALL.contains(&r.category));
}

#[test]
fn sample_ratios() {
    let r = score_for(&sample_input());
    let margin = r.ratios.profit_margin.value().expect("margin");
    assert!((margin - 0.1917).abs() < 1e-3, "margin={margin}");
    let payback = r.ratios.payback_months.value().expect("payback");
    assert!((payback - 17.39).abs() < 0.01, "payback={payback}");
    let dscr = r.ratios.dscr.value().expect("dscr");
    assert!((dscr - 2.2927).abs() < 1e-3, "dscr={dscr}");
    assert_eq!(r.ratios.funding_gap, 0.0);
}

#[test]
fn no_debt_gives_full_dscr_points() {
    let mut input = sample_input();
    input.loan_principal = 0.0;
    input.capital_available = 300_000.0;
    let r = score_for(&input);
    assert_eq!(r.ratios.dscr, Ratio::Infinite);
    assert_eq!(points(&r, Factor::Dscr), 20.0);
}

#[test]
fn zero_revenue_is_handled_without_nan() {
    let mut input = sample_input();
    input.trips_per_month = 0;
    let r = score_for(&input);
    assert_eq!(r.ratios.profit_margin, Ratio::Undefined);
    assert_eq!(r.ratios.payback_months, Ratio::Infinite);
    assert_eq!(points(&r, Factor::ProfitMargin), 0.0);
    assert_eq!(points(&r, Factor::PaybackMonths), 0.0);
    assert!(r.score.is_finite());
    assert_eq!(r.category, Category::NotRecommended);
}

#[test]
fn funding_gap_is_penalised() {
    let mut input = sample_input();
    input.capital_available = 50_000.0;
    let r = score_for(&input);
    assert!((r.ratios.funding_gap - 50_000.0).abs() < EPS);
    assert_eq!(points(&r, Factor::FundingGap), 0.0);
    let f = r.factor(Factor::FundingGap).expect("funding");
    assert_eq!(f.status, Status::Critical);
    assert!(r.warnings().any(|w| w.factor == Factor::FundingGap));
}

#[test]
fn score_stays_within_bounds() {
    for trips in [0, 5, 10, 20, 40, 80] {
        for rate in [20.0, 90.0, 150.0, 400.0] {
            let mut input = sample_input().with_trips(trips);
            input.rate_per_unit = rate;
            let r = score_for(&input);
            assert!((0.0..=100.0).contains(&r.score), "score={}", r.score);
            assert!(r.total_points <= r.max_points);
        }
    }
}

#[test]
fn category_is_monotone_in_score() {
    let bp = CategoryBreakpoints::default();
    let mut prev = Category::from_score(100.0, &bp);
    let mut s = 100.0;
    while s >= 0.0 {
        let c = Category::from_score(s, &bp);
        assert!(c <= prev, "score {s}: {c:?} after {prev:?}");
        prev = c;
        s -= 0.5;
    }
    assert_eq!(Category::from_score(85.0, &bp), Category::HighlyRecommended);
    assert_eq!(Category::from_score(84.9, &bp), Category::Recommended);
    assert_eq!(Category::from_score(39.9, &bp), Category::NotRecommended);
}

#[test]
fn custom_policy_changes_category() {
    let mut policy = ScoringPolicy::default();
    policy.categories.highly_recommended = 95.0;
    let input = sample_input();
    let c = compute(&input);
    let rows = schedule(input.loan_principal, input.annual_rate, input.loan_term_months);
    let r = score(&c, &rows, &input, &policy);
    assert_eq!(r.category, Category::Recommended);
}
