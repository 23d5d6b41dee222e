mod common;

use common::{sample_input, EPS};
use truck_investment_analyzer::investment::{compute, InputError};
use truck_investment_analyzer::scoring::ScoringPolicy;
use truck_investment_analyzer::sensitivity::{
    best_row, break_even, break_even_after_debt, sweep, BreakEven, TripRange,
};

#[test]
fn sweep_matches_direct_compute() {
    let input = sample_input();
    let range = TripRange::stepped(10, 30, 5).expect("range");
    let rows = sweep(&input, &range, &ScoringPolicy::default());
    assert_eq!(rows.len(), 5);
    let trips: Vec<u32> = rows.iter().map(|r| r.trips_per_month).collect();
    assert_eq!(trips, vec![10, 15, 20, 25, 30]);
    for r in &rows {
        let direct = compute(&input.with_trips(r.trips_per_month));
        assert_eq!(r.cashflow, direct);
    }
    assert_eq!(rows.iter().filter(|r| r.is_current).count(), 1);
    assert!(rows[2].is_current);
}

#[test]
fn sweep_leaves_input_untouched() {
    let input = sample_input();
    let before = input.clone();
    let range = TripRange::stepped(5, 40, 1).expect("range");
    let _ = sweep(&input, &range, &ScoringPolicy::default());
    assert_eq!(input, before);
}

#[test]
fn invalid_ranges_are_rejected() {
    assert_eq!(
        TripRange::stepped(30, 10, 5),
        Err(InputError::InvalidTripRange {
            start: 30,
            end: 10,
            step: 5
        })
    );
    assert!(TripRange::stepped(10, 30, 0).is_err());
}

#[test]
fn break_even_before_debt() {
    // 회당 기여 이익 = 1500 - 450 - 240 = 810, 고정비 6000 → 7.4회
    let input = sample_input();
    let range = TripRange::stepped(1, 30, 1).expect("range");
    let rows = sweep(&input, &range, &ScoringPolicy::default());
    match break_even(&rows) {
        BreakEven::Reached {
            trips,
            interpolated,
        } => {
            assert_eq!(trips, 8);
            assert!((interpolated - 6_000.0 / 810.0).abs() < 1e-6);
        }
        BreakEven::NotReached => panic!("expected break-even"),
    }
    match break_even_after_debt(&rows) {
        BreakEven::Reached { trips, .. } => assert_eq!(trips, 13),
        BreakEven::NotReached => panic!("expected break-even after debt"),
    }
}

#[test]
fn break_even_not_reached_when_always_losing() {
    let mut input = sample_input();
    input.rate_per_unit = 10.0;
    let range = TripRange::stepped(5, 30, 5).expect("range");
    let rows = sweep(&input, &range, &ScoringPolicy::default());
    assert_eq!(break_even(&rows), BreakEven::NotReached);
}

#[test]
fn best_row_has_highest_profit() {
    let range = TripRange::stepped(10, 30, 5).expect("range");
    let rows = sweep(&sample_input(), &range, &ScoringPolicy::default());
    let best = best_row(&rows).expect("best");
    assert_eq!(best.trips_per_month, 30);
    assert!(rows
        .iter()
        .all(|r| r.cashflow.profit_after_debt <= best.cashflow.profit_after_debt + EPS));
    assert!(best_row(&[]).is_none());
}
