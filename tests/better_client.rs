mod common;

use common::{sample_input, EPS};
use truck_investment_analyzer::investment::{
    apply_better_client, compute, BetterClient, BetterClientMode, InputError,
};

#[test]
fn additional_trips_add_revenue_and_variable_costs() {
    let input = sample_input();
    let base = compute(&input);
    let scenario = BetterClient {
        trips: 5,
        rate: 200.0,
        mode: BetterClientMode::Additional,
    };
    let adj = apply_better_client(&base, &input, &scenario);
    assert!((adj.revenue - base.revenue - 10_000.0).abs() < EPS);
    assert!((adj.fuel_cost - base.fuel_cost - 2_000.0).abs() < EPS);
    assert!((adj.toll_cost - base.toll_cost - 250.0).abs() < EPS);
    assert!((adj.total_taxes - base.total_taxes - 1_600.0).abs() < EPS);
    assert!((adj.profit_after_debt - base.profit_after_debt - 6_150.0).abs() < EPS);
    assert_eq!(adj.debt_service, base.debt_service);
    assert_eq!(adj.trips_per_month, 25);
}

#[test]
fn reallocated_trips_keep_total_and_costs() {
    let input = sample_input();
    let base = compute(&input);
    let scenario = BetterClient {
        trips: 5,
        rate: 200.0,
        mode: BetterClientMode::Reallocate,
    };
    let adj = apply_better_client(&base, &input, &scenario);
    assert!((adj.revenue - base.revenue - 2_500.0).abs() < EPS);
    assert_eq!(adj.operating_costs, base.operating_costs);
    assert!((adj.total_taxes - base.total_taxes - 400.0).abs() < EPS);
    assert!((adj.profit_after_debt - base.profit_after_debt - 2_100.0).abs() < EPS);
    assert_eq!(adj.trips_per_month, base.trips_per_month);
}

#[test]
fn baseline_is_not_modified() {
    let input = sample_input();
    let base = compute(&input);
    let copy = base;
    let _ = apply_better_client(
        &base,
        &input,
        &BetterClient {
            trips: 3,
            rate: 500.0,
            mode: BetterClientMode::Additional,
        },
    );
    assert_eq!(base, copy);
}

#[test]
fn cannot_reallocate_more_trips_than_exist() {
    let mut input = sample_input();
    input.better_client = Some(BetterClient {
        trips: 25,
        rate: 200.0,
        mode: BetterClientMode::Reallocate,
    });
    assert_eq!(
        input.validate(),
        Err(InputError::BetterClientTrips {
            requested: 25,
            available: 20
        })
    );

    input.better_client = Some(BetterClient {
        trips: 25,
        rate: 200.0,
        mode: BetterClientMode::Additional,
    });
    assert_eq!(input.validate(), Ok(()));
}
