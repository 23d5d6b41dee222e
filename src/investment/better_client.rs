use super::cashflow::CashflowResult;
use super::input::{BetterClient, BetterClientMode, InputModel};

/// 더 좋은 고객 시나리오를 기준 현금흐름 위에 덧씌운 결과를 만든다.
///
/// 기준 결과는 그대로 두고 새 값을 반환한다. 대출 상환액은 바뀌지 않는다.
pub fn apply_better_client(
    baseline: &CashflowResult,
    input: &InputModel,
    scenario: &BetterClient,
) -> CashflowResult {
    let trips = scenario.trips as f64;
    let (delta_revenue, delta_fuel, delta_toll, delta_trips) = match scenario.mode {
        BetterClientMode::Additional => (
            trips * input.volume_per_trip * scenario.rate,
            trips * input.fuel_cost_per_trip,
            trips * input.toll_cost_per_trip,
            scenario.trips,
        ),
        BetterClientMode::Reallocate => {
            let moved = trips.min(baseline.trips_per_month as f64);
            (
                moved * input.volume_per_trip * (scenario.rate - input.rate_per_unit),
                0.0,
                0.0,
                0,
            )
        }
    };

    let delta_iva = delta_revenue * input.iva_rate;
    let delta_it = delta_revenue * input.it_rate;

    let revenue = baseline.revenue + delta_revenue;
    let fuel_cost = baseline.fuel_cost + delta_fuel;
    let toll_cost = baseline.toll_cost + delta_toll;
    let operating_costs = baseline.operating_costs + delta_fuel + delta_toll;
    let iva_before_credit = baseline.iva_before_credit + delta_iva;
    let iva = baseline.iva + delta_iva;
    let it = baseline.it + delta_it;
    let total_taxes = iva + it;
    let total_costs = operating_costs + total_taxes;
    let profit_before_debt = revenue - total_costs;

    CashflowResult {
        trips_per_month: baseline.trips_per_month + delta_trips,
        revenue,
        fuel_cost,
        toll_cost,
        operating_costs,
        iva_before_credit,
        fiscal_credit_used: baseline.fiscal_credit_used,
        iva,
        it,
        total_taxes,
        total_costs,
        profit_before_debt,
        debt_service: baseline.debt_service,
        profit_after_debt: profit_before_debt - baseline.debt_service,
    }
}
