use truck_investment_analyzer::investment::InputModel;

pub const EPS: f64 = 1e-6;

/// 검증용 시나리오: 투자비 300,000, 자기자본 100,000, 대출 200,000(연 12%, 60개월),
/// 월 20회 × 10 m³ × 150 → 월 매출 30,000.
pub fn sample_input() -> InputModel {
    InputModel {
        truck_price: 250_000.0,
        trailer_price: 50_000.0,
        capital_available: 100_000.0,
        reserve_min: 0.0,
        loan_principal: 200_000.0,
        annual_rate: 0.12,
        loan_term_months: 60,
        trips_per_month: 20,
        volume_per_trip: 10.0,
        rate_per_unit: 150.0,
        fuel_cost_per_trip: 400.0,
        toll_cost_per_trip: 50.0,
        driver_salary: 4_000.0,
        maintenance_cost: 1_500.0,
        other_costs: 500.0,
        iva_rate: 0.13,
        it_rate: 0.03,
        trailer_invoiced_with_iva: true,
        better_client: None,
    }
}
