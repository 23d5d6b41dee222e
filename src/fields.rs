//! CLI/GUI에서 편집 가능한 입력 항목 목록.

use crate::investment::{BetterClient, InputModel};

/// 편집 가능한 숫자 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TruckPrice,
    TrailerPrice,
    CapitalAvailable,
    ReserveMin,
    LoanPrincipal,
    AnnualRate,
    LoanTermMonths,
    TripsPerMonth,
    VolumePerTrip,
    RatePerUnit,
    FuelCostPerTrip,
    TollCostPerTrip,
    DriverSalary,
    MaintenanceCost,
    OtherCosts,
    IvaRate,
    ItRate,
    BetterClientTrips,
    BetterClientRate,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::TruckPrice,
        Field::TrailerPrice,
        Field::CapitalAvailable,
        Field::ReserveMin,
        Field::LoanPrincipal,
        Field::AnnualRate,
        Field::LoanTermMonths,
        Field::TripsPerMonth,
        Field::VolumePerTrip,
        Field::RatePerUnit,
        Field::FuelCostPerTrip,
        Field::TollCostPerTrip,
        Field::DriverSalary,
        Field::MaintenanceCost,
        Field::OtherCosts,
        Field::IvaRate,
        Field::ItRate,
        Field::BetterClientTrips,
        Field::BetterClientRate,
    ];

    /// i18n `field.*` 키.
    pub fn key(&self) -> &'static str {
        match self {
            Field::TruckPrice => "truck_price",
            Field::TrailerPrice => "trailer_price",
            Field::CapitalAvailable => "capital_available",
            Field::ReserveMin => "reserve_min",
            Field::LoanPrincipal => "loan_principal",
            Field::AnnualRate => "annual_rate",
            Field::LoanTermMonths => "loan_term_months",
            Field::TripsPerMonth => "trips_per_month",
            Field::VolumePerTrip => "volume_per_trip",
            Field::RatePerUnit => "rate_per_unit",
            Field::FuelCostPerTrip => "fuel_cost_per_trip",
            Field::TollCostPerTrip => "toll_cost_per_trip",
            Field::DriverSalary => "driver_salary",
            Field::MaintenanceCost => "maintenance_cost",
            Field::OtherCosts => "other_costs",
            Field::IvaRate => "iva_rate",
            Field::ItRate => "it_rate",
            Field::BetterClientTrips => "better_client_trips",
            Field::BetterClientRate => "better_client_rate",
        }
    }

    /// 화면에 %로 보여주는 비율 항목인지.
    pub fn is_percent(&self) -> bool {
        matches!(self, Field::AnnualRate | Field::IvaRate | Field::ItRate)
    }

    /// 정수 항목(개월/횟수)인지.
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            Field::LoanTermMonths | Field::TripsPerMonth | Field::BetterClientTrips
        )
    }

    /// GUI 드래그 간격.
    pub fn step(&self) -> f64 {
        match self {
            Field::TruckPrice
            | Field::TrailerPrice
            | Field::CapitalAvailable
            | Field::ReserveMin
            | Field::LoanPrincipal => 1_000.0,
            Field::DriverSalary | Field::MaintenanceCost | Field::OtherCosts => 100.0,
            Field::FuelCostPerTrip | Field::TollCostPerTrip => 10.0,
            Field::AnnualRate | Field::IvaRate | Field::ItRate => 0.1,
            Field::VolumePerTrip | Field::RatePerUnit | Field::BetterClientRate => 0.5,
            Field::LoanTermMonths | Field::TripsPerMonth | Field::BetterClientTrips => 1.0,
        }
    }

    /// 표시 단위 값(비율은 %, 횟수는 정수)을 읽는다.
    pub fn get(&self, input: &InputModel) -> f64 {
        let bc = input.better_client.unwrap_or(BetterClient {
            trips: 0,
            rate: 0.0,
            mode: Default::default(),
        });
        match self {
            Field::TruckPrice => input.truck_price,
            Field::TrailerPrice => input.trailer_price,
            Field::CapitalAvailable => input.capital_available,
            Field::ReserveMin => input.reserve_min,
            Field::LoanPrincipal => input.loan_principal,
            Field::AnnualRate => input.annual_rate * 100.0,
            Field::LoanTermMonths => input.loan_term_months as f64,
            Field::TripsPerMonth => input.trips_per_month as f64,
            Field::VolumePerTrip => input.volume_per_trip,
            Field::RatePerUnit => input.rate_per_unit,
            Field::FuelCostPerTrip => input.fuel_cost_per_trip,
            Field::TollCostPerTrip => input.toll_cost_per_trip,
            Field::DriverSalary => input.driver_salary,
            Field::MaintenanceCost => input.maintenance_cost,
            Field::OtherCosts => input.other_costs,
            Field::IvaRate => input.iva_rate * 100.0,
            Field::ItRate => input.it_rate * 100.0,
            Field::BetterClientTrips => bc.trips as f64,
            Field::BetterClientRate => bc.rate,
        }
    }

    /// 표시 단위 값을 저장 단위로 바꿔 기록한다. 횟수 항목은 반올림 후 0 이상으로 자른다.
    ///
    /// 우량 고객 항목을 처음 설정하면 시나리오가 새로 생기고, 운행 수를 0으로 두면 시나리오가 꺼진다.
    pub fn set(&self, input: &mut InputModel, value: f64) {
        let count = value.round().max(0.0) as u32;
        match self {
            Field::TruckPrice => input.truck_price = value,
            Field::TrailerPrice => input.trailer_price = value,
            Field::CapitalAvailable => input.capital_available = value,
            Field::ReserveMin => input.reserve_min = value,
            Field::LoanPrincipal => input.loan_principal = value,
            Field::AnnualRate => input.annual_rate = value / 100.0,
            Field::LoanTermMonths => input.loan_term_months = count,
            Field::TripsPerMonth => input.trips_per_month = count,
            Field::VolumePerTrip => input.volume_per_trip = value,
            Field::RatePerUnit => input.rate_per_unit = value,
            Field::FuelCostPerTrip => input.fuel_cost_per_trip = value,
            Field::TollCostPerTrip => input.toll_cost_per_trip = value,
            Field::DriverSalary => input.driver_salary = value,
            Field::MaintenanceCost => input.maintenance_cost = value,
            Field::OtherCosts => input.other_costs = value,
            Field::IvaRate => input.iva_rate = value / 100.0,
            Field::ItRate => input.it_rate = value / 100.0,
            Field::BetterClientTrips => {
                if count == 0 {
                    input.better_client = None;
                } else {
                    let rate = input.better_client.map(|bc| bc.rate).unwrap_or(input.rate_per_unit);
                    let mode = input.better_client.map(|bc| bc.mode).unwrap_or_default();
                    input.better_client = Some(BetterClient { trips: count, rate, mode });
                }
            }
            Field::BetterClientRate => {
                if let Some(bc) = input.better_client.as_mut() {
                    bc.rate = value;
                } else {
                    input.better_client = Some(BetterClient {
                        trips: 0,
                        rate: value,
                        mode: Default::default(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_fields_round_trip_through_display_units() {
        let mut input = InputModel::default();
        Field::AnnualRate.set(&mut input, 15.0);
        assert!((input.annual_rate - 0.15).abs() < 1e-12);
        assert!((Field::AnnualRate.get(&input) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn zero_better_client_trips_disables_scenario() {
        let mut input = InputModel::default();
        Field::BetterClientTrips.set(&mut input, 4.0);
        let bc = input.better_client.expect("scenario");
        assert_eq!(bc.trips, 4);
        assert_eq!(bc.rate, input.rate_per_unit);

        Field::BetterClientTrips.set(&mut input, 0.0);
        assert!(input.better_client.is_none());
    }

    #[test]
    fn counts_are_rounded_and_clamped() {
        let mut input = InputModel::default();
        Field::TripsPerMonth.set(&mut input, 19.6);
        assert_eq!(input.trips_per_month, 20);
        Field::TripsPerMonth.set(&mut input, -3.0);
        assert_eq!(input.trips_per_month, 0);
    }
}
