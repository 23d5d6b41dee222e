use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 허용하는 최대 대출 기간 [개월] (100년).
pub const MAX_TERM_MONTHS: u32 = 1200;

/// 사용자가 조정하는 모든 투자 파라미터를 담는 평면 구조체.
///
/// 금액은 모두 같은 통화(기본 Bs) 기준이며, 비율 필드는 소수(0.12 = 12%)로 저장한다.
/// 한 번의 재계산 동안 불변으로 취급하며, 시나리오 변경은 복사본을 만들어 처리한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputModel {
    /// 트럭 가격 [통화]
    pub truck_price: f64,
    /// 트레일러(적재함/연결차) 가격 [통화]
    pub trailer_price: f64,
    /// 가용 자기자본 [통화]
    pub capital_available: f64,
    /// 최소 현금 보유액 [통화]. 자기자본 투입 시 먼저 떼어 둔다.
    pub reserve_min: f64,
    /// 대출 원금 [통화]
    pub loan_principal: f64,
    /// 연이율(소수)
    pub annual_rate: f64,
    /// 대출 기간 [개월]
    pub loan_term_months: u32,
    /// 월 운행 횟수
    pub trips_per_month: u32,
    /// 1회 운행당 적재량 [m³]
    pub volume_per_trip: f64,
    /// 운임 단가 [통화/m³]
    pub rate_per_unit: f64,
    /// 1회 운행당 연료비 [통화/회]
    pub fuel_cost_per_trip: f64,
    /// 1회 운행당 통행료 [통화/회]
    pub toll_cost_per_trip: f64,
    /// 운전기사 급여 [통화/월]
    pub driver_salary: f64,
    /// 정비비 [통화/월]
    pub maintenance_cost: f64,
    /// 기타 고정비(보험 등) [통화/월]
    pub other_costs: f64,
    /// IVA(부가가치세) 세율(소수)
    pub iva_rate: f64,
    /// IT(거래세) 세율(소수)
    pub it_rate: f64,
    /// 트레일러 구매분에 IVA 세금계산서가 있는지 여부(세액공제 기준에 포함)
    pub trailer_invoiced_with_iva: bool,
    /// 더 좋은 단가의 고객 시나리오(선택)
    pub better_client: Option<BetterClient>,
}

impl Default for InputModel {
    fn default() -> Self {
        Self {
            truck_price: 1_705_200.0,
            trailer_price: 468_500.0,
            capital_available: 1_100_000.0,
            reserve_min: 300_000.0,
            loan_principal: 700_000.0,
            annual_rate: 0.12,
            loan_term_months: 60,
            trips_per_month: 22,
            volume_per_trip: 35.0,
            rate_per_unit: 90.0,
            fuel_cost_per_trip: 800.0,
            toll_cost_per_trip: 74.0,
            driver_salary: 4_500.0,
            maintenance_cost: 6_000.0,
            other_costs: 1_500.0,
            iva_rate: 0.13,
            it_rate: 0.03,
            trailer_invoiced_with_iva: true,
            better_client: None,
        }
    }
}

/// 더 좋은 고객 시나리오의 적용 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetterClientMode {
    /// 기존 운행에 추가 운행을 더한다(연료/통행료도 늘어남).
    #[default]
    Additional,
    /// 기존 운행 중 일부를 더 좋은 단가로 돌린다(총 운행 수 불변).
    Reallocate,
}

/// 더 좋은 단가로 청구되는 운행 시나리오.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetterClient {
    /// 대상 운행 횟수 [회/월]
    pub trips: u32,
    /// 더 좋은 운임 단가 [통화/m³]
    pub rate: f64,
    #[serde(default)]
    pub mode: BetterClientMode,
}

/// 입력 경계에서 거부되는 값들.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("'{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("'{field}' must be a finite number")]
    NotFinite { field: &'static str },

    #[error("loan term must be at least one month when a loan principal is set")]
    ZeroTerm,

    #[error("loan term of {months} months exceeds the {max} month limit")]
    TermTooLong { months: u32, max: u32 },

    #[error("invalid trip range {start}..={end} step {step}")]
    InvalidTripRange { start: u32, end: u32, step: u32 },

    #[error("cannot reallocate {requested} trips out of {available}")]
    BetterClientTrips { requested: u32, available: u32 },
}

impl InputModel {
    /// 총 투자비(트럭 + 트레일러).
    pub fn asset_cost(&self) -> f64 {
        self.truck_price + self.trailer_price
    }

    /// 1회 운행 매출 [통화/회].
    pub fn revenue_per_trip(&self) -> f64 {
        self.volume_per_trip * self.rate_per_unit
    }

    /// 월 운행 횟수만 바꾼 복사본을 만든다.
    pub fn with_trips(&self, trips_per_month: u32) -> Self {
        Self {
            trips_per_month,
            ..self.clone()
        }
    }

    /// 모든 금액/비율이 유한한 0 이상 값인지, 대출 기간이 유효한지 검사한다.
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("truck_price", self.truck_price),
            ("trailer_price", self.trailer_price),
            ("capital_available", self.capital_available),
            ("reserve_min", self.reserve_min),
            ("loan_principal", self.loan_principal),
            ("annual_rate", self.annual_rate),
            ("volume_per_trip", self.volume_per_trip),
            ("rate_per_unit", self.rate_per_unit),
            ("fuel_cost_per_trip", self.fuel_cost_per_trip),
            ("toll_cost_per_trip", self.toll_cost_per_trip),
            ("driver_salary", self.driver_salary),
            ("maintenance_cost", self.maintenance_cost),
            ("other_costs", self.other_costs),
            ("iva_rate", self.iva_rate),
            ("it_rate", self.it_rate),
        ];
        for (field, value) in fields {
            check_amount(field, value)?;
        }
        if self.loan_principal > 0.0 && self.loan_term_months == 0 {
            return Err(InputError::ZeroTerm);
        }
        if self.loan_term_months > MAX_TERM_MONTHS {
            return Err(InputError::TermTooLong {
                months: self.loan_term_months,
                max: MAX_TERM_MONTHS,
            });
        }
        if let Some(bc) = &self.better_client {
            check_amount("better_client.rate", bc.rate)?;
            if bc.mode == BetterClientMode::Reallocate && bc.trips > self.trips_per_month {
                return Err(InputError::BetterClientTrips {
                    requested: bc.trips,
                    available: self.trips_per_month,
                });
            }
        }
        Ok(())
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(())
}
