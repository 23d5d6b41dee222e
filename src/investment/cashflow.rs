use serde::Serialize;

use super::amortization;
use super::input::InputModel;

/// 월 현금흐름 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashflowResult {
    /// 계산에 사용된 월 운행 횟수
    pub trips_per_month: u32,
    /// 월 매출
    pub revenue: f64,
    /// 월 연료비(회당 × 운행 수)
    pub fuel_cost: f64,
    /// 월 통행료(회당 × 운행 수)
    pub toll_cost: f64,
    /// 운영비 합계(연료 + 통행료 + 급여 + 정비 + 기타)
    pub operating_costs: f64,
    /// 세액공제 적용 전 IVA
    pub iva_before_credit: f64,
    /// 이번 달에 사용한 세액공제
    pub fiscal_credit_used: f64,
    /// 납부 IVA
    pub iva: f64,
    /// 납부 IT
    pub it: f64,
    /// 세금 합계
    pub total_taxes: f64,
    /// 운영비 + 세금
    pub total_costs: f64,
    /// 대출 상환 전 이익
    pub profit_before_debt: f64,
    /// 월 원리금 상환액
    pub debt_service: f64,
    /// 대출 상환 후 이익
    pub profit_after_debt: f64,
}

impl CashflowResult {
    pub fn annual_revenue(&self) -> f64 {
        self.revenue * 12.0
    }

    pub fn annual_profit_before_debt(&self) -> f64 {
        self.profit_before_debt * 12.0
    }

    pub fn annual_profit_after_debt(&self) -> f64 {
        self.profit_after_debt * 12.0
    }

    pub fn annual_debt_service(&self) -> f64 {
        self.debt_service * 12.0
    }
}

/// 자금 조달 구조.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapitalStructure {
    /// 총 투자비(트럭 + 트레일러)
    pub asset_cost: f64,
    /// 실제로 남겨두는 현금 보유액
    pub reserve: f64,
    /// 투입된 자기자본
    pub equity_used: f64,
    /// 자기자본 + 대출
    pub total_funded: f64,
    /// 부족 자금(0 이상)
    pub funding_gap: f64,
    /// 초과 조달액(0 이상)
    pub funding_surplus: f64,
}

/// 세액공제 없이 월 현금흐름을 계산한다.
pub fn compute(input: &InputModel) -> CashflowResult {
    compute_with_credit(input, 0.0)
}

/// 월 세액공제 한도를 IVA에서 차감하여 현금흐름을 계산한다.
///
/// IVA와 IT는 모두 총매출 기준 단순 비율로 계산한다.
pub fn compute_with_credit(input: &InputModel, credit_available: f64) -> CashflowResult {
    let trips = input.trips_per_month as f64;
    let revenue = input.revenue_per_trip() * trips;

    let iva_before_credit = revenue * input.iva_rate;
    let fiscal_credit_used = credit_available.max(0.0).min(iva_before_credit);
    let iva = iva_before_credit - fiscal_credit_used;
    let it = revenue * input.it_rate;
    let total_taxes = iva + it;

    let fuel_cost = input.fuel_cost_per_trip * trips;
    let toll_cost = input.toll_cost_per_trip * trips;
    let operating_costs =
        fuel_cost + toll_cost + input.driver_salary + input.maintenance_cost + input.other_costs;
    let total_costs = operating_costs + total_taxes;

    let profit_before_debt = revenue - total_costs;
    let debt_service = amortization::installment(
        input.loan_principal,
        input.annual_rate,
        input.loan_term_months,
    );

    CashflowResult {
        trips_per_month: input.trips_per_month,
        revenue,
        fuel_cost,
        toll_cost,
        operating_costs,
        iva_before_credit,
        fiscal_credit_used,
        iva,
        it,
        total_taxes,
        total_costs,
        profit_before_debt,
        debt_service,
        profit_after_debt: profit_before_debt - debt_service,
    }
}

/// 자기자본/대출로 투자비를 얼마나 조달하는지 계산한다.
pub fn capital_structure(input: &InputModel) -> CapitalStructure {
    let asset_cost = input.asset_cost();
    let reserve = input.reserve_min.min(input.capital_available);
    let equity_used = (input.capital_available - reserve).min(asset_cost).max(0.0);
    let total_funded = equity_used + input.loan_principal;
    let balance = asset_cost - total_funded;
    CapitalStructure {
        asset_cost,
        reserve,
        equity_used,
        total_funded,
        funding_gap: balance.max(0.0),
        funding_surplus: (-balance).max(0.0),
    }
}
