use serde::Serialize;

use super::cashflow::{self, CashflowResult};
use super::input::InputModel;

/// 자산 구매 시 납부한 IVA로 생기는 세액공제(Crédito Fiscal) 요약.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiscalCredit {
    /// IVA가 포함된 구매 금액(트럭, 세금계산서가 있으면 트레일러 포함)
    pub base: f64,
    /// 총 세액공제
    pub total: f64,
    /// 공제 없이 내야 할 월 IVA
    pub monthly_iva: f64,
    /// 공제로 IVA를 상쇄할 수 있는 개월 수. 월 IVA가 0이면 `None`.
    pub months_of_coverage: Option<f64>,
    /// 공제 기간 중 월 절감액
    pub monthly_savings: f64,
    /// 공제 기간 중 현금흐름
    pub with_credit: CashflowResult,
    /// 공제 소진 후(정상 상태) 현금흐름
    pub without_credit: CashflowResult,
}

/// 세액공제 규모와 공제 전/후 현금흐름을 계산한다.
pub fn fiscal_credit(input: &InputModel) -> FiscalCredit {
    let base = input.truck_price
        + if input.trailer_invoiced_with_iva {
            input.trailer_price
        } else {
            0.0
        };
    let total = base * input.iva_rate;

    let without_credit = cashflow::compute(input);
    let monthly_iva = without_credit.iva_before_credit;
    let months_of_coverage = (monthly_iva > 0.0).then(|| total / monthly_iva);
    let with_credit = cashflow::compute_with_credit(input, total.min(monthly_iva));

    FiscalCredit {
        base,
        total,
        monthly_iva,
        months_of_coverage,
        monthly_savings: with_credit.fiscal_credit_used,
        with_credit,
        without_credit,
    }
}
