//! 재계산 한 번에 필요한 모든 계산을 묶는다.
//!
//! 입력 검증은 여기서 한 번만 하고, 이후 각 계산 모듈은 검증된 입력만 받는다.

use serde::Serialize;

use crate::investment::{
    self, AmortizationRow, BetterClient, CapitalStructure, CashflowResult, FiscalCredit,
    InputError, InputModel, LoanSummary,
};
use crate::scoring::{self, ScoreResult, ScoringPolicy};
use crate::sensitivity::{self, BreakEven, SensitivityRow, TripRange};

/// 더 좋은 고객 시나리오와 현재 시나리오의 비교.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetterClientComparison {
    pub scenario: BetterClient,
    pub baseline: CashflowResult,
    pub adjusted: CashflowResult,
    pub baseline_score: ScoreResult,
    pub adjusted_score: ScoreResult,
}

impl BetterClientComparison {
    pub fn revenue_delta(&self) -> f64 {
        self.adjusted.revenue - self.baseline.revenue
    }

    pub fn taxes_delta(&self) -> f64 {
        self.adjusted.total_taxes - self.baseline.total_taxes
    }

    pub fn profit_delta(&self) -> f64 {
        self.adjusted.profit_after_debt - self.baseline.profit_after_debt
    }

    pub fn score_delta(&self) -> f64 {
        self.adjusted_score.score - self.baseline_score.score
    }
}

/// 민감도 표와 파생 지표.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityTable {
    pub rows: Vec<SensitivityRow>,
    pub break_even: BreakEven,
    pub break_even_after_debt: BreakEven,
}

impl SensitivityTable {
    pub fn best(&self) -> Option<&SensitivityRow> {
        sensitivity::best_row(&self.rows)
    }
}

/// 한 번의 재계산 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub input: InputModel,
    pub capital: CapitalStructure,
    /// 세액공제를 반영하지 않은 정상 상태 현금흐름
    pub cashflow: CashflowResult,
    pub schedule: Vec<AmortizationRow>,
    pub loan: LoanSummary,
    /// 세액공제 기간 현금흐름 기준 점수(대표 점수)
    pub score: ScoreResult,
    /// 공제 소진 후 정상 상태 점수. 민감도 표와 더 좋은 고객 비교도 이 기준이다.
    pub steady_state_score: ScoreResult,
    pub fiscal_credit: FiscalCredit,
    pub better_client: Option<BetterClientComparison>,
    pub sensitivity: SensitivityTable,
}

/// 입력을 검증한 뒤 모든 계산을 순서대로 실행한다.
pub fn evaluate(
    input: &InputModel,
    policy: &ScoringPolicy,
    range: &TripRange,
) -> Result<Analysis, InputError> {
    if let Err(e) = input.validate() {
        log::warn!("input rejected: {e}");
        return Err(e);
    }

    let capital = investment::capital_structure(input);
    let cashflow = investment::compute(input);
    let schedule = investment::schedule(
        input.loan_principal,
        input.annual_rate,
        input.loan_term_months,
    );
    let loan = investment::summarize(&schedule);
    let fiscal_credit = investment::fiscal_credit(input);
    let score = scoring::score(&fiscal_credit.with_credit, &schedule, input, policy);
    let steady_state_score = scoring::score(&cashflow, &schedule, input, policy);

    let better_client = input
        .better_client
        .filter(|bc| bc.trips > 0)
        .map(|bc| {
            let adjusted = investment::apply_better_client(&cashflow, input, &bc);
            BetterClientComparison {
                scenario: bc,
                baseline: cashflow,
                adjusted,
                baseline_score: steady_state_score.clone(),
                adjusted_score: scoring::score(&adjusted, &schedule, input, policy),
            }
        });

    let rows = sensitivity::sweep(input, range, policy);
    let sensitivity = SensitivityTable {
        break_even: sensitivity::break_even(&rows),
        break_even_after_debt: sensitivity::break_even_after_debt(&rows),
        rows,
    };

    log::debug!(
        "evaluated: revenue={:.2} profit_after_debt={:.2} score={:.1} ({:?}) steady_state={:.1}",
        cashflow.revenue,
        cashflow.profit_after_debt,
        score.score,
        score.category,
        steady_state_score.score
    );

    Ok(Analysis {
        input: input.clone(),
        capital,
        cashflow,
        schedule,
        loan,
        score,
        steady_state_score,
        fiscal_credit,
        better_client,
        sensitivity,
    })
}
