//! 투자 타당성 점수 산정.
//!
//! 네 가지 비율(순이익률, 회수기간, DSCR, ROI)과 부족 자금을 각각의 기준표로 점수화하고,
//! 합계를 0~100 점수와 다섯 단계 추천 등급으로 변환한다. 지표별 강점/경고는
//! 각 지표의 구간에서 정해지며 총점 등급과는 따로 판단한다.

pub mod policy;

use serde::Serialize;

use crate::investment::{capital_structure, AmortizationRow, CapitalStructure, CashflowResult, InputModel};
pub use policy::{CategoryBreakpoints, Direction, FactorTable, Flag, Grade, ScoringPolicy, Status, Tier};

/// 0으로 나누는 경우를 표현하는 비율 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Ratio {
    Finite(f64),
    /// 분모가 0이고 분자가 양수인 경우(예: 부채 없음 → DSCR 무한대)
    Infinite,
    /// 값을 정의할 수 없는 경우(예: 매출 0)
    Undefined,
}

impl Ratio {
    /// `numerator / denominator`. 분모가 0 이하이면 `on_zero`를 돌려준다.
    fn divide(numerator: f64, denominator: f64, on_zero: Ratio) -> Ratio {
        if denominator > 0.0 {
            Ratio::Finite(numerator / denominator)
        } else {
            on_zero
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Finite(v) => Some(*v),
            _ => None,
        }
    }
}

/// 점수 산정 대상 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Factor {
    ProfitMargin,
    PaybackMonths,
    Dscr,
    Roi,
    FundingGap,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::ProfitMargin,
        Factor::PaybackMonths,
        Factor::Dscr,
        Factor::Roi,
        Factor::FundingGap,
    ];

    /// i18n 키에 쓰이는 식별자.
    pub fn key(&self) -> &'static str {
        match self {
            Factor::ProfitMargin => "profit_margin",
            Factor::PaybackMonths => "payback",
            Factor::Dscr => "dscr",
            Factor::Roi => "roi",
            Factor::FundingGap => "funding",
        }
    }
}

/// 점수 산정에 쓰인 비율들.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratios {
    /// 상환 후 이익 / 매출
    pub profit_margin: Ratio,
    /// 자기자본 / 월 상환 후 이익 [개월]
    pub payback_months: Ratio,
    /// 상환 전 이익 / 월 원리금
    pub dscr: Ratio,
    /// 연 상환 후 이익 / 투자비
    pub roi: Ratio,
    /// 부족 자금 [통화]
    pub funding_gap: f64,
    /// 부족 자금 / 투자비
    pub funding_gap_share: Ratio,
}

impl Ratios {
    pub fn get(&self, factor: Factor) -> Ratio {
        match factor {
            Factor::ProfitMargin => self.profit_margin,
            Factor::PaybackMonths => self.payback_months,
            Factor::Dscr => self.dscr,
            Factor::Roi => self.roi,
            Factor::FundingGap => self.funding_gap_share,
        }
    }
}

/// 지표 하나의 점수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub value: Ratio,
    pub points: f64,
    pub max_points: f64,
    pub status: Status,
    pub flag: Option<Flag>,
}

/// 다섯 단계 추천 등급. 나쁜 등급부터 좋은 등급 순으로 정렬된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    NotRecommended,
    Risky,
    AcceptableWithReservations,
    Recommended,
    HighlyRecommended,
}

impl Category {
    /// 좋은 등급부터 나열한다.
    pub const ALL: [Category; 5] = [
        Category::HighlyRecommended,
        Category::Recommended,
        Category::AcceptableWithReservations,
        Category::Risky,
        Category::NotRecommended,
    ];

    /// 총점에서 등급을 정한다.
    pub fn from_score(score: f64, breakpoints: &CategoryBreakpoints) -> Self {
        if score >= breakpoints.highly_recommended {
            Category::HighlyRecommended
        } else if score >= breakpoints.recommended {
            Category::Recommended
        } else if score >= breakpoints.acceptable {
            Category::AcceptableWithReservations
        } else if score >= breakpoints.risky {
            Category::Risky
        } else {
            Category::NotRecommended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::HighlyRecommended => "Highly Recommended",
            Category::Recommended => "Recommended",
            Category::AcceptableWithReservations => "Acceptable with Reservations",
            Category::Risky => "Risky",
            Category::NotRecommended => "Not Recommended",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Category::HighlyRecommended => "highly_recommended",
            Category::Recommended => "recommended",
            Category::AcceptableWithReservations => "acceptable",
            Category::Risky => "risky",
            Category::NotRecommended => "not_recommended",
        }
    }
}

/// 점수 산정 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub ratios: Ratios,
    pub factors: Vec<FactorScore>,
    pub total_points: f64,
    pub max_points: f64,
    /// 0~100으로 잘라낸 총점
    pub score: f64,
    pub category: Category,
}

impl ScoreResult {
    pub fn strengths(&self) -> impl Iterator<Item = &FactorScore> {
        self.factors
            .iter()
            .filter(|f| f.flag == Some(Flag::Strength))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &FactorScore> {
        self.factors
            .iter()
            .filter(|f| f.flag == Some(Flag::Warning))
    }

    pub fn factor(&self, factor: Factor) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.factor == factor)
    }
}

/// 현금흐름과 자금 구조에서 점수용 비율을 계산한다.
pub fn ratios(cashflow: &CashflowResult, debt_service: f64, capital: &CapitalStructure) -> Ratios {
    let monthly_profit = cashflow.profit_after_debt;

    let profit_margin = Ratio::divide(monthly_profit, cashflow.revenue, Ratio::Undefined);

    let payback_months = if monthly_profit <= 0.0 {
        Ratio::Infinite
    } else if capital.equity_used <= 0.0 {
        Ratio::Undefined
    } else {
        Ratio::Finite(capital.equity_used / monthly_profit)
    };

    let dscr = Ratio::divide(cashflow.profit_before_debt, debt_service, Ratio::Infinite);

    let roi = Ratio::divide(monthly_profit * 12.0, capital.asset_cost, Ratio::Undefined);

    let funding_gap_share = if capital.funding_gap <= 0.0 {
        Ratio::Finite(0.0)
    } else {
        Ratio::divide(capital.funding_gap, capital.asset_cost, Ratio::Infinite)
    };

    Ratios {
        profit_margin,
        payback_months,
        dscr,
        roi,
        funding_gap: capital.funding_gap,
        funding_gap_share,
    }
}

fn grade_factor(factor: Factor, value: Ratio, table: &FactorTable) -> FactorScore {
    let grade = match value {
        Ratio::Finite(v) => table.grade(v),
        Ratio::Infinite => table.infinite,
        Ratio::Undefined => table.undefined,
    };
    FactorScore {
        factor,
        value,
        points: grade.points.clamp(0.0, table.max_points),
        max_points: table.max_points,
        status: grade.status,
        flag: grade.flag,
    }
}

/// 현금흐름, 상환 스케줄, 입력으로 타당성 점수를 계산한다.
///
/// DSCR의 분모는 스케줄 첫 회차 납입액을 쓴다(대출이 없으면 0).
pub fn score(
    cashflow: &CashflowResult,
    schedule: &[AmortizationRow],
    input: &InputModel,
    policy: &ScoringPolicy,
) -> ScoreResult {
    let debt_service = schedule.first().map(|r| r.installment).unwrap_or(0.0);
    let capital = capital_structure(input);
    let ratios = ratios(cashflow, debt_service, &capital);

    let factors: Vec<FactorScore> = Factor::ALL
        .iter()
        .map(|&factor| {
            let table = match factor {
                Factor::ProfitMargin => &policy.profit_margin,
                Factor::PaybackMonths => &policy.payback_months,
                Factor::Dscr => &policy.dscr,
                Factor::Roi => &policy.roi,
                Factor::FundingGap => &policy.funding_gap,
            };
            grade_factor(factor, ratios.get(factor), table)
        })
        .collect();

    let total_points: f64 = factors.iter().map(|f| f.points).sum();
    let max_points = policy.max_points();
    let score = if max_points > 0.0 {
        (total_points / max_points * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    let category = Category::from_score(score, &policy.categories);

    ScoreResult {
        ratios,
        factors,
        total_points,
        max_points,
        score,
        category,
    }
}
