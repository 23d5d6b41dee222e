//! 점수 산정 기준표. 임계값 변경은 이 표만 고치면 된다.
//!
//! 기본값은 제품 기준표(마진 25점, 회수기간 20점, DSCR 20점, ROI 20점, 자금조달 15점)를 따른다.

use serde::{Deserialize, Serialize};

/// 개별 지표의 평가 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Excellent,
    Good,
    Fair,
    Warning,
    Critical,
}

impl Status {
    pub fn key(&self) -> &'static str {
        match self {
            Status::Excellent => "excellent",
            Status::Good => "good",
            Status::Fair => "fair",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }
}

/// 지표별 강점/경고 표시.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Strength,
    Warning,
}

/// 값이 클수록 좋은지, 작을수록 좋은지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `value >= bound`이면 해당 구간(`strict`이면 `>`)
    HigherIsBetter,
    /// `value <= bound`이면 해당 구간(`strict`이면 `<`)
    LowerIsBetter,
}

/// 구간에 해당할 때 주는 점수와 상태.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub points: f64,
    pub status: Status,
    #[serde(default)]
    pub flag: Option<Flag>,
}

/// 임계값 하나와 그에 대응하는 등급.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub bound: f64,
    /// 경계값 자체는 포함하지 않는다.
    #[serde(default)]
    pub strict: bool,
    pub grade: Grade,
}

const fn grade(points: f64, status: Status, flag: Option<Flag>) -> Grade {
    Grade {
        points,
        status,
        flag,
    }
}

const fn tier(bound: f64, points: f64, status: Status, flag: Option<Flag>) -> Tier {
    Tier {
        bound,
        strict: false,
        grade: grade(points, status, flag),
    }
}

/// `value > 0`처럼 경계를 포함하지 않는 구간.
const fn above(bound: f64, points: f64, status: Status, flag: Option<Flag>) -> Tier {
    Tier {
        bound,
        strict: true,
        grade: grade(points, status, flag),
    }
}

use Flag::{Strength, Warning as Warn};
use Status::*;

/// 순이익률(상환 후 이익 / 매출) 구간.
pub const PROFIT_MARGIN_TIERS: &[Tier] = &[
    tier(0.30, 25.0, Excellent, Some(Strength)),
    tier(0.20, 20.0, Good, Some(Strength)),
    tier(0.10, 15.0, Fair, None),
    above(0.0, 8.0, Warning, Some(Warn)),
];
pub const PROFIT_MARGIN_FLOOR: Grade = grade(0.0, Critical, Some(Warn));

/// 자기자본 회수기간(개월) 구간.
pub const PAYBACK_MONTHS_TIERS: &[Tier] = &[
    tier(24.0, 20.0, Excellent, Some(Strength)),
    tier(36.0, 17.0, Good, Some(Strength)),
    tier(60.0, 12.0, Fair, None),
    tier(84.0, 7.0, Warning, Some(Warn)),
];
pub const PAYBACK_MONTHS_FLOOR: Grade = grade(3.0, Critical, Some(Warn));

/// DSCR(상환 전 이익 / 원리금) 구간.
pub const DSCR_TIERS: &[Tier] = &[
    tier(2.0, 20.0, Excellent, Some(Strength)),
    tier(1.5, 16.0, Good, Some(Strength)),
    tier(1.25, 12.0, Fair, None),
    tier(1.0, 6.0, Warning, Some(Warn)),
];
pub const DSCR_FLOOR: Grade = grade(0.0, Critical, Some(Warn));

/// 연간 ROI(연 이익 / 투자비) 구간.
pub const ROI_TIERS: &[Tier] = &[
    tier(0.20, 20.0, Excellent, Some(Strength)),
    tier(0.12, 16.0, Good, Some(Strength)),
    tier(0.06, 10.0, Fair, None),
    above(0.0, 5.0, Warning, Some(Warn)),
];
pub const ROI_FLOOR: Grade = grade(0.0, Critical, None);

/// 부족 자금 비율(부족 자금 / 투자비) 구간.
pub const FUNDING_GAP_TIERS: &[Tier] = &[
    tier(0.0, 15.0, Excellent, Some(Strength)),
    tier(0.05, 10.0, Fair, None),
];
pub const FUNDING_GAP_FLOOR: Grade = grade(0.0, Critical, Some(Warn));

/// 지표 하나의 기준표.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTable {
    pub max_points: f64,
    pub direction: Direction,
    /// 좋은 구간부터 순서대로 나열한다.
    pub tiers: Vec<Tier>,
    /// 어느 구간에도 해당하지 않을 때
    pub floor: Grade,
    /// 분모가 0이라 값이 무한대일 때(예: 부채 없음, 이익 없음)
    pub infinite: Grade,
    /// 값을 정의할 수 없을 때(예: 매출 0)
    pub undefined: Grade,
}

impl FactorTable {
    /// 유한한 값을 기준표에 대입해 등급을 찾는다.
    pub fn grade(&self, value: f64) -> Grade {
        self.tiers
            .iter()
            .find(|t| match (self.direction, t.strict) {
                (Direction::HigherIsBetter, false) => value >= t.bound,
                (Direction::HigherIsBetter, true) => value > t.bound,
                (Direction::LowerIsBetter, false) => value <= t.bound,
                (Direction::LowerIsBetter, true) => value < t.bound,
            })
            .map(|t| t.grade)
            .unwrap_or(self.floor)
    }
}

/// 총점(0~100)을 추천 등급으로 나누는 경계값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakpoints {
    pub highly_recommended: f64,
    pub recommended: f64,
    pub acceptable: f64,
    pub risky: f64,
}

impl Default for CategoryBreakpoints {
    fn default() -> Self {
        Self {
            highly_recommended: 85.0,
            recommended: 70.0,
            acceptable: 55.0,
            risky: 40.0,
        }
    }
}

/// 전체 점수 산정 정책. config.toml의 `[scoring]`으로 덮어쓸 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub profit_margin: FactorTable,
    pub payback_months: FactorTable,
    pub dscr: FactorTable,
    pub roi: FactorTable,
    pub funding_gap: FactorTable,
    pub categories: CategoryBreakpoints,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        let none = grade(0.0, Critical, None);
        Self {
            profit_margin: FactorTable {
                max_points: 25.0,
                direction: Direction::HigherIsBetter,
                tiers: PROFIT_MARGIN_TIERS.to_vec(),
                floor: PROFIT_MARGIN_FLOOR,
                infinite: PROFIT_MARGIN_FLOOR,
                undefined: PROFIT_MARGIN_FLOOR,
            },
            payback_months: FactorTable {
                max_points: 20.0,
                direction: Direction::LowerIsBetter,
                tiers: PAYBACK_MONTHS_TIERS.to_vec(),
                floor: PAYBACK_MONTHS_FLOOR,
                infinite: none,
                undefined: none,
            },
            dscr: FactorTable {
                max_points: 20.0,
                direction: Direction::HigherIsBetter,
                tiers: DSCR_TIERS.to_vec(),
                floor: DSCR_FLOOR,
                infinite: grade(20.0, Excellent, None),
                undefined: none,
            },
            roi: FactorTable {
                max_points: 20.0,
                direction: Direction::HigherIsBetter,
                tiers: ROI_TIERS.to_vec(),
                floor: ROI_FLOOR,
                infinite: grade(20.0, Excellent, Some(Strength)),
                undefined: none,
            },
            funding_gap: FactorTable {
                max_points: 15.0,
                direction: Direction::LowerIsBetter,
                tiers: FUNDING_GAP_TIERS.to_vec(),
                floor: FUNDING_GAP_FLOOR,
                infinite: FUNDING_GAP_FLOOR,
                undefined: grade(15.0, Excellent, Some(Strength)),
            },
            categories: CategoryBreakpoints::default(),
        }
    }
}

impl ScoringPolicy {
    /// 모든 지표 만점의 합.
    pub fn max_points(&self) -> f64 {
        self.profit_margin.max_points
            + self.payback_months.max_points
            + self.dscr.max_points
            + self.roi.max_points
            + self.funding_gap.max_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_points_is_one_hundred() {
        assert_eq!(ScoringPolicy::default().max_points(), 100.0);
    }

    #[test]
    fn lower_is_better_picks_first_matching_tier() {
        let p = ScoringPolicy::default();
        assert_eq!(p.payback_months.grade(24.0).points, 20.0);
        assert_eq!(p.payback_months.grade(24.5).points, 17.0);
        assert_eq!(p.payback_months.grade(200.0).points, 3.0);
    }

    #[test]
    fn strictly_positive_margin_tier() {
        let p = ScoringPolicy::default();
        assert_eq!(p.profit_margin.grade(0.0).status, Status::Critical);
        assert_eq!(p.profit_margin.grade(0.01).status, Status::Warning);
    }
}
