//! 월 운행 횟수에 대한 민감도 분석.
//!
//! 입력의 복사본에서 운행 횟수만 바꿔 현금흐름과 점수를 다시 계산한다.
//! 원래 입력은 건드리지 않는다.

use serde::{Deserialize, Serialize};

use crate::investment::{self, CashflowResult, InputError, InputModel};
use crate::scoring::{self, ScoreResult, ScoringPolicy};

/// 기본 분석 구간 설정(현재 운행 수 기준).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivitySettings {
    /// 현재 값 아래로 내려갈 폭
    pub below: u32,
    /// 현재 값 위로 올라갈 폭
    pub above: u32,
    /// 간격
    pub step: u32,
    /// 구간 하한
    pub floor: u32,
}

impl Default for SensitivitySettings {
    fn default() -> Self {
        Self {
            below: 10,
            above: 15,
            step: 2,
            floor: 5,
        }
    }
}

/// 오름차순으로 정렬된 운행 횟수 목록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRange {
    values: Vec<u32>,
}

impl TripRange {
    /// `start..=end`를 `step` 간격으로 나눈다.
    pub fn stepped(start: u32, end: u32, step: u32) -> Result<Self, InputError> {
        if step == 0 || start > end {
            return Err(InputError::InvalidTripRange { start, end, step });
        }
        Ok(Self {
            values: (start..=end).step_by(step as usize).collect(),
        })
    }

    /// 임의의 값 목록을 정렬하고 중복을 제거한다.
    pub fn from_values(mut values: Vec<u32>) -> Self {
        values.sort_unstable();
        values.dedup();
        Self { values }
    }

    /// 현재 운행 수 주변의 기본 구간. 현재 값은 항상 포함된다.
    pub fn around(current: u32, settings: &SensitivitySettings) -> Self {
        let start = current.saturating_sub(settings.below).max(settings.floor);
        let end = current.saturating_add(settings.above).max(start);
        let step = settings.step.max(1) as usize;
        let mut values: Vec<u32> = (start..=end).step_by(step).collect();
        values.push(current);
        Self::from_values(values)
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 민감도 표 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityRow {
    pub trips_per_month: u32,
    pub cashflow: CashflowResult,
    pub score: ScoreResult,
    /// 입력의 현재 운행 수와 같은 줄인지
    pub is_current: bool,
}

/// 손익분기 운행 수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakEven {
    /// 구간 안에서 처음으로 이익이 0 이상이 되는 운행 수와, 직전 줄과의 선형 보간 값
    Reached { trips: u32, interpolated: f64 },
    /// 구간 안에서 이익이 0 이상이 되는 값이 없음
    NotReached,
}

/// 구간의 각 운행 수로 현금흐름과 점수를 다시 계산한다.
pub fn sweep(input: &InputModel, range: &TripRange, policy: &ScoringPolicy) -> Vec<SensitivityRow> {
    let schedule = investment::schedule(
        input.loan_principal,
        input.annual_rate,
        input.loan_term_months,
    );
    let rows: Vec<SensitivityRow> = range
        .values()
        .iter()
        .map(|&trips| {
            let scenario = input.with_trips(trips);
            let cashflow = investment::compute(&scenario);
            let score = scoring::score(&cashflow, &schedule, &scenario, policy);
            SensitivityRow {
                trips_per_month: trips,
                cashflow,
                score,
                is_current: trips == input.trips_per_month,
            }
        })
        .collect();
    log::debug!(
        "sensitivity sweep: {} rows over {:?}",
        rows.len(),
        range.values().first().zip(range.values().last())
    );
    rows
}

fn break_even_by<F>(rows: &[SensitivityRow], profit: F) -> BreakEven
where
    F: Fn(&CashflowResult) -> f64,
{
    let mut prev: Option<(u32, f64)> = None;
    for row in rows {
        let p = profit(&row.cashflow);
        if p >= 0.0 {
            let interpolated = match prev {
                Some((t0, p0)) if p0 < 0.0 && p > p0 => {
                    let t0 = t0 as f64;
                    let t1 = row.trips_per_month as f64;
                    t0 + (t1 - t0) * (-p0) / (p - p0)
                }
                _ => row.trips_per_month as f64,
            };
            return BreakEven::Reached {
                trips: row.trips_per_month,
                interpolated,
            };
        }
        prev = Some((row.trips_per_month, p));
    }
    BreakEven::NotReached
}

/// 상환 전 이익 기준 손익분기.
pub fn break_even(rows: &[SensitivityRow]) -> BreakEven {
    break_even_by(rows, |c| c.profit_before_debt)
}

/// 상환 후 이익 기준 손익분기.
pub fn break_even_after_debt(rows: &[SensitivityRow]) -> BreakEven {
    break_even_by(rows, |c| c.profit_after_debt)
}

/// 상환 후 이익이 가장 큰 줄.
pub fn best_row(rows: &[SensitivityRow]) -> Option<&SensitivityRow> {
    rows.iter().max_by(|a, b| {
        a.cashflow
            .profit_after_debt
            .total_cmp(&b.cashflow.profit_after_debt)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_includes_current_and_respects_floor() {
        let r = TripRange::around(7, &SensitivitySettings::default());
        assert_eq!(r.values().first(), Some(&5));
        assert!(r.values().contains(&7));
        assert_eq!(r.values().last(), Some(&21));
    }

    #[test]
    fn around_adds_current_off_step() {
        let r = TripRange::around(22, &SensitivitySettings::default());
        // 12, 14, ..., 36 에 22가 이미 포함된다
        assert_eq!(r.values().first(), Some(&12));
        assert!(r.values().windows(2).all(|w| w[0] < w[1]));
        let r = TripRange::around(23, &SensitivitySettings::default());
        assert!(r.values().contains(&23));
    }

    #[test]
    fn stepped_rejects_zero_step() {
        assert!(TripRange::stepped(10, 30, 0).is_err());
        assert!(TripRange::stepped(30, 10, 5).is_err());
    }
}
