//! 표시용 숫자 서식. 계산 중에는 반올림하지 않고 여기서만 자릿수를 맞춘다.

use crate::scoring::{Factor, Ratio};
use crate::sensitivity::BreakEven;

/// 소수 둘째 자리로 반올림한다.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 천 단위 구분 기호를 넣어 금액을 표시한다. `decimals`는 0 또는 2를 주로 쓴다.
pub fn money(value: f64, decimals: usize) -> String {
    let rounded = if decimals == 0 { value.round() } else { round2(value) };
    let raw = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// 금액 + 통화 표시.
pub fn currency(value: f64, unit: &str) -> String {
    format!("{} {unit}", money(value, 0))
}

/// 소수 비율을 백분율로.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// 지표 종류에 맞춰 비율 값을 표시한다. 무한대/정의 불가는 `inf_label`/`na_label`.
pub fn ratio(factor: Factor, value: Ratio, inf_label: &str, na_label: &str) -> String {
    match value {
        Ratio::Finite(v) => match factor {
            Factor::ProfitMargin | Factor::Roi | Factor::FundingGap => percent(v),
            Factor::PaybackMonths => format!("{v:.1}"),
            Factor::Dscr => format!("{v:.2}x"),
        },
        Ratio::Infinite => inf_label.to_string(),
        Ratio::Undefined => na_label.to_string(),
    }
}

/// 손익분기 표시.
pub fn break_even(value: BreakEven, not_reached: &str) -> String {
    match value {
        BreakEven::Reached {
            trips,
            interpolated,
        } => {
            if (interpolated - trips as f64).abs() < 1e-9 {
                trips.to_string()
            } else {
                format!("{trips} (≈{interpolated:.1})")
            }
        }
        BreakEven::NotReached => not_reached.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(money(1_705_200.0, 0), "1,705,200");
        assert_eq!(money(999.0, 0), "999");
        assert_eq!(money(-12_345.678, 2), "-12,345.68");
        assert_eq!(money(0.004, 2), "0.00");
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(2.345_1), 2.35);
        assert_eq!(round2(1999.994), 1999.99);
    }
}
