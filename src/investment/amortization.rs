use serde::Serialize;

/// 상환 스케줄 한 줄(1개월).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationRow {
    /// 회차(1부터)
    pub month: u32,
    /// 기초 잔액
    pub opening_balance: f64,
    /// 이자
    pub interest: f64,
    /// 원금 상환분
    pub principal: f64,
    /// 월 납입액(이자 + 원금)
    pub installment: f64,
    /// 기말 잔액
    pub closing_balance: f64,
}

/// 상환 스케줄 합계.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LoanSummary {
    pub installment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}

/// 원리금 균등 상환액을 계산한다. 대출이 없으면 0.
pub fn installment(principal: f64, annual_rate: f64, term_months: u32) -> f64 {
    if principal <= 0.0 || term_months == 0 {
        return 0.0;
    }
    let r = annual_rate / 12.0;
    let n = term_months as f64;
    if r == 0.0 {
        return principal / n;
    }
    r * principal / (1.0 - (1.0 + r).powf(-n))
}

/// 원리금 균등 상환 스케줄을 만든다.
///
/// 단계 사이에는 반올림하지 않는다. 마지막 회차에서 부동소수 잔차를 흡수해
/// 기말 잔액이 정확히 0이 되도록 한다.
pub fn schedule(principal: f64, annual_rate: f64, term_months: u32) -> Vec<AmortizationRow> {
    if principal <= 0.0 || term_months == 0 {
        return Vec::new();
    }
    let r = annual_rate / 12.0;
    let payment = installment(principal, annual_rate, term_months);

    let mut rows = Vec::new();
    let mut balance = principal;
    for month in 1..=term_months {
        let opening = balance;
        let interest = opening * r;
        let last = month == term_months;
        let principal_part = if last && r != 0.0 {
            opening
        } else {
            payment - interest
        };
        let closing = if last {
            0.0
        } else {
            (opening - principal_part).max(0.0)
        };
        rows.push(AmortizationRow {
            month,
            opening_balance: opening,
            interest,
            principal: principal_part,
            installment: interest + principal_part,
            closing_balance: closing,
        });
        balance = closing;
    }
    rows
}

/// 스케줄의 총 납입액, 총 이자, 총 원금을 합산한다.
pub fn summarize(rows: &[AmortizationRow]) -> LoanSummary {
    rows.iter().fold(
        LoanSummary {
            installment: rows.first().map(|r| r.installment).unwrap_or(0.0),
            ..LoanSummary::default()
        },
        |mut acc, row| {
            acc.total_paid += row.installment;
            acc.total_interest += row.interest;
            acc.total_principal += row.principal;
            acc
        },
    )
}
