//! 완성된 분석 결과를 텍스트(Markdown) 보고서로 만든다.
//!
//! 계산은 하지 않는다. 반올림과 천 단위 구분은 모두 `format` 모듈에서만 한다.

use std::fs;
use std::io;
use std::path::Path;

use crate::analysis::{Analysis, BetterClientComparison};
use crate::format;
use crate::i18n::{keys, Translator};
use crate::investment::{BetterClientMode, CashflowResult};
use crate::scoring::{Factor, FactorScore, Ratio};

/// 상환 스케줄에서 보고서에 싣는 회차 수.
pub const AMORTIZATION_PREVIEW_ROWS: usize = 12;

/// 보고서 입력. 계산이 끝난 결과만 빌려온다.
#[derive(Debug, Clone, Copy)]
pub struct ReportData<'a> {
    pub analysis: &'a Analysis,
    /// 금액 뒤에 붙는 통화 표기
    pub currency: &'a str,
}

impl<'a> ReportData<'a> {
    pub fn new(analysis: &'a Analysis, currency: &'a str) -> Self {
        Self { analysis, currency }
    }
}

struct Writer<'a> {
    out: String,
    tr: &'a Translator,
    currency: &'a str,
}

impl<'a> Writer<'a> {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn heading(&mut self, level: usize, key: &str) {
        let title = self.tr.t(key);
        self.line(format!("{} {title}", "#".repeat(level)));
        self.blank();
    }

    fn money(&self, value: f64) -> String {
        format::currency(value, self.currency)
    }

    fn item(&mut self, key: &str, value: impl AsRef<str>) {
        let label = self.tr.t(key);
        self.line(format!("- {label}: {}", value.as_ref()));
    }

    fn money_item(&mut self, key: &str, value: f64) {
        let v = self.money(value);
        self.item(key, v);
    }

    fn table(&mut self, header: &[String], rows: &[Vec<String>]) {
        self.line(format!("| {} |", header.join(" | ")));
        self.line(format!("|{}", "---|".repeat(header.len())));
        for row in rows {
            self.line(format!("| {} |", row.join(" | ")));
        }
        self.blank();
    }

    fn ratio(&self, factor: Factor, value: Ratio) -> String {
        format::ratio(
            factor,
            value,
            &self.tr.t(keys::INFINITE),
            &self.tr.t(keys::NOT_AVAILABLE),
        )
    }
}

/// 보고서 전체를 문자열로 만든다.
pub fn render(data: &ReportData, tr: &Translator) -> String {
    let mut w = Writer {
        out: String::new(),
        tr,
        currency: data.currency,
    };
    let a = data.analysis;

    w.heading(1, keys::REPORT_TITLE);
    let scenario = format!(
        "{} × {} m³ × {}",
        a.input.trips_per_month,
        format::money(a.input.volume_per_trip, 2),
        w.money(a.input.rate_per_unit)
    );
    w.item(keys::REPORT_SCENARIO, scenario);
    w.blank();

    summary(&mut w, a);
    investment(&mut w, a);
    credit(&mut w, a);
    cashflow(&mut w, &a.cashflow);
    annual(&mut w, &a.cashflow);
    score(&mut w, a);
    fiscal_credit(&mut w, a);
    if let Some(bc) = &a.better_client {
        better_client(&mut w, a, bc);
    }
    sensitivity(&mut w, a);
    amortization(&mut w, a);

    w.line(tr.t(keys::NOTE_INTERPRETATION));
    w.out
}

/// 보고서를 파일로 저장한다.
pub fn write_report(path: impl AsRef<Path>, data: &ReportData, tr: &Translator) -> io::Result<()> {
    let path = path.as_ref();
    fs::write(path, render(data, tr))?;
    log::info!("report written to {}", path.display());
    Ok(())
}

fn summary(w: &mut Writer, a: &Analysis) {
    w.heading(2, keys::SECTION_SUMMARY);
    let category = w.tr.category(a.score.category);
    w.item(keys::LABEL_RECOMMENDATION, format!("**{category}**"));
    w.item(keys::LABEL_SCORE, format!("{:.0}/100", a.score.score));
    w.money_item(keys::LABEL_PROFIT_AFTER_DEBT, a.cashflow.profit_after_debt);
    let margin = w.ratio(Factor::ProfitMargin, a.score.ratios.profit_margin);
    w.item(keys::LABEL_NET_MARGIN, margin);
    let dscr = match a.score.ratios.dscr {
        Ratio::Infinite => w.tr.t(keys::NO_DEBT),
        other => w.ratio(Factor::Dscr, other),
    };
    w.item(keys::LABEL_DSCR, dscr);
    w.blank();
    w.line(w.tr.category_summary(a.score.category));
    w.blank();
}

fn investment(w: &mut Writer, a: &Analysis) {
    w.heading(2, keys::SECTION_INVESTMENT);
    w.money_item(keys::LABEL_TRUCK_PRICE, a.input.truck_price);
    w.money_item(keys::LABEL_TRAILER_PRICE, a.input.trailer_price);
    w.money_item(keys::LABEL_INVESTMENT_TOTAL, a.capital.asset_cost);
    w.money_item(keys::LABEL_CAPITAL_AVAILABLE, a.input.capital_available);
    w.money_item(keys::LABEL_RESERVE, a.capital.reserve);
    w.money_item(keys::LABEL_EQUITY_USED, a.capital.equity_used);
    w.money_item(keys::LABEL_LOAN_PRINCIPAL, a.input.loan_principal);
    w.money_item(keys::LABEL_TOTAL_FUNDED, a.capital.total_funded);
    if a.capital.funding_gap > 0.0 {
        w.money_item(keys::LABEL_FUNDING_GAP, a.capital.funding_gap);
    } else if a.capital.funding_surplus > 0.0 {
        w.money_item(keys::LABEL_FUNDING_SURPLUS, a.capital.funding_surplus);
    }
    w.blank();
}

fn credit(w: &mut Writer, a: &Analysis) {
    w.heading(2, keys::SECTION_CREDIT);
    if a.schedule.is_empty() {
        w.line(w.tr.t(keys::NO_DEBT));
        w.blank();
        return;
    }
    w.money_item(keys::LABEL_LOAN_PRINCIPAL, a.input.loan_principal);
    w.item(keys::LABEL_ANNUAL_RATE, format::percent(a.input.annual_rate));
    let term = format!("{} {}", a.input.loan_term_months, w.tr.t(keys::MONTHS));
    w.item(keys::LABEL_TERM, term);
    w.money_item(keys::LABEL_INSTALLMENT, a.loan.installment);
    w.money_item(keys::LABEL_ANNUAL_DEBT_SERVICE, a.cashflow.annual_debt_service());
    w.money_item(keys::LABEL_TOTAL_PAID, a.loan.total_paid);
    w.money_item(keys::LABEL_TOTAL_INTEREST, a.loan.total_interest);
    w.blank();
}

fn cashflow(w: &mut Writer, c: &CashflowResult) {
    w.heading(2, keys::SECTION_CASHFLOW);
    let rows = [
        (keys::LABEL_REVENUE, c.revenue),
        (keys::LABEL_FUEL, -c.fuel_cost),
        (keys::LABEL_TOLLS, -c.toll_cost),
        (
            keys::LABEL_OPERATING_COSTS,
            -(c.operating_costs - c.fuel_cost - c.toll_cost),
        ),
        (keys::LABEL_IVA, -c.iva),
        (keys::LABEL_IT, -c.it),
        (keys::LABEL_PROFIT_BEFORE_DEBT, c.profit_before_debt),
        (keys::LABEL_INSTALLMENT, -c.debt_service),
        (keys::LABEL_PROFIT_AFTER_DEBT, c.profit_after_debt),
    ];
    let header = vec![w.tr.t(keys::LABEL_METRIC), w.tr.t(keys::LABEL_VALUE)];
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|(k, v)| vec![w.tr.t(k), w.money(*v)])
        .collect();
    w.table(&header, &body);
}

fn annual(w: &mut Writer, c: &CashflowResult) {
    w.heading(2, keys::SECTION_ANNUAL);
    w.money_item(keys::LABEL_REVENUE, c.annual_revenue());
    w.money_item(keys::LABEL_PROFIT_BEFORE_DEBT, c.annual_profit_before_debt());
    w.money_item(keys::LABEL_ANNUAL_DEBT_SERVICE, c.annual_debt_service());
    w.money_item(keys::LABEL_ANNUAL_PROFIT, c.annual_profit_after_debt());
    w.blank();
}

fn factor_row(w: &Writer, f: &FactorScore) -> Vec<String> {
    vec![
        w.tr.factor(f.factor),
        w.ratio(f.factor, f.value),
        format!("{:.0}/{:.0}", f.points, f.max_points),
        w.tr.status(f.status),
    ]
}

fn score(w: &mut Writer, a: &Analysis) {
    w.heading(2, keys::SECTION_SCORE);
    let category = w.tr.category(a.score.category);
    w.item(keys::LABEL_SCORE, format!("{:.0}/100 ({category})", a.score.score));
    let steady = &a.steady_state_score;
    let steady_category = w.tr.category(steady.category);
    w.item(
        keys::LABEL_STEADY_STATE_SCORE,
        format!("{:.0}/100 ({steady_category})", steady.score),
    );
    w.line(format!("_{}_", w.tr.t(keys::NOTE_SCORING_BASIS)));
    w.blank();

    w.heading(3, keys::SECTION_FACTORS);
    let header = vec![
        w.tr.t(keys::LABEL_METRIC),
        w.tr.t(keys::LABEL_VALUE),
        w.tr.t(keys::LABEL_POINTS),
        w.tr.t(keys::LABEL_STATUS),
    ];
    let rows: Vec<Vec<String>> = a.score.factors.iter().map(|f| factor_row(w, f)).collect();
    w.table(&header, &rows);

    let strengths: Vec<String> = a
        .score
        .strengths()
        .map(|f| w.tr.finding(f.factor, f.status))
        .collect();
    if !strengths.is_empty() {
        w.heading(3, keys::SECTION_STRENGTHS);
        for s in strengths {
            w.line(format!("- {s}"));
        }
        w.blank();
    }

    let warnings: Vec<String> = a
        .score
        .warnings()
        .map(|f| w.tr.finding(f.factor, f.status))
        .collect();
    if !warnings.is_empty() {
        w.heading(3, keys::SECTION_WARNINGS);
        for s in warnings {
            w.line(format!("- {s}"));
        }
        w.blank();
    }
}

fn fiscal_credit(w: &mut Writer, a: &Analysis) {
    let fc = &a.fiscal_credit;
    w.heading(2, keys::SECTION_FISCAL_CREDIT);
    w.money_item(keys::LABEL_CREDIT_BASE, fc.base);
    w.money_item(keys::LABEL_CREDIT_TOTAL, fc.total);
    w.money_item(keys::LABEL_MONTHLY_IVA, fc.monthly_iva);
    let coverage = match fc.months_of_coverage {
        Some(m) => format!("{m:.1} {}", w.tr.t(keys::MONTHS)),
        None => w.tr.t(keys::NOT_AVAILABLE),
    };
    w.item(keys::LABEL_COVERAGE_MONTHS, coverage);
    w.money_item(keys::LABEL_MONTHLY_SAVINGS, fc.monthly_savings);
    w.blank();

    let header = vec![
        w.tr.t(keys::LABEL_METRIC),
        w.tr.t(keys::LABEL_WITH_CREDIT),
        w.tr.t(keys::LABEL_WITHOUT_CREDIT),
    ];
    let pairs = [
        (keys::LABEL_IVA, fc.with_credit.iva, fc.without_credit.iva),
        (
            keys::LABEL_TOTAL_TAXES,
            fc.with_credit.total_taxes,
            fc.without_credit.total_taxes,
        ),
        (
            keys::LABEL_PROFIT_AFTER_DEBT,
            fc.with_credit.profit_after_debt,
            fc.without_credit.profit_after_debt,
        ),
    ];
    let rows: Vec<Vec<String>> = pairs
        .iter()
        .map(|(k, with, without)| vec![w.tr.t(k), w.money(*with), w.money(*without)])
        .collect();
    w.table(&header, &rows);
}

fn better_client(w: &mut Writer, a: &Analysis, bc: &BetterClientComparison) {
    w.heading(2, keys::SECTION_BETTER_CLIENT);
    let note_key = match bc.scenario.mode {
        BetterClientMode::Additional => keys::NOTE_BETTER_CLIENT_ADDITIONAL,
        BetterClientMode::Reallocate => keys::NOTE_BETTER_CLIENT_REALLOCATE,
    };
    let note = w.tr.fill(
        note_key,
        &[
            ("trips", bc.scenario.trips.to_string()),
            ("rate", format::money(bc.scenario.rate, 2)),
            ("base_rate", format::money(a.input.rate_per_unit, 2)),
        ],
    );
    w.line(note);
    w.blank();

    let header = vec![
        w.tr.t(keys::LABEL_METRIC),
        w.tr.t(keys::LABEL_BASELINE),
        w.tr.t(keys::LABEL_BETTER),
        w.tr.t(keys::LABEL_CHANGE),
    ];
    let money_rows = [
        (keys::LABEL_REVENUE, bc.baseline.revenue, bc.adjusted.revenue),
        (
            keys::LABEL_TOTAL_TAXES,
            bc.baseline.total_taxes,
            bc.adjusted.total_taxes,
        ),
        (
            keys::LABEL_PROFIT_AFTER_DEBT,
            bc.baseline.profit_after_debt,
            bc.adjusted.profit_after_debt,
        ),
    ];
    let mut rows: Vec<Vec<String>> = money_rows
        .iter()
        .map(|(k, before, after)| {
            vec![
                w.tr.t(k),
                w.money(*before),
                w.money(*after),
                w.money(after - before),
            ]
        })
        .collect();
    rows.push(vec![
        w.tr.t(keys::LABEL_SCORE),
        format!("{:.0}", bc.baseline_score.score),
        format!("{:.0}", bc.adjusted_score.score),
        format!("{:+.0}", bc.score_delta()),
    ]);
    rows.push(vec![
        w.tr.t(keys::LABEL_RECOMMENDATION),
        w.tr.category(bc.baseline_score.category),
        w.tr.category(bc.adjusted_score.category),
        String::new(),
    ]);
    w.table(&header, &rows);
}

fn sensitivity(w: &mut Writer, a: &Analysis) {
    let table = &a.sensitivity;
    w.heading(2, keys::SECTION_SENSITIVITY);
    let not_reached = w.tr.t(keys::NOT_REACHED);
    w.item(
        keys::LABEL_BREAK_EVEN,
        format::break_even(table.break_even, &not_reached),
    );
    w.item(
        keys::LABEL_BREAK_EVEN_AFTER_DEBT,
        format::break_even(table.break_even_after_debt, &not_reached),
    );
    if let Some(best) = table.best() {
        let best = format!(
            "{} ({})",
            best.trips_per_month,
            w.money(best.cashflow.profit_after_debt)
        );
        w.item(keys::LABEL_BEST_SCENARIO, best);
    }
    w.blank();

    let header = vec![
        w.tr.t(keys::LABEL_TRIPS),
        w.tr.t(keys::LABEL_REVENUE),
        w.tr.t(keys::LABEL_PROFIT_AFTER_DEBT),
        w.tr.t(keys::LABEL_NET_MARGIN),
        w.tr.t(keys::LABEL_SCORE),
        w.tr.t(keys::LABEL_RECOMMENDATION),
    ];
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| {
            let marker = if r.is_current { "*" } else { "" };
            vec![
                format!("{}{marker}", r.trips_per_month),
                w.money(r.cashflow.revenue),
                w.money(r.cashflow.profit_after_debt),
                w.ratio(Factor::ProfitMargin, r.score.ratios.profit_margin),
                format!("{:.0}", r.score.score),
                w.tr.category(r.score.category),
            ]
        })
        .collect();
    w.table(&header, &rows);
    w.line(w.tr.t(keys::NOTE_CURRENT_MARKER));
    w.blank();
}

fn amortization(w: &mut Writer, a: &Analysis) {
    if a.schedule.is_empty() {
        return;
    }
    w.heading(2, keys::SECTION_AMORTIZATION);
    let header = vec![
        w.tr.t(keys::LABEL_MONTH),
        w.tr.t(keys::LABEL_OPENING),
        w.tr.t(keys::LABEL_INSTALLMENT),
        w.tr.t(keys::LABEL_INTEREST),
        w.tr.t(keys::LABEL_PRINCIPAL),
        w.tr.t(keys::LABEL_CLOSING),
    ];
    let rows: Vec<Vec<String>> = a
        .schedule
        .iter()
        .take(AMORTIZATION_PREVIEW_ROWS)
        .map(|r| {
            vec![
                r.month.to_string(),
                format::money(r.opening_balance, 2),
                format::money(r.installment, 2),
                format::money(r.interest, 2),
                format::money(r.principal, 2),
                format::money(r.closing_balance, 2),
            ]
        })
        .collect();
    w.table(&header, &rows);
    if a.schedule.len() > AMORTIZATION_PREVIEW_ROWS {
        w.line(w.tr.t(keys::NOTE_AMORTIZATION_FIRST_ROWS));
        w.blank();
    }
}
