use std::io::{self, Write};
use std::path::Path;

use crate::analysis::{Analysis, SensitivityTable};
use crate::app::{AppError, Session};
use crate::fields::Field;
use crate::format;
use crate::i18n::{keys, Translator};
use crate::investment::AmortizationRow;
use crate::scoring::Factor;

/// 보고서 기본 파일명.
pub const DEFAULT_REPORT_PATH: &str = "investment_report.md";

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Summary,
    EditInputs,
    Schedule,
    Sensitivity,
    Report,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MENU_TITLE));
    for key in [
        keys::MENU_SUMMARY,
        keys::MENU_EDIT_INPUTS,
        keys::MENU_SCHEDULE,
        keys::MENU_SENSITIVITY,
        keys::MENU_REPORT,
        keys::MENU_SETTINGS,
        keys::MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Summary),
            "2" => return Ok(MenuChoice::EditInputs),
            "3" => return Ok(MenuChoice::Schedule),
            "4" => return Ok(MenuChoice::Sensitivity),
            "5" => return Ok(MenuChoice::Report),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 분석을 실행한다. 입력 오류는 화면에 알리고 `None`을 돌려준다.
fn evaluate_or_report(session: &Session) -> Result<Option<Analysis>, AppError> {
    match session.evaluate() {
        Ok(a) => Ok(Some(a)),
        Err(AppError::Input(e)) => {
            println!("{} {e}", session.tr.t(keys::ERROR_INPUT_REJECTED));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// 요약 메뉴를 처리한다.
pub fn handle_summary(session: &Session) -> Result<(), AppError> {
    if let Some(a) = evaluate_or_report(session)? {
        print_summary(&a, &session.tr, &session.config.currency);
    }
    Ok(())
}

/// 입력 변경 메뉴를 처리한다.
pub fn handle_edit_inputs(session: &mut Session) -> Result<(), AppError> {
    loop {
        println!("{}", session.tr.t(keys::EDIT_HEADING));
        for (i, field) in Field::ALL.iter().enumerate() {
            println!(
                "{:>2}) {:<36} {}",
                i + 1,
                session.tr.field(field.key()),
                display_field(*field, field.get(&session.input))
            );
        }
        let sel = read_line(&session.tr.t(keys::PROMPT_FIELD_NUMBER))?;
        let sel = sel.trim();
        if sel.is_empty() || sel == "0" {
            break;
        }
        let Some(field) = sel
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Field::ALL.get(i).copied())
        else {
            println!("{}", session.tr.t(keys::INVALID_SELECTION_RETRY));
            continue;
        };
        let current = display_field(field, field.get(&session.input));
        let prompt = session
            .tr
            .fill(keys::PROMPT_KEEP_CURRENT, &[("current", current)]);
        if let Some(value) = read_optional_f64(&prompt, &session.tr)? {
            let mut next = session.input.clone();
            field.set(&mut next, value);
            match next.validate() {
                Ok(()) => session.input = next,
                Err(e) => println!("{} {e}", session.tr.t(keys::ERROR_INPUT_REJECTED)),
            }
        }
    }
    Ok(())
}

fn display_field(field: Field, value: f64) -> String {
    if field.is_count() {
        format!("{value:.0}")
    } else if field.is_percent() {
        format!("{value:.2}%")
    } else {
        format::money(value, 2)
    }
}

/// 상환 스케줄 메뉴를 처리한다.
pub fn handle_schedule(session: &Session) -> Result<(), AppError> {
    if let Some(a) = evaluate_or_report(session)? {
        print_schedule(&a.schedule, &session.tr, None);
    }
    Ok(())
}

/// 민감도 메뉴를 처리한다.
pub fn handle_sensitivity(session: &Session) -> Result<(), AppError> {
    if let Some(a) = evaluate_or_report(session)? {
        print_sensitivity(&a.sensitivity, &session.tr, &session.config.currency);
    }
    Ok(())
}

/// 보고서 저장 메뉴를 처리한다.
pub fn handle_report(session: &Session) -> Result<(), AppError> {
    let prompt = session
        .tr
        .fill(keys::PROMPT_REPORT_PATH, &[("default", DEFAULT_REPORT_PATH.to_string())]);
    let path = read_line(&prompt)?;
    let path = match path.trim() {
        "" => DEFAULT_REPORT_PATH,
        other => other,
    };
    match session.write_report(Path::new(path)) {
        Ok(()) => println!("{} {path}", session.tr.t(keys::REPORT_SAVED)),
        Err(AppError::Input(e)) => println!("{} {e}", session.tr.t(keys::ERROR_INPUT_REJECTED)),
        Err(e) => return Err(e),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        session.tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        session.tr.language_code()
    );
    let sel = read_line(&session.tr.t(keys::PROMPT_LANGUAGE))?;
    if !sel.trim().is_empty() {
        session.set_language(sel.trim());
        println!(
            "{} {}",
            session.tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
            session.tr.language_code()
        );
    }
    Ok(())
}

/// 요약(핵심 지표, 점수, 강점/경고)을 출력한다.
pub fn print_summary(a: &Analysis, tr: &Translator, currency: &str) {
    let money = |v: f64| format::currency(v, currency);
    let inf = tr.t(keys::INFINITE);
    let na = tr.t(keys::NOT_AVAILABLE);
    let c = &a.cashflow;

    println!("\n== {} ==", tr.t(keys::SECTION_SUMMARY));
    println!(
        "{}: {} ({:.0}/100)",
        tr.t(keys::LABEL_RECOMMENDATION),
        tr.category(a.score.category),
        a.score.score
    );
    println!("{}", tr.category_summary(a.score.category));
    println!(
        "{}: {} ({:.0}/100)",
        tr.t(keys::LABEL_STEADY_STATE_SCORE),
        tr.category(a.steady_state_score.category),
        a.steady_state_score.score
    );

    println!("\n-- {} --", tr.t(keys::SECTION_INVESTMENT));
    println!("{}: {}", tr.t(keys::LABEL_INVESTMENT_TOTAL), money(a.capital.asset_cost));
    println!("{}: {}", tr.t(keys::LABEL_EQUITY_USED), money(a.capital.equity_used));
    println!("{}: {}", tr.t(keys::LABEL_RESERVE), money(a.capital.reserve));
    println!("{}: {}", tr.t(keys::LABEL_LOAN_PRINCIPAL), money(a.input.loan_principal));
    println!("{}: {}", tr.t(keys::LABEL_FUNDING_GAP), money(a.capital.funding_gap));
    println!("{}: {}", tr.t(keys::LABEL_INSTALLMENT), money(a.loan.installment));

    println!("\n-- {} --", tr.t(keys::SECTION_CASHFLOW));
    println!("{}: {}", tr.t(keys::LABEL_REVENUE), money(c.revenue));
    println!("{}: {}", tr.t(keys::LABEL_OPERATING_COSTS), money(c.operating_costs));
    println!("{}: {}", tr.t(keys::LABEL_TOTAL_TAXES), money(c.total_taxes));
    println!("{}: {}", tr.t(keys::LABEL_PROFIT_BEFORE_DEBT), money(c.profit_before_debt));
    println!("{}: {}", tr.t(keys::LABEL_PROFIT_AFTER_DEBT), money(c.profit_after_debt));
    println!("{}: {}", tr.t(keys::LABEL_ANNUAL_PROFIT), money(c.annual_profit_after_debt()));

    println!("\n-- {} --", tr.t(keys::SECTION_FACTORS));
    for f in &a.score.factors {
        println!(
            "{:<34} {:>12}  {:>3.0}/{:<3.0} {}",
            tr.factor(f.factor),
            format::ratio(f.factor, f.value, &inf, &na),
            f.points,
            f.max_points,
            tr.status(f.status)
        );
    }
    for f in a.score.strengths() {
        println!("+ {}", tr.finding(f.factor, f.status));
    }
    for f in a.score.warnings() {
        println!("! {}", tr.finding(f.factor, f.status));
    }

    let fc = &a.fiscal_credit;
    println!("\n-- {} --", tr.t(keys::SECTION_FISCAL_CREDIT));
    println!("{}: {}", tr.t(keys::LABEL_CREDIT_TOTAL), money(fc.total));
    match fc.months_of_coverage {
        Some(m) => println!("{}: {m:.1}", tr.t(keys::LABEL_COVERAGE_MONTHS)),
        None => println!("{}: {na}", tr.t(keys::LABEL_COVERAGE_MONTHS)),
    }
    println!("{}: {}", tr.t(keys::LABEL_MONTHLY_SAVINGS), money(fc.monthly_savings));

    if let Some(bc) = &a.better_client {
        println!("\n-- {} --", tr.t(keys::SECTION_BETTER_CLIENT));
        println!(
            "{}: {} -> {} ({})",
            tr.t(keys::LABEL_PROFIT_AFTER_DEBT),
            money(bc.baseline.profit_after_debt),
            money(bc.adjusted.profit_after_debt),
            money(bc.profit_delta())
        );
        println!(
            "{}: {:.0} -> {:.0} ({})",
            tr.t(keys::LABEL_SCORE),
            bc.baseline_score.score,
            bc.adjusted_score.score,
            tr.category(bc.adjusted_score.category)
        );
    }

    let not_reached = tr.t(keys::NOT_REACHED);
    println!(
        "\n{}: {}",
        tr.t(keys::LABEL_BREAK_EVEN),
        format::break_even(a.sensitivity.break_even, &not_reached)
    );
}

/// 상환 스케줄을 출력한다. `limit`이 있으면 앞부분만.
pub fn print_schedule(rows: &[AmortizationRow], tr: &Translator, limit: Option<usize>) {
    println!("\n== {} ==", tr.t(keys::SECTION_AMORTIZATION));
    if rows.is_empty() {
        println!("{}", tr.t(keys::NO_DEBT));
        return;
    }
    println!(
        "{:>5} {:>16} {:>14} {:>14} {:>14} {:>16}",
        tr.t(keys::LABEL_MONTH),
        tr.t(keys::LABEL_OPENING),
        tr.t(keys::LABEL_INSTALLMENT),
        tr.t(keys::LABEL_INTEREST),
        tr.t(keys::LABEL_PRINCIPAL),
        tr.t(keys::LABEL_CLOSING)
    );
    for r in rows.iter().take(limit.unwrap_or(rows.len())) {
        println!(
            "{:>5} {:>16} {:>14} {:>14} {:>14} {:>16}",
            r.month,
            format::money(r.opening_balance, 2),
            format::money(r.installment, 2),
            format::money(r.interest, 2),
            format::money(r.principal, 2),
            format::money(r.closing_balance, 2)
        );
    }
}

/// 민감도 표를 출력한다.
pub fn print_sensitivity(table: &SensitivityTable, tr: &Translator, currency: &str) {
    let na = tr.t(keys::NOT_AVAILABLE);
    let inf = tr.t(keys::INFINITE);
    println!("\n== {} ==", tr.t(keys::SECTION_SENSITIVITY));
    println!(
        "{:>7} {:>16} {:>16} {:>10} {:>6}  {}",
        tr.t(keys::LABEL_TRIPS),
        tr.t(keys::LABEL_REVENUE),
        tr.t(keys::LABEL_PROFIT_AFTER_DEBT),
        tr.t(keys::LABEL_NET_MARGIN),
        tr.t(keys::LABEL_SCORE),
        tr.t(keys::LABEL_RECOMMENDATION)
    );
    for r in &table.rows {
        let marker = if r.is_current { "*" } else { " " };
        println!(
            "{:>6}{marker} {:>16} {:>16} {:>10} {:>6.0}  {}",
            r.trips_per_month,
            format::currency(r.cashflow.revenue, currency),
            format::currency(r.cashflow.profit_after_debt, currency),
            format::ratio(Factor::ProfitMargin, r.score.ratios.profit_margin, &inf, &na),
            r.score.score,
            tr.category(r.score.category)
        );
    }
    println!("{}", tr.t(keys::NOTE_CURRENT_MARKER));
    let not_reached = tr.t(keys::NOT_REACHED);
    println!(
        "{}: {}",
        tr.t(keys::LABEL_BREAK_EVEN),
        format::break_even(table.break_even, &not_reached)
    );
    println!(
        "{}: {}",
        tr.t(keys::LABEL_BREAK_EVEN_AFTER_DEBT),
        format::break_even(table.break_even_after_debt, &not_reached)
    );
    if let Some(best) = table.best() {
        println!(
            "{}: {} ({})",
            tr.t(keys::LABEL_BEST_SCENARIO),
            best.trips_per_month,
            format::currency(best.cashflow.profit_after_debt, currency)
        );
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

/// 빈 입력이면 `None`(현재 값 유지).
fn read_optional_f64(prompt: &str, tr: &Translator) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.replace(',', "").parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
