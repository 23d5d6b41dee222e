use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::scoring::{Category, Factor, Status};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const INFINITE: &str = "general.infinite";
    pub const NOT_AVAILABLE: &str = "general.not_available";
    pub const NOT_REACHED: &str = "general.not_reached";
    pub const MONTHS: &str = "general.months";
    pub const NO_DEBT: &str = "general.no_debt";

    pub const MENU_TITLE: &str = "menu.title";
    pub const MENU_SUMMARY: &str = "menu.summary";
    pub const MENU_EDIT_INPUTS: &str = "menu.edit_inputs";
    pub const MENU_SCHEDULE: &str = "menu.schedule";
    pub const MENU_SENSITIVITY: &str = "menu.sensitivity";
    pub const MENU_REPORT: &str = "menu.report";
    pub const MENU_SETTINGS: &str = "menu.settings";
    pub const MENU_EXIT: &str = "menu.exit";

    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_FIELD_NUMBER: &str = "prompt.field_number";
    pub const PROMPT_KEEP_CURRENT: &str = "prompt.keep_current";
    pub const PROMPT_REPORT_PATH: &str = "prompt.report_path";
    pub const PROMPT_LANGUAGE: &str = "prompt.language";

    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INPUT_REJECTED: &str = "error.input_rejected";

    pub const EDIT_HEADING: &str = "edit.heading";
    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_SAVED: &str = "report.saved";
    pub const REPORT_SCENARIO: &str = "report.scenario";

    pub const SECTION_SUMMARY: &str = "section.summary";
    pub const SECTION_INVESTMENT: &str = "section.investment";
    pub const SECTION_CREDIT: &str = "section.credit";
    pub const SECTION_CASHFLOW: &str = "section.cashflow";
    pub const SECTION_ANNUAL: &str = "section.annual";
    pub const SECTION_SCORE: &str = "section.score";
    pub const SECTION_FACTORS: &str = "section.factors";
    pub const SECTION_STRENGTHS: &str = "section.strengths";
    pub const SECTION_WARNINGS: &str = "section.warnings";
    pub const SECTION_FISCAL_CREDIT: &str = "section.fiscal_credit";
    pub const SECTION_BETTER_CLIENT: &str = "section.better_client";
    pub const SECTION_SENSITIVITY: &str = "section.sensitivity";
    pub const SECTION_AMORTIZATION: &str = "section.amortization";

    pub const LABEL_INVESTMENT_TOTAL: &str = "label.investment_total";
    pub const LABEL_TRUCK_PRICE: &str = "label.truck_price";
    pub const LABEL_TRAILER_PRICE: &str = "label.trailer_price";
    pub const LABEL_CAPITAL_AVAILABLE: &str = "label.capital_available";
    pub const LABEL_EQUITY_USED: &str = "label.equity_used";
    pub const LABEL_RESERVE: &str = "label.reserve";
    pub const LABEL_TOTAL_FUNDED: &str = "label.total_funded";
    pub const LABEL_FUNDING_GAP: &str = "label.funding_gap";
    pub const LABEL_FUNDING_SURPLUS: &str = "label.funding_surplus";
    pub const LABEL_LOAN_PRINCIPAL: &str = "label.loan_principal";
    pub const LABEL_ANNUAL_RATE: &str = "label.annual_rate";
    pub const LABEL_TERM: &str = "label.term";
    pub const LABEL_INSTALLMENT: &str = "label.installment";
    pub const LABEL_ANNUAL_DEBT_SERVICE: &str = "label.annual_debt_service";
    pub const LABEL_TOTAL_PAID: &str = "label.total_paid";
    pub const LABEL_TOTAL_INTEREST: &str = "label.total_interest";
    pub const LABEL_TOTAL_PRINCIPAL: &str = "label.total_principal";
    pub const LABEL_REVENUE: &str = "label.revenue";
    pub const LABEL_OPERATING_COSTS: &str = "label.operating_costs";
    pub const LABEL_FUEL: &str = "label.fuel";
    pub const LABEL_TOLLS: &str = "label.tolls";
    pub const LABEL_DRIVER: &str = "label.driver";
    pub const LABEL_MAINTENANCE: &str = "label.maintenance";
    pub const LABEL_OTHER: &str = "label.other";
    pub const LABEL_IVA: &str = "label.iva";
    pub const LABEL_IT: &str = "label.it";
    pub const LABEL_TOTAL_TAXES: &str = "label.total_taxes";
    pub const LABEL_PROFIT_BEFORE_DEBT: &str = "label.profit_before_debt";
    pub const LABEL_PROFIT_AFTER_DEBT: &str = "label.profit_after_debt";
    pub const LABEL_ANNUAL_PROFIT: &str = "label.annual_profit";
    pub const LABEL_NET_MARGIN: &str = "label.net_margin";
    pub const LABEL_DSCR: &str = "label.dscr";
    pub const LABEL_PAYBACK: &str = "label.payback";
    pub const LABEL_SCORE: &str = "label.score";
    pub const LABEL_STEADY_STATE_SCORE: &str = "label.steady_state_score";
    pub const LABEL_RECOMMENDATION: &str = "label.recommendation";
    pub const LABEL_BREAK_EVEN: &str = "label.break_even";
    pub const LABEL_BREAK_EVEN_AFTER_DEBT: &str = "label.break_even_after_debt";
    pub const LABEL_BEST_SCENARIO: &str = "label.best_scenario";
    pub const LABEL_METRIC: &str = "label.metric";
    pub const LABEL_VALUE: &str = "label.value";
    pub const LABEL_POINTS: &str = "label.points";
    pub const LABEL_STATUS: &str = "label.status";
    pub const LABEL_MONTH: &str = "label.month";
    pub const LABEL_OPENING: &str = "label.opening";
    pub const LABEL_INTEREST: &str = "label.interest";
    pub const LABEL_PRINCIPAL: &str = "label.principal";
    pub const LABEL_CLOSING: &str = "label.closing";
    pub const LABEL_TRIPS: &str = "label.trips";
    pub const LABEL_BASELINE: &str = "label.baseline";
    pub const LABEL_BETTER: &str = "label.better";
    pub const LABEL_CHANGE: &str = "label.change";
    pub const LABEL_CREDIT_BASE: &str = "label.credit_base";
    pub const LABEL_CREDIT_TOTAL: &str = "label.credit_total";
    pub const LABEL_MONTHLY_IVA: &str = "label.monthly_iva";
    pub const LABEL_COVERAGE_MONTHS: &str = "label.coverage_months";
    pub const LABEL_MONTHLY_SAVINGS: &str = "label.monthly_savings";
    pub const LABEL_WITH_CREDIT: &str = "label.with_credit";
    pub const LABEL_WITHOUT_CREDIT: &str = "label.without_credit";
    pub const LABEL_VOLUME_PER_TRIP: &str = "label.volume_per_trip";
    pub const LABEL_RATE_PER_UNIT: &str = "label.rate_per_unit";
    pub const LABEL_REVENUE_PER_TRIP: &str = "label.revenue_per_trip";

    pub const NOTE_INTERPRETATION: &str = "note.interpretation";
    pub const NOTE_AMORTIZATION_FIRST_ROWS: &str = "note.amortization_first_rows";
    pub const NOTE_CURRENT_MARKER: &str = "note.current_marker";
    pub const NOTE_BETTER_CLIENT_ADDITIONAL: &str = "note.better_client_additional";
    pub const NOTE_BETTER_CLIENT_REALLOCATE: &str = "note.better_client_reallocate";
    pub const NOTE_SCORING_BASIS: &str = "note.scoring_basis";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Es,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("es") {
            Language::Es
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en/es)에 따라 내장 언어팩만으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리에 같은 언어 파일이 있으면 그 값이 내장 문자열보다 우선한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let mut strings = built_in_pack(lang).unwrap_or_default();
        if let Some(overrides) = pack_dir.and_then(|dir| load_overrides(dir, lang_code)) {
            log::info!("language pack loaded from {}", pack_dir.unwrap_or_default());
            strings.extend(overrides);
        }
        Self {
            lang,
            strings,
            fallback: built_in_pack(Language::En).unwrap_or_default(),
        }
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 없으면 영어, 그것도 없으면 키를 그대로 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// `{name}` 형태의 자리표시자를 채운다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key);
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }

    pub fn factor(&self, factor: Factor) -> String {
        self.t(&format!("factor.{}", factor.key()))
    }

    pub fn status(&self, status: Status) -> String {
        self.t(&format!("status.{}", status.key()))
    }

    pub fn category(&self, category: Category) -> String {
        self.t(&format!("category.{}", category.key()))
    }

    pub fn category_summary(&self, category: Category) -> String {
        self.t(&format!("category_summary.{}", category.key()))
    }

    /// 지표 구간별 강점/경고 문구.
    pub fn finding(&self, factor: Factor, status: Status) -> String {
        self.t(&format!("finding.{}.{}", factor.key(), status.key()))
    }

    pub fn field(&self, key: &str) -> String {
        self.t(&format!("field.{key}"))
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("es") => Some("es".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" | "en" | "es" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 (중첩 가능한) 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::En => parse_toml_to_map(include_str!("../locales/en.toml")),
        Language::Ko => parse_toml_to_map(include_str!("../locales/ko.toml")),
        Language::Es => parse_toml_to_map(include_str!("../locales/es.toml")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_parse() {
        for lang in [Language::Ko, Language::En, Language::Es] {
            let map = built_in_pack(lang).expect("pack");
            assert!(map.contains_key(keys::MENU_TITLE), "{lang:?}");
            assert!(map.contains_key("finding.dscr.critical"), "{lang:?}");
            assert!(map.contains_key(keys::LABEL_STEADY_STATE_SCORE), "{lang:?}");
        }
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let tr = Translator::new("es");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn every_category_has_a_label() {
        let tr = Translator::new("ko");
        for c in Category::ALL {
            assert_ne!(tr.category(c), format!("category.{}", c.key()));
        }
    }

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_lang("es-BO").as_deref(), Some("es"));
        assert_eq!(normalize_lang("auto"), None);
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko"));
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        let s = tr.fill(keys::PROMPT_KEEP_CURRENT, &[("current", "22".into())]);
        assert!(s.contains("22"));
        assert!(!s.contains("{current}"));
    }
}
