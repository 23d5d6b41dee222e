#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{fs, path::Path, path::PathBuf};
use truck_investment_analyzer::{
    analysis::{self, Analysis},
    config::{self, DEFAULT_CONFIG_PATH},
    fields::Field,
    format,
    i18n::{self, keys, Translator},
    investment::{BetterClient, BetterClientMode, CashflowResult, InputError, InputModel},
    report::{self, ReportData},
    scoring::{Factor, Ratio},
    sensitivity::{SensitivityRow, TripRange},
    ui_cli::DEFAULT_REPORT_PATH,
};

#[derive(Parser, Debug)]
#[command(name = "truck_investment", about = "Truck + trailer investment analyzer", version)]
struct GuiArgs {
    /// Path to config.toml
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Language code: ko, en, es or auto
    #[arg(long, short = 'L')]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let args = GuiArgs::parse();

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1180.0, 780.0]);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = match config::load_or_default(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("config not loaded, using defaults: {e}");
            config::Config::default()
        }
    };
    if let Some(lang_cli) = args.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    let config_path = args.config;
    eframe::run_native(
        "Truck Investment Analyzer",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone(), config_path.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 시스템 폰트를 찾아 적용한다.
/// 1) assets/fonts 아래 폰트
/// 2) Windows/Linux/macOS 시스템 폰트
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("assets/fonts/NotoSansKR-Regular.ttf"),
        PathBuf::from("assets/fonts/malgun.ttf"),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    for cand in [
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ] {
        candidates.push(PathBuf::from(cand));
    }

    for p in candidates.iter().filter(|p| p.exists()) {
        let bytes =
            fs::read(p).map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        log::info!("font loaded from {}", p.display());
        return Ok(());
    }
    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Summary,
    Score,
    Amortization,
    Sensitivity,
    FiscalCredit,
    BetterClient,
    Settings,
}

impl Tab {
    const ALL: [Tab; 7] = [
        Tab::Summary,
        Tab::Score,
        Tab::Amortization,
        Tab::Sensitivity,
        Tab::FiscalCredit,
        Tab::BetterClient,
        Tab::Settings,
    ];

    fn key(&self) -> &'static str {
        match self {
            Tab::Summary => "gui.tab.summary",
            Tab::Score => "gui.tab.score",
            Tab::Amortization => "gui.tab.amortization",
            Tab::Sensitivity => "gui.tab.sensitivity",
            Tab::FiscalCredit => "gui.tab.fiscal_credit",
            Tab::BetterClient => "gui.tab.better_client",
            Tab::Settings => "gui.tab.settings",
        }
    }
}

/// 사이드 패널 입력 그룹.
const INPUT_GROUPS: &[(&str, &[Field])] = &[
    (
        "gui.group.asset",
        &[
            Field::TruckPrice,
            Field::TrailerPrice,
            Field::CapitalAvailable,
            Field::ReserveMin,
        ],
    ),
    (
        "gui.group.loan",
        &[Field::LoanPrincipal, Field::AnnualRate, Field::LoanTermMonths],
    ),
    (
        "gui.group.operation",
        &[Field::TripsPerMonth, Field::VolumePerTrip, Field::RatePerUnit],
    ),
    (
        "gui.group.costs",
        &[
            Field::FuelCostPerTrip,
            Field::TollCostPerTrip,
            Field::DriverSalary,
            Field::MaintenanceCost,
            Field::OtherCosts,
        ],
    ),
    ("gui.group.taxes", &[Field::IvaRate, Field::ItRate]),
];

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: Translator,
    input: InputModel,
    /// 체크를 꺼도 값은 남겨둔다.
    better: BetterClient,
    better_enabled: bool,
    analysis: Result<Analysis, InputError>,
    tab: Tab,
    lang_input: String,
    custom_font_path: String,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = Translator::new_with_pack(&lang_code, config.pack_dir());
        log::info!("GUI language resolved: {lang_code}");
        let input = config.scenario.clone();
        let better = input.better_client.unwrap_or(BetterClient {
            trips: 4,
            rate: input.rate_per_unit + 20.0,
            mode: BetterClientMode::Additional,
        });
        let range = TripRange::around(input.trips_per_month, &config.sensitivity);
        let analysis = analysis::evaluate(&input, &config.scoring, &range);
        Self {
            lang_input: config.language.clone(),
            better_enabled: input.better_client.is_some(),
            config,
            config_path,
            tr,
            input,
            better,
            analysis,
            tab: Tab::Summary,
            custom_font_path: String::new(),
            status: None,
        }
    }

    /// 입력이 바뀔 때마다 전체 분석을 다시 실행한다.
    fn recompute(&mut self) {
        self.input.better_client = self.better_enabled.then_some(self.better);
        let range = TripRange::around(self.input.trips_per_month, &self.config.sensitivity);
        self.analysis = analysis::evaluate(&self.input, &self.config.scoring, &range);
    }

    fn t(&self, key: &str) -> String {
        self.tr.t(key)
    }

    fn money(&self, value: f64) -> String {
        format::currency(value, &self.config.currency)
    }

    fn ratio(&self, factor: Factor, value: Ratio) -> String {
        format::ratio(
            factor,
            value,
            &self.t(keys::INFINITE),
            &self.t(keys::NOT_AVAILABLE),
        )
    }

    /// 좌측 입력 패널. 값이 바뀌면 true.
    fn ui_inputs(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        ui.heading(self.t("gui.inputs"));
        if ui.button(self.t("gui.reset_defaults")).clicked() {
            self.input = self.config.scenario.clone();
            if let Some(bc) = self.input.better_client {
                self.better = bc;
            }
            self.better_enabled = self.input.better_client.is_some();
            changed = true;
        }
        ui.separator();

        for (group_key, fields) in INPUT_GROUPS {
            egui::CollapsingHeader::new(self.t(group_key))
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new(*group_key)
                        .num_columns(2)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            for field in fields.iter() {
                                ui.label(self.tr.field(field.key()));
                                let mut v = field.get(&self.input);
                                let mut drag = egui::DragValue::new(&mut v)
                                    .speed(field.step())
                                    .clamp_range(0.0..=1.0e12);
                                if field.is_count() {
                                    drag = drag.fixed_decimals(0);
                                } else if field.is_percent() {
                                    drag = drag.suffix(" %").max_decimals(2);
                                } else {
                                    drag = drag.max_decimals(2);
                                }
                                if ui.add(drag).changed() {
                                    field.set(&mut self.input, v);
                                    changed = true;
                                }
                                ui.end_row();
                            }
                        });
                    if *group_key == "gui.group.asset"
                        && ui
                            .checkbox(
                                &mut self.input.trailer_invoiced_with_iva,
                                self.tr.t("gui.trailer_invoiced"),
                            )
                            .changed()
                    {
                        changed = true;
                    }
                });
        }

        egui::CollapsingHeader::new(self.t("gui.group.better_client"))
            .default_open(true)
            .show(ui, |ui| {
                changed |= ui
                    .checkbox(&mut self.better_enabled, self.tr.t("gui.better_client_enable"))
                    .changed();
                ui.add_enabled_ui(self.better_enabled, |ui| {
                    egui::Grid::new("better_client_grid")
                        .num_columns(2)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            ui.label(self.tr.field(Field::BetterClientTrips.key()));
                            changed |= ui
                                .add(egui::DragValue::new(&mut self.better.trips).clamp_range(0..=200))
                                .changed();
                            ui.end_row();
                            ui.label(self.tr.field(Field::BetterClientRate.key()));
                            changed |= ui
                                .add(
                                    egui::DragValue::new(&mut self.better.rate)
                                        .speed(0.5)
                                        .clamp_range(0.0..=1.0e6),
                                )
                                .changed();
                            ui.end_row();
                        });
                    ui.horizontal(|ui| {
                        changed |= ui
                            .selectable_value(
                                &mut self.better.mode,
                                BetterClientMode::Additional,
                                self.tr.t("gui.mode_additional"),
                            )
                            .changed();
                        changed |= ui
                            .selectable_value(
                                &mut self.better.mode,
                                BetterClientMode::Reallocate,
                                self.tr.t("gui.mode_reallocate"),
                            )
                            .changed();
                    });
                });
            });
        changed
    }

    fn ui_summary(&self, ui: &mut egui::Ui, a: &Analysis) {
        let category = self.tr.category(a.score.category);
        ui.heading(format!("{category}  ({:.0}/100)", a.score.score));
        ui.label(self.tr.category_summary(a.score.category));
        ui.add_space(8.0);

        let c = &a.cashflow;
        let rows = [
            (keys::LABEL_INVESTMENT_TOTAL, self.money(a.capital.asset_cost)),
            (keys::LABEL_EQUITY_USED, self.money(a.capital.equity_used)),
            (keys::LABEL_RESERVE, self.money(a.capital.reserve)),
            (keys::LABEL_LOAN_PRINCIPAL, self.money(a.input.loan_principal)),
            (keys::LABEL_FUNDING_GAP, self.money(a.capital.funding_gap)),
            (keys::LABEL_INSTALLMENT, self.money(a.loan.installment)),
            (keys::LABEL_TOTAL_INTEREST, self.money(a.loan.total_interest)),
            (keys::LABEL_REVENUE_PER_TRIP, self.money(a.input.revenue_per_trip())),
        ];
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(self.t(keys::SECTION_INVESTMENT));
            key_value_grid(ui, "summary_investment", &self.tr, &rows);
        });
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(self.t(keys::SECTION_CASHFLOW));
            cashflow_grid(ui, "summary_cashflow", &self.tr, c, &self.config.currency);
        });
        ui.add_space(8.0);
        let annual = [
            (keys::LABEL_REVENUE, self.money(c.annual_revenue())),
            (keys::LABEL_ANNUAL_DEBT_SERVICE, self.money(c.annual_debt_service())),
            (keys::LABEL_ANNUAL_PROFIT, self.money(c.annual_profit_after_debt())),
        ];
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(self.t(keys::SECTION_ANNUAL));
            key_value_grid(ui, "summary_annual", &self.tr, &annual);
        });
        ui.add_space(8.0);
        ui.label(egui::RichText::new(self.t(keys::NOTE_INTERPRETATION)).small());
    }

    fn ui_score(&self, ui: &mut egui::Ui, a: &Analysis) {
        ui.heading(format!(
            "{}: {:.0}/100 ({})",
            self.t(keys::LABEL_SCORE),
            a.score.score,
            self.tr.category(a.score.category)
        ));
        ui.add(egui::ProgressBar::new((a.score.score / 100.0) as f32).show_percentage());
        ui.label(format!(
            "{}: {:.0}/100 ({})",
            self.t(keys::LABEL_STEADY_STATE_SCORE),
            a.steady_state_score.score,
            self.tr.category(a.steady_state_score.category)
        ));
        ui.label(egui::RichText::new(self.t(keys::NOTE_SCORING_BASIS)).small());
        ui.add_space(8.0);

        egui::Grid::new("score_grid")
            .striped(true)
            .num_columns(4)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.strong(self.t(keys::LABEL_METRIC));
                ui.strong(self.t(keys::LABEL_VALUE));
                ui.strong(self.t(keys::LABEL_POINTS));
                ui.strong(self.t(keys::LABEL_STATUS));
                ui.end_row();
                for f in &a.score.factors {
                    ui.label(self.tr.factor(f.factor));
                    ui.label(self.ratio(f.factor, f.value));
                    ui.label(format!("{:.0}/{:.0}", f.points, f.max_points));
                    ui.label(self.tr.status(f.status));
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        let strengths: Vec<String> = a
            .score
            .strengths()
            .map(|f| self.tr.finding(f.factor, f.status))
            .collect();
        if !strengths.is_empty() {
            ui.strong(self.t(keys::SECTION_STRENGTHS));
            for s in strengths {
                ui.colored_label(egui::Color32::from_rgb(40, 150, 70), format!("✔ {s}"));
            }
        }
        let warnings: Vec<String> = a
            .score
            .warnings()
            .map(|f| self.tr.finding(f.factor, f.status))
            .collect();
        if !warnings.is_empty() {
            ui.strong(self.t(keys::SECTION_WARNINGS));
            for s in warnings {
                ui.colored_label(egui::Color32::from_rgb(200, 120, 20), format!("⚠ {s}"));
            }
        }
    }

    fn ui_amortization(&self, ui: &mut egui::Ui, a: &Analysis) {
        if a.schedule.is_empty() {
            ui.label(self.t(keys::NO_DEBT));
            return;
        }
        let summary = [
            (keys::LABEL_INSTALLMENT, self.money(a.loan.installment)),
            (keys::LABEL_TOTAL_PAID, self.money(a.loan.total_paid)),
            (keys::LABEL_TOTAL_INTEREST, self.money(a.loan.total_interest)),
            (keys::LABEL_TOTAL_PRINCIPAL, self.money(a.loan.total_principal)),
        ];
        key_value_grid(ui, "loan_summary", &self.tr, &summary);
        ui.separator();
        egui::Grid::new("amortization_grid")
            .striped(true)
            .num_columns(6)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for key in [
                    keys::LABEL_MONTH,
                    keys::LABEL_OPENING,
                    keys::LABEL_INSTALLMENT,
                    keys::LABEL_INTEREST,
                    keys::LABEL_PRINCIPAL,
                    keys::LABEL_CLOSING,
                ] {
                    ui.strong(self.t(key));
                }
                ui.end_row();
                for r in &a.schedule {
                    ui.label(r.month.to_string());
                    ui.label(format::money(r.opening_balance, 2));
                    ui.label(format::money(r.installment, 2));
                    ui.label(format::money(r.interest, 2));
                    ui.label(format::money(r.principal, 2));
                    ui.label(format::money(r.closing_balance, 2));
                    ui.end_row();
                }
            });
    }

    fn ui_sensitivity(&self, ui: &mut egui::Ui, a: &Analysis) {
        let table = &a.sensitivity;
        let not_reached = self.t(keys::NOT_REACHED);
        let mut rows = vec![
            (
                keys::LABEL_BREAK_EVEN,
                format::break_even(table.break_even, &not_reached),
            ),
            (
                keys::LABEL_BREAK_EVEN_AFTER_DEBT,
                format::break_even(table.break_even_after_debt, &not_reached),
            ),
        ];
        if let Some(best) = table.best() {
            rows.push((
                keys::LABEL_BEST_SCENARIO,
                format!(
                    "{} ({})",
                    best.trips_per_month,
                    self.money(best.cashflow.profit_after_debt)
                ),
            ));
        }
        key_value_grid(ui, "sensitivity_summary", &self.tr, &rows);
        ui.add_space(8.0);
        ui.label(egui::RichText::new(self.t("gui.chart_caption")).small());
        profit_chart(ui, &table.rows);
        ui.add_space(8.0);

        egui::Grid::new("sensitivity_grid")
            .striped(true)
            .num_columns(6)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for key in [
                    keys::LABEL_TRIPS,
                    keys::LABEL_REVENUE,
                    keys::LABEL_PROFIT_AFTER_DEBT,
                    keys::LABEL_NET_MARGIN,
                    keys::LABEL_SCORE,
                    keys::LABEL_RECOMMENDATION,
                ] {
                    ui.strong(self.t(key));
                }
                ui.end_row();
                for r in &table.rows {
                    let trips = if r.is_current {
                        egui::RichText::new(format!("{} *", r.trips_per_month)).strong()
                    } else {
                        egui::RichText::new(r.trips_per_month.to_string())
                    };
                    ui.label(trips);
                    ui.label(self.money(r.cashflow.revenue));
                    ui.label(self.money(r.cashflow.profit_after_debt));
                    ui.label(self.ratio(Factor::ProfitMargin, r.score.ratios.profit_margin));
                    ui.label(format!("{:.0}", r.score.score));
                    ui.label(self.tr.category(r.score.category));
                    ui.end_row();
                }
            });
        ui.label(egui::RichText::new(self.t(keys::NOTE_CURRENT_MARKER)).small());
    }

    fn ui_fiscal_credit(&self, ui: &mut egui::Ui, a: &Analysis) {
        let fc = &a.fiscal_credit;
        let coverage = match fc.months_of_coverage {
            Some(m) => format!("{m:.1} {}", self.t(keys::MONTHS)),
            None => self.t(keys::NOT_AVAILABLE),
        };
        let rows = [
            (keys::LABEL_CREDIT_BASE, self.money(fc.base)),
            (keys::LABEL_CREDIT_TOTAL, self.money(fc.total)),
            (keys::LABEL_MONTHLY_IVA, self.money(fc.monthly_iva)),
            (keys::LABEL_COVERAGE_MONTHS, coverage),
            (keys::LABEL_MONTHLY_SAVINGS, self.money(fc.monthly_savings)),
        ];
        key_value_grid(ui, "fiscal_credit_summary", &self.tr, &rows);
        ui.add_space(8.0);
        ui.columns(2, |cols| {
            cols[0].strong(self.t(keys::LABEL_WITH_CREDIT));
            cashflow_grid(
                &mut cols[0],
                "fc_with",
                &self.tr,
                &fc.with_credit,
                &self.config.currency,
            );
            cols[1].strong(self.t(keys::LABEL_WITHOUT_CREDIT));
            cashflow_grid(
                &mut cols[1],
                "fc_without",
                &self.tr,
                &fc.without_credit,
                &self.config.currency,
            );
        });
    }

    fn ui_better_client(&self, ui: &mut egui::Ui, a: &Analysis) {
        let Some(bc) = &a.better_client else {
            ui.label(self.t("gui.better_client_enable"));
            return;
        };
        let note_key = match bc.scenario.mode {
            BetterClientMode::Additional => keys::NOTE_BETTER_CLIENT_ADDITIONAL,
            BetterClientMode::Reallocate => keys::NOTE_BETTER_CLIENT_REALLOCATE,
        };
        ui.label(self.tr.fill(
            note_key,
            &[
                ("trips", bc.scenario.trips.to_string()),
                ("rate", format::money(bc.scenario.rate, 2)),
                ("base_rate", format::money(a.input.rate_per_unit, 2)),
            ],
        ));
        ui.add_space(8.0);
        egui::Grid::new("better_client_compare")
            .striped(true)
            .num_columns(4)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for key in [
                    keys::LABEL_METRIC,
                    keys::LABEL_BASELINE,
                    keys::LABEL_BETTER,
                    keys::LABEL_CHANGE,
                ] {
                    ui.strong(self.t(key));
                }
                ui.end_row();
                for (key, before, after) in [
                    (keys::LABEL_REVENUE, bc.baseline.revenue, bc.adjusted.revenue),
                    (keys::LABEL_TOTAL_TAXES, bc.baseline.total_taxes, bc.adjusted.total_taxes),
                    (
                        keys::LABEL_PROFIT_AFTER_DEBT,
                        bc.baseline.profit_after_debt,
                        bc.adjusted.profit_after_debt,
                    ),
                ] {
                    ui.label(self.t(key));
                    ui.label(self.money(before));
                    ui.label(self.money(after));
                    ui.label(self.money(after - before));
                    ui.end_row();
                }
                ui.label(self.t(keys::LABEL_SCORE));
                ui.label(format!("{:.0}", bc.baseline_score.score));
                ui.label(format!("{:.0}", bc.adjusted_score.score));
                ui.label(format!("{:+.0}", bc.score_delta()));
                ui.end_row();
                ui.label(self.t(keys::LABEL_RECOMMENDATION));
                ui.label(self.tr.category(bc.baseline_score.category));
                ui.label(self.tr.category(bc.adjusted_score.category));
                ui.end_row();
            });
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(self.t("gui.language"));
        egui::ComboBox::from_id_source("lang_choice")
            .selected_text(&self.lang_input)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.lang_input, "auto".into(), "auto");
                ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                ui.selectable_value(&mut self.lang_input, "es".into(), "Español");
            });
        ui.horizontal(|ui| {
            ui.label(self.t("gui.currency"));
            ui.text_edit_singleline(&mut self.config.currency);
        });
        ui.separator();
        if ui.button(self.t("gui.save_settings")).clicked() {
            self.config.language = self.lang_input.clone();
            let resolved = i18n::resolve_language("auto", Some(self.config.language.as_str()));
            self.tr = Translator::new_with_pack(&resolved, self.config.pack_dir());
            self.config.scenario = self.input.clone();
            self.status = Some(match self.config.save(&self.config_path) {
                Ok(()) => self.t("gui.settings_saved"),
                Err(e) => format!("{}: {e}", self.t(keys::ERROR_PREFIX)),
            });
        }
        ui.separator();
        ui.label(self.t("gui.font_path"));
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.custom_font_path);
            if ui.button(self.t("gui.load_font")).clicked() {
                self.status = Some(match load_custom_font(ui.ctx(), &self.custom_font_path) {
                    Ok(()) => self.custom_font_path.clone(),
                    Err(e) => e,
                });
            }
        });
    }

    fn export_report(&mut self) {
        let Ok(a) = &self.analysis else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("Markdown", &["md"])
            .set_file_name(DEFAULT_REPORT_PATH)
            .save_file()
        else {
            return;
        };
        let data = ReportData::new(a, &self.config.currency);
        self.status = Some(match report::write_report(&path, &data, &self.tr) {
            Ok(()) => format!("{} {}", self.t("gui.report_saved"), path.display()),
            Err(e) => format!("{}: {e}", self.t(keys::ERROR_PREFIX)),
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.t("gui.app_title"));
                ui.separator();
                let can_export = self.analysis.is_ok();
                if ui
                    .add_enabled(can_export, egui::Button::new(self.t("gui.export_report")))
                    .clicked()
                {
                    self.export_report();
                }
                if let Some(msg) = &self.status {
                    ui.label(msg);
                }
            });
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, self.tr.t(tab.key()));
                }
            });
        });

        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(300.0)
            .default_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.ui_inputs(ui) {
                        self.recompute();
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if self.tab == Tab::Settings {
                        self.ui_settings(ui);
                        return;
                    }
                    let analysis = match &self.analysis {
                        Ok(a) => a,
                        Err(e) => {
                            ui.colored_label(
                                egui::Color32::RED,
                                format!("{} {e}", self.t(keys::ERROR_INPUT_REJECTED)),
                            );
                            return;
                        }
                    };
                    match self.tab {
                        Tab::Summary => self.ui_summary(ui, analysis),
                        Tab::Score => self.ui_score(ui, analysis),
                        Tab::Amortization => self.ui_amortization(ui, analysis),
                        Tab::Sensitivity => self.ui_sensitivity(ui, analysis),
                        Tab::FiscalCredit => self.ui_fiscal_credit(ui, analysis),
                        Tab::BetterClient => self.ui_better_client(ui, analysis),
                        Tab::Settings => {}
                    }
                });
        });
    }
}

fn key_value_grid(ui: &mut egui::Ui, id: &str, tr: &Translator, rows: &[(&str, String)]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for (key, value) in rows {
                ui.label(tr.t(key));
                ui.label(value);
                ui.end_row();
            }
        });
}

fn cashflow_grid(ui: &mut egui::Ui, id: &str, tr: &Translator, c: &CashflowResult, currency: &str) {
    let rows = [
        (keys::LABEL_REVENUE, c.revenue),
        (keys::LABEL_FUEL, c.fuel_cost),
        (keys::LABEL_TOLLS, c.toll_cost),
        (keys::LABEL_OPERATING_COSTS, c.operating_costs),
        (keys::LABEL_IVA, c.iva),
        (keys::LABEL_IT, c.it),
        (keys::LABEL_TOTAL_TAXES, c.total_taxes),
        (keys::LABEL_PROFIT_BEFORE_DEBT, c.profit_before_debt),
        (keys::LABEL_INSTALLMENT, c.debt_service),
        (keys::LABEL_PROFIT_AFTER_DEBT, c.profit_after_debt),
    ];
    let rows: Vec<(&str, String)> = rows
        .iter()
        .map(|(k, v)| (*k, format::currency(*v, currency)))
        .collect();
    key_value_grid(ui, id, tr, &rows);
}

/// 운행 수별 상환 후 이익 막대 그래프.
fn profit_chart(ui: &mut egui::Ui, rows: &[SensitivityRow]) {
    let height = 220.0;
    let (response, painter) = ui.allocate_painter(
        egui::vec2(ui.available_width(), height),
        egui::Sense::hover(),
    );
    let rect = response.rect;
    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
    if rows.is_empty() {
        return;
    }

    let max_abs = rows
        .iter()
        .map(|r| r.cashflow.profit_after_debt.abs())
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let label_band = 16.0;
    let plot_top = rect.top() + 6.0;
    let plot_bottom = rect.bottom() - label_band;
    let zero_y = (plot_top + plot_bottom) / 2.0;
    let half = (plot_bottom - plot_top) / 2.0;
    let slot = rect.width() / rows.len() as f32;
    let text_color = ui.visuals().text_color();

    painter.line_segment(
        [
            egui::pos2(rect.left(), zero_y),
            egui::pos2(rect.right(), zero_y),
        ],
        egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
    );

    for (i, r) in rows.iter().enumerate() {
        let profit = r.cashflow.profit_after_debt;
        let h = (profit / max_abs) as f32 * half;
        let x0 = rect.left() + slot * i as f32 + slot * 0.15;
        let x1 = x0 + slot * 0.7;
        let bar = if h >= 0.0 {
            egui::Rect::from_min_max(egui::pos2(x0, zero_y - h), egui::pos2(x1, zero_y))
        } else {
            egui::Rect::from_min_max(egui::pos2(x0, zero_y), egui::pos2(x1, zero_y - h))
        };
        let color = if profit >= 0.0 {
            egui::Color32::from_rgb(60, 170, 90)
        } else {
            egui::Color32::from_rgb(210, 70, 60)
        };
        painter.rect_filled(bar, 1.0, color);
        if r.is_current {
            painter.rect_stroke(bar.expand(1.5), 1.0, egui::Stroke::new(1.5, text_color));
        }
        painter.text(
            egui::pos2((x0 + x1) / 2.0, plot_bottom + 2.0),
            egui::Align2::CENTER_TOP,
            r.trips_per_month.to_string(),
            egui::FontId::proportional(10.0),
            text_color,
        );
    }
}
