use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::{self, Analysis};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::investment::{InputError, InputModel};
use crate::report::{self, ReportData};
use crate::sensitivity::TripRange;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 입력 검증 오류
    #[error("입력 오류: {0}")]
    Input(#[from] InputError),
    /// 결과 직렬화 오류
    #[error("직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// CLI/GUI가 공유하는 실행 상태. 현재 시나리오 하나와 설정, 번역기를 들고 있다.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub input: InputModel,
    pub tr: Translator,
}

impl Session {
    pub fn new(config: Config, config_path: impl Into<PathBuf>, input: InputModel, tr: Translator) -> Self {
        Self {
            config,
            config_path: config_path.into(),
            input,
            tr,
        }
    }

    /// 현재 운행 수 주변의 기본 민감도 구간.
    pub fn default_range(&self) -> TripRange {
        TripRange::around(self.input.trips_per_month, &self.config.sensitivity)
    }

    /// 기본 구간으로 전체 분석을 실행한다.
    pub fn evaluate(&self) -> Result<Analysis, AppError> {
        self.evaluate_with_range(&self.default_range())
    }

    pub fn evaluate_with_range(&self, range: &TripRange) -> Result<Analysis, AppError> {
        Ok(analysis::evaluate(&self.input, &self.config.scoring, range)?)
    }

    /// 언어를 바꾸고 설정에 기록한다.
    pub fn set_language(&mut self, code: &str) {
        let resolved = i18n::resolve_language(code, None);
        self.tr = Translator::new_with_pack(&resolved, self.config.pack_dir());
        self.config.language = resolved;
    }

    /// 현재 시나리오를 기본 시나리오로 저장한다.
    pub fn save_config(&mut self) -> Result<(), AppError> {
        self.config.scenario = self.input.clone();
        self.config.save(&self.config_path)?;
        Ok(())
    }

    /// 보고서를 렌더링해 파일로 쓴다.
    pub fn write_report(&self, path: &Path) -> Result<(), AppError> {
        let analysis = self.evaluate()?;
        let data = ReportData::new(&analysis, &self.config.currency);
        report::write_report(path, &data, &self.tr)?;
        Ok(())
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(session: &mut Session) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(&session.tr)? {
            MenuChoice::Summary => ui_cli::handle_summary(session)?,
            MenuChoice::EditInputs => ui_cli::handle_edit_inputs(session)?,
            MenuChoice::Schedule => ui_cli::handle_schedule(session)?,
            MenuChoice::Sensitivity => ui_cli::handle_sensitivity(session)?,
            MenuChoice::Report => ui_cli::handle_report(session)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(session)?;
                session.save_config()?;
                println!("{}", session.tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                println!("{}", session.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
