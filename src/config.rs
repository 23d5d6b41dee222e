use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::investment::InputModel;
use crate::scoring::ScoringPolicy;
use crate::sensitivity::SensitivitySettings;

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(ko/en/es/auto)
    pub language: String,
    /// 외부 언어팩 디렉터리(선택)
    pub language_pack_dir: Option<String>,
    /// 금액 뒤에 붙는 통화 표기
    pub currency: String,
    /// 시작 시 불러오는 기본 시나리오
    pub scenario: InputModel,
    /// 민감도 기본 구간
    pub sensitivity: SensitivitySettings,
    /// 점수 기준표
    pub scoring: ScoringPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            currency: "Bs".to_string(),
            scenario: InputModel::default(),
            sensitivity: SensitivitySettings::default(),
            scoring: ScoringPolicy::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성해 저장한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::info!("config loaded from {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        log::info!("default config written to {}", path.display());
        Ok(cfg)
    }
}

/// 시나리오만 담긴 TOML 파일(InputModel 필드)을 읽는다. 빠진 필드는 기본값으로 채운다.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<InputModel, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let scenario: InputModel = toml::from_str(&content)?;
    log::info!("scenario loaded from {}", path.display());
    Ok(scenario)
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 언어팩 디렉터리를 `&str`로.
    pub fn pack_dir(&self) -> Option<&str> {
        self.language_pack_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
language = "es"

[scenario]
trips_per_month = 18
"#,
        )
        .expect("parse");
        assert_eq!(cfg.language, "es");
        assert_eq!(cfg.currency, "Bs");
        assert_eq!(cfg.scenario.trips_per_month, 18);
        assert_eq!(cfg.scenario.truck_price, InputModel::default().truck_price);
        assert_eq!(cfg.sensitivity, SensitivitySettings::default());
    }

    #[test]
    fn default_config_round_trips() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn better_client_table_is_read() {
        let scenario: InputModel = toml::from_str(
            r#"
[better_client]
trips = 5
rate = 110.0
mode = "reallocate"
"#,
        )
        .expect("parse");
        let bc = scenario.better_client.expect("better client");
        assert_eq!(bc.trips, 5);
        assert_eq!(bc.mode, crate::investment::BetterClientMode::Reallocate);
    }
}
