use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::power::{is_valid_power_factor, DEFAULT_FREQUENCY_HZ, DEFAULT_TARGET_POWER_FACTOR};
use crate::units::{CapacitanceUnit, PowerUnit};
use crate::waveform::WaveformSettings;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 결과 표시 단위 설정을 담는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub power: PowerUnit,
    pub capacitance: CapacitanceUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            power: PowerUnit::Base,
            capacitance: CapacitanceUnit::Microfarad,
        }
    }
}

/// 애플리케이션 설정을 표현한다. 파일에 빠진 항목은 기본값으로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(ko/en/auto)
    pub language: String,
    /// 보상 목표 역률
    pub target_power_factor: f64,
    /// 주파수 입력을 비워 두었을 때 쓰는 값(Hz)
    pub default_frequency_hz: f64,
    /// 계산 후 그래프 창을 띄울지 여부
    pub show_plot: bool,
    /// GUI에 등록할 사용자 폰트(.ttf/.otf). 한글 표시용.
    pub font_path: Option<String>,
    /// 파형 그래프 설정
    pub waveform: WaveformSettings,
    /// 결과 표시 단위
    pub display_units: DisplayUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            target_power_factor: DEFAULT_TARGET_POWER_FACTOR,
            default_frequency_hz: DEFAULT_FREQUENCY_HZ,
            show_plot: true,
            font_path: None,
            waveform: WaveformSettings::default(),
            display_units: DisplayUnits::default(),
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
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 값 범위 오류
    #[error("잘못된 설정값: {0}")]
    Invalid(String),
}

impl Config {
    /// 값 범위를 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_power_factor(self.target_power_factor) {
            return Err(ConfigError::Invalid(format!(
                "target_power_factor = {} (0 < pf <= 1)",
                self.target_power_factor
            )));
        }
        if !(self.default_frequency_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default_frequency_hz = {}",
                self.default_frequency_hz
            )));
        }
        self.waveform
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// 명령줄에서 받은 목표 역률로 덮어쓴 뒤 다시 검사한다.
    pub fn with_target_power_factor(mut self, target: f64) -> Result<Self, ConfigError> {
        self.target_power_factor = target;
        self.validate()?;
        Ok(self)
    }

    /// 설정을 지정한 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }
}

/// TOML 문자열에서 설정을 읽고 검사한다.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(content)?;
    cfg.validate()?;
    Ok(cfg)
}

/// 설정 파일을 로드한다. 파일이 없으면 기본 설정을 돌려준다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = parse_config(&content)?;
        debug!(path = %path.display(), ?cfg, "config loaded");
        Ok(cfg)
    } else {
        debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::default())
    }
}
