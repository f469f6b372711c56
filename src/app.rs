use std::io::Write;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, ConfigError};
use crate::i18n::Translator;
use crate::input::{self, InputProvider};
use crate::power::{self, PowerError, PowerMeasurementInput, PowerResult};
use crate::ui_cli;
use crate::waveform::{self, PlotSink, RenderError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 숫자로 변환할 수 없는 입력
    #[error("{field} 값을 숫자로 변환할 수 없습니다: '{text}'")]
    InvalidInput { field: &'static str, text: String },
    /// 전력 계산 오류
    #[error("{0}")]
    Power(#[from] PowerError),
    /// 그래프 생성 오류
    #[error("{0}")]
    Render(#[from] RenderError),
}

/// 경계에서 사용자에게 보여줄 오류 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 숫자 형식 오류나 역률 범위 오류
    InvalidInput,
    /// 그 밖의 모든 오류
    Unexpected,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput { .. } | AppError::Power(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Unexpected,
        }
    }
}

/// 한 번의 계산 세션을 실행한다: 입력 → 계산 → 결과 출력 → 그래프 생성.
///
/// 계산이 실패하면 결과 블록은 출력하지 않는다. `sink`가 `None`이면 그래프 단계를 건너뛴다.
pub fn run_session(
    provider: &mut dyn InputProvider,
    out: &mut dyn Write,
    config: &Config,
    tr: &Translator,
    sink: Option<&mut dyn PlotSink>,
) -> Result<PowerResult, AppError> {
    writeln!(out, "{}", ui_cli::format_banner(tr))?;
    out.flush()?;

    let m = input::read_measurement(provider, tr, config.default_frequency_hz)?;
    let measurement =
        PowerMeasurementInput::new(m.voltage_rms, m.current_rms, m.power_factor, m.frequency_hz)?;
    let result = power::calculate_power_with_target(&measurement, config.target_power_factor)?;
    let correction = power::correction_summary(&measurement, config.target_power_factor)?;
    info!(
        apparent_va = result.apparent_power_va,
        active_w = result.active_power_w,
        reactive_var = result.reactive_power_var,
        capacitance_uf = result.required_capacitance_uf,
        "calculation finished"
    );

    write!(
        out,
        "{}",
        ui_cli::format_results(&result, &correction, &config.display_units, tr)
    )?;
    out.flush()?;

    if let Some(sink) = sink {
        waveform::render_waveforms(
            m.voltage_rms,
            m.current_rms,
            m.power_factor,
            m.frequency_hz,
            config.waveform,
            sink,
        )
        .map_err(|e| {
            warn!(error = %e, "rendering failed");
            e
        })?;
    }
    Ok(result)
}
