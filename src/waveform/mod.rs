//! 전압/전류 순시 파형과 페이저도 생성 모듈 모음.
//! 수치 데이터만 만들고 실제 그리기는 `PlotSink` 구현체에 맡긴다.

pub mod phasor;
pub mod series;
pub mod sink;

pub use phasor::*;
pub use series::*;
pub use sink::*;

use thiserror::Error;

/// 파형/페이저 생성 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// 역률이 (0, 1] 밖이라 위상각을 정할 수 없음
    #[error("역률은 0보다 크고 1 이하여야 합니다 (입력값: {0})")]
    InvalidPowerFactor(f64),
    /// 전류 벡터 표시 배율이 유한하지 않음(전류 0 등)
    #[error("페이저 표시 배율을 계산할 수 없습니다 (V={voltage_rms}, I={current_rms})")]
    DegenerateScale { voltage_rms: f64, current_rms: f64 },
    /// 샘플 수·주기 수 설정 오류
    #[error("파형 설정 오류: {0}")]
    InvalidSettings(&'static str),
    /// 그래프 창 백엔드 오류
    #[error("그래프 창 오류: {0}")]
    Backend(String),
}

fn phase_angle_rad(power_factor: f64) -> Result<f64, RenderError> {
    if !crate::power::is_valid_power_factor(power_factor) {
        return Err(RenderError::InvalidPowerFactor(power_factor));
    }
    Ok(power_factor.acos())
}
