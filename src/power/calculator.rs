use thiserror::Error;
use tracing::debug;

use super::correction::required_capacitance_farads;
use super::{is_valid_power_factor, round2};

/// 주파수를 입력하지 않았을 때 사용하는 계통 주파수(Hz).
pub const DEFAULT_FREQUENCY_HZ: f64 = 50.0;
/// 커패시터 보상 목표 역률 기본값.
pub const DEFAULT_TARGET_POWER_FACTOR: f64 = 0.95;

/// 전력 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PowerError {
    /// 측정 역률이 (0, 1] 범위를 벗어남
    #[error("역률은 0보다 크고 1 이하여야 합니다 (입력값: {0})")]
    InvalidPowerFactor(f64),
    /// 보상 목표 역률이 (0, 1] 범위를 벗어남
    #[error("목표 역률은 0보다 크고 1 이하여야 합니다 (입력값: {0})")]
    InvalidTarget(f64),
}

/// 단상 교류 측정값. 역률은 생성 시점에 검증되므로 이 타입이 존재하면 항상 (0, 1] 범위다.
///
/// 전압·전류·주파수는 검증하지 않는다. 0 이하 값은 오류 없이 퇴화된 결과를 만든다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerMeasurementInput {
    voltage_rms: f64,
    current_rms: f64,
    power_factor: f64,
    frequency_hz: f64,
}

impl PowerMeasurementInput {
    /// 측정값을 생성한다. 역률이 (0, 1] 밖이면 `InvalidPowerFactor`.
    pub fn new(
        voltage_rms: f64,
        current_rms: f64,
        power_factor: f64,
        frequency_hz: f64,
    ) -> Result<Self, PowerError> {
        if !is_valid_power_factor(power_factor) {
            return Err(PowerError::InvalidPowerFactor(power_factor));
        }
        Ok(Self {
            voltage_rms,
            current_rms,
            power_factor,
            frequency_hz,
        })
    }

    /// 기본 주파수(50 Hz)로 측정값을 생성한다.
    pub fn with_default_frequency(
        voltage_rms: f64,
        current_rms: f64,
        power_factor: f64,
    ) -> Result<Self, PowerError> {
        Self::new(voltage_rms, current_rms, power_factor, DEFAULT_FREQUENCY_HZ)
    }

    pub fn voltage_rms(&self) -> f64 {
        self.voltage_rms
    }

    pub fn current_rms(&self) -> f64 {
        self.current_rms
    }

    pub fn power_factor(&self) -> f64 {
        self.power_factor
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    /// 위상각(rad). 전류가 전압보다 이 각도만큼 뒤진다.
    pub fn phase_angle_rad(&self) -> f64 {
        self.power_factor.acos()
    }

    /// 피상 전력 S = V·I (VA)
    pub fn apparent_power_va(&self) -> f64 {
        self.voltage_rms * self.current_rms
    }

    /// 유효 전력 P = S·pf (W)
    pub fn active_power_w(&self) -> f64 {
        self.apparent_power_va() * self.power_factor
    }

    /// 무효 전력 Q = S·sqrt(1 - pf²) (VAR)
    pub fn reactive_power_var(&self) -> f64 {
        self.apparent_power_va() * (1.0 - self.power_factor.powi(2)).sqrt()
    }
}

/// 전력 계산 결과. 모든 수치는 소수점 둘째 자리로 반올림되며 역률만 입력값 그대로 전달된다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerResult {
    /// 피상 전력(VA)
    pub apparent_power_va: f64,
    /// 유효 전력(W)
    pub active_power_w: f64,
    /// 무효 전력(VAR). 역률 1이면 정확히 0.
    pub reactive_power_var: f64,
    /// 위상각(°, 지상)
    pub phase_angle_deg: f64,
    /// 측정 역률(반올림하지 않음)
    pub power_factor: f64,
    /// 목표 역률 달성에 필요한 병렬 커패시터(µF). 보상이 필요 없으면 0.
    pub required_capacitance_uf: f64,
}

impl PowerResult {
    /// 커패시터 보상이 필요한지 여부.
    pub fn needs_correction(&self) -> bool {
        self.required_capacitance_uf > 0.0
    }
}

/// 전압, 전류, 역률, 주파수로부터 전력량과 보상 커패시터를 계산한다. 목표 역률은 0.95.
pub fn calculate_power(
    voltage_rms: f64,
    current_rms: f64,
    power_factor: f64,
    frequency_hz: f64,
) -> Result<PowerResult, PowerError> {
    let input = PowerMeasurementInput::new(voltage_rms, current_rms, power_factor, frequency_hz)?;
    calculate_power_with_target(&input, DEFAULT_TARGET_POWER_FACTOR)
}

/// 목표 역률을 지정하여 전력량을 계산한다.
pub fn calculate_power_with_target(
    input: &PowerMeasurementInput,
    target_power_factor: f64,
) -> Result<PowerResult, PowerError> {
    if !is_valid_power_factor(target_power_factor) {
        return Err(PowerError::InvalidTarget(target_power_factor));
    }
    let pf = input.power_factor();
    let s = input.apparent_power_va();
    let p = input.active_power_w();
    let theta = input.phase_angle_rad();

    // 역률 1에서 sqrt(1 - 1²)의 부동소수점 잔차가 남지 않도록 0으로 고정
    let q = if pf < 1.0 {
        round2(input.reactive_power_var())
    } else {
        0.0
    };

    let capacitance_uf = if pf < target_power_factor && p > 0.0 {
        required_capacitance_farads(
            p,
            theta,
            target_power_factor,
            input.frequency_hz(),
            input.voltage_rms(),
        ) * 1e6
    } else {
        0.0
    };

    let result = PowerResult {
        apparent_power_va: round2(s),
        active_power_w: round2(p),
        reactive_power_var: q,
        phase_angle_deg: round2(theta.to_degrees()),
        power_factor: pf,
        required_capacitance_uf: round2(capacitance_uf),
    };
    debug!(?input, ?result, target_power_factor, "power calculated");
    Ok(result)
}
