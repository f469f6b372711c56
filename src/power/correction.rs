use std::f64::consts::PI;

use tracing::debug;

use super::calculator::{PowerError, PowerMeasurementInput};
use super::{is_valid_power_factor, round2};

/// 역률 보상 커패시터 용량(F)을 계산한다.
///
/// C = P·(tanφ1 − tanφ2) / (2π·f·V²)
/// - φ1: 현재 위상각(rad), φ2: 목표 역률의 위상각
pub fn required_capacitance_farads(
    active_power_w: f64,
    phase_angle_rad: f64,
    target_power_factor: f64,
    frequency_hz: f64,
    voltage_rms: f64,
) -> f64 {
    let phi2 = target_power_factor.acos();
    active_power_w * (phase_angle_rad.tan() - phi2.tan())
        / (2.0 * PI * frequency_hz * voltage_rms.powi(2))
}

/// 커패시터 보상 전후의 전력 수지.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionSummary {
    /// 목표 역률
    pub target_power_factor: f64,
    /// 보상 필요 여부
    pub needed: bool,
    /// 커패시터가 공급해야 하는 무효전력 Qc = P·(tanφ1 − tanφ2) (VAR)
    pub capacitor_reactive_power_var: f64,
    /// 보상 후 남는 무효전력(VAR)
    pub reactive_power_after_var: f64,
    /// 보상 후 피상전력(VA)
    pub apparent_power_after_va: f64,
    /// 필요 커패시터(µF)
    pub capacitance_uf: f64,
}

/// 목표 역률까지 보상했을 때의 전력 수지를 계산한다.
/// 이미 목표 이상이거나 유효전력이 0 이하이면 보상 없이 현재 값을 그대로 돌려준다.
pub fn correction_summary(
    input: &PowerMeasurementInput,
    target_power_factor: f64,
) -> Result<CorrectionSummary, PowerError> {
    if !is_valid_power_factor(target_power_factor) {
        return Err(PowerError::InvalidTarget(target_power_factor));
    }
    let p = input.active_power_w();
    let q = if input.power_factor() < 1.0 {
        input.reactive_power_var()
    } else {
        0.0
    };
    let needed = input.power_factor() < target_power_factor && p > 0.0;
    if !needed {
        return Ok(CorrectionSummary {
            target_power_factor,
            needed,
            capacitor_reactive_power_var: 0.0,
            reactive_power_after_var: round2(q),
            apparent_power_after_va: round2(input.apparent_power_va()),
            capacitance_uf: 0.0,
        });
    }

    let phi1 = input.phase_angle_rad();
    let phi2 = target_power_factor.acos();
    let qc = p * (phi1.tan() - phi2.tan());
    let q_after = q - qc;
    let c = required_capacitance_farads(
        p,
        phi1,
        target_power_factor,
        input.frequency_hz(),
        input.voltage_rms(),
    );
    let summary = CorrectionSummary {
        target_power_factor,
        needed,
        capacitor_reactive_power_var: round2(qc),
        reactive_power_after_var: round2(q_after),
        apparent_power_after_va: round2((p * p + q_after * q_after).sqrt()),
        capacitance_uf: round2(c * 1e6),
    };
    debug!(?summary, "correction sized");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacitor_supplies_difference_of_reactive_power() {
        let input = PowerMeasurementInput::new(230.0, 5.0, 0.8, 50.0).unwrap();
        let s = correction_summary(&input, 0.95).unwrap();
        assert!(s.needed);
        // P·tanφ1 = 690, P·tanφ2 ≈ 302.39
        assert!((s.capacitor_reactive_power_var - 387.61).abs() < 0.02);
        assert!((s.reactive_power_after_var - 302.39).abs() < 0.02);
        // 보상 후 S = P / 0.95
        assert!((s.apparent_power_after_va - 920.0 / 0.95).abs() < 0.02);
        assert_eq!(s.capacitance_uf, 23.32);
    }

    #[test]
    fn no_correction_above_target() {
        let input = PowerMeasurementInput::new(230.0, 5.0, 0.96, 50.0).unwrap();
        let s = correction_summary(&input, 0.95).unwrap();
        assert!(!s.needed);
        assert_eq!(s.capacitor_reactive_power_var, 0.0);
        assert_eq!(s.apparent_power_after_va, 1150.0);
    }

    #[test]
    fn capacitance_scales_inversely_with_frequency() {
        let c50 = required_capacitance_farads(920.0, 0.8f64.acos(), 0.95, 50.0, 230.0);
        let c60 = required_capacitance_farads(920.0, 0.8f64.acos(), 0.95, 60.0, 230.0);
        assert!((c50 / c60 - 1.2).abs() < 1e-12);
    }
}
