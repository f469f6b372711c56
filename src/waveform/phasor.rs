use super::{phase_angle_rad, RenderError};
use crate::units::display_number;

/// 전류 벡터를 전압 벡터 길이의 이 비율로 늘려 그린다.
pub const CURRENT_DISPLAY_RATIO: f64 = 0.7;
/// 축 범위 = 전압 벡터 길이 × 이 값.
pub const AXIS_MARGIN: f64 = 1.3;

/// 크기와 각도(rad)로 표현한 페이저.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phasor {
    pub magnitude: f64,
    pub angle_rad: f64,
}

impl Phasor {
    /// 직교좌표 끝점 [x, y].
    pub fn tip(&self) -> [f64; 2] {
        [
            self.magnitude * self.angle_rad.cos(),
            self.magnitude * self.angle_rad.sin(),
        ]
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_rad.to_degrees()
    }
}

/// 페이저도 데이터. 전류 벡터는 가독성을 위해 `scale_factor`만큼 늘려 표시하며,
/// `current`에는 물리적 크기가 그대로 남는다.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasorDiagram {
    /// 기준 전압 페이저(0°)
    pub voltage: Phasor,
    /// 실제 전류 페이저(−θ, 지상)
    pub current: Phasor,
    /// 전류 벡터 표시 배율 (V / I)·0.7
    pub scale_factor: f64,
    /// x, y 축 공통 범위(±)
    pub axis_limit: f64,
    pub voltage_label: String,
    pub current_label: String,
}

impl PhasorDiagram {
    pub fn voltage_tip(&self) -> [f64; 2] {
        self.voltage.tip()
    }

    /// 배율을 적용한 전류 벡터 끝점.
    pub fn current_display_tip(&self) -> [f64; 2] {
        let [x, y] = self.current.tip();
        [x * self.scale_factor, y * self.scale_factor]
    }
}

/// 페이저도를 구성한다. 전류가 0이면 표시 배율이 무한대가 되어 `DegenerateScale`.
pub fn build_phasor(
    voltage_rms: f64,
    current_rms: f64,
    power_factor: f64,
) -> Result<PhasorDiagram, RenderError> {
    let theta = phase_angle_rad(power_factor)?;
    let scale_factor = (voltage_rms / current_rms) * CURRENT_DISPLAY_RATIO;
    if !scale_factor.is_finite() {
        return Err(RenderError::DegenerateScale {
            voltage_rms,
            current_rms,
        });
    }
    Ok(PhasorDiagram {
        voltage: Phasor {
            magnitude: voltage_rms,
            angle_rad: 0.0,
        },
        current: Phasor {
            magnitude: current_rms,
            angle_rad: -theta,
        },
        scale_factor,
        axis_limit: voltage_rms * AXIS_MARGIN,
        voltage_label: format!("Voltage: {}V", display_number(voltage_rms)),
        current_label: format!(
            "Current (Scaled x{scale_factor:.1}): {}A",
            display_number(current_rms)
        ),
    })
}
