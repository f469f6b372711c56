use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};

use super::{phase_angle_rad, RenderError};

/// 파형 그래프 샘플링 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformSettings {
    /// 표시할 주기 수
    pub cycles: f64,
    /// 전체 구간 샘플 수(양 끝점 포함)
    pub samples: usize,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self {
            cycles: 3.0,
            samples: 1000,
        }
    }
}

impl WaveformSettings {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.samples < 2 {
            return Err(RenderError::InvalidSettings("샘플 수는 2 이상이어야 합니다."));
        }
        if !(self.cycles > 0.0) {
            return Err(RenderError::InvalidSettings("주기 수는 0보다 커야 합니다."));
        }
        Ok(())
    }
}

/// 시간축(ms)과 순시 전압/전류 값.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaveformSeries {
    pub time_ms: Vec<f64>,
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
}

impl WaveformSeries {
    pub fn len(&self) -> usize {
        self.time_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_ms.is_empty()
    }

    /// 순시 전력 p(t) = v(t)·i(t) (W)
    pub fn instantaneous_power(&self) -> Vec<f64> {
        self.voltage
            .iter()
            .zip(&self.current)
            .map(|(v, i)| v * i)
            .collect()
    }

    /// 순시 전력의 평균(W). 마지막 끝점은 첫 점과 같은 위상이므로 제외한다.
    /// 정수 주기를 샘플링했다면 유효전력 P와 일치한다.
    pub fn average_power(&self) -> f64 {
        let p = self.instantaneous_power();
        if p.len() < 2 {
            return p.first().copied().unwrap_or(0.0);
        }
        let body = &p[..p.len() - 1];
        body.iter().sum::<f64>() / body.len() as f64
    }

    /// (시간, 전압) 점 목록.
    pub fn voltage_points(&self) -> Vec<[f64; 2]> {
        zip_points(&self.time_ms, &self.voltage)
    }

    /// (시간, 전류) 점 목록.
    pub fn current_points(&self) -> Vec<[f64; 2]> {
        zip_points(&self.time_ms, &self.current)
    }

    /// (시간, 순시전력) 점 목록.
    pub fn power_points(&self) -> Vec<[f64; 2]> {
        zip_points(&self.time_ms, &self.instantaneous_power())
    }
}

fn zip_points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter().zip(y).map(|(&x, &y)| [x, y]).collect()
}

/// `start`부터 `end`까지 양 끝을 포함해 `n`개의 등간격 값을 만든다.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|k| start + k as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// 순시 파형을 샘플링한다.
///
/// v(t) = V·√2·sin(ωt), i(t) = I·√2·sin(ωt − θ), θ = acos(pf)
/// 구간은 `cycles / f`초이며 시간축은 ms 단위로 돌려준다.
pub fn sample_waveforms(
    voltage_rms: f64,
    current_rms: f64,
    power_factor: f64,
    frequency_hz: f64,
    settings: WaveformSettings,
) -> Result<WaveformSeries, RenderError> {
    settings.validate()?;
    let theta = phase_angle_rad(power_factor)?;
    let omega = 2.0 * PI * frequency_hz;
    let t = linspace(0.0, settings.cycles / frequency_hz, settings.samples);

    let v_peak = voltage_rms * SQRT_2;
    let i_peak = current_rms * SQRT_2;
    let voltage = t.iter().map(|&t| v_peak * (omega * t).sin()).collect();
    let current = t.iter().map(|&t| i_peak * (omega * t - theta).sin()).collect();
    let time_ms = t.iter().map(|&t| t * 1000.0).collect();

    Ok(WaveformSeries {
        time_ms,
        voltage,
        current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let t = linspace(0.0, 0.06, 1000);
        assert_eq!(t.len(), 1000);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[999], 0.06);
    }

    #[test]
    fn three_cycles_at_50hz_span_60ms() {
        let s = sample_waveforms(230.0, 5.0, 0.8, 50.0, WaveformSettings::default()).unwrap();
        assert_eq!(s.len(), 1000);
        assert!((s.time_ms[999] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn peaks_are_rms_times_sqrt2() {
        let s = sample_waveforms(230.0, 5.0, 1.0, 50.0, WaveformSettings::default()).unwrap();
        let v_max = s.voltage.iter().cloned().fold(f64::MIN, f64::max);
        let i_max = s.current.iter().cloned().fold(f64::MIN, f64::max);
        assert!((v_max - 230.0 * SQRT_2).abs() < 0.01 * 230.0);
        assert!((i_max - 5.0 * SQRT_2).abs() < 0.01 * 5.0);
    }

    #[test]
    fn current_lags_voltage() {
        // t=0에서 v=0이고 지상 전류는 음수로 시작한다.
        let s = sample_waveforms(230.0, 5.0, 0.5, 50.0, WaveformSettings::default()).unwrap();
        assert_eq!(s.voltage[0], 0.0);
        let expected = 5.0 * SQRT_2 * (-(0.5f64.acos())).sin();
        assert!((s.current[0] - expected).abs() < 1e-12);
        assert!(s.current[0] < 0.0);
    }

    #[test]
    fn mean_instantaneous_power_equals_active_power() {
        let s = sample_waveforms(230.0, 5.0, 0.8, 50.0, WaveformSettings::default()).unwrap();
        assert!((s.average_power() - 920.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_power_factor_outside_unit_interval() {
        for pf in [0.0, 1.5] {
            assert!(matches!(
                sample_waveforms(230.0, 5.0, pf, 50.0, WaveformSettings::default()),
                Err(RenderError::InvalidPowerFactor(v)) if v == pf
            ));
        }
    }

    #[test]
    fn rejects_bad_settings() {
        let settings = WaveformSettings {
            cycles: 3.0,
            samples: 1,
        };
        assert!(matches!(
            sample_waveforms(230.0, 5.0, 0.8, 50.0, settings),
            Err(RenderError::InvalidSettings(_))
        ));
    }
}
