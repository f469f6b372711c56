use tracing::debug;

use super::{build_phasor, sample_waveforms, PhasorDiagram, RenderError, WaveformSeries, WaveformSettings};
use crate::units::display_number;

/// 시간 영역 파형 그래프 한 장.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformPlot {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub voltage_name: &'static str,
    pub current_name: &'static str,
    pub series: WaveformSeries,
}

/// 페이저도 한 장. 축 비율은 항상 1:1로 그린다.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasorPlot {
    pub title: &'static str,
    pub diagram: PhasorDiagram,
}

/// 그래프를 그리는 출력 대상. 계산 코어는 특정 그래픽 백엔드를 알지 못한다.
pub trait PlotSink {
    fn draw_waveforms(&mut self, plot: &WaveformPlot) -> Result<(), RenderError>;
    fn draw_phasor(&mut self, plot: &PhasorPlot) -> Result<(), RenderError>;
}

/// 파형 그래프 데이터를 준비한다.
pub fn waveform_plot(
    voltage_rms: f64,
    current_rms: f64,
    power_factor: f64,
    frequency_hz: f64,
    settings: WaveformSettings,
) -> Result<WaveformPlot, RenderError> {
    let series = sample_waveforms(voltage_rms, current_rms, power_factor, frequency_hz, settings)?;
    Ok(WaveformPlot {
        title: format!("AC Waveforms ({}Hz)", display_number(frequency_hz)),
        x_label: "Time (ms)",
        y_label: "Amplitude",
        voltage_name: "Voltage (V)",
        current_name: "Current (A)",
        series,
    })
}

/// 페이저도 데이터를 준비한다.
pub fn phasor_plot(
    voltage_rms: f64,
    current_rms: f64,
    power_factor: f64,
) -> Result<PhasorPlot, RenderError> {
    Ok(PhasorPlot {
        title: "Phasor Diagram (Scaled for Visibility)",
        diagram: build_phasor(voltage_rms, current_rms, power_factor)?,
    })
}

/// 파형 그래프와 페이저도를 순서대로 만들어 `sink`에 넘긴다.
/// 두 그래프를 모두 준비한 뒤에 그리므로 실패 시 아무것도 그려지지 않는다.
pub fn render_waveforms(
    voltage_rms: f64,
    current_rms: f64,
    power_factor: f64,
    frequency_hz: f64,
    settings: WaveformSettings,
    sink: &mut dyn PlotSink,
) -> Result<(), RenderError> {
    let waveforms = waveform_plot(voltage_rms, current_rms, power_factor, frequency_hz, settings)?;
    let phasor = phasor_plot(voltage_rms, current_rms, power_factor)?;
    debug!(
        samples = waveforms.series.len(),
        scale_factor = phasor.diagram.scale_factor,
        "plots prepared"
    );
    sink.draw_waveforms(&waveforms)?;
    sink.draw_phasor(&phasor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        waveforms: Vec<WaveformPlot>,
        phasors: Vec<PhasorPlot>,
    }

    impl PlotSink for Recorder {
        fn draw_waveforms(&mut self, plot: &WaveformPlot) -> Result<(), RenderError> {
            self.waveforms.push(plot.clone());
            Ok(())
        }

        fn draw_phasor(&mut self, plot: &PhasorPlot) -> Result<(), RenderError> {
            self.phasors.push(plot.clone());
            Ok(())
        }
    }

    #[test]
    fn both_plots_reach_the_sink() {
        let mut rec = Recorder::default();
        render_waveforms(230.0, 5.0, 0.8, 50.0, WaveformSettings::default(), &mut rec).unwrap();
        assert_eq!(rec.waveforms.len(), 1);
        assert_eq!(rec.phasors.len(), 1);
        assert_eq!(rec.waveforms[0].title, "AC Waveforms (50.0Hz)");
        assert_eq!(rec.phasors[0].title, "Phasor Diagram (Scaled for Visibility)");
    }

    #[test]
    fn nothing_drawn_when_current_is_zero() {
        let mut rec = Recorder::default();
        let err = render_waveforms(230.0, 0.0, 0.8, 50.0, WaveformSettings::default(), &mut rec)
            .unwrap_err();
        assert!(matches!(err, RenderError::DegenerateScale { .. }));
        assert!(rec.waveforms.is_empty());
        assert!(rec.phasors.is_empty());
    }
}
