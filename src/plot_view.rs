//! egui_plot 기반 그래프 표시. `PlotSink` 구현과 독립 실행 그래프 창을 제공한다.

use std::fs;
use std::path::Path;

use eframe::egui::{self, Color32};
use egui_plot::{Arrows, Corner, HLine, Legend, Line, LineStyle, Plot, PlotPoints, VLine};
use tracing::{debug, warn};

use crate::waveform::{PhasorPlot, PlotSink, RenderError, WaveformPlot};

const VOLTAGE_COLOR: Color32 = Color32::from_rgb(40, 90, 220);
const CURRENT_COLOR: Color32 = Color32::from_rgb(220, 50, 50);
const POWER_COLOR: Color32 = Color32::from_rgb(60, 160, 80);

/// 준비된 그래프를 보관해 두었다가 egui 창에서 그리는 출력 대상.
#[derive(Debug, Default)]
pub struct EguiPlotSink {
    waveforms: Option<WaveformPlot>,
    phasor: Option<PhasorPlot>,
}

impl EguiPlotSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 두 그래프가 모두 준비되었는지 여부.
    pub fn is_ready(&self) -> bool {
        self.waveforms.is_some() && self.phasor.is_some()
    }

    pub fn waveforms(&self) -> Option<&WaveformPlot> {
        self.waveforms.as_ref()
    }

    pub fn phasor(&self) -> Option<&PhasorPlot> {
        self.phasor.as_ref()
    }
}

impl PlotSink for EguiPlotSink {
    fn draw_waveforms(&mut self, plot: &WaveformPlot) -> Result<(), RenderError> {
        self.waveforms = Some(plot.clone());
        Ok(())
    }

    fn draw_phasor(&mut self, plot: &PhasorPlot) -> Result<(), RenderError> {
        self.phasor = Some(plot.clone());
        Ok(())
    }
}

/// 시간 영역 파형 그래프를 그린다. `show_power`면 순시 전력 p(t)를 점선으로 겹친다.
pub fn show_waveform_plot(ui: &mut egui::Ui, plot: &WaveformPlot, height: f32, show_power: bool) {
    ui.heading(plot.title.as_str());
    Plot::new("ac_waveforms")
        .height(height)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(plot.x_label)
        .y_axis_label(plot.y_label)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::new(plot.series.voltage_points()))
                    .name(plot.voltage_name)
                    .color(VOLTAGE_COLOR)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(PlotPoints::new(plot.series.current_points()))
                    .name(plot.current_name)
                    .color(CURRENT_COLOR)
                    .width(2.0),
            );
            if show_power {
                plot_ui.line(
                    Line::new(PlotPoints::new(plot.series.power_points()))
                        .name("Power p(t) (W)")
                        .color(POWER_COLOR)
                        .style(LineStyle::Dashed { length: 6.0 }),
                );
            }
        });
}

/// 페이저도를 그린다. 축 범위는 ±1.3·V, 가로세로 비율은 1:1로 고정한다.
pub fn show_phasor_plot(ui: &mut egui::Ui, plot: &PhasorPlot, height: f32) {
    let d = &plot.diagram;
    let limit = d.axis_limit;
    let axis_color = ui.visuals().text_color();
    ui.heading(plot.title);
    Plot::new("phasor_diagram")
        .height(height)
        .data_aspect(1.0)
        .include_x(-limit)
        .include_x(limit)
        .include_y(-limit)
        .include_y(limit)
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            plot_ui.hline(HLine::new(0.0).color(axis_color).width(1.0));
            plot_ui.vline(VLine::new(0.0).color(axis_color).width(1.0));
            plot_ui.arrows(
                Arrows::new(
                    PlotPoints::new(vec![[0.0, 0.0]]),
                    PlotPoints::new(vec![d.voltage_tip()]),
                )
                .name(&d.voltage_label)
                .color(VOLTAGE_COLOR),
            );
            plot_ui.arrows(
                Arrows::new(
                    PlotPoints::new(vec![[0.0, 0.0]]),
                    PlotPoints::new(vec![d.current_display_tip()]),
                )
                .name(&d.current_label)
                .color(CURRENT_COLOR),
            );
        });
}

/// 바이너리 폰트 바이트를 egui에 등록한다. 기본 폰트보다 앞에 둔다.
pub fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 사용자가 지정한 경로의 폰트를 egui에 등록한다.
pub fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    debug!(path, "custom font loaded");
    Ok(())
}

struct PlotWindow {
    waveforms: WaveformPlot,
    phasor: PhasorPlot,
}

impl eframe::App for PlotWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // 제목 두 줄과 간격을 뺀 나머지를 두 그래프가 나눠 쓴다.
            let height = ((ui.available_height() - 80.0) / 2.0).max(120.0);
            show_waveform_plot(ui, &self.waveforms, height, false);
            ui.add_space(8.0);
            show_phasor_plot(ui, &self.phasor, height);
        });
    }
}

/// 파형 그래프와 페이저도를 위아래로 배치한 창을 띄운다. 창을 닫을 때까지 반환하지 않는다.
pub fn open_plot_window(
    sink: EguiPlotSink,
    title: &str,
    font_path: Option<String>,
) -> Result<(), RenderError> {
    let (Some(waveforms), Some(phasor)) = (sink.waveforms, sink.phasor) else {
        return Err(RenderError::Backend("표시할 그래프가 없습니다.".into()));
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        title,
        options,
        Box::new(move |cc| {
            if let Some(path) = font_path.as_deref() {
                if let Err(e) = load_custom_font(&cc.egui_ctx, path) {
                    warn!(error = %e, "font load failed");
                }
            }
            Box::new(PlotWindow { waveforms, phasor })
        }),
    )
    .map_err(|e| RenderError::Backend(e.to_string()))
}
