#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::path::PathBuf;

use ac_power_analyzer::{
    config,
    i18n::{self, keys, Translator},
    plot_view,
    power::{self, PowerMeasurementInput},
    telemetry,
    ui_cli::{capacitance_parts, format_power, power_parts},
    units::display_number,
    waveform::{self, WaveformSettings},
};
use clap::Parser;
use eframe::{egui, App, Frame};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(version, about = "Single-phase AC power analyzer (GUI)")]
struct Cli {
    /// 표시 언어(auto/ko/en)
    #[arg(short = 'L', long)]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<(), eframe::Error> {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let app_cfg = config::load_from(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(app_cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, Some(std::path::Path::new("locales")));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    let title = tr.t(keys::GUI_TITLE);
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Some(path) = app_cfg.font_path.as_deref() {
                if let Err(e) = plot_view::load_custom_font(&cc.egui_ctx, path) {
                    eprintln!("Font error: {e}");
                }
            }
            Box::new(GuiApp::new(app_cfg, tr, cli.config))
        }),
    )
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ThemeChoice {
    System,
    Light,
    Dark,
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: Translator,
    voltage: f64,
    current: f64,
    power_factor: f64,
    frequency: f64,
    cycles: f64,
    show_power: bool,
    theme: ThemeChoice,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, tr: Translator, config_path: PathBuf) -> Self {
        Self {
            voltage: 230.0,
            current: 5.0,
            power_factor: 0.8,
            frequency: config.default_frequency_hz,
            cycles: config.waveform.cycles,
            show_power: false,
            theme: ThemeChoice::System,
            status: None,
            config,
            config_path,
            tr,
        }
    }

    fn settings(&self) -> WaveformSettings {
        WaveformSettings {
            cycles: self.cycles,
            ..self.config.waveform
        }
    }

    fn apply_theme(&self, ctx: &egui::Context, frame: &Frame) {
        let visuals = match self.theme {
            ThemeChoice::System => frame
                .info()
                .system_theme
                .unwrap_or(eframe::Theme::Dark)
                .egui_visuals(),
            ThemeChoice::Light => egui::Visuals::light(),
            ThemeChoice::Dark => egui::Visuals::dark(),
        };
        ctx.set_visuals(visuals);
    }

    fn theme_label(&self, theme: ThemeChoice) -> String {
        self.tr.t(match theme {
            ThemeChoice::System => keys::GUI_THEME_SYSTEM,
            ThemeChoice::Light => keys::GUI_THEME_LIGHT,
            ThemeChoice::Dark => keys::GUI_THEME_DARK,
        })
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::GUI_INPUTS));
        egui::Grid::new("input_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(self.tr.t(keys::GUI_VOLTAGE));
                ui.add(
                    egui::DragValue::new(&mut self.voltage)
                        .speed(1.0)
                        .clamp_range(0.0..=1.0e6),
                );
                ui.end_row();

                ui.label(self.tr.t(keys::GUI_CURRENT));
                ui.add(
                    egui::DragValue::new(&mut self.current)
                        .speed(0.1)
                        .clamp_range(0.0..=1.0e5),
                );
                ui.end_row();

                ui.label(self.tr.t(keys::GUI_POWER_FACTOR));
                ui.add(
                    egui::DragValue::new(&mut self.power_factor)
                        .speed(0.005)
                        .fixed_decimals(3)
                        .clamp_range(0.0..=1.0),
                );
                ui.end_row();

                ui.label(self.tr.t(keys::GUI_FREQUENCY));
                ui.add(
                    egui::DragValue::new(&mut self.frequency)
                        .speed(0.5)
                        .clamp_range(1.0..=1000.0),
                );
                ui.end_row();

                ui.label(self.tr.t(keys::GUI_CYCLES));
                ui.add(
                    egui::DragValue::new(&mut self.cycles)
                        .speed(0.1)
                        .clamp_range(0.5..=20.0),
                );
                ui.end_row();

                ui.label(self.tr.t(keys::GUI_TARGET_PF));
                ui.add(
                    egui::DragValue::new(&mut self.config.target_power_factor)
                        .speed(0.005)
                        .fixed_decimals(3)
                        .clamp_range(0.5..=1.0),
                );
                ui.end_row();
            });
        ui.checkbox(&mut self.show_power, self.tr.t(keys::GUI_SHOW_POWER));
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::GUI_RESULTS));
        let target = self.config.target_power_factor;
        let units = self.config.display_units;
        let computed = PowerMeasurementInput::new(
            self.voltage,
            self.current,
            self.power_factor,
            self.frequency,
        )
        .and_then(|m| {
            let result = power::calculate_power_with_target(&m, target)?;
            let correction = power::correction_summary(&m, target)?;
            Ok((result, correction))
        });
        let (result, correction) = match computed {
            Ok(v) => v,
            Err(e) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
                return;
            }
        };

        egui::Grid::new("result_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                let rows = [
                    ("S", format_power(result.apparent_power_va, units.power, "VA")),
                    ("P", format_power(result.active_power_w, units.power, "W")),
                    ("Q", format_power(result.reactive_power_var, units.power, "VAR")),
                    ("θ", format!("{}° (Lagging)", display_number(result.phase_angle_deg))),
                    ("cosθ", display_number(result.power_factor)),
                ];
                for (name, value) in rows {
                    ui.label(name);
                    ui.monospace(value);
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.heading(self.tr.t(keys::GUI_CORRECTION));
        if result.needs_correction() {
            ui.label(self.tr.fmt(
                keys::CORRECTION_TARGET,
                &[("value", display_number(target))],
            ));
            let (capacitance, symbol) =
                capacitance_parts(result.required_capacitance_uf, units.capacitance);
            ui.label(self.tr.fmt(
                keys::CORRECTION_CAPACITOR,
                &[("value", capacitance), ("unit", symbol.to_string())],
            ));
            let (rating, unit) =
                power_parts(correction.capacitor_reactive_power_var, units.power, "VAR");
            ui.label(self.tr.fmt(
                keys::CORRECTION_CAPACITOR_RATING,
                &[("value", rating), ("unit", unit)],
            ));
        } else {
            ui.label(self.tr.t(keys::CORRECTION_OPTIMAL));
        }
    }

    fn ui_plots(&mut self, ui: &mut egui::Ui) {
        let settings = self.settings();
        let plots = waveform::waveform_plot(
            self.voltage,
            self.current,
            self.power_factor,
            self.frequency,
            settings,
        )
        .and_then(|w| {
            let p = waveform::phasor_plot(self.voltage, self.current, self.power_factor)?;
            Ok((w, p))
        });
        match plots {
            Ok((waveforms, phasor)) => {
                let height = ((ui.available_height() - 100.0) / 2.0).max(160.0);
                plot_view::show_waveform_plot(ui, &waveforms, height, self.show_power);
                if self.show_power {
                    ui.small(self.tr.fmt(
                        keys::GUI_AVERAGE_POWER,
                        &[("value", display_number(power::round2(waveforms.series.average_power())))],
                    ));
                }
                ui.add_space(8.0);
                plot_view::show_phasor_plot(ui, &phasor, height);
            }
            Err(e) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
        }
    }

    fn save_settings(&mut self) {
        self.config.default_frequency_hz = self.frequency;
        self.config.waveform.cycles = self.cycles;
        self.status = Some(match self.config.save_to(&self.config_path) {
            Ok(()) => self.tr.fmt(
                keys::GUI_SAVED,
                &[("path", self.config_path.display().to_string())],
            ),
            Err(e) => e.to_string(),
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        self.apply_theme(ctx, frame);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::GUI_TITLE));
                ui.separator();
                let labels = [ThemeChoice::System, ThemeChoice::Light, ThemeChoice::Dark]
                    .map(|t| (t, self.theme_label(t)));
                egui::ComboBox::from_id_source("theme")
                    .selected_text(self.theme_label(self.theme))
                    .show_ui(ui, |ui| {
                        for (theme, label) in labels {
                            ui.selectable_value(&mut self.theme, theme, label);
                        }
                    });
                if ui.button(self.tr.t(keys::GUI_SAVE_SETTINGS)).clicked() {
                    self.save_settings();
                }
                if let Some(status) = &self.status {
                    ui.small(status.as_str());
                }
            });
        });

        egui::SidePanel::left("inputs_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.ui_inputs(ui);
                ui.separator();
                self.ui_results(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_plots(ui);
        });
    }
}
