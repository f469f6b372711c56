//! 입력 → 계산 → 출력 → 그래프 세션 전체 흐름 테스트.
use ac_power_analyzer::{
    app::{run_session, AppError, ErrorKind},
    config::Config,
    i18n::Translator,
    input::ScriptedInput,
    plot_view::EguiPlotSink,
    ui_cli::format_error,
    units::{CapacitanceUnit, PowerUnit},
    waveform::{PlotSink, RenderError},
};

fn run(
    answers: &[&str],
    config: &Config,
    sink: Option<&mut dyn PlotSink>,
) -> (Result<f64, AppError>, String) {
    let tr = Translator::new("en");
    let mut input = ScriptedInput::new(answers.iter().copied());
    let mut out = Vec::new();
    let res = run_session(&mut input, &mut out, config, &tr, sink).map(|r| r.active_power_w);
    (res, String::from_utf8(out).expect("utf8"))
}

#[test]
fn prints_results_and_correction_suggestion() {
    let (res, out) = run(&["230", "5", "0.8", ""], &Config::default(), None);
    assert_eq!(res.unwrap(), 920.0);
    assert!(out.contains("Single-Phase AC Power Analyzer"));
    assert!(out.contains("Apparent Power (S)   : 1150.0 VA"));
    assert!(out.contains("Active Power (P)     : 920.0 W"));
    assert!(out.contains("Reactive Power (Q)   : 690.0 VAR"));
    assert!(out.contains("Phase Angle (θ)      : 36.87° (Lagging)"));
    assert!(out.contains("Power Factor (cosθ)  : 0.8"));
    assert!(out.contains("PF CORRECTION SUGGESTION"));
    assert!(out.contains("Target Power Factor : 0.95"));
    assert!(out.contains("Required Capacitor  : 23.32 µF"));
    assert!(!out.contains("No correction needed"));
}

#[test]
fn unity_power_factor_prints_no_correction_line() {
    let (res, out) = run(&["230", "5", "1", "60"], &Config::default(), None);
    assert!(res.is_ok());
    assert!(out.contains("Reactive Power (Q)   : 0.0 VAR"));
    assert!(out.contains("Power factor is optimal. No correction needed."));
    assert!(!out.contains("Required Capacitor"));
}

#[test]
fn invalid_power_factor_never_prints_results() {
    let (res, out) = run(&["230", "5", "1.5", "50"], &Config::default(), None);
    let err = res.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(!out.contains("RESULTS"));
    let tr = Translator::new("en");
    assert!(format_error(&err, &tr).starts_with("\n[Error]: Invalid numerical input."));
}

#[test]
fn non_numeric_text_is_invalid_input() {
    let (res, out) = run(&["abc"], &Config::default(), None);
    let err = res.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput { field: "voltage", .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(!out.contains("RESULTS"));
}

#[test]
fn plots_are_prepared_for_the_window() {
    let mut sink = EguiPlotSink::new();
    let (res, _) = run(&["230", "5", "0.8", "50"], &Config::default(), Some(&mut sink));
    assert!(res.is_ok());
    assert!(sink.is_ready());
    let phasor = sink.phasor().unwrap();
    assert!((phasor.diagram.axis_limit - 299.0).abs() < 1e-9);
    assert_eq!(sink.waveforms().unwrap().series.len(), 1000);
}

#[test]
fn zero_current_fails_in_rendering_after_results() {
    let mut sink = EguiPlotSink::new();
    let (res, out) = run(&["230", "0", "0.8", "50"], &Config::default(), Some(&mut sink));
    let err = res.unwrap_err();
    assert!(matches!(
        err,
        AppError::Render(RenderError::DegenerateScale { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    // 계산 결과는 이미 출력된 뒤 그래프 단계에서 실패한다.
    assert!(out.contains("RESULTS"));
    assert!(!sink.is_ready());
    let tr = Translator::new("en");
    assert!(format_error(&err, &tr).starts_with("\n[Error]: An unexpected issue occurred:"));
}

#[test]
fn display_units_follow_config() {
    let mut config = Config::default();
    config.display_units.power = PowerUnit::Kilo;
    config.display_units.capacitance = CapacitanceUnit::Nanofarad;
    let (res, out) = run(&["230", "5", "0.8", "50"], &config, None);
    assert!(res.is_ok());
    assert!(out.contains("1.15 kVA"));
    assert!(out.contains("0.92 kW"));
    assert!(out.contains("23320.0 nF"));
}

#[test]
fn power_factor_is_printed_unrounded() {
    let (res, out) = run(&["230", "5", "0.1234567", ""], &Config::default(), None);
    assert!(res.is_ok());
    assert!(out.contains("Power Factor (cosθ)  : 0.1234567\n"));
}

#[test]
fn farad_display_keeps_significant_digits() {
    let mut config = Config::default();
    config.display_units.capacitance = CapacitanceUnit::Farad;
    let (res, out) = run(&["230", "5", "0.8", ""], &config, None);
    assert!(res.is_ok());
    assert!(out.contains("Required Capacitor  : 0.00002332 F"));
}

#[test]
fn korean_prompts_are_used() {
    let tr = Translator::new("ko");
    let mut input = ScriptedInput::new(["230", "5", "0.8", ""]);
    let mut out = Vec::new();
    run_session(&mut input, &mut out, &Config::default(), &tr, None).unwrap();
    assert!(input.prompts()[0].starts_with("RMS 전압"));
    assert!(String::from_utf8(out).unwrap().contains("역률 보상 제안"));
}
