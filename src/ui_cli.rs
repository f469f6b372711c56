use crate::app::{AppError, ErrorKind};
use crate::config::DisplayUnits;
use crate::i18n::{keys, Translator};
use crate::power::{CorrectionSummary, PowerResult};
use crate::units::{
    convert_capacitance, convert_power, display_number, CapacitanceUnit, PowerUnit,
};

/// 기준 단위(VA/W/VAR) 값을 표시 배율에 맞춰 값 문자열과 `kVAR` 같은 단위로 나눈다.
pub fn power_parts(value: f64, unit: PowerUnit, symbol: &str) -> (String, String) {
    (
        display_number(convert_power(value, PowerUnit::Base, unit)),
        format!("{}{symbol}", unit.prefix()),
    )
}

/// `1.15 kVA` 형태의 전력 표시 문자열.
pub fn format_power(value: f64, unit: PowerUnit, symbol: &str) -> String {
    let (value, unit) = power_parts(value, unit, symbol);
    format!("{value} {unit}")
}

/// µF 값을 표시 단위로 바꿔 값 문자열과 단위 기호를 돌려준다.
pub fn capacitance_parts(microfarads: f64, unit: CapacitanceUnit) -> (String, &'static str) {
    let value = convert_capacitance(microfarads, CapacitanceUnit::Microfarad, unit);
    (display_number(value), unit.symbol())
}

/// 시작 배너.
pub fn format_banner(tr: &Translator) -> String {
    let rule = "=".repeat(50);
    format!("{rule}\n{}\n{rule}", tr.t(keys::BANNER_TITLE))
}

/// 결과 블록. 보상이 필요할 때만 커패시터 제안을 포함한다.
pub fn format_results(
    result: &PowerResult,
    correction: &CorrectionSummary,
    units: &DisplayUnits,
    tr: &Translator,
) -> String {
    let power_line = |key: &str, value: f64, symbol: &str| {
        let (value, unit) = power_parts(value, units.power, symbol);
        tr.fmt(key, &[("value", value), ("unit", unit)])
    };
    let stars = "*".repeat(20);
    let mut lines = vec![
        String::new(),
        format!("{stars}{}{stars}", tr.t(keys::RESULTS_HEADING)),
        power_line(keys::RESULTS_APPARENT, result.apparent_power_va, "VA"),
        power_line(keys::RESULTS_ACTIVE, result.active_power_w, "W"),
        power_line(keys::RESULTS_REACTIVE, result.reactive_power_var, "VAR"),
        tr.fmt(
            keys::RESULTS_PHASE_ANGLE,
            &[("value", display_number(result.phase_angle_deg))],
        ),
        tr.fmt(
            keys::RESULTS_POWER_FACTOR,
            &[("value", display_number(result.power_factor))],
        ),
    ];

    lines.push(String::new());
    if result.needs_correction() {
        let bangs = "!".repeat(5);
        let (capacitance, symbol) =
            capacitance_parts(result.required_capacitance_uf, units.capacitance);
        lines.push(format!("{bangs}{}{bangs}", tr.t(keys::CORRECTION_HEADING)));
        lines.push(tr.fmt(
            keys::CORRECTION_TARGET,
            &[("value", display_number(correction.target_power_factor))],
        ));
        lines.push(tr.fmt(
            keys::CORRECTION_CAPACITOR,
            &[("value", capacitance), ("unit", symbol.to_string())],
        ));
        lines.push(power_line(
            keys::CORRECTION_CAPACITOR_RATING,
            correction.capacitor_reactive_power_var,
            "VAR",
        ));
    } else {
        lines.push(tr.t(keys::CORRECTION_OPTIMAL));
    }
    lines.push("*".repeat(49));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// 경계에서 출력할 오류 메시지.
pub fn format_error(err: &AppError, tr: &Translator) -> String {
    let key = match err.kind() {
        ErrorKind::InvalidInput => keys::ERROR_INVALID_INPUT,
        ErrorKind::Unexpected => keys::ERROR_UNEXPECTED,
    };
    tr.fmt(key, &[("error", err.to_string())])
}
