//! 대표 측정값에 대한 전력 계산 회귀 테스트.
use ac_power_analyzer::power::{
    calculate_power, calculate_power_with_target, PowerError, PowerMeasurementInput,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

#[test]
fn lagging_load_230v_5a_pf08() {
    let r = calculate_power(230.0, 5.0, 0.8, 50.0).expect("valid input");
    assert_close("S", r.apparent_power_va, 1150.0, 1e-9);
    assert_close("P", r.active_power_w, 920.0, 1e-9);
    assert_close("Q", r.reactive_power_var, 1150.0 * 0.6, 1e-9);
    assert_close("theta", r.phase_angle_deg, 36.87, 1e-9);
    assert!(r.required_capacitance_uf > 0.0);
    assert_close("C", r.required_capacitance_uf, 23.32, 1e-9);
}

#[test]
fn unity_power_factor_is_purely_resistive() {
    for (v, i) in [(230.0, 5.0), (110.0, 0.37), (11_000.0, 123.4)] {
        let r = calculate_power(v, i, 1.0, 50.0).expect("valid input");
        assert_eq!(r.reactive_power_var, 0.0, "V={v} I={i}");
        assert_eq!(r.required_capacitance_uf, 0.0);
        assert_eq!(r.phase_angle_deg, 0.0);
    }
}

#[test]
fn above_target_needs_no_capacitor() {
    let r = calculate_power(230.0, 5.0, 0.96, 50.0).expect("valid input");
    assert!(r.reactive_power_var > 0.0);
    assert_eq!(r.required_capacitance_uf, 0.0);
    assert!(!r.needs_correction());
}

#[test]
fn exactly_at_target_needs_no_capacitor() {
    let r = calculate_power(230.0, 5.0, 0.95, 50.0).expect("valid input");
    assert_eq!(r.required_capacitance_uf, 0.0);
}

#[test]
fn zero_power_factor_is_rejected() {
    assert_eq!(
        calculate_power(230.0, 5.0, 0.0, 50.0),
        Err(PowerError::InvalidPowerFactor(0.0))
    );
}

#[test]
fn power_factor_above_one_is_rejected() {
    assert_eq!(
        calculate_power(230.0, 5.0, 1.5, 50.0),
        Err(PowerError::InvalidPowerFactor(1.5))
    );
    assert!(PowerMeasurementInput::new(230.0, 5.0, -0.5, 50.0).is_err());
}

#[test]
fn default_frequency_is_50hz() {
    let m = PowerMeasurementInput::with_default_frequency(230.0, 5.0, 0.8).unwrap();
    assert_eq!(m.frequency_hz(), 50.0);
    let r = calculate_power_with_target(&m, 0.95).unwrap();
    assert_eq!(r, calculate_power(230.0, 5.0, 0.8, 50.0).unwrap());
}

#[test]
fn configurable_target_raises_required_capacitance() {
    let m = PowerMeasurementInput::new(230.0, 5.0, 0.8, 50.0).unwrap();
    let c95 = calculate_power_with_target(&m, 0.95).unwrap().required_capacitance_uf;
    let c99 = calculate_power_with_target(&m, 0.99).unwrap().required_capacitance_uf;
    assert!(c99 > c95);
    // 목표가 현재 역률보다 낮으면 보상 불필요
    let low = calculate_power_with_target(&m, 0.7).unwrap();
    assert_eq!(low.required_capacitance_uf, 0.0);
}

#[test]
fn negative_current_is_not_validated() {
    // 음수 전류는 검증하지 않으며 P ≤ 0이므로 보상도 계산하지 않는다.
    let r = calculate_power(230.0, -5.0, 0.8, 50.0).expect("only pf is validated");
    assert_close("S", r.apparent_power_va, -1150.0, 1e-9);
    assert_eq!(r.required_capacitance_uf, 0.0);
}
