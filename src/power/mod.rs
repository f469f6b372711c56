//! 단상 교류 전력 계산 모듈 모음.
//! 피상/유효/무효 전력, 위상각, 역률 보상용 커패시터 용량 산정으로 구성한다.

pub mod calculator;
pub mod correction;

pub use calculator::*;
pub use correction::*;

/// 소수점 둘째 자리로 반올림한다. 결과 표시용 값은 모두 이 함수를 거친다.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 역률이 (0, 1] 구간에 있는지 확인한다. NaN은 거부된다.
pub fn is_valid_power_factor(pf: f64) -> bool {
    pf > 0.0 && pf <= 1.0
}
