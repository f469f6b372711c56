//! 결과 표시용 전기 단위 정의 및 변환 모듈 모음.

pub mod capacitance;
pub mod power;

pub use capacitance::{convert_capacitance, CapacitanceUnit};
pub use power::{convert_power, PowerUnit};

/// 숫자를 표시용 문자열로 만든다. 가장 짧은 왕복 표현을 쓰며, 정수 값은 `1150.0`처럼
/// 소수점 한 자리를 남긴다.
pub fn display_number(value: f64) -> String {
    let s = format!("{value}");
    if value.is_finite() && !s.contains(['.', 'e']) {
        format!("{s}.0")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_keep_one_decimal() {
        assert_eq!(display_number(1150.0), "1150.0");
        assert_eq!(display_number(0.0), "0.0");
        assert_eq!(display_number(-36.87), "-36.87");
        assert_eq!(display_number(23.32), "23.32");
    }

    #[test]
    fn keeps_every_significant_digit() {
        assert_eq!(display_number(0.1234567), "0.1234567");
        assert_eq!(display_number(0.00002332), "0.00002332");
        assert_eq!(display_number(f64::INFINITY), "inf");
    }
}
