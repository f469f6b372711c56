use serde::{Deserialize, Serialize};

/// 정전용량 단위. 내부 기준은 패럿(F)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacitanceUnit {
    Farad,
    Millifarad,
    Microfarad,
    Nanofarad,
}

impl CapacitanceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            CapacitanceUnit::Farad => "F",
            CapacitanceUnit::Millifarad => "mF",
            CapacitanceUnit::Microfarad => "µF",
            CapacitanceUnit::Nanofarad => "nF",
        }
    }
}

impl CapacitanceUnit {
    /// 패럿 기준 10의 지수.
    fn exponent(&self) -> i32 {
        match self {
            CapacitanceUnit::Farad => 0,
            CapacitanceUnit::Millifarad => -3,
            CapacitanceUnit::Microfarad => -6,
            CapacitanceUnit::Nanofarad => -9,
        }
    }
}

/// 정전용량을 변환한다. 10의 거듭제곱을 곱하거나 나누기만 하므로 1e-6 같은
/// 부정확한 배율을 거치지 않는다.
pub fn convert_capacitance(value: f64, from: CapacitanceUnit, to: CapacitanceUnit) -> f64 {
    let shift = from.exponent() - to.exponent();
    let scale = 10f64.powi(shift.abs());
    if shift >= 0 {
        value * scale
    } else {
        value / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn microfarad_to_nanofarad() {
        let nf = convert_capacitance(23.32, CapacitanceUnit::Microfarad, CapacitanceUnit::Nanofarad);
        assert!((nf - 23_320.0).abs() < 1e-6);
    }

    #[test]
    fn microfarad_to_farad_keeps_digits() {
        let f = convert_capacitance(23.32, CapacitanceUnit::Microfarad, CapacitanceUnit::Farad);
        assert_eq!(crate::units::display_number(f), "0.00002332");
    }

    #[test]
    fn same_unit_is_identity() {
        assert_eq!(
            convert_capacitance(23.32, CapacitanceUnit::Microfarad, CapacitanceUnit::Microfarad),
            23.32
        );
    }
}
