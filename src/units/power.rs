use serde::{Deserialize, Serialize};

/// 전력 표시 배율. S/P/Q 모두 같은 배율을 쓰며 단위 기호(VA, W, VAR)만 다르다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUnit {
    /// VA, W, VAR
    Base,
    /// kVA, kW, kVAR
    Kilo,
}

impl PowerUnit {
    /// 단위 기호 앞에 붙는 접두어.
    pub fn prefix(&self) -> &'static str {
        match self {
            PowerUnit::Base => "",
            PowerUnit::Kilo => "k",
        }
    }

    fn factor(&self) -> f64 {
        match self {
            PowerUnit::Base => 1.0,
            PowerUnit::Kilo => 1000.0,
        }
    }
}

/// 전력 값을 변환한다.
pub fn convert_power(value: f64, from: PowerUnit, to: PowerUnit) -> f64 {
    value * from.factor() / to.factor()
}
