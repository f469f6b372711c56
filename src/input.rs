use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::app::AppError;
use crate::i18n::{keys, Translator};

/// 한 줄씩 응답을 돌려주는 입력 공급자. 콘솔 외의 입력원(테스트, 스크립트)으로 바꿔 끼울 수 있다.
pub trait InputProvider {
    /// 프롬프트를 보여주고 한 줄을 읽는다. 줄바꿈은 포함될 수 있다.
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError>;
}

/// 표준 입력/출력 기반 공급자.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputProvider for StdinInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut buf = String::new();
        let n = io::stdin().lock().read_line(&mut buf)?;
        if n == 0 {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "EOF when reading a line",
            )));
        }
        Ok(buf)
    }
}

/// 미리 정해 둔 응답을 순서대로 돌려주는 공급자. 받은 프롬프트를 기록한다.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// 지금까지 표시된 프롬프트.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl InputProvider for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            AppError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "EOF when reading a line",
            ))
        })
    }
}

/// 검증 전 원시 측정값. 역률 범위는 전력 계산 단계에서 확인한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRequest {
    pub voltage_rms: f64,
    pub current_rms: f64,
    pub power_factor: f64,
    pub frequency_hz: f64,
}

/// 입력 문자열을 실수로 변환한다. 앞뒤 공백은 무시한다.
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, AppError> {
    let trimmed = text.trim();
    trimmed.parse::<f64>().map_err(|_| AppError::InvalidInput {
        field,
        text: trimmed.to_string(),
    })
}

/// 전압, 전류, 역률, 주파수 순으로 입력받는다. 주파수를 비우면 `default_frequency_hz`.
/// 숫자가 아닌 입력은 재시도 없이 `InvalidInput`으로 끝난다.
pub fn read_measurement(
    input: &mut dyn InputProvider,
    tr: &Translator,
    default_frequency_hz: f64,
) -> Result<MeasurementRequest, AppError> {
    let voltage_rms = parse_number("voltage", &input.read_line(&tr.t(keys::PROMPT_VOLTAGE))?)?;
    let current_rms = parse_number("current", &input.read_line(&tr.t(keys::PROMPT_CURRENT))?)?;
    let power_factor = parse_number(
        "power factor",
        &input.read_line(&tr.t(keys::PROMPT_POWER_FACTOR))?,
    )?;
    let freq_prompt = tr.fmt(
        keys::PROMPT_FREQUENCY,
        &[("default", format!("{default_frequency_hz}"))],
    );
    let freq_text = input.read_line(&freq_prompt)?;
    let frequency_hz = if freq_text.trim().is_empty() {
        default_frequency_hz
    } else {
        parse_number("frequency", &freq_text)?
    };

    let request = MeasurementRequest {
        voltage_rms,
        current_rms,
        power_factor,
        frequency_hz,
    };
    debug!(?request, "measurement read");
    Ok(request)
}
