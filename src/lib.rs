//! 단상 교류 전력 계산과 파형/페이저 표시를 라이브러리로 분리하여 CLI와 GUI가 같은 계산 코어를 쓰도록 한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod input;
pub mod plot_view;
pub mod power;
pub mod telemetry;
pub mod ui_cli;
pub mod units;
pub mod waveform;
